//! data.gov.il datasets used by the lookup

use serde::{Deserialize, Serialize};

/// One of the public registries queried during a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dataset {
    /// Private and commercial vehicle registry
    Vehicle,
    /// Personally imported vehicles
    PersonalImport,
    /// Importer price list
    Price,
    /// Model technical specifications
    TechnicalDetails,
    /// Disability parking tags
    Disability,
}

impl Dataset {
    /// CKAN resource id
    pub fn resource_id(&self) -> &'static str {
        match self {
            Dataset::Vehicle => "053cea08-09bc-40ec-8f7a-156f0677aff3",
            Dataset::PersonalImport => "03adc637-b6fe-402b-9937-7c3d3afc9140",
            Dataset::Price => "39f455bf-6db0-4926-859d-017f34eacbcb",
            Dataset::TechnicalDetails => "142afde2-6228-49f9-8a29-9b6c3a0cbe40",
            Dataset::Disability => "c8b9f9c8-4612-4068-934f-d4acd2e3c06e",
        }
    }

    /// Row limit requested from the datastore
    pub fn limit(&self) -> u32 {
        match self {
            Dataset::Vehicle => 10,
            Dataset::PersonalImport => 1,
            Dataset::Price => 100,
            Dataset::TechnicalDetails => 100,
            Dataset::Disability => 5,
        }
    }

    /// Prefix of cache file names for this dataset
    pub fn cache_kind(&self) -> &'static str {
        match self {
            Dataset::Vehicle => "veh",
            Dataset::PersonalImport => "personal",
            Dataset::Price => "price",
            Dataset::TechnicalDetails => "details",
            Dataset::Disability => "disability",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dataset::Vehicle => "vehicle",
            Dataset::PersonalImport => "personal-import",
            Dataset::Price => "price",
            Dataset::TechnicalDetails => "technical-details",
            Dataset::Disability => "disability",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rechev_store::ENTRY_KINDS;

    #[test]
    fn test_cache_kinds_are_managed_by_store() {
        let all = [
            Dataset::Vehicle,
            Dataset::PersonalImport,
            Dataset::Price,
            Dataset::TechnicalDetails,
            Dataset::Disability,
        ];
        for dataset in all {
            assert!(ENTRY_KINDS.contains(&dataset.cache_kind()), "{}", dataset);
        }
    }
}
