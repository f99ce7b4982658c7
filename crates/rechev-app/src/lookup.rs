//! Plate lookup pipeline
//!
//! Queries the vehicle registry (falling back to personal imports), then the
//! price list, technical details and disability tags, and merges the first
//! row of each into one [`LookupOutcome`].

use log::{debug, info};
use rechev_domain::model::DatasetQuery;
use rechev_domain::repository::{first_record, records, Datastore};
use rechev_domain::service::{
    backfill_importer, disability_status, join_codes, price_range, technical_overlay,
};
use rechev_infra::CkanClient;
use rechev_store::ResponseCache;
use rechev_types::{Error, LookupOutcome, Result, VehicleRecord};
use serde_json::Value;

use crate::config::Config;

/// Runs lookups against a datastore, through the response cache when set
pub struct LookupService<D> {
    datastore: D,
    cache: Option<ResponseCache>,
}

impl LookupService<CkanClient> {
    /// Service backed by the public datastore, cached unless disabled
    pub fn from_config(config: &Config, use_cache: bool) -> Result<Self> {
        let client = CkanClient::new(config.client_config())?;
        let cache = if use_cache && config.cache_enabled {
            Some(ResponseCache::new(config.cache_dir()?)?)
        } else {
            None
        };
        Ok(Self::new(client, cache))
    }
}

impl<D: Datastore> LookupService<D> {
    pub fn new(datastore: D, cache: Option<ResponseCache>) -> Self {
        Self { datastore, cache }
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    fn fetch(&self, query: &DatasetQuery) -> Result<Value> {
        match &self.cache {
            Some(cache) => cache.get_or_fetch(&query.cache_key(), || self.datastore.search(query)),
            None => self.datastore.search(query),
        }
    }

    /// Look up a plate and merge every dataset into one outcome.
    ///
    /// Fails with [`Error::NotFound`] when neither the vehicle nor the
    /// personal-import registry knows the plate. Any other failure aborts the
    /// whole lookup.
    pub fn lookup(&self, plate: &str) -> Result<LookupOutcome> {
        if plate.trim().is_empty() {
            return Err(Error::InvalidPlate);
        }

        let vehicles = self.fetch(&DatasetQuery::vehicle(plate))?;
        let (mut record, personal_import) = match first_record(&vehicles) {
            Some(row) => (VehicleRecord::from_map(row.clone()), false),
            None => {
                debug!("plate {} not in vehicle registry, trying personal imports", plate);
                let personal = self.fetch(&DatasetQuery::personal_import(plate))?;
                match first_record(&personal) {
                    Some(row) => (VehicleRecord::from_map(row.clone()), true),
                    None => return Err(Error::NotFound(plate.to_string())),
                }
            }
        };

        let codes = join_codes(&record);
        debug!(
            "join codes: degem_cd={} tozeret_cd={} shnat_yitzur={}",
            codes.model_code, codes.manufacturer_code, codes.year
        );

        let prices = self.fetch(&DatasetQuery::price(&codes.model_code, &codes.manufacturer_code))?;
        let details = self.fetch(&DatasetQuery::technical_details(
            &codes.model_code,
            &codes.manufacturer_code,
            &codes.year,
        ))?;
        let disability = self.fetch(&DatasetQuery::disability(plate))?;

        let price_rows = records(&prices);
        let price_range = price_range(&price_rows);
        backfill_importer(&mut record, &price_rows);

        if let Some(row) = first_record(&details) {
            record.set_technical(technical_overlay(row));
        } else {
            debug!("no technical details for plate {}", plate);
        }

        let disability = disability_status(first_record(&disability));

        info!(
            "plate {}: {} price rows, range {}-{}, disability tag {}, personal import {}",
            plate,
            price_rows.len(),
            price_range.min,
            price_range.max,
            disability.present,
            personal_import
        );

        Ok(LookupOutcome {
            plate: plate.to_string(),
            record,
            price_range,
            disability,
            personal_import,
        })
    }
}
