//! Background search tasks
//!
//! Each search runs on its own thread and reports back over a channel that
//! the UI polls once per frame. Starting a new search replaces the task held
//! in the [`TaskSlot`]; the replaced task keeps running but its result is
//! never delivered.

use log::debug;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

/// State of a running task
#[derive(Debug, PartialEq)]
pub enum TaskPoll<T> {
    Pending,
    Ready(T),
    /// Worker ended without sending a result (it panicked)
    Lost,
}

/// A single search running on a background thread
pub struct SearchTask<T> {
    id: u64,
    plate: String,
    receiver: Receiver<T>,
}

impl<T: Send + 'static> SearchTask<T> {
    pub fn spawn<F>(id: u64, plate: &str, work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (sender, receiver) = channel();
        thread::spawn(move || {
            let result = work();
            // Receiver is gone when the task was superseded
            let _ = sender.send(result);
        });
        Self {
            id,
            plate: plate.to_string(),
            receiver,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }

    pub fn poll(&self) -> TaskPoll<T> {
        match self.receiver.try_recv() {
            Ok(result) => TaskPoll::Ready(result),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => TaskPoll::Lost,
        }
    }
}

/// A finished task taken out of the slot
#[derive(Debug, PartialEq)]
pub struct TaskOutcome<T> {
    pub id: u64,
    pub plate: String,
    /// `None` when the worker died without a result
    pub result: Option<T>,
}

/// Holds at most one current search task
pub struct TaskSlot<T> {
    next_id: u64,
    current: Option<SearchTask<T>>,
}

impl<T: Send + 'static> TaskSlot<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            current: None,
        }
    }

    /// Start a task, superseding any task still running. Returns its id.
    pub fn start<F>(&mut self, plate: &str, work: F) -> u64
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        if let Some(old) = self.current.take() {
            debug!("search {} for {} superseded by search {}", old.id(), old.plate(), id);
        }
        self.current = Some(SearchTask::spawn(id, plate, work));
        id
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Id of the current task, if one is running
    pub fn current_id(&self) -> Option<u64> {
        self.current.as_ref().map(SearchTask::id)
    }

    /// Take the current task's result once it has finished
    pub fn poll(&mut self) -> Option<TaskOutcome<T>> {
        let task = self.current.as_ref()?;
        let result = match task.poll() {
            TaskPoll::Pending => return None,
            TaskPoll::Ready(result) => Some(result),
            TaskPoll::Lost => None,
        };
        let task = self.current.take()?;
        Some(TaskOutcome {
            id: task.id,
            plate: task.plate,
            result,
        })
    }
}

impl<T: Send + 'static> Default for TaskSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
