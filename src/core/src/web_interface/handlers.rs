//! Request handlers, independent of the HTTP framework.
//!
//! Validation and not-found outcomes are ordinary `StatusResponse::Error`
//! values. Only storage failures come back as `Err`.

use log::{debug, warn};

use super::types::{StatusResponse, TimePayload, NO_TIME_PROVIDED, TIME_NOT_FOUND};
use crate::error_handling::types::StorageError;
use crate::storage::{TimeRecord, TimeStorage};

/// Times to display on the index page, in stored order.
pub fn list_times(storage: &dyn TimeStorage) -> Result<Vec<TimeRecord>, StorageError> {
    storage.read_all()
}

pub fn save_time(
    storage: &dyn TimeStorage,
    payload: TimePayload,
) -> Result<StatusResponse, StorageError> {
    let Some(record) = payload.time.as_deref().and_then(TimeRecord::parse) else {
        warn!("Rejected save request without a usable time");
        return Ok(StatusResponse::error(NO_TIME_PROVIDED));
    };
    storage.append(&record)?;
    debug!("Saved time {}", record);
    Ok(StatusResponse::Success)
}

/// A missing field and an unknown value produce the same "Time not found"
/// reply.
pub fn delete_time(
    storage: &dyn TimeStorage,
    payload: TimePayload,
) -> Result<StatusResponse, StorageError> {
    let Some(record) = payload.time.as_deref().and_then(TimeRecord::parse) else {
        return Ok(StatusResponse::error(TIME_NOT_FOUND));
    };
    if storage.delete(&record)? {
        Ok(StatusResponse::Success)
    } else {
        debug!("Delete requested for unknown time {}", record);
        Ok(StatusResponse::error(TIME_NOT_FOUND))
    }
}
