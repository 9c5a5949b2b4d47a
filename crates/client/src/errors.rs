//! # Client Error Types
//!
//! Discrete failure outcomes for user-initiated operations. Precondition
//! violations surface synchronously before any external call; ledger and
//! metadata failures are distinct outcomes, never silently swallowed.

use thiserror::Error;

use crate::ledger::LedgerError;
use crate::metadata::MetadataError;
use paystream_core::StreamError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Precondition violation: {0}")]
    Precondition(#[from] StreamError),

    #[error("Ledger call failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Metadata store failure: {0}")]
    Metadata(#[from] MetadataError),
}

pub type ClientResult<T> = Result<T, ClientError>;
