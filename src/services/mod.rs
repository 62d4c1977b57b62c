//! Export/import orchestration services

pub mod export;
pub mod import;

pub use export::ExportService;
pub use import::{ImportService, ImportSummary};

use thiserror::Error;

use crate::errors::{ExchangeError, StoreError};

/// Errors surfaced by the orchestration layer.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
