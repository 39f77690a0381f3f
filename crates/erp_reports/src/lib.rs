//! Fixed analytical queries over an OpenERP sales/invoicing database.
//!
//! Each question borrows one pooled connection, runs its SQL and renders the
//! rows as text. [`dsn`] turns a `postgres://` URL into connection settings.

use thiserror::Error;

pub mod cli;
pub mod dsn;
pub mod logging;
pub mod pool;
pub mod questions;

pub use dsn::{DatabaseTarget, url_to_dsn};
pub use questions::{ProfitProjection, Question};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid database url: {0}")]
    Url(String),
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
