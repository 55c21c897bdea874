pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod kafka;
pub mod logging;
pub mod metrics;
pub mod repository;
pub mod services;
pub mod state;

pub use domain::{SoknadRecord, SoknadStatus, SykepengesoknadEvent};
pub use error::{DecodeError, ServiceError, ServiceResult};
pub use repository::{PostgresSoknadRepository, SoknadStore};
pub use services::{DecodeErrorPolicy, SoknadIngestor, SoknadRouter};
