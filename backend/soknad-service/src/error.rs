/// Error types for soknad-service
use thiserror::Error;

/// Errors raised while turning a Kafka payload into a søknad event
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Well-formed JSON that does not fit the søknad shape
    /// (wrong field type, unknown status, bad date, missing field)
    #[error("Payload does not match søknad shape: {0}")]
    ShapeMismatch(#[source] serde_json::Error),

    /// Payload is not valid JSON at all
    #[error("Malformed payload: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Record carried no value (tombstone)
    #[error("Record has no payload")]
    MissingPayload,
}

impl DecodeError {
    /// Check if this is the kind of failure a development cluster may skip
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, DecodeError::ShapeMismatch(_))
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => DecodeError::ShapeMismatch(err),
            Category::Syntax | Category::Eof | Category::Io => DecodeError::Malformed(err),
        }
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// Check if the underlying failure is a suppressible decode shape mismatch
    pub fn is_shape_mismatch(&self) -> bool {
        match self {
            ServiceError::Decode(err) => err.is_shape_mismatch(),
            _ => false,
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
