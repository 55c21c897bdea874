use crate::domain::SoknadRecord;
use crate::error::ServiceResult;

/// Write side of the søknad snapshot.
/// Both operations are idempotent: upsert fully replaces the row for the id, and
/// delete of an absent id is a no-op.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SoknadStore: Send + Sync {
    /// Insert or fully replace the row for `record.soknad_id`
    async fn upsert_soknad(&self, record: &SoknadRecord) -> ServiceResult<()>;

    /// Remove the row for `soknad_id` if present
    async fn delete_soknad(&self, soknad_id: &str) -> ServiceResult<()>;
}
