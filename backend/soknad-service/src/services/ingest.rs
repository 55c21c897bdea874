//! Per-record entry point for the søknad topic: decode, route, and apply the
//! decode-error policy of the running cluster.

use tracing::{error, info};

use crate::error::ServiceResult;
use crate::kafka::decoder::decode_soknad;
use crate::services::router::{RouteOutcome, SoknadRouter};

/// Cluster where shape mismatches on the topic are skipped instead of failing
pub const DEV_CLUSTER: &str = "dev-gcp";

/// How decode shape mismatches are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorPolicy {
    /// Log and fail the record, leaving redelivery to the consumer
    Propagate,
    /// Log at info and treat the record as consumed. Development only.
    SkipShapeMismatch,
}

impl DecodeErrorPolicy {
    pub fn for_cluster(cluster_name: &str) -> Self {
        if cluster_name == DEV_CLUSTER {
            DecodeErrorPolicy::SkipShapeMismatch
        } else {
            DecodeErrorPolicy::Propagate
        }
    }
}

/// Raw topic record as seen by the ingestor
#[derive(Debug, Clone, Copy)]
pub struct IncomingRecord<'a> {
    pub key: Option<&'a str>,
    pub payload: Option<&'a [u8]>,
}

/// Result of ingesting one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Routed(RouteOutcome),
    /// Shape mismatch skipped under [`DecodeErrorPolicy::SkipShapeMismatch`]
    Skipped,
}

#[derive(Clone)]
pub struct SoknadIngestor {
    router: SoknadRouter,
    policy: DecodeErrorPolicy,
}

impl SoknadIngestor {
    pub fn new(router: SoknadRouter, policy: DecodeErrorPolicy) -> Self {
        Self { router, policy }
    }

    pub fn policy(&self) -> DecodeErrorPolicy {
        self.policy
    }

    /// Handle one record. An `Err` means the record must not be committed.
    pub async fn handle_record(
        &self,
        record: IncomingRecord<'_>,
    ) -> ServiceResult<IngestOutcome> {
        let key = record.key.unwrap_or("<none>");

        let result = match decode_soknad(record.payload) {
            Ok(soknad) => self.router.handle_soknad(&soknad).await,
            Err(err) => Err(err.into()),
        };

        match result {
            Ok(outcome) => Ok(IngestOutcome::Routed(outcome)),
            Err(err)
                if err.is_shape_mismatch()
                    && self.policy == DecodeErrorPolicy::SkipShapeMismatch =>
            {
                info!(
                    key = %key,
                    error = %err,
                    "Ignoring søknad that does not match expected shape"
                );
                Ok(IngestOutcome::Skipped)
            }
            Err(err) => {
                error!(key = %key, error = %err, "Failed to handle søknad");
                Err(err)
            }
        }
    }
}
