//! Decides what a søknad event does to the snapshot.
//!
//! A søknad is only stored when it concerns an employer and its period ended within
//! the relevance window. Relevant events are then upserted or deleted by status:
//!
//! ```text
//! NY, FREMTIDIG                -> upsert
//! SENDT, KORRIGERT             -> upsert if sent to employer, else delete
//! AVBRUTT, SLETTET, UTGAATT    -> delete
//! ```

use std::sync::Arc;
use tracing::debug;

use crate::domain::{Clock, SoknadRecord, StoreAction, SykepengesoknadEvent};
use crate::error::ServiceResult;
use crate::metrics::SoknadMetrics;
use crate::repository::SoknadStore;

/// What happened to the snapshot for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Upserted,
    Deleted,
    /// Not employer-relevant or outside the window; nothing written
    Ignored,
}

#[derive(Clone)]
pub struct SoknadRouter {
    store: Arc<dyn SoknadStore>,
    clock: Arc<dyn Clock>,
    metrics: SoknadMetrics,
}

impl SoknadRouter {
    pub fn new(
        store: Arc<dyn SoknadStore>,
        clock: Arc<dyn Clock>,
        metrics: SoknadMetrics,
    ) -> Self {
        Self {
            store,
            clock,
            metrics,
        }
    }

    /// Apply one decoded event to the store.
    ///
    /// The topic counter is incremented once the event has been routed, whether or not
    /// anything was written. Store failures propagate and leave the counter untouched.
    pub async fn handle_soknad(
        &self,
        soknad: &SykepengesoknadEvent,
    ) -> ServiceResult<RouteOutcome> {
        let outcome = match soknad.relevance(self.clock.today()) {
            Some(relevance) => match soknad.store_action() {
                StoreAction::Upsert => {
                    let record = SoknadRecord::from_event(soknad, relevance)?;
                    self.store.upsert_soknad(&record).await?;
                    RouteOutcome::Upserted
                }
                StoreAction::Delete => {
                    self.store.delete_soknad(&soknad.id).await?;
                    RouteOutcome::Deleted
                }
            },
            None => RouteOutcome::Ignored,
        };

        self.metrics.topic_records.inc();

        debug!(
            soknad_id = %soknad.id,
            status = %soknad.status,
            outcome = ?outcome,
            "Routed søknad"
        );
        Ok(outcome)
    }
}
