//! Søknad topic consumer
//!
//! Reads one record at a time and hands it to [`SoknadIngestor`]. Offsets are
//! committed only after a record was handled. When handling fails the session is
//! dropped without committing, and a fresh consumer resumes from the last committed
//! offset after `restart_delay_secs`, so the failing record is delivered again.

use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::error::KafkaResult;
use rdkafka::message::Message;
use std::borrow::Cow;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::KafkaConfig;
use crate::error::ServiceResult;
use crate::services::{IncomingRecord, IngestOutcome, SoknadIngestor};

pub struct SoknadConsumer {
    config: KafkaConfig,
    ingestor: SoknadIngestor,
}

impl SoknadConsumer {
    pub fn new(config: KafkaConfig, ingestor: SoknadIngestor) -> Self {
        Self { config, ingestor }
    }

    fn client_config(&self) -> ClientConfig {
        let mut client = ClientConfig::new();
        client
            .set("bootstrap.servers", &self.config.brokers)
            .set("group.id", &self.config.group_id)
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", &self.config.auto_offset_reset)
            .set("enable.partition.eof", "false")
            .set("session.timeout.ms", "45000")
            .set("max.poll.interval.ms", "300000");

        if let Some(tls) = &self.config.tls {
            client
                .set("security.protocol", "ssl")
                .set("ssl.ca.location", &tls.ca_path)
                .set("ssl.certificate.location", &tls.certificate_path)
                .set("ssl.key.location", &tls.private_key_path);
        }

        client
    }

    /// Run the consumer loop. Only returns if the task is cancelled.
    pub async fn run(self) {
        let restart_delay = Duration::from_secs(self.config.restart_delay_secs);

        info!(
            "Starting søknad consumer (topic: {}, group: {}, policy: {:?})",
            self.config.soknad_topic,
            self.config.group_id,
            self.ingestor.policy()
        );

        loop {
            if let Err(err) = self.run_session().await {
                error!(
                    topic = %self.config.soknad_topic,
                    error = %err,
                    "Søknad consumer session failed, restarting in {}s",
                    restart_delay.as_secs()
                );
            }
            tokio::time::sleep(restart_delay).await;
        }
    }

    async fn run_session(&self) -> ServiceResult<()> {
        let consumer: StreamConsumer = self.client_config().create()?;
        consumer.subscribe(&[self.config.soknad_topic.as_str()])?;

        info!("Subscribed to {}", self.config.soknad_topic);

        loop {
            match consumer.recv().await {
                Ok(message) => {
                    let key = record_key(message.key());
                    let record = IncomingRecord {
                        key: key.as_deref(),
                        payload: message.payload(),
                    };

                    handle_and_commit(&self.ingestor, record, || {
                        consumer.commit_message(&message, CommitMode::Async)
                    })
                    .await?;
                }
                Err(err) => {
                    error!("Kafka error: {}", err);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }
}

/// Record key for logging. Keys that are not UTF-8 are decoded lossily.
fn record_key(key: Option<&[u8]>) -> Option<Cow<'_, str>> {
    key.map(String::from_utf8_lossy)
}

/// Handle one record, then commit its offset. `commit` is not called when handling
/// fails, so the record is read again by the next session.
async fn handle_and_commit<C>(
    ingestor: &SoknadIngestor,
    record: IncomingRecord<'_>,
    commit: C,
) -> ServiceResult<IngestOutcome>
where
    C: FnOnce() -> KafkaResult<()>,
{
    let outcome = ingestor.handle_record(record).await?;

    if let Err(commit_err) = commit() {
        warn!("Failed to commit Kafka offset: {}", commit_err);
    }

    Ok(outcome)
}
