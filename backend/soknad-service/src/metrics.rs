use actix_web::HttpResponse;
use prometheus::{Encoder, IntCounter, Opts, TextEncoder};
use tracing::warn;

#[derive(Clone)]
pub struct SoknadMetrics {
    /// Records from the søknad topic that made it through routing
    pub topic_records: IntCounter,
}

impl SoknadMetrics {
    pub fn new() -> Self {
        let topic_records = IntCounter::with_opts(Opts::new(
            "soknad_service_topic_records_total",
            "Number of søknad records handled from the topic",
        ))
        .expect("valid metric opts for soknad_service_topic_records_total");

        if let Err(e) = prometheus::default_registry().register(Box::new(topic_records.clone())) {
            warn!("Failed to register soknad metric: {}", e);
        }

        Self { topic_records }
    }
}

impl Default for SoknadMetrics {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
