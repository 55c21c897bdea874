pub mod ingest;
pub mod router;

pub use ingest::{DecodeErrorPolicy, IncomingRecord, IngestOutcome, SoknadIngestor};
pub use router::{RouteOutcome, SoknadRouter};
