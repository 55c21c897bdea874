pub mod consumer;
pub mod decoder;

pub use consumer::SoknadConsumer;
pub use decoder::decode_soknad;
