pub mod clock;
pub mod soknad;

pub use clock::{Clock, FixedClock, SystemClock};
pub use soknad::{
    Arbeidsgiver, Relevance, SoknadRecord, SoknadStatus, StoreAction, SykepengesoknadEvent,
};
