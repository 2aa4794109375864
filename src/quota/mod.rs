/// Question quota - Gateway

mod gate;

pub use gate::{QuotaGate, QuotaState, WarningPolicy};
