// Instrument and quote data read by the fee models
pub mod security;
pub mod snapshot;
