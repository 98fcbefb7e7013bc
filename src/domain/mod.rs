// Instruments and quotes
pub mod market;

// Orders and fee models
pub mod trading;

// Domain-specific error types
pub mod errors;
