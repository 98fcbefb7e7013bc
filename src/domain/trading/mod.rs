// Orders and the fee models that price them
pub mod exchange_fee_model;
pub mod fee_context;
pub mod fee_model;
pub mod fees;
pub mod types;
