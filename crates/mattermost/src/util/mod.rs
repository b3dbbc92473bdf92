pub mod errors;
pub mod secrets;
pub mod status;
pub mod telemetry;
