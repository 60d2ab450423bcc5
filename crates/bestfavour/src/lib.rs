pub mod catalog;
pub mod config;
pub mod error;
pub mod messaging;
pub mod onboarding;
pub mod session;
pub mod telemetry;
