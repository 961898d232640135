pub mod commands;
pub mod contracts;
pub mod detect;
pub mod error;
mod input;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use detect::detector::detect_subscriptions;
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
