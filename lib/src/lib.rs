mod price_service;
mod assistant_service;
mod diagnostics;
mod intent;
mod predictor;
mod ranking;
mod recurrent_cell;
mod utils;
pub mod commands;

pub use price_service::*;
pub use assistant_service::*;
pub use diagnostics::*;
pub use intent::*;
pub use predictor::*;
pub use ranking::*;
pub use recurrent_cell::*;
pub use utils::{scale, unscale, ScaledSeries};

/// Recoverable failures of the price predictor. None of them is fatal: callers turn them
/// into a user facing "unable to predict" message.
#[derive(Debug, PartialEq, Clone)]
pub enum PredictionError {
    InsufficientHistory { available : usize, required : usize },
    DegenerateSeries { value : f64 },
    MissingBaseChain(ChainId)
}

impl std::fmt::Display for PredictionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self {
            PredictionError::InsufficientHistory { available, required } =>
                write!(f, "not enough price history (got {} samples, need at least {})", available, required),
            PredictionError::DegenerateSeries { value } =>
                write!(f, "price history has no usable range (all prices equal to {})", value),
            PredictionError::MissingBaseChain(chain) =>
                write!(f, "no usable current price for base chain {}", chain),
        }
    }
}

impl std::error::Error for PredictionError {
}
