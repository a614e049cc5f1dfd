use chrono::{DateTime, Utc};
use staking_lib::{ChainId, ChatIntent, Diagnostics};

pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn epoch_finished(&mut self, epoch : u32, mean_loss : f64) {
        tracing::debug!(epoch, mean_loss, "Finished training epoch");
    }

    fn chain_predicted(&mut self, chain : ChainId, predicted_price : f64) {
        tracing::info!(%chain, predicted_price, "Predicted next price");
    }

    fn chain_delta(&mut self, chain : ChainId, delta : f64) {
        tracing::info!(%chain, delta, "Expected price change");
    }

    fn history_unavailable(&mut self, since_date : &DateTime<Utc>, reason : &str) {
        tracing::warn!(%since_date, reason, "Skipping unavailable price history");
    }

    fn current_price_unavailable(&mut self, chain : ChainId, reason : &str) {
        tracing::warn!(%chain, reason, "Skipping chain without current price");
    }

    fn intent_detected(&mut self, intent : &ChatIntent) {
        tracing::debug!(?intent, "Detected query intent");
    }
}
