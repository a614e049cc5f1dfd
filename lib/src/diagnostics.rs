use chrono::{DateTime, Utc};

use crate::intent::ChatIntent;
use crate::price_service::ChainId;

#[cfg(test)]
use mockall::{automock};

/// Sink for everything the advisor wants to report while answering a query.
#[cfg_attr(test, automock)]
pub trait Diagnostics {
    fn epoch_finished(&mut self, epoch : u32, mean_loss : f64);
    fn chain_predicted(&mut self, chain : ChainId, predicted_price : f64);
    fn chain_delta(&mut self, chain : ChainId, delta : f64);
    fn history_unavailable(&mut self, since_date : &DateTime<Utc>, reason : &str);
    fn current_price_unavailable(&mut self, chain : ChainId, reason : &str);
    fn intent_detected(&mut self, intent : &ChatIntent);
}

pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {
    fn epoch_finished(&mut self, _epoch : u32, _mean_loss : f64) {}
    fn chain_predicted(&mut self, _chain : ChainId, _predicted_price : f64) {}
    fn chain_delta(&mut self, _chain : ChainId, _delta : f64) {}
    fn history_unavailable(&mut self, _since_date : &DateTime<Utc>, _reason : &str) {}
    fn current_price_unavailable(&mut self, _chain : ChainId, _reason : &str) {}
    fn intent_detected(&mut self, _intent : &ChatIntent) {}
}

impl<D : Diagnostics + ?Sized> Diagnostics for &mut D {
    fn epoch_finished(&mut self, epoch : u32, mean_loss : f64) {
        (**self).epoch_finished(epoch, mean_loss)
    }

    fn chain_predicted(&mut self, chain : ChainId, predicted_price : f64) {
        (**self).chain_predicted(chain, predicted_price)
    }

    fn chain_delta(&mut self, chain : ChainId, delta : f64) {
        (**self).chain_delta(chain, delta)
    }

    fn history_unavailable(&mut self, since_date : &DateTime<Utc>, reason : &str) {
        (**self).history_unavailable(since_date, reason)
    }

    fn current_price_unavailable(&mut self, chain : ChainId, reason : &str) {
        (**self).current_price_unavailable(chain, reason)
    }

    fn intent_detected(&mut self, intent : &ChatIntent) {
        (**self).intent_detected(intent)
    }
}
