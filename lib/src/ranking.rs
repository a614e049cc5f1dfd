use crate::diagnostics::Diagnostics;
use crate::price_service::{ChainId, ChainPrices};

/// Chain whose prediction exceeds its current price by the most. Ties go to the chain seen
/// first; chains without a current price are never picked.
pub fn best_chain(predictions : &ChainPrices,
                  current_prices : &ChainPrices,
                  diagnostics : &mut impl Diagnostics) -> Option<ChainId> {
    let mut best_chain = None;
    let mut max_delta = f64::NEG_INFINITY;
    for (chain, predicted_price) in predictions.iter() {
        let current_price = match current_prices.get(chain) {
            Some(price) => price,
            None => continue
        };

        let delta = predicted_price - current_price;
        diagnostics.chain_delta(chain, delta);
        if delta > max_delta {
            max_delta = delta;
            best_chain = Some(chain);
        }
    }

    best_chain
}
