use chrono::{DateTime, Utc};
use anyhow::anyhow;

use crate::diagnostics::*;
use crate::price_service::*;
use super::utils;

const SECONDS_PER_MINUTE : u32 = 60;

/// Chronological one-minute samples of the trailing `minutes` minutes. Minutes whose request
/// fails are reported and left out.
pub fn fetch_price_history(service : &mut impl PriceService,
                           chain : ChainId,
                           current_time : &DateTime<Utc>,
                           minutes : u32,
                           diagnostics : &mut impl Diagnostics) -> anyhow::Result<Vec<PricePoint>> {
    let mut history = Vec::new();
    for request_date in utils::history_request_dates(current_time, minutes)? {
        match service.get_price_history(chain, &request_date, SECONDS_PER_MINUTE) {
            Ok(mut points) => history.append(&mut points),
            Err(err) => diagnostics.history_unavailable(&request_date, &format!("{:#}", err))
        }
    }

    if history.is_empty() {
        return Err(anyhow!("No price history could be fetched for {} over the last {} minutes", chain, minutes));
    }

    Ok(history)
}

/// Current prices of `chains`, in the same order. Chains without a finite, positive price
/// are reported and left out.
pub fn fetch_current_prices(service : &mut impl PriceService,
                            chains : &[ChainId],
                            diagnostics : &mut impl Diagnostics) -> ChainPrices {
    let mut prices = ChainPrices::new();
    for chain in chains {
        match service.get_current_price(*chain) {
            Ok(price) if price.is_finite() && price > 0.0 => prices.insert(*chain, price),
            Ok(price) => diagnostics.current_price_unavailable(*chain, &format!("Received unusable price {}", price)),
            Err(err) => diagnostics.current_price_unavailable(*chain, &format!("{:#}", err))
        }
    }

    prices
}
