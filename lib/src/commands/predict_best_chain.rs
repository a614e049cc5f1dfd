use chrono::{DateTime, Utc};
use getset::{Setters};

use crate::diagnostics::*;
use crate::predictor::*;
use crate::price_service::*;
use crate::ranking;
use super::fetch_prices::*;

#[derive(Debug, Clone, PartialEq, Setters)]
#[getset(set = "pub")]
pub struct StakingOptions {
    pub chains : Vec<ChainId>,
    pub base_chain : ChainId,
    pub history_minutes : u32
}

impl Default for StakingOptions {
    fn default() -> Self {
        StakingOptions { chains : vec!(ChainId::Eth, ChainId::Op, ChainId::Poly),
            base_chain : ChainId::Eth, history_minutes : 30 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StakingAdvice {
    NoPrices,
    Advice { predictions : ChainPrices, current_prices : ChainPrices, best_chain : Option<ChainId> }
}

pub fn predict_best_chain(service : &mut impl PriceService,
                          model : &mut impl PriceModel,
                          options : &StakingOptions,
                          current_time : &DateTime<Utc>,
                          diagnostics : &mut impl Diagnostics) -> anyhow::Result<StakingAdvice> {
    let history = fetch_price_history(service, options.base_chain, current_time, options.history_minutes, diagnostics)?;
    let current_prices = fetch_current_prices(service, &options.chains, diagnostics);
    if current_prices.is_empty() {
        return Ok(StakingAdvice::NoPrices);
    }

    let predictions = predict_for_chains(model, &history, &current_prices, options.base_chain, diagnostics)?;
    let best_chain = ranking::best_chain(&predictions, &current_prices, diagnostics);

    Ok(StakingAdvice::Advice { predictions, current_prices, best_chain })
}
