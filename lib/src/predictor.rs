use getset::{Setters};
use rand::Rng;

#[cfg(test)]
use mockall::{automock};

use crate::diagnostics::Diagnostics;
use crate::price_service::{ChainId, ChainPrices, PricePoint};
use crate::recurrent_cell::{CellState, RecurrentCell};
use crate::{utils, PredictionError};

#[derive(Debug, Clone, PartialEq, Setters)]
#[getset(set = "pub")]
pub struct PredictorParams {
    pub input_size : usize,
    pub hidden_size : usize,
    pub sequence_length : usize,
    pub learning_rate : f64,
    pub epochs : u32,
    pub loss_report_interval : u32
}

impl Default for PredictorParams {
    fn default() -> Self {
        PredictorParams { input_size : 1, hidden_size : 4, sequence_length : 10,
            learning_rate : 0.01, epochs : 100, loss_report_interval : 10 }
    }
}

#[cfg_attr(test, automock)]
pub trait PriceModel {
    /// Forecast of the value following the last sample of `history`.
    fn predict_next(&mut self, history : &[PricePoint]) -> Result<f64, PredictionError>;
}

/// Trains a freshly randomised recurrent cell on every call and forecasts with it.
///
/// Training only nudges the hidden vector of each window towards its target; the gate
/// weights are never updated, so the forecast comes from the initial random weights.
pub struct RecurrentPriceModel<R, D> {
    params : PredictorParams,
    rng : R,
    diagnostics : D
}

impl<R : Rng, D : Diagnostics> RecurrentPriceModel<R, D> {
    pub fn new(params : PredictorParams, rng : R, diagnostics : D) -> RecurrentPriceModel<R, D> {
        RecurrentPriceModel { params, rng, diagnostics }
    }

    fn train(&mut self, cell : &RecurrentCell, windows : &[(&[f64], f64)]) {
        for epoch in 0..self.params.epochs {
            let mut total_loss = 0.0;

            for (window, target) in windows {
                let state = cell.run_sequence(window);
                let prediction = window_prediction(&state);
                total_loss += (prediction - target).powi(2);

                let gradient = 2.0 * (prediction - target);
                let mut corrected_hidden = state.hidden;
                for h in corrected_hidden.iter_mut() {
                    *h -= self.params.learning_rate * gradient;
                }
            }

            let interval = self.params.loss_report_interval;
            if interval > 0 && epoch % interval == 0 {
                self.diagnostics.epoch_finished(epoch, total_loss / windows.len() as f64);
            }
        }
    }
}

impl<R : Rng, D : Diagnostics> PriceModel for RecurrentPriceModel<R, D> {
    fn predict_next(&mut self, history : &[PricePoint]) -> Result<f64, PredictionError> {
        let sequence_length = self.params.sequence_length;
        if history.len() <= sequence_length {
            return Err(PredictionError::InsufficientHistory { available : history.len(), required : sequence_length + 1 });
        }

        let prices : Vec<f64> = history.iter().map(|p| p.price).collect();
        let scaled = utils::scale(&prices)?;
        let windows = utils::extract_training_windows(&scaled.values, sequence_length)?;

        let cell = RecurrentCell::new(self.params.input_size, self.params.hidden_size, &mut self.rng);
        self.train(&cell, &windows);

        let last_window = &scaled.values[scaled.values.len() - sequence_length..];
        let state = cell.run_sequence(last_window);
        Ok(utils::unscale(window_prediction(&state), scaled.min, scaled.max))
    }
}

fn window_prediction(state : &CellState) -> f64 {
    state.hidden.first().copied().unwrap_or_default()
}

/// Predicts every chain of `current_prices` from the base chain's history, rescaled by each
/// chain's price ratio to the base chain.
pub fn predict_for_chains(model : &mut impl PriceModel,
                          history : &[PricePoint],
                          current_prices : &ChainPrices,
                          base_chain : ChainId,
                          diagnostics : &mut impl Diagnostics) -> Result<ChainPrices, PredictionError> {
    let base_price = current_prices.get(base_chain)
        .filter(|p| p.is_finite() && *p != 0.0)
        .ok_or(PredictionError::MissingBaseChain(base_chain))?;

    let mut predictions = ChainPrices::new();
    for (chain, current_price) in current_prices.iter() {
        let ratio = current_price / base_price;
        let chain_history : Vec<PricePoint> = history.iter()
            .map(|p| PricePoint { timestamp : p.timestamp.clone(), price : p.price * ratio })
            .collect();

        let predicted_price = model.predict_next(&chain_history)?;
        diagnostics.chain_predicted(chain, predicted_price);
        predictions.insert(chain, predicted_price);
    }

    Ok(predictions)
}
