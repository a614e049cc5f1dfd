use crate::PredictionError;

/// Prices mapped into `[0, 1]`, together with the range needed to map them back.
#[derive(Debug, PartialEq, Clone)]
pub struct ScaledSeries {
    pub values : Vec<f64>,
    pub min : f64,
    pub max : f64
}

pub fn find_price_range(prices : &[f64]) -> (f64, f64) {
    let mut min_price = f64::INFINITY;
    let mut max_price = f64::NEG_INFINITY;
    for p in prices {
        min_price = min_price.min(*p);
        max_price = max_price.max(*p);
    }

    (min_price, max_price)
}

pub fn scale(series : &[f64]) -> Result<ScaledSeries, PredictionError> {
    if series.is_empty() {
        return Err(PredictionError::InsufficientHistory { available : 0, required : 1 });
    }

    let (min, max) = find_price_range(series);
    let range = max - min;
    if !series.iter().all(|p| p.is_finite()) || !range.is_finite() || range <= 0.0 {
        return Err(PredictionError::DegenerateSeries { value : min });
    }

    let values = series.iter().map(|p| (p - min) / range).collect();
    Ok(ScaledSeries { values, min, max })
}

pub fn unscale(value : f64, min : f64, max : f64) -> f64 {
    value * (max - min) + min
}

/// Every `(window, target)` pair where the window is the `sequence_length` values
/// preceding the target.
pub fn extract_training_windows(values : &[f64], sequence_length : usize)
                                -> Result<Vec<(&[f64], f64)>, PredictionError> {
    if values.len() <= sequence_length {
        return Err(PredictionError::InsufficientHistory { available : values.len(), required : sequence_length + 1 });
    }

    let windows = (sequence_length..values.len())
        .map(|i| (&values[i - sequence_length..i], values[i]))
        .collect();
    Ok(windows)
}
