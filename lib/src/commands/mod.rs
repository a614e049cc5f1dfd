mod utils;
mod fetch_prices;
mod predict_best_chain;
mod answer_query;

pub use fetch_prices::*;
pub use predict_best_chain::*;
pub use answer_query::*;
pub use utils::history_request_dates;
