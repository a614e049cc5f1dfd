pub mod service;
pub mod utils;
