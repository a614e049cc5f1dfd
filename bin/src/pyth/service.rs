use chrono::{DateTime, Utc};
use anyhow::{anyhow, Context};
use staking_lib::{ChainId, PricePoint, PriceService};

use crate::config::{AdvisorConfig, PriceFeed};
use crate::pyth::utils;

pub struct PythPriceService {
    hermes_url : String,
    benchmarks_url : String,
    price_feeds : Vec<PriceFeed>
}

impl PythPriceService {
    pub fn create(config : &AdvisorConfig) -> anyhow::Result<PythPriceService> {
        if config.price_feeds.is_empty() {
            return Err(anyhow!("No price feeds are configured"));
        }

        Ok(PythPriceService {
            hermes_url : config.hermes_url.trim_end_matches('/').to_string(),
            benchmarks_url : config.benchmarks_url.trim_end_matches('/').to_string(),
            price_feeds : config.price_feeds.clone()
        })
    }

    fn feed_id(&self, chain : ChainId) -> anyhow::Result<&str> {
        self.price_feeds.iter()
            .find(|f| f.chain == chain)
            .map(|f| f.feed_id.as_str())
            .ok_or_else(|| anyhow!("No price feed configured for {}", chain))
    }

    pub fn history_url(&self, since_date : &DateTime<Utc>, interval_secs : u32) -> String {
        format!("{}/v1/updates/price/{}/{}", self.benchmarks_url, since_date.timestamp(), interval_secs)
    }

    pub fn latest_price_url(&self) -> String {
        format!("{}/v2/updates/price/latest", self.hermes_url)
    }
}

impl PriceService for PythPriceService {
    fn get_price_history(&mut self, chain : ChainId, since_date : &DateTime<Utc>,
                         interval_secs : u32) -> anyhow::Result<Vec<PricePoint>> {
        let feed_id = self.feed_id(chain)?;
        let params = [("ids", feed_id), ("parsed", "true"), ("unique", "true")];
        let json_root = crate::http_utils::http_get_json(&self.history_url(since_date, interval_secs), &params)
            .with_context(|| format!("Failed to fetch {} price history since {}", chain, since_date))?;

        utils::parse_price_history(json_root)
    }

    fn get_current_price(&mut self, chain : ChainId) -> anyhow::Result<f64> {
        let feed_id = self.feed_id(chain)?;
        let json_root = crate::http_utils::http_get_json(&self.latest_price_url(), &[("ids[]", feed_id)])
            .with_context(|| format!("Failed to fetch current {} price", chain))?;

        utils::parse_latest_price(json_root)
    }
}
