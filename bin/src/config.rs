use std::path::Path;
use serde::{Deserialize, Serialize};
use anyhow::{anyhow, Context};
use staking_lib::ChainId;
use staking_lib::commands::StakingOptions;

pub const API_KEY_ENV : &str = "API_KEY";

#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
pub struct PriceFeed {
    pub chain : ChainId,
    pub feed_id : String
}

#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub chat_completions_url : String,
    pub api_key : Option<String>,
    pub default_model : String,
    pub default_chat_query : String,
    pub hermes_url : String,
    pub benchmarks_url : String,
    /// Also the order in which chains are ranked.
    pub price_feeds : Vec<PriceFeed>,
    pub base_chain : ChainId,
    pub history_minutes : u32
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        let feed = |chain, feed_id : &str| PriceFeed { chain, feed_id : String::from(feed_id) };
        AdvisorConfig {
            chat_completions_url : String::from("https://api.red-pill.ai/v1/chat/completions"),
            api_key : None,
            default_model : String::from("gpt-4o"),
            default_chat_query : String::from("What is the best chain to stake ETH?"),
            hermes_url : String::from("https://hermes.pyth.network"),
            benchmarks_url : String::from("https://benchmarks.pyth.network"),
            price_feeds : vec!(
                feed(ChainId::Eth, "0xff61491a931112ddf1bd8147cd1b641375f79f5825126d665480874634fd0ace"),
                feed(ChainId::Op, "0x385f64d993f7b77d8182ed5003d97c60aa3361f3cecfe711544d2d59165e9bdf"),
                feed(ChainId::Poly, "0x3fa4252848f9f0a1480be62745a4629d9eb1322aebab8a791e344b3b9c1adcf5")),
            base_chain : ChainId::Eth,
            history_minutes : 30
        }
    }
}

impl AdvisorConfig {
    /// Defaults, overlaid by the JSON file at `path` when given, then by the environment.
    pub fn load(path : Option<&Path>) -> anyhow::Result<AdvisorConfig> {
        let mut config = match path {
            Some(path) => AdvisorConfig::load_from_file(path)?,
            None => AdvisorConfig::default()
        };

        config.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    fn load_from_file(path : &Path) -> anyhow::Result<AdvisorConfig> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open config file '{}'", path.display()))?;
        let config = ::serde_json::from_reader(&file)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    pub fn apply_api_key_override(&mut self, api_key : Option<String>) {
        if let Some(api_key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(api_key);
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.price_feeds.iter().any(|f| f.chain == self.base_chain) {
            return Err(anyhow!("Base chain {} has no configured price feed", self.base_chain));
        }
        if self.history_minutes == 0 {
            return Err(anyhow!("history_minutes must be positive"));
        }
        Ok(())
    }

    pub fn staking_options(&self) -> StakingOptions {
        StakingOptions {
            chains : self.price_feeds.iter().map(|f| f.chain).collect(),
            base_chain : self.base_chain,
            history_minutes : self.history_minutes
        }
    }
}
