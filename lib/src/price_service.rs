use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde::ser::SerializeMap;
use strum::{Display, EnumString};
use std::iter::FromIterator;

#[cfg(test)]
use mockall::{automock};

pub const TIMESTAMP_FORMAT : &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
pub struct PricePoint {
    pub timestamp : String,
    pub price : f64
}

impl PricePoint {
    pub fn new(timestamp : &DateTime<Utc>, price : f64) -> PricePoint {
        PricePoint { timestamp : timestamp.format(TIMESTAMP_FORMAT).to_string(), price }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, EnumString, Display, Deserialize, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum ChainId {
    #[strum(serialize = "ETH")]
    #[serde(rename = "ETH")]
    Eth,
    #[strum(serialize = "OP")]
    #[serde(rename = "OP")]
    Op,
    #[strum(serialize = "POLY")]
    #[serde(rename = "POLY")]
    Poly
}

impl ChainId {
    pub fn full_name(&self) -> &'static str {
        match self {
            ChainId::Eth => "Ethereum",
            ChainId::Op => "Optimism",
            ChainId::Poly => "Polygon"
        }
    }
}

/// Prices keyed by chain, iterated in insertion order.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct ChainPrices {
    entries : Vec<(ChainId, f64)>
}

impl ChainPrices {
    pub fn new() -> ChainPrices {
        ChainPrices { entries : Vec::new() }
    }

    /// Replacing an existing chain keeps its original position.
    pub fn insert(&mut self, chain : ChainId, price : f64) {
        match self.entries.iter_mut().find(|(c, _)| *c == chain) {
            Some(entry) => entry.1 = price,
            None => self.entries.push((chain, price))
        }
    }

    pub fn get(&self, chain : ChainId) -> Option<f64> {
        self.entries.iter().find(|(c, _)| *c == chain).map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChainId, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ChainId, f64)> for ChainPrices {
    fn from_iter<I : IntoIterator<Item = (ChainId, f64)>>(iter : I) -> Self {
        let mut prices = ChainPrices::new();
        for (chain, price) in iter {
            prices.insert(chain, price);
        }
        prices
    }
}

impl Serialize for ChainPrices {
    fn serialize<S : Serializer>(&self, serializer : S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (chain, price) in &self.entries {
            map.serialize_entry(chain, price)?;
        }
        map.end()
    }
}

#[cfg_attr(test, automock)]
pub trait PriceService {
    /// Samples published within `interval_secs` seconds starting at `since_date`.
    fn get_price_history(&mut self, chain : ChainId, since_date : &DateTime<Utc>,
                         interval_secs : u32) -> anyhow::Result<Vec<PricePoint>>;
    fn get_current_price(&mut self, chain : ChainId) -> anyhow::Result<f64>;
}
