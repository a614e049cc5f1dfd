use serde::Deserialize;
use serde_json::Value;
use anyhow::anyhow;
use chrono::{TimeZone, Utc};
use staking_lib::PricePoint;

#[derive(Debug, Deserialize)]
pub struct PriceUpdate {
    #[serde(default)]
    pub parsed : Vec<ParsedPriceFeed>
}

#[derive(Debug, Deserialize)]
pub struct ParsedPriceFeed {
    pub price : Option<PythPrice>
}

/// Fixed point price as published by Pyth: the value is `price / 10^|expo|`.
#[derive(Debug, Deserialize)]
pub struct PythPrice {
    pub price : Value,
    pub expo : i32,
    pub publish_time : i64
}

impl PriceUpdate {
    pub fn first_price(&self) -> Option<&PythPrice> {
        self.parsed.first().and_then(|feed| feed.price.as_ref())
    }
}

impl PythPrice {
    pub fn value(&self) -> anyhow::Result<f64> {
        let mantissa = match &self.price {
            Value::String(text) => text.parse::<f64>()?,
            Value::Number(number) => number.as_f64().ok_or_else(|| anyhow!("Price {} is not representable", number))?,
            other => return Err(anyhow!("Unexpected price value {}", other))
        };

        Ok(mantissa / 10f64.powi(self.expo.abs()))
    }

    pub fn to_price_point(&self) -> anyhow::Result<PricePoint> {
        let publish_time = Utc.timestamp_opt(self.publish_time, 0).single()
            .ok_or_else(|| anyhow!("Invalid publish time {}", self.publish_time))?;
        Ok(PricePoint::new(&publish_time, self.value()?))
    }
}

pub fn parse_latest_price(json_root : Value) -> anyhow::Result<f64> {
    let update : PriceUpdate = serde_json::from_value(json_root)?;
    update.first_price()
        .ok_or_else(|| anyhow!("No price data found in the response"))?
        .value()
}

/// Updates without price data are skipped.
pub fn parse_price_history(json_root : Value) -> anyhow::Result<Vec<PricePoint>> {
    let updates : Vec<PriceUpdate> = serde_json::from_value(json_root)?;
    updates.iter()
        .filter_map(PriceUpdate::first_price)
        .map(PythPrice::to_price_point)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn latest_price_applies_exponent() -> anyhow::Result<()> {
        let json_root = json!({
            "binary" : { "encoding" : "hex", "data" : [] },
            "parsed" : [{
                "id" : "ff61491a931112ddf1bd8147cd1b641375f79f5825126d665480874634fd0ace",
                "price" : { "price" : "341275000000", "conf" : "120000000", "expo" : -8, "publish_time" : 1719824700 }
            }]
        });

        let price = parse_latest_price(json_root)?;

        assert!((price - 3412.75).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn numeric_price_is_accepted() -> anyhow::Result<()> {
        let json_root = json!({ "parsed" : [{ "price" : { "price" : 170, "expo" : 2, "publish_time" : 0 } }] });

        assert!((parse_latest_price(json_root)? - 1.7).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn missing_price_data_is_an_error() {
        let json_root = json!({ "parsed" : [] });
        assert!(parse_latest_price(json_root).is_err());

        let json_root = json!({ "parsed" : [{ "id" : "abc" }] });
        assert!(parse_latest_price(json_root).is_err());
    }

    #[test]
    fn history_keeps_updates_with_prices() -> anyhow::Result<()> {
        let json_root = json!([
            { "parsed" : [{ "price" : { "price" : "250000", "expo" : -2, "publish_time" : 1719824700 } }] },
            { "parsed" : [{ "id" : "no price here" }] },
            { "parsed" : [{ "price" : { "price" : "250150", "expo" : -2, "publish_time" : 1719824761 } }] }
        ]);

        let history = parse_price_history(json_root)?;

        assert_eq!(history, vec!(
            PricePoint { timestamp : String::from("2024-07-01 09:05:00"), price : 2500.0 },
            PricePoint { timestamp : String::from("2024-07-01 09:06:01"), price : 2501.5 }));
        Ok(())
    }

    #[test]
    fn malformed_price_is_an_error() {
        let json_root = json!([{ "parsed" : [{ "price" : { "price" : "n/a", "expo" : -2, "publish_time" : 0 } }] }]);
        assert!(parse_price_history(json_root).is_err());
    }
}
