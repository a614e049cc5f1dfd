use serde_json::Value;
use anyhow::{anyhow, Context};

pub fn http_get_json(url : &str, param_map : &[(&str, &str)]) -> anyhow::Result<Value> {
    let http_resp = http_get(url, param_map).context("Failed to send HTTP GET")?;

    http_response_to_json(http_resp).context("Failed to parse HTTP response")
}

/// Posts a JSON body with a bearer token. Error statuses are tolerated as long as the
/// body is JSON, since providers describe failures there.
pub fn http_post_json(url : &str, bearer_token : &str, body : &Value) -> anyhow::Result<Value> {
    let http_resp = http_post(url, bearer_token, body).context("Failed to send HTTP POST")?;

    let status = http_resp.status();
    let response_body = http_resp.text()?;
    serde_json::from_str(&response_body)
        .with_context(|| format!("Failed to parse HTTP response with status {}", status))
}

pub fn build_url(url : &str, param_map : &[(&str, &str)]) -> anyhow::Result<url::Url> {
    let url = if param_map.is_empty() {
        url::Url::parse(url)?
    }
    else {
        url::Url::parse_with_params(url, param_map)?
    };
    Ok(url)
}

fn http_get(url : &str, param_map : &[(&str, &str)]) -> anyhow::Result<reqwest::blocking::Response> {
    let url = build_url(url, param_map)?;

    let client = reqwest::blocking::Client::new();
    let resp = client
        .get(url)
        .header("Accept", "application/json")
        .header("User-Agent", "staking-advisor")
        .send()?;
    Ok(resp)
}

fn http_post(url : &str, bearer_token : &str, body : &Value) -> anyhow::Result<reqwest::blocking::Response> {
    let url = build_url(url, &[])?;

    let client = reqwest::blocking::Client::new();
    let resp = client
        .post(url)
        .header("Authorization", format!("Bearer {}", bearer_token))
        .header("Accept", "application/json")
        .header("User-Agent", "staking-advisor")
        .json(body)
        .send()?;
    Ok(resp)
}

fn http_response_to_json(response : reqwest::blocking::Response) -> anyhow::Result<Value> {
    if response.status() != http::StatusCode::OK {
        return Err(anyhow!("Erroneous HTTP status returned: {}", response.status()));
    }

    let response_body = response.text()?;
    let json_root : Value = serde_json::from_str(&response_body)?;

    Ok(json_root)
}
