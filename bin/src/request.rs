use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use staking_lib::commands::ChatQuery;

use crate::config::AdvisorConfig;

/// Request as handed over by the serverless runtime.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default)]
pub struct Request {
    pub method : String,
    pub path : String,
    pub queries : HashMap<String, Vec<String>>,
    pub secret : Option<HashMap<String, String>>,
    pub headers : HashMap<String, String>
}

impl Default for Request {
    fn default() -> Self {
        Request { method : String::from("GET"), path : String::from("/"), queries : HashMap::new(),
            secret : None, headers : HashMap::new() }
    }
}

impl Request {
    fn first_query(&self, name : &str) -> Option<&str> {
        self.queries.get(name)
            .and_then(|values| values.first())
            .map(|value| value.as_str())
    }

    fn secret(&self, name : &str) -> Option<&str> {
        self.secret.as_ref()
            .and_then(|secret| secret.get(name))
            .map(|value| value.as_str())
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ResponseBody {
    pub message : String
}

#[derive(Debug, PartialEq, Clone)]
pub struct Response {
    pub status : http::StatusCode,
    pub body : ResponseBody
}

pub fn chat_query_from_request(request : &Request, config : &AdvisorConfig) -> ChatQuery {
    let query = request.first_query("chatQuery").unwrap_or(config.default_chat_query.as_str());
    let model = request.first_query("model").unwrap_or(config.default_model.as_str());
    let api_key = request.secret("apiKey").map(String::from).or_else(|| config.api_key.clone());

    ChatQuery { query : String::from(query), model : String::from(model), api_key }
}

pub fn handle_request<F>(request : &Request, config : &AdvisorConfig, respond : F) -> Response
    where F : FnOnce(&ChatQuery) -> String {
    if request.method != "GET" {
        tracing::warn!(method = %request.method, path = %request.path, "Rejecting request");
        return Response {
            status : http::StatusCode::METHOD_NOT_ALLOWED,
            body : ResponseBody { message : String::from("Method not allowed") }
        };
    }

    let query = chat_query_from_request(request, config);
    tracing::info!(query = %query.query, model = %query.model, "Handling chat query");

    Response { status : http::StatusCode::OK, body : ResponseBody { message : respond(&query) } }
}
