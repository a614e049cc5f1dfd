use serde_json::{json, Value};
use anyhow::{anyhow, Context};
use staking_lib::{ChatReply, ChatService};

use crate::config::AdvisorConfig;
use crate::http_utils;

/// OpenAI compatible chat completion endpoint.
pub struct RedPillChatService {
    completions_url : String
}

impl RedPillChatService {
    pub fn create(config : &AdvisorConfig) -> RedPillChatService {
        RedPillChatService { completions_url : config.chat_completions_url.clone() }
    }
}

impl ChatService for RedPillChatService {
    fn complete(&mut self, api_key : &str, model : &str, query : &str) -> anyhow::Result<ChatReply> {
        tracing::debug!(model, url = %self.completions_url, "Requesting chat completion");

        let json_root = http_utils::http_post_json(&self.completions_url, api_key, &completion_request(model, query))
            .context("Failed to request chat completion")?;

        parse_chat_reply(&json_root)
    }
}

pub fn completion_request(model : &str, query : &str) -> Value {
    json!({
        "messages" : [ { "role" : "user", "content" : query } ],
        "model" : model
    })
}

pub fn parse_chat_reply(json_root : &Value) -> anyhow::Result<ChatReply> {
    if let Some(error) = json_root.get("error").filter(|e| !e.is_null()) {
        let message = match error {
            Value::String(text) => text.clone(),
            Value::Object(map) => match map.get("message") {
                Some(Value::String(text)) => text.clone(),
                _ => error.to_string()
            },
            _ => error.to_string()
        };
        return Ok(ChatReply::ProviderError(message));
    }

    let content = json_root["choices"][0]["message"]["content"].as_str()
        .ok_or_else(|| anyhow!("No message content found in chat completion {}", json_root))?;
    Ok(ChatReply::Content(String::from(content)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_model_and_single_user_message() {
        let request = completion_request("gpt-4o", "What is the best chain to stake ETH?");

        assert_eq!(request["model"], "gpt-4o");
        assert_eq!(request["messages"].as_array().map(|m| m.len()), Some(1));
        assert_eq!(request["messages"][0]["role"], "user");
        assert_eq!(request["messages"][0]["content"], "What is the best chain to stake ETH?");
    }

    #[test]
    fn first_choice_content_is_the_reply() -> anyhow::Result<()> {
        let json_root = json!({
            "id" : "chatcmpl-1",
            "choices" : [
                { "index" : 0, "message" : { "role" : "assistant", "content" : "Validators secure the chain." } },
                { "index" : 1, "message" : { "role" : "assistant", "content" : "Ignored." } }
            ]
        });

        assert_eq!(parse_chat_reply(&json_root)?, ChatReply::Content(String::from("Validators secure the chain.")));
        Ok(())
    }

    #[test]
    fn provider_error_object_uses_its_message() -> anyhow::Result<()> {
        let json_root = json!({ "error" : { "message" : "Invalid API key", "type" : "auth" } });

        assert_eq!(parse_chat_reply(&json_root)?, ChatReply::ProviderError(String::from("Invalid API key")));
        Ok(())
    }

    #[test]
    fn provider_error_string_is_kept() -> anyhow::Result<()> {
        let json_root = json!({ "error" : "rate limited" });

        assert_eq!(parse_chat_reply(&json_root)?, ChatReply::ProviderError(String::from("rate limited")));
        Ok(())
    }

    #[test]
    fn provider_error_without_message_is_serialized() -> anyhow::Result<()> {
        let json_root = json!({ "error" : { "code" : 429 } });

        assert_eq!(parse_chat_reply(&json_root)?, ChatReply::ProviderError(String::from(r#"{"code":429}"#)));
        Ok(())
    }

    #[test]
    fn reply_without_choices_is_an_error() {
        assert!(parse_chat_reply(&json!({ "choices" : [] })).is_err());
        assert!(parse_chat_reply(&json!({ "error" : null })).is_err());
    }
}
