use crate::price_service::ChainId;

#[cfg(test)]
use mockall::{automock};

#[derive(Debug, PartialEq, Clone)]
pub enum ChatReply {
    Content(String),
    ProviderError(String)
}

impl ChatReply {
    pub fn into_message(self) -> String {
        match self {
            ChatReply::Content(text) => text,
            ChatReply::ProviderError(text) => text
        }
    }
}

#[cfg_attr(test, automock)]
pub trait ChatService {
    fn complete(&mut self, api_key : &str, model : &str, query : &str) -> anyhow::Result<ChatReply>;
}

#[cfg_attr(test, automock)]
pub trait WalletService {
    fn create_account(&mut self, chain : Option<ChainId>) -> anyhow::Result<()>;
    fn transfer(&mut self, chain : &str, address : &str) -> anyhow::Result<()>;
    fn list_wallets(&mut self) -> anyhow::Result<Vec<String>>;
}
