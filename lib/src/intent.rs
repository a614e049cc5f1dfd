use anyhow::anyhow;

use crate::price_service::ChainId;

#[derive(Debug, PartialEq, Clone)]
pub enum ChatIntent {
    Stake,
    CreateAccount(Option<ChainId>),
    Transfer { chain : String, address : String },
    ListWallets,
    Chat
}

impl ChatIntent {
    /// Keyword matches are case insensitive and checked in a fixed order, so
    /// "stake then transfer" is a staking question.
    pub fn from_query(query : &str) -> anyhow::Result<ChatIntent> {
        let lowered = query.to_lowercase();
        if lowered.contains("stake") {
            Ok(ChatIntent::Stake)
        }
        else if lowered.contains("create account") {
            Ok(ChatIntent::CreateAccount(identify_chain(query)))
        }
        else if lowered.contains("transfer") {
            let (chain, address) = transfer_details(query)?;
            Ok(ChatIntent::Transfer { chain, address })
        }
        else if lowered.contains("list wallets") {
            Ok(ChatIntent::ListWallets)
        }
        else {
            Ok(ChatIntent::Chat)
        }
    }
}

pub fn identify_chain(query : &str) -> Option<ChainId> {
    let lowered = query.to_lowercase();
    if lowered.contains("ethereum") {
        Some(ChainId::Eth)
    }
    else if lowered.contains("optimism") {
        Some(ChainId::Op)
    }
    else if lowered.contains("polygon") {
        Some(ChainId::Poly)
    }
    else {
        None
    }
}

/// `(chain, address)` taken from the words following "on" and "to".
pub fn transfer_details(query : &str) -> anyhow::Result<(String, String)> {
    let parts : Vec<&str> = query.split(' ').collect();
    let word_after = |marker : &str| parts.iter()
        .position(|p| *p == marker)
        .and_then(|i| parts.get(i + 1))
        .map(|w| String::from(*w))
        .ok_or_else(|| anyhow!("Could not find the word after '{}' in transfer request '{}'", marker, query));

    let address = word_after("to")?;
    let chain = word_after("on")?;
    Ok((chain, address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staking_is_matched_before_other_intents() -> anyhow::Result<()> {
        assert_eq!(ChatIntent::from_query("I want to STAKE")?, ChatIntent::Stake);
        assert_eq!(ChatIntent::from_query("stake, then transfer everything")?, ChatIntent::Stake);
        assert_eq!(ChatIntent::from_query("What is the best chain to stake ETH?")?, ChatIntent::Stake);
        Ok(())
    }

    #[test]
    fn create_account_identifies_chain() -> anyhow::Result<()> {
        assert_eq!(ChatIntent::from_query("Create account on Polygon")?, ChatIntent::CreateAccount(Some(ChainId::Poly)));
        assert_eq!(ChatIntent::from_query("please create account for ethereum")?, ChatIntent::CreateAccount(Some(ChainId::Eth)));
        assert_eq!(ChatIntent::from_query("create account on solana")?, ChatIntent::CreateAccount(None));
        Ok(())
    }

    #[test]
    fn transfer_extracts_address_and_chain() -> anyhow::Result<()> {
        let intent = ChatIntent::from_query("transfer 1 ETH to 0xabc123 on optimism")?;

        assert_eq!(intent, ChatIntent::Transfer { chain : String::from("optimism"), address : String::from("0xabc123") });
        Ok(())
    }

    #[test]
    fn transfer_without_destination_fails() {
        assert!(ChatIntent::from_query("transfer 1 ETH on optimism").is_err());
        assert!(ChatIntent::from_query("transfer 1 ETH to 0xabc123").is_err());
        assert!(ChatIntent::from_query("transfer 1 ETH to 0xabc123 on").is_err());
    }

    #[test]
    fn remaining_queries_are_chat() -> anyhow::Result<()> {
        assert_eq!(ChatIntent::from_query("List Wallets")?, ChatIntent::ListWallets);
        assert_eq!(ChatIntent::from_query("what is a validator?")?, ChatIntent::Chat);
        assert_eq!(ChatIntent::from_query("")?, ChatIntent::Chat);
        Ok(())
    }
}
