use chrono::{DateTime, Utc};
use anyhow::anyhow;

use crate::assistant_service::*;
use crate::diagnostics::*;
use crate::intent::*;
use crate::predictor::*;
use crate::price_service::*;
use crate::PredictionError;
use super::predict_best_chain::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatQuery {
    pub query : String,
    pub model : String,
    pub api_key : Option<String>
}

pub fn answer_query(price_service : &mut impl PriceService,
                    model : &mut impl PriceModel,
                    chat_service : &mut impl ChatService,
                    wallet_service : &mut impl WalletService,
                    staking_options : &StakingOptions,
                    query : &ChatQuery,
                    current_time : &DateTime<Utc>,
                    diagnostics : &mut impl Diagnostics) -> anyhow::Result<String> {
    let intent = ChatIntent::from_query(&query.query)?;
    diagnostics.intent_detected(&intent);

    match intent {
        ChatIntent::Stake => {
            let advice = predict_best_chain(price_service, model, staking_options, current_time, diagnostics)?;
            match advice {
                StakingAdvice::NoPrices => Ok(String::from("Unable to fetch current prices. Please try again later.")),
                StakingAdvice::Advice { best_chain, .. } => {
                    let chain_text = best_chain.map(|c| c.to_string())
                        .unwrap_or_else(|| String::from("Unable to determine best chain"));
                    Ok(format!("The best chain to stake based on predictions is: {}.", chain_text))
                }
            }
        },
        ChatIntent::CreateAccount(chain) => {
            wallet_service.create_account(chain)?;
            let chain_text = chain.map_or("Unknown", |c| c.full_name());
            Ok(format!("Account creation initiated for {}.", chain_text))
        },
        ChatIntent::Transfer { chain, address } => {
            wallet_service.transfer(&chain, &address)?;
            Ok(format!("Transfer initiated to {} on {}.", address, chain))
        },
        ChatIntent::ListWallets => {
            let wallets = wallet_service.list_wallets()?;
            Ok(format!("Available wallets: {}", wallets.join(", ")))
        },
        ChatIntent::Chat => {
            let api_key = query.api_key.as_deref()
                .ok_or_else(|| anyhow!("No API key is configured for chat completions"))?;
            let reply = chat_service.complete(api_key, &query.model, &query.query)?;
            Ok(reply.into_message())
        }
    }
}

/// Like `answer_query`, but any failure becomes the reply text.
pub fn respond_to_query(price_service : &mut impl PriceService,
                        model : &mut impl PriceModel,
                        chat_service : &mut impl ChatService,
                        wallet_service : &mut impl WalletService,
                        staking_options : &StakingOptions,
                        query : &ChatQuery,
                        current_time : &DateTime<Utc>,
                        diagnostics : &mut impl Diagnostics) -> String {
    match answer_query(price_service, model, chat_service, wallet_service,
                       staking_options, query, current_time, diagnostics) {
        Ok(message) => message,
        Err(err) => describe_error(&err)
    }
}

fn describe_error(err : &anyhow::Error) -> String {
    match err.downcast_ref::<PredictionError>() {
        Some(prediction_error) => format!("Unable to predict: {}", prediction_error),
        None => format!("{:#}", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::utils::tests::*;
    use mockall::{predicate::*};
    use chrono::TimeZone;

    struct Mocks {
        price_service : MockPriceService,
        model : MockPriceModel,
        chat_service : MockChatService,
        wallet_service : MockWalletService,
        diagnostics : MockDiagnostics
    }

    impl Mocks {
        fn new() -> Mocks {
            let mut diagnostics = MockDiagnostics::new();
            diagnostics.expect_intent_detected().return_const(());
            diagnostics.expect_chain_predicted().return_const(());
            diagnostics.expect_chain_delta().return_const(());
            diagnostics.expect_current_price_unavailable().return_const(());
            Mocks { price_service : MockPriceService::new(), model : MockPriceModel::new(),
                chat_service : MockChatService::new(), wallet_service : MockWalletService::new(), diagnostics }
        }

        fn respond(&mut self, text : &str) -> String {
            let query = ChatQuery { query : String::from(text), model : String::from("gpt-4o"), api_key : Some(String::from("sk-test")) };
            let current_time = Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap();
            respond_to_query(&mut self.price_service, &mut self.model, &mut self.chat_service, &mut self.wallet_service,
                             &StakingOptions::default(), &query, &current_time, &mut self.diagnostics)
        }
    }

    #[test]
    fn staking_query_names_best_chain() {
        let mut mocks = Mocks::new();
        mocks.price_service.expect_get_price_history()
            .times(30)
            .returning(|_, _, _| Ok(build_history(1)));
        mocks.price_service.expect_get_current_price().with(eq(ChainId::Eth)).return_once(|_| Ok(2500.0));
        mocks.price_service.expect_get_current_price().with(eq(ChainId::Op)).return_once(|_| Ok(1.7));
        mocks.price_service.expect_get_current_price().with(eq(ChainId::Poly)).return_once(|_| Ok(0.5));
        mocks.model.expect_predict_next()
            .times(3)
            .returning(|h| Ok(h[0].price * 1.01));

        let message = mocks.respond("What is the best chain to stake ETH?");

        assert_eq!(message, "The best chain to stake based on predictions is: ETH.");
    }

    #[test]
    fn staking_query_without_prices_asks_to_retry() {
        let mut mocks = Mocks::new();
        mocks.price_service.expect_get_price_history().returning(|_, _, _| Ok(build_history(1)));
        mocks.price_service.expect_get_current_price().returning(|_| Err(anyhow!("HTTP error! status: 500")));

        let message = mocks.respond("I want to stake");

        assert_eq!(message, "Unable to fetch current prices. Please try again later.");
    }

    #[test]
    fn staking_query_with_short_history_is_unable_to_predict() {
        let mut mocks = Mocks::new();
        mocks.price_service.expect_get_price_history().returning(|_, _, _| Ok(build_history(1)));
        mocks.price_service.expect_get_current_price().returning(|_| Ok(2.0));
        mocks.model.expect_predict_next()
            .times(1)
            .returning(|h| Err(PredictionError::InsufficientHistory { available : h.len(), required : 31 }));

        let message = mocks.respond("stake");

        assert_eq!(message, "Unable to predict: not enough price history (got 30 samples, need at least 31)");
    }

    #[test]
    fn staking_query_with_flat_prices_is_unable_to_predict() {
        let mut mocks = Mocks::new();
        mocks.price_service.expect_get_price_history().returning(|_, _, _| Ok(build_history(1)));
        mocks.price_service.expect_get_current_price().returning(|_| Ok(2.0));
        mocks.model.expect_predict_next()
            .returning(|_| Err(PredictionError::DegenerateSeries { value : 2.0 }));

        let message = mocks.respond("stake");

        assert!(message.starts_with("Unable to predict: price history has no usable range"));
    }

    #[test]
    fn create_account_uses_chain_long_name() {
        let mut mocks = Mocks::new();
        mocks.wallet_service.expect_create_account()
            .with(eq(Some(ChainId::Op)))
            .times(1)
            .return_once(|_| Ok(()));
        mocks.wallet_service.expect_create_account()
            .with(eq(None))
            .times(1)
            .return_once(|_| Ok(()));

        assert_eq!(mocks.respond("Create account on Optimism"), "Account creation initiated for Optimism.");
        assert_eq!(mocks.respond("create account somewhere"), "Account creation initiated for Unknown.");
    }

    #[test]
    fn transfer_reports_destination() {
        let mut mocks = Mocks::new();
        mocks.wallet_service.expect_transfer()
            .with(eq("polygon"), eq("0xdef"))
            .times(1)
            .return_once(|_, _| Ok(()));

        assert_eq!(mocks.respond("transfer 5 to 0xdef on polygon"), "Transfer initiated to 0xdef on polygon.");
    }

    #[test]
    fn malformed_transfer_reports_error() {
        let mut mocks = Mocks::new();
        mocks.wallet_service.expect_transfer().never();

        let message = mocks.respond("transfer everything");

        assert!(message.starts_with("Could not find the word after 'to'"));
    }

    #[test]
    fn list_wallets_joins_names() {
        let mut mocks = Mocks::new();
        mocks.wallet_service.expect_list_wallets()
            .times(1)
            .return_once(|| Ok(vec!(String::from("Wallet1"), String::from("Wallet2"))));

        assert_eq!(mocks.respond("list wallets"), "Available wallets: Wallet1, Wallet2");
    }

    #[test]
    fn other_queries_go_to_chat_completion() {
        let mut mocks = Mocks::new();
        mocks.chat_service.expect_complete()
            .with(eq("sk-test"), eq("gpt-4o"), eq("What is a validator?"))
            .times(1)
            .return_once(|_, _, _| Ok(ChatReply::Content(String::from("A validator secures the chain."))));

        assert_eq!(mocks.respond("What is a validator?"), "A validator secures the chain.");
    }

    #[test]
    fn chat_provider_error_becomes_reply() {
        let mut mocks = Mocks::new();
        mocks.chat_service.expect_complete()
            .return_once(|_, _, _| Ok(ChatReply::ProviderError(String::from("Invalid API key"))));

        assert_eq!(mocks.respond("hello"), "Invalid API key");
    }

    #[test]
    fn chat_without_api_key_fails() -> anyhow::Result<()> {
        let mut mocks = Mocks::new();
        mocks.chat_service.expect_complete().never();

        let query = ChatQuery { query : String::from("hello"), model : String::from("gpt-4o"), api_key : None };
        let current_time = Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap();
        let result = answer_query(&mut mocks.price_service, &mut mocks.model, &mut mocks.chat_service, &mut mocks.wallet_service,
                                  &StakingOptions::default(), &query, &current_time, &mut mocks.diagnostics);

        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn detected_intent_is_reported() {
        let mut mocks = Mocks::new();
        mocks.diagnostics = MockDiagnostics::new();
        mocks.diagnostics.expect_intent_detected()
            .with(eq(ChatIntent::ListWallets))
            .times(1)
            .return_const(());
        mocks.wallet_service.expect_list_wallets().return_once(|| Ok(Vec::new()));

        assert_eq!(mocks.respond("List wallets please"), "Available wallets: ");
    }
}
