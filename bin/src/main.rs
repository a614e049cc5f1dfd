mod config;
mod http_utils;
mod pyth;
mod red_pill;
mod request;
mod stub_wallet;
mod tracing_diagnostics;

use std::io::Read;
use std::path::PathBuf;
use anyhow::Context;
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;
use staking_lib::{PredictorParams, RecurrentPriceModel};
use staking_lib::commands::{self, ChatQuery, StakingAdvice};

use config::AdvisorConfig;
use pyth::service::PythPriceService;
use red_pill::RedPillChatService;
use request::Request;
use stub_wallet::StubWalletService;
use tracing_diagnostics::TracingDiagnostics;

#[derive(Debug, StructOpt)]
#[structopt(name = "staking-advisor", about = "Answers staking questions from predicted chain prices")]
struct Options {
    /// JSON configuration file, defaults are used when omitted
    #[structopt(long, parse(from_os_str))]
    config : Option<PathBuf>,

    /// Seed for the predictor's weight initialisation
    #[structopt(long)]
    seed : Option<u64>,

    #[structopt(subcommand)]
    command : Command
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Routes a request envelope, read from stdin unless given
    Handle {
        #[structopt(long)]
        request : Option<String>
    },
    /// Answers a single chat query
    Ask {
        #[structopt(long)]
        query : Option<String>,
        #[structopt(long)]
        model : Option<String>
    },
    /// Prints the predicted prices and the best chain to stake on
    Predict
}

struct Advisor {
    config : AdvisorConfig,
    price_service : PythPriceService,
    model : RecurrentPriceModel<StdRng, TracingDiagnostics>,
    chat_service : RedPillChatService,
    wallet_service : StubWalletService
}

impl Advisor {
    fn create(config : AdvisorConfig, seed : Option<u64>) -> anyhow::Result<Advisor> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy()
        };

        Ok(Advisor {
            price_service : PythPriceService::create(&config)?,
            model : RecurrentPriceModel::new(PredictorParams::default(), rng, TracingDiagnostics),
            chat_service : RedPillChatService::create(&config),
            wallet_service : StubWalletService::create(),
            config
        })
    }

    fn respond(&mut self, query : &ChatQuery) -> String {
        commands::respond_to_query(&mut self.price_service, &mut self.model, &mut self.chat_service,
                                   &mut self.wallet_service, &self.config.staking_options(), query,
                                   &Utc::now(), &mut TracingDiagnostics)
    }

    fn predict(&mut self) -> anyhow::Result<StakingAdvice> {
        commands::predict_best_chain(&mut self.price_service, &mut self.model, &self.config.staking_options(),
                                     &Utc::now(), &mut TracingDiagnostics)
    }
}

fn read_request(request : Option<String>) -> anyhow::Result<Request> {
    let request_json = match request {
        Some(request_json) => request_json,
        None => {
            let mut request_json = String::new();
            std::io::stdin().read_to_string(&mut request_json).context("Failed to read request from stdin")?;
            request_json
        }
    };

    serde_json::from_str(&request_json).context("Failed to parse request envelope")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let options = Options::from_args();
    let config = AdvisorConfig::load(options.config.as_deref())?;
    let mut advisor = Advisor::create(config, options.seed)?;

    let output = match options.command {
        Command::Handle { request } => {
            let request = read_request(request)?;
            let config = advisor.config.clone();
            let response = request::handle_request(&request, &config, |query| advisor.respond(query));
            tracing::info!(status = %response.status, "Request handled");
            serde_json::to_value(&response.body)?
        },
        Command::Ask { query, model } => {
            let mut request = Request::default();
            if let Some(query) = query {
                request.queries.insert(String::from("chatQuery"), vec!(query));
            }
            if let Some(model) = model {
                request.queries.insert(String::from("model"), vec!(model));
            }
            let query = request::chat_query_from_request(&request, &advisor.config);
            json!({ "message" : advisor.respond(&query) })
        },
        Command::Predict => match advisor.predict()? {
            StakingAdvice::NoPrices => json!({ "message" : "Unable to fetch current prices. Please try again later." }),
            StakingAdvice::Advice { predictions, current_prices, best_chain } => json!({
                "predictions" : predictions,
                "current_prices" : current_prices,
                "best_chain" : best_chain
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
