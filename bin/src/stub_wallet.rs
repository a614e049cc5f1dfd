use staking_lib::{ChainId, WalletService};

/// Wallet operations are acknowledged but not carried out yet.
pub struct StubWalletService;

impl StubWalletService {
    pub fn create() -> StubWalletService {
        StubWalletService
    }
}

impl WalletService for StubWalletService {
    fn create_account(&mut self, chain : Option<ChainId>) -> anyhow::Result<()> {
        tracing::info!(chain = ?chain, "Creating account: implementation pending");
        Ok(())
    }

    fn transfer(&mut self, chain : &str, address : &str) -> anyhow::Result<()> {
        tracing::info!(chain, address, "Transferring funds: implementation pending");
        Ok(())
    }

    fn list_wallets(&mut self) -> anyhow::Result<Vec<String>> {
        tracing::info!("Listing wallets: implementation pending");
        Ok(vec!(String::from("Wallet1"), String::from("Wallet2")))
    }
}
