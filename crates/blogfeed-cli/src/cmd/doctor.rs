use anyhow::Result;
use blogfeed_client::rpc::rpc_client;
use blogfeed_client::{ChainRpc, KeypairWallet, PostClient, WalletProvider};
use serde::Serialize;

use crate::args::Cli;
use crate::output;

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub checks: Vec<Check>,
}

pub async fn run(cli: &Cli) -> Result<()> {
    let config = cli.client_config()?;
    let mut checks = Vec::new();

    checks.push(match PostClient::from_config(&config) {
        Ok(client) => Check {
            name: "idl".to_string(),
            ok: true,
            detail: format!("{} at {}", client.idl.name, client.program_id),
        },
        Err(e) => Check { name: "idl".to_string(), ok: false, detail: e.to_string() },
    });

    checks.push(match cli.keypair_path() {
        Ok(path) => {
            let wallet = KeypairWallet::new(path);
            Check {
                name: "wallet".to_string(),
                ok: wallet.is_available(),
                detail: wallet.path().display().to_string(),
            }
        }
        Err(e) => Check { name: "wallet".to_string(), ok: false, detail: e.to_string() },
    });

    checks.push(match rpc_client(&config).health().await {
        Ok(version) => Check {
            name: "rpc".to_string(),
            ok: true,
            detail: format!("{} (solana-core {version})", config.rpc_url),
        },
        Err(e) => Check { name: "rpc".to_string(), ok: false, detail: e.to_string() },
    });

    let ok = checks.iter().all(|c| c.ok);
    output::print(&DoctorOut { ok, checks })?;
    Ok(())
}
