//! Terminal front-end for the shipping relay
//!
//! Fills the form from defaults, an optional JSON file and `--set` edits,
//! asks the relay for rates and optionally buys a label.
//!
//! ```text
//! shipping-quote-cli --set from.name="Frodo Baggins" --set from.street1="1 Bagshot Row" \
//!     --set from.city=Denver --set from.state=CO --set from.zip=80202 \
//!     --select <RATE_ID> --buy
//! ```

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use shipping_quote::config::AssetSettings;
use shipping_quote::domain::{AddressField, ParcelField, QuoteRequest};
use shipping_quote::form::{AddressSide, AssetPolicy, FormSession, FormState, FormView, RelayClient};

#[derive(Debug, Parser)]
#[command(name = "shipping-quote-cli", version, about = "Quote shipping rates and buy labels through the relay")]
struct Cli {
    /// Base URL of a running relay
    #[arg(long, env = "RELAY_URL", default_value = "http://127.0.0.1:8080")]
    relay_url: String,

    /// JSON file with `from`, `to` and `parcel`, replacing the defaults
    #[arg(long)]
    input: Option<PathBuf>,

    /// Field edit such as `from.zip=80202` or `parcel.weight=3`
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    edits: Vec<String>,

    /// Rate id to select after quoting
    #[arg(long)]
    select: Option<String>,

    /// Buy a label for the selected rate
    #[arg(long, requires = "select")]
    buy: bool,

    /// Print the request and response bodies
    #[arg(long)]
    show_json: bool,

    /// Extra host carrier logos may be loaded from, on top of `assets.image_hosts`
    #[arg(long = "image-host")]
    image_hosts: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shipping_quote=warn"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut state = FormState::new();
    if let Some(path) = &cli.input {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let request: QuoteRequest = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        state.from = request.from;
        state.to = request.to;
        state.parcel = request.parcel;
    }

    let client = RelayClient::new(&cli.relay_url)?;
    let session = FormSession::with_state(client, state);

    for edit in &cli.edits {
        apply_edit(&session, edit)?;
    }

    let mut hosts = AssetSettings::load()
        .context("Failed to load asset settings")?
        .image_hosts;
    hosts.extend(cli.image_hosts.iter().cloned());
    let assets = AssetPolicy::new(hosts);

    session.request_rates().await;
    let snapshot = session.snapshot();
    if cli.show_json {
        println!("request:\n{}\n", snapshot.request_json);
        println!("response:\n{}\n", snapshot.response_json);
    }
    print!("{}", FormView::new(&snapshot, &assets).render_text());
    if let Some(error) = snapshot.error {
        bail!(error);
    }

    if let Some(rate_id) = &cli.select {
        session.select_rate(rate_id.clone());
        if session.snapshot().selected_rate_id.is_none() {
            bail!("rate {} is not in the quoted list", rate_id);
        }

        if cli.buy {
            session.purchase_label().await;
            let snapshot = session.snapshot();
            print!("{}", FormView::new(&snapshot, &assets).render_text());
            if let Some(error) = snapshot.error {
                bail!(error);
            }
        }
    }

    Ok(())
}

/// Apply `side.field=value` to the session
fn apply_edit(session: &FormSession, edit: &str) -> Result<()> {
    let (path, value) = edit
        .split_once('=')
        .ok_or_else(|| anyhow!("expected FIELD=VALUE, got '{}'", edit))?;
    let (section, key) = path
        .split_once('.')
        .ok_or_else(|| anyhow!("expected from.*, to.* or parcel.*, got '{}'", path))?;

    let unknown = || anyhow!("unknown field '{}'", path);
    match section {
        "from" | "to" => {
            let side = if section == "from" { AddressSide::From } else { AddressSide::To };
            let field = AddressField::from_key(key).ok_or_else(unknown)?;
            session.edit_address(side, field, value);
        }
        "parcel" => {
            let field = ParcelField::from_key(key).ok_or_else(unknown)?;
            session.edit_parcel(field, value);
        }
        _ => return Err(unknown()),
    }
    Ok(())
}
