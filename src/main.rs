use std::path::PathBuf;

use alloy_primitives::U256;
use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use transacto_rs::config::CONFIG_FILENAME;
use transacto_rs::otc::payload;
use transacto_rs::{AssetType, OtcClient, OtcConfig};

fn print_usage(bin: &str) {
    eprintln!("Usage:");
    eprintln!("  {} [--config <path>] [--rpc <url>] <command> [args]", bin);
    eprintln!();
    eprintln!("  Queries:");
    eprintln!("    stats                          platform counters and parameters");
    eprintln!("    count                          total number of orders");
    eprintln!("    list [offset] [limit]          order summaries (limit capped at 48)");
    eprintln!("    order <order_id>               full view of one order");
    eprintln!("    fill-value <order_id> <amount> cost of filling <amount> units");
    eprintln!();
    eprintln!("  Unsigned payloads:");
    eprintln!("    post <crypto|rwa> <asset_id> <amount> <price_per_unit> <buy|sell>");
    eprintln!("    fill <order_id> <amount>");
    eprintln!("    cancel <order_id>");
    eprintln!();
    eprintln!("    init-config [path]             write default config (default {})", CONFIG_FILENAME);
    eprintln!();
    eprintln!("  Output is JSON on stdout. Set RUST_LOG=debug to trace RPC calls.");
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_u256(s: &str, what: &str) -> Result<U256> {
    s.parse::<U256>().map_err(|e| anyhow!("invalid {} '{}': {}", what, s, e))
}

fn parse_u64_or(arg: Option<&String>, default: u64, what: &str) -> Result<u64> {
    match arg {
        Some(s) => s.parse().with_context(|| format!("invalid {} '{}'", what, s)),
        None => Ok(default),
    }
}

fn parse_asset_type(s: &str) -> Result<AssetType> {
    match s.to_ascii_lowercase().as_str() {
        "crypto" | "0" => Ok(AssetType::Crypto),
        "rwa" | "1" => Ok(AssetType::RealWorldAsset),
        other => bail!("unknown asset type '{}', expected crypto or rwa", other),
    }
}

fn parse_side(s: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "sell" => Ok(true),
        "buy" => Ok(false),
        other => bail!("unknown side '{}', expected buy or sell", other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let raw_args: Vec<String> = std::env::args().collect();
    let bin = raw_args.first().map(String::as_str).unwrap_or("transacto-rs");

    // Global flags, then the command and its positional args
    let mut config_path: Option<PathBuf> = None;
    let mut rpc_override: Option<String> = None;
    let mut rest: Vec<String> = Vec::new();
    let mut i = 1;
    while i < raw_args.len() {
        match raw_args[i].as_str() {
            "--config" | "--rpc" => {
                let flag = raw_args[i].clone();
                i += 1;
                let Some(value) = raw_args.get(i) else {
                    eprintln!("{} requires a value", flag);
                    std::process::exit(1);
                };
                if flag == "--config" {
                    config_path = Some(PathBuf::from(value));
                } else {
                    rpc_override = Some(value.clone());
                }
            }
            "-h" | "--help" => {
                print_usage(bin);
                return Ok(());
            }
            _ => rest.push(raw_args[i].clone()),
        }
        i += 1;
    }

    let Some((command, args)) = rest.split_first() else {
        print_usage(bin);
        std::process::exit(1);
    };

    if command == "init-config" {
        let path = args
            .first()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
        if path.exists() {
            bail!("{} already exists, refusing to overwrite", path.display());
        }
        OtcConfig::default().save(&path)?;
        tracing::info!("wrote default config to {}", path.display());
        return Ok(());
    }

    let mut config = OtcConfig::load(config_path.as_deref())?;
    if let Some(url) = rpc_override {
        config = config.with_rpc_url(&url);
    }
    tracing::debug!(?config, "loaded configuration");

    let client = OtcClient::new(&config)?;
    let contract = *client.contract();

    match (command.as_str(), args) {
        ("stats", []) => print_json(&client.platform_stats().await?)?,
        ("count", []) => println!("{}", client.order_count().await?),
        ("list", paging) if paging.len() <= 2 => {
            let offset = parse_u64_or(paging.first(), 0, "offset")?;
            let limit = parse_u64_or(paging.get(1), client.batch_size(), "limit")?;
            let orders = client.order_summaries(offset, limit).await?;
            tracing::info!("fetched {} order(s) from offset {}", orders.len(), offset);
            print_json(&orders)?;
        }
        ("order", [id]) => match client.order_view_str(id).await? {
            Some(view) => print_json(&view)?,
            None => bail!("order {} not found", id),
        },
        ("fill-value", [id, amount]) => {
            let order_id = transacto_rs::utils::parse_order_id(id)?;
            let amount = parse_u256(amount, "amount")?;
            match client.fill_quote(&order_id, amount).await? {
                Some(quote) => print_json(&quote)?,
                None => bail!("order {} not found", id),
            }
        }
        ("post", [asset_type, asset_id, amount, price, side]) => {
            if client.is_paused_or_assume_paused().await {
                tracing::warn!("platform is paused or unreachable, postOrder would revert");
            }
            let payload = payload::post_order_str(
                contract,
                parse_asset_type(asset_type)?,
                asset_id,
                parse_u256(amount, "amount")?,
                parse_u256(price, "price_per_unit")?,
                parse_side(side)?,
            )?;
            print_json(&payload)?;
        }
        ("fill", [id, amount]) => {
            let payload = payload::fill_order_str(contract, id, parse_u256(amount, "amount")?)?;
            print_json(&payload)?;
        }
        ("cancel", [id]) => print_json(&payload::cancel_order_str(contract, id)?)?,
        _ => {
            eprintln!("Unknown command or wrong arguments: '{}'", rest.join(" "));
            print_usage(bin);
            std::process::exit(1);
        }
    }

    Ok(())
}
