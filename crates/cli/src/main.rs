//! VVT Staking Command Line Interface
//!
//! Inspect the tier catalog, validate stakes and project rewards from the
//! terminal, or dry-run the full stake flow against an in-memory wallet.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vvt_staking::{
    project_boosted_rewards, project_rewards, quote_withdrawal, validate_stake, AmountInput,
    Catalog, StakingConfig, StakingTier,
};
use vvt_wallet::mock::{MockStakeSubmitter, MockWalletConnector};
use vvt_wallet::{
    format_amount, format_f64, from_atomic, to_atomic, DashboardSession, StakeFlow,
    StakeSubmitter, UndeployedStakeSubmitter,
};

const DEMO_ADDRESS: &str = "0x000000000000000000000000000000000000dEaD";

#[derive(Parser)]
#[command(name = "vvt-cli")]
#[command(about = "VVT staking tiers and reward calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Staking configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Tier catalog file (TOML or JSON), overrides the configured catalog
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List staking tiers in catalog order
    Tiers,
    /// Validate a stake amount for a tier
    Validate(StakeArgs),
    /// Project daily, monthly and yearly rewards
    Project {
        #[command(flatten)]
        stake: AmountTier,
        /// Apply the tier multiplier
        #[arg(long)]
        boosted: bool,
    },
    /// Show the withdrawal fee for an amount
    Fee(AmountTier),
    /// Recommend the best tier for an amount
    Recommend {
        /// Amount in tokens
        #[arg(long)]
        amount: f64,
    },
    /// Run the stake flow against an in-memory wallet
    Simulate {
        #[command(flatten)]
        stake: StakeArgs,
        /// Chain the simulated wallet is connected to
        #[arg(long)]
        chain_id: Option<u64>,
        /// Use a submitter with no deployed staking contract
        #[arg(long)]
        undeployed: bool,
    },
}

#[derive(Args)]
struct AmountTier {
    /// Amount in tokens
    #[arg(long)]
    amount: String,
    /// Tier id
    #[arg(long)]
    tier: String,
}

#[derive(Args)]
struct StakeArgs {
    #[command(flatten)]
    stake: AmountTier,
    /// Available balance in tokens
    #[arg(long)]
    balance: Option<f64>,
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    tier: &'a str,
    valid: bool,
    amount: Option<f64>,
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config =
        StakingConfig::load(cli.config.as_deref()).context("failed to load staking config")?;
    if let Some(path) = cli.catalog.clone() {
        config.catalog_path = Some(path);
    }
    let catalog = config.catalog().context("failed to load tier catalog")?;
    debug!(target: "cli", "using catalog with {} tiers", catalog.len());

    match cli.command {
        Commands::Tiers => handle_tiers(&catalog, cli.json),
        Commands::Validate(args) => handle_validate(&catalog, args, cli.json),
        Commands::Project { stake, boosted } => handle_project(&catalog, stake, boosted, cli.json),
        Commands::Fee(args) => handle_fee(&catalog, args, cli.json),
        Commands::Recommend { amount } => handle_recommend(&catalog, amount, cli.json),
        Commands::Simulate {
            stake,
            chain_id,
            undeployed,
        } => handle_simulate(&catalog, &config, stake, chain_id, undeployed, cli.json).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_tiers(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        return print_json(&catalog.tiers());
    }

    println!(
        "{:<10} {:<16} {:>7} {:>10} {:>6} {:>6} {:>6}",
        "ID", "NAME", "APY", "MIN", "LOCK", "MULT", "FEE"
    );
    for tier in catalog {
        println!(
            "{:<10} {:<16} {:>6}% {:>10} {:>5}d {:>5}x {:>5}%",
            tier.id,
            tier.name,
            tier.apy_percent,
            format_f64(tier.min_amount),
            tier.lock_period_days,
            tier.multiplier,
            tier.withdrawal_fee_percent
        );
    }
    for warning in catalog.warnings() {
        println!("warning: {warning}");
    }
    Ok(())
}

fn handle_validate(catalog: &Catalog, args: StakeArgs, json: bool) -> Result<()> {
    let tier = catalog.select(&args.stake.tier)?;
    let input = AmountInput::Text(args.stake.amount);
    let result = validate_stake(Some(&input), Some(tier), args.balance);

    if json {
        let report = ValidationReport {
            tier: &tier.id,
            valid: result.is_ok(),
            amount: result.as_ref().ok().copied(),
            error: result.as_ref().err().map(ToString::to_string),
        };
        return print_json(&report);
    }

    match result {
        Ok(amount) => println!("ok: {} staked in {}", format_f64(amount), tier.name),
        Err(err) => println!("invalid: {err}"),
    }
    Ok(())
}

fn resolve<'a>(catalog: &'a Catalog, args: &AmountTier) -> Result<(f64, &'a StakingTier)> {
    let tier = catalog.select(&args.tier)?;
    let amount = validate_stake(Some(&AmountInput::Text(args.amount.clone())), Some(tier), None)
        .or_else(|err| match err.minimum() {
            // Below-minimum amounts still get a projection.
            Some(_) => args
                .amount
                .trim()
                .parse::<f64>()
                .context("amount is not a number"),
            None => Err(err.into()),
        })?;
    Ok((amount, tier))
}

fn handle_project(catalog: &Catalog, args: AmountTier, boosted: bool, json: bool) -> Result<()> {
    let (amount, tier) = resolve(catalog, &args)?;
    let projection = if boosted {
        project_boosted_rewards(Some(amount), Some(tier))
    } else {
        project_rewards(Some(amount), Some(tier))
    };

    if json {
        return print_json(&projection);
    }

    println!(
        "{} in {} ({}% APY{})",
        format_f64(amount),
        tier.name,
        tier.apy_percent,
        if boosted {
            format!(", {}x multiplier", tier.multiplier)
        } else {
            String::new()
        }
    );
    println!("  daily:   {}", format_f64(projection.daily));
    println!("  monthly: {}", format_f64(projection.monthly));
    println!("  yearly:  {}", format_f64(projection.yearly));
    if amount < tier.min_amount {
        println!(
            "  note: below the {} minimum of {}",
            tier.name,
            format_f64(tier.min_amount)
        );
    }
    Ok(())
}

fn handle_fee(catalog: &Catalog, args: AmountTier, json: bool) -> Result<()> {
    let (amount, tier) = resolve(catalog, &args)?;
    let quote = quote_withdrawal(amount, tier);

    if json {
        return print_json(&quote);
    }

    println!(
        "withdrawing {} from {}: fee {} ({}%), net {}",
        format_f64(quote.amount),
        tier.name,
        format_f64(quote.fee),
        tier.withdrawal_fee_percent,
        format_f64(quote.net)
    );
    Ok(())
}

fn handle_recommend(catalog: &Catalog, amount: f64, json: bool) -> Result<()> {
    let best = catalog.best_tier_for(amount);

    if json {
        return print_json(&best);
    }

    match best {
        Some(tier) => {
            let projection = project_rewards(Some(amount), Some(tier));
            println!(
                "{} ({}% APY, {} day lock): {} per year",
                tier.name,
                tier.apy_percent,
                tier.lock_period_days,
                format_f64(projection.yearly)
            );
        }
        None => println!("no tier accepts {}", format_f64(amount)),
    }
    Ok(())
}

async fn handle_simulate(
    catalog: &Catalog,
    config: &StakingConfig,
    args: StakeArgs,
    chain_id: Option<u64>,
    undeployed: bool,
    json: bool,
) -> Result<()> {
    let balance = to_atomic(args.balance.unwrap_or(0.0), config.token_decimals)?;
    let wallet = Arc::new(
        MockWalletConnector::new(vec![DEMO_ADDRESS.to_string()])
            .with_balance(DEMO_ADDRESS, balance)
            .with_chain_id(chain_id.unwrap_or(config.expected_chain_id)),
    );
    let submitter: Arc<dyn StakeSubmitter> = if undeployed {
        Arc::new(UndeployedStakeSubmitter::new(config.contract_address.clone()))
    } else {
        Arc::new(MockStakeSubmitter::new())
    };
    let flow = StakeFlow::new(wallet.clone(), submitter, config.expected_chain_id);

    let mut session = DashboardSession::new(config.token_decimals);
    session.connect(&*wallet).await?;
    session.select_tier(catalog, &args.stake.tier)?;
    session.set_amount(args.stake.amount);

    let handle = flow.stake(&session, catalog).await?;
    if json {
        return print_json(&handle);
    }
    let staked = from_atomic(handle.amount_atomic, config.token_decimals)?;
    println!(
        "submitted {} {} to {} (tx {})",
        format_amount(staked),
        config.token_symbol,
        handle.tier_id,
        handle.tx_hash
    );
    Ok(())
}
