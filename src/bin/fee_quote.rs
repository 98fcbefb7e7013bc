//! Fee Quote - prices a single order against the configured fee model
//!
//! # Usage
//! ```sh
//! FEE_TIER=vip1 cargo run --bin fee_quote -- --symbol BTCUSDT --bid 100 --ask 1000 \
//!     --quantity -1 --order-type limit --limit-price 1000
//! ```
//!
//! # Environment Variables
//! See `FeeEnvConfig`: `FEE_MODEL`, `FEE_TIER`, `FEE_MAKER_RATE`, `FEE_TAKER_RATE`,
//! `FEE_FLAT_RATE`, `FEE_COMMISSION_PER_UNIT`, `FEE_MINIMUM_COMMISSION`.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use venue_fees::config::{FeeEnvConfig, FeeModelKind};
use venue_fees::domain::market::security::Security;
use venue_fees::domain::market::snapshot::OrderSubmissionSnapshot;
use venue_fees::domain::trading::exchange_fee_model::{OrderClassification, classify};
use venue_fees::domain::trading::fee_context::FeeContext;
use venue_fees::domain::trading::fee_model::OrderFee;
use venue_fees::domain::trading::types::{Order, OrderSide, OrderType};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderTypeArg {
    Market,
    Limit,
    Stop,
    StopLimit,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "BTCUSDT")]
    symbol: String,

    #[arg(long, default_value = "BTC")]
    base_currency: String,

    #[arg(long, default_value = "USDT")]
    quote_currency: String,

    /// Live best bid
    #[arg(long)]
    bid: Option<Decimal>,

    /// Live best ask
    #[arg(long)]
    ask: Option<Decimal>,

    /// Signed quantity (negative sells)
    #[arg(short, long, allow_hyphen_values = true)]
    quantity: Decimal,

    #[arg(long, value_enum, default_value = "market")]
    order_type: OrderTypeArg,

    #[arg(long)]
    limit_price: Option<Decimal>,

    #[arg(long)]
    post_only: bool,

    /// Bid seen when the venue accepted the order
    #[arg(long, requires = "snapshot_ask")]
    snapshot_bid: Option<Decimal>,

    /// Ask seen when the venue accepted the order
    #[arg(long, requires = "snapshot_bid")]
    snapshot_ask: Option<Decimal>,
}

#[derive(Serialize)]
struct Quote {
    order_id: String,
    symbol: String,
    order_type: OrderType,
    side: OrderSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    classification: Option<OrderClassification>,
    model: String,
    fee: OrderFee,
}

fn build_order(cli: &Cli) -> Result<Order> {
    let limit_price = || {
        cli.limit_price
            .context("--limit-price is required for limit and stop-limit orders")
    };

    let order = match cli.order_type {
        OrderTypeArg::Market => Order::market(cli.symbol.clone(), cli.quantity),
        OrderTypeArg::Stop => Order::stop_market(cli.symbol.clone(), cli.quantity),
        OrderTypeArg::Limit => Order::limit(cli.symbol.clone(), cli.quantity, limit_price()?),
        OrderTypeArg::StopLimit => {
            Order::stop_limit(cli.symbol.clone(), cli.quantity, limit_price()?)
        }
    };

    Ok(order.with_post_only(cli.post_only))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();

    let config = FeeEnvConfig::from_env().context("Failed to load fee config")?;
    let model = config.create_fee_model()?;
    info!("Fee model: {}", model.description());

    let mut security = Security::new(
        cli.symbol.clone(),
        cli.base_currency.clone(),
        cli.quote_currency.clone(),
    );
    security.bid = cli.bid;
    security.ask = cli.ask;

    let order = build_order(&cli)?;
    let snapshot = match (cli.snapshot_bid, cli.snapshot_ask) {
        (Some(bid), Some(ask)) => Some(OrderSubmissionSnapshot::new(bid, ask)?),
        _ => None,
    };

    let mut context = FeeContext::new(&security, &order)?;
    if let Some(snapshot) = snapshot.as_ref() {
        context = context.with_submission(snapshot);
    }

    let fee = model.order_fee(&context)?;
    let classification = match config.model {
        FeeModelKind::Exchange => Some(classify(&context)?),
        _ => None,
    };

    info!("{} {} {} -> {}", order.order_type, order.side(), order.symbol, fee);

    let quote = Quote {
        order_id: order.id.clone(),
        symbol: order.symbol.clone(),
        order_type: order.order_type,
        side: order.side(),
        classification,
        model: model.description(),
        fee,
    };
    println!("{}", serde_json::to_string_pretty(&quote)?);

    Ok(())
}
