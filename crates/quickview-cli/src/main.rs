mod terminal;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use quickview_core::{format_money, AppConfig, Resolution, DEFAULT_MONEY_FORMAT};
use quickview_popup::{LoadOutcome, QuickView, QuickViewOptions, SubmitOutcome};
use quickview_storefront::StorefrontClient;
use tracing_subscriber::EnvFilter;

use crate::terminal::TerminalSurface;

#[derive(Debug, Parser)]
#[command(name = "quickview")]
#[command(about = "Storefront quick view from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load a product into the quick view and print it
    Show {
        /// Product handle, e.g. `blue-shirt`
        handle: String,
        /// Pick an option value before printing (repeatable)
        #[arg(long = "select", value_name = "NAME=VALUE", value_parser = parse_selection)]
        selections: Vec<(String, String)>,
        /// Add the resolved variant to the cart
        #[arg(long)]
        add_to_cart: bool,
    },
    /// Print the current cart
    Cart,
    /// Format an amount in minor units
    Money {
        #[arg(allow_hyphen_values = true)]
        cents: i64,
        #[arg(long, env = "QUICKVIEW_MONEY_FORMAT", default_value = DEFAULT_MONEY_FORMAT)]
        format: String,
    },
}

fn parse_selection(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing option name in `{raw}`"));
    }
    Ok((name.to_owned(), value.trim().to_owned()))
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_client(config: &AppConfig) -> anyhow::Result<StorefrontClient> {
    StorefrontClient::new(
        &config.store_url,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_ms,
    )
    .context("failed to build storefront client")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Commands::Money { cents, format } = &cli.command {
        println!("{}", format_money(*cents, format));
        return Ok(());
    }

    let config = quickview_core::load_app_config()?;
    init_tracing(&config.log_level)?;
    tracing::debug!(store_url = %config.store_url, env = %config.env, "config loaded");

    match cli.command {
        Commands::Show {
            handle,
            selections,
            add_to_cart,
        } => show(&config, &handle, &selections, add_to_cart).await,
        Commands::Cart => cart(&config).await,
        Commands::Money { .. } => Ok(()),
    }
}

async fn show(
    config: &AppConfig,
    handle: &str,
    selections: &[(String, String)],
    add_to_cart: bool,
) -> anyhow::Result<()> {
    let options = QuickViewOptions::from_app_config(config);
    let quick_view = QuickView::new(TerminalSurface::default(), build_client(config)?, options);

    if quick_view.load(handle).await? != LoadOutcome::Shown {
        bail!("product `{handle}` was not shown");
    }

    for (name, value) in selections {
        match quick_view.select_option(name, value) {
            Resolution::Found(variant) => {
                tracing::info!(option = %name, value = %value, variant_id = variant.id, "option selected");
            }
            Resolution::NotFound => bail!("no variant matches {name}={value}"),
            Resolution::Ambiguous(count) => {
                bail!("{name}={value} matches {count} variants; select more options");
            }
        }
    }

    print!("{}", quick_view.with_surface(TerminalSurface::render));
    tracing::debug!(
        displayed = quick_view.with_surface(|s| s.displayed),
        "quick view rendered"
    );

    if add_to_cart {
        match quick_view.submit().await? {
            SubmitOutcome::Added(item) => println!(
                "added {} x {} ({})",
                item.quantity,
                item.title,
                format_money(item.price, &quick_view.options().money_format)
            ),
            SubmitOutcome::NoVariant => bail!("no variant resolved for `{handle}`"),
        }
        // Let the close transition finish before exiting.
        tokio::time::sleep(quick_view.options().close_delay).await;
        tracing::debug!(visibility = ?quick_view.visibility(), "quick view after add");
    }

    Ok(())
}

async fn cart(config: &AppConfig) -> anyhow::Result<()> {
    let cart = build_client(config)?.fetch_cart().await?;
    let money_format = &config.money_format;

    println!("{} item(s)", cart.item_count);
    for item in &cart.items {
        println!(
            "  {} x {}  {}",
            item.quantity,
            item.title,
            format_money(item.price, money_format)
        );
    }
    println!("total: {}", format_money(cart.total_price, money_format));
    Ok(())
}

#[cfg(test)]
mod tests;
