//! Print one lookup category as JSON, or warm every category.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;

use vacman::ApiServices;
use vacman::domain::{CorrelationId, Language, LookupCategory};
use vacman::settings::ApiSettings;
use vacman::telemetry::init_tracing;

/// `vacman-lookups` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vacman-lookups",
    about = "Fetch VacMan reference data through the configured services",
    version
)]
struct CliArgs {
    /// Category slug, for example `branches` or `wfa-statuses`.
    #[arg(required_unless_present = "warm_up")]
    category: Option<String>,
    /// Project names onto one language (`en` or `fr`).
    #[arg(long = "lang", value_name = "tag")]
    language: Option<String>,
    /// Load every category concurrently and report failures.
    #[arg(long = "warm-up", conflicts_with = "category")]
    warm_up: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(CorrelationId::scope(CorrelationId::generate(), async_main()))
}

async fn async_main() -> Result<()> {
    let args = CliArgs::parse();
    // Settings come from the environment only; the command line belongs to
    // this tool.
    let settings = ApiSettings::load_from_iter([OsString::from("vacman-lookups")])
        .wrap_err("load VACMAN_* settings")?;
    init_tracing(settings.log_format()?);

    let services = ApiServices::from_settings(&settings)?;

    if args.warm_up {
        let report = services.lookups.warm_up().await;
        println!("loaded {} lookup categories", report.loaded);
        if report.is_complete() {
            return Ok(());
        }
        for (category, error) in &report.failed {
            eprintln!("{category}: {} ({})", error.message(), error.code());
        }
        return Err(eyre!("{} categories failed to load", report.failed.len()));
    }

    let slug = args
        .category
        .ok_or_else(|| eyre!("missing category argument"))?;
    let category = LookupCategory::from_slug(&slug).ok_or_else(|| {
        let known: Vec<_> = LookupCategory::ALL.iter().map(LookupCategory::slug).collect();
        eyre!("unknown category '{slug}'; expected one of: {}", known.join(", "))
    })?;
    let language = args.language.as_deref().map(Language::from_tag);

    let json = services.lookups.category_json(category, language).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json).wrap_err("render lookups")?
    );
    Ok(())
}
