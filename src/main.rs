//src/main.rs

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use acs_contracts::{
    common::date_utils::parse_date_like,
    config::{AppState, LifecycleSettings},
};

#[derive(Parser, Debug)]
#[command(name = "acs-report")]
#[command(about = "Relatório de contratos das unidades ACS (status, progresso, timeline)")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Arquivo JSON exportado com as unidades ({ "units": [...] })
    portfolio: PathBuf,

    /// Data de referência (YYYY-MM-DD ou RFC 3339). Padrão: agora.
    #[arg(long)]
    now: Option<String>,

    /// Sobrescreve EXPIRING_THRESHOLD_DAYS
    #[arg(long, env = "EXPIRING_THRESHOLD_DAYS")]
    threshold_days: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    // Carrega o .env antes do filtro de log, para valer o RUST_LOG de lá.
    dotenvy::dotenv().ok();

    // Logs vão para stderr: stdout fica só com o JSON.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();

    let app_state = match args.threshold_days {
        Some(days) if days >= 0 => {
            let settings = LifecycleSettings {
                expiring_threshold_days: days,
                ..LifecycleSettings::from_env()?
            };
            AppState::with_settings(settings)
        }
        Some(days) => anyhow::bail!("--threshold-days não pode ser negativo: {days}"),
        None => AppState::new().context("Falha ao inicializar o estado da aplicação.")?,
    };

    let now = match args.now.as_deref() {
        Some(raw) => parse_date_like(raw)?,
        None => Utc::now(),
    };

    let json = std::fs::read_to_string(&args.portfolio)
        .with_context(|| format!("Falha ao ler {}", args.portfolio.display()))?;

    let report = app_state.report_service.report_from_json(&json, now)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    app_state.shutdown();
    Ok(())
}
