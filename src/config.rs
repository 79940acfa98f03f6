// src/config.rs

use std::env;

use crate::{
    common::error::AppError,
    db::{AssetRepository, ConfigurationRepository, SiteRepository},
    services::{
        configuration_service::ConfigurationService,
        contract_service::ContractLifecycleService,
        dashboard_service::DashboardService,
        report_service::ReportService,
        site_service::SiteService,
    },
};

const DEFAULT_EXPIRING_THRESHOLD_DAYS: i64 = 90;

/// O que acontece com um contrato vencido.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryPolicy {
    RemainExpired,
    TerminateAfterGrace { grace_days: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleSettings {
    /// Abaixo deste número de dias o contrato é "vencendo".
    pub expiring_threshold_days: i64,
    pub expiry_policy: ExpiryPolicy,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            expiring_threshold_days: DEFAULT_EXPIRING_THRESHOLD_DAYS,
            expiry_policy: ExpiryPolicy::RemainExpired,
        }
    }
}

impl LifecycleSettings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado do ambiente real para ser testável sem mexer em variáveis globais.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let expiring_threshold_days = match lookup("EXPIRING_THRESHOLD_DAYS") {
            Some(raw) => parse_non_negative("EXPIRING_THRESHOLD_DAYS", &raw)?,
            None => DEFAULT_EXPIRING_THRESHOLD_DAYS,
        };

        let expiry_policy = match lookup("EXPIRED_GRACE_DAYS") {
            Some(raw) => ExpiryPolicy::TerminateAfterGrace {
                grace_days: parse_non_negative("EXPIRED_GRACE_DAYS", &raw)?,
            },
            None => ExpiryPolicy::RemainExpired,
        };

        Ok(Self { expiring_threshold_days, expiry_policy })
    }
}

fn parse_non_negative(key: &str, raw: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(v) if v >= 0 => Ok(v),
        _ => Err(AppError::Config(format!("{key} inválido: '{raw}'"))),
    }
}

// O estado da aplicação, montado explicitamente na inicialização.
#[derive(Clone)]
pub struct AppState {
    pub settings: LifecycleSettings,
    pub configuration_service: ConfigurationService,
    pub site_service: SiteService,
    pub lifecycle_service: ContractLifecycleService,
    pub dashboard_service: DashboardService,
    pub report_service: ReportService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let settings = LifecycleSettings::from_env()?;
        Ok(Self::with_settings(settings))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_settings(settings: LifecycleSettings) -> Self {
        let configuration_repo = ConfigurationRepository::new();
        let site_repo = SiteRepository::new();
        let asset_repo = AssetRepository::new();

        let lifecycle_service = ContractLifecycleService::new(settings.clone());
        let configuration_service = ConfigurationService::new(configuration_repo.clone());
        let site_service = SiteService::new(
            configuration_repo,
            site_repo,
            asset_repo,
            lifecycle_service.clone(),
        );
        let dashboard_service = DashboardService::new();
        let report_service = ReportService::new(lifecycle_service.clone(), dashboard_service.clone());

        tracing::info!(
            threshold_days = settings.expiring_threshold_days,
            policy = ?settings.expiry_policy,
            "✅ Estado da aplicação inicializado"
        );

        Self {
            settings,
            configuration_service,
            site_service,
            lifecycle_service,
            dashboard_service,
            report_service,
        }
    }

    pub fn shutdown(self) {
        tracing::info!("Encerrando o estado da aplicação");
        drop(self);
    }
}
