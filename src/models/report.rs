// src/models/report.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    asset::ContractView,
    dashboard::{ExpiringUnitEntry, PortfolioSummary},
    lifecycle::{RawLifecycleEvent, TimelineEntry},
};

// --- Entrada: exportação de unidades vinda do backend ---
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioExport {
    pub units: Vec<UnitRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRecord {
    pub id: Uuid,
    pub serial_number: String,
    pub site_name: Option<String>,

    // Datas ainda como texto: malformada é erro, ausente é "não iniciado".
    pub activation_date: Option<String>,
    pub tenure_months: Option<u32>,
    pub monthly_rent: Option<Decimal>,

    #[serde(default)]
    pub terminated: bool,

    #[serde(default)]
    pub events: Vec<RawLifecycleEvent>,
}

// --- Saída ---
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub generated_at: DateTime<Utc>,
    pub summary: PortfolioSummary,
    pub expiring: Vec<ExpiringUnitEntry>,
    pub units: Vec<UnitReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitReport {
    pub id: Uuid,
    pub serial_number: String,
    pub site_name: Option<String>,
    pub contract: ContractView,
    pub timeline: Vec<TimelineEntry>,
}
