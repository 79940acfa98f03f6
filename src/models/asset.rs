// src/models/asset.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Status do contrato (derivado, nunca gravado) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractStatus {
    NotStarted,
    Active,
    ExpiringSoon,
    Expired,
    Terminated,
}

// --- Termos congelados na ativação ---
// Copiados da configuração vinculada; edições posteriores não retroagem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTerms {
    pub tenure_months: u32,
    pub monthly_rent: Decimal,
}

// --- UNIDADE (ativo instalado num site) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUnit {
    pub id: Uuid,
    pub site_id: Uuid,
    pub serial_number: String,

    pub configuration_id: Uuid,
    pub configuration_version: i32,

    pub activation_date: Option<DateTime<Utc>>, // Ausente até a ativação
    pub terms: Option<ContractTerms>,
    pub terminated_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssetUnit {
    pub fn is_terminated(&self) -> bool {
        self.terminated_at.is_some()
    }

    /// Encerrada em `now`: um encerramento com data futura ainda não vale.
    pub fn is_terminated_at(&self, now: DateTime<Utc>) -> bool {
        self.terminated_at.is_some_and(|at| at <= now)
    }
}

// --- Visão derivada para cards, barras de progresso e badges ---
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractView {
    pub rent_start_date: Option<DateTime<Utc>>,
    pub rent_end_date: Option<DateTime<Utc>>,
    pub progress: u8,
    pub days_remaining: Option<i64>,
    pub status: ContractStatus,
    pub monthly_rent: Option<Decimal>,
}
