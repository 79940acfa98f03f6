// src/models/configuration.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::error::AppError;

// --- Enums ---

// Instalação: inclusa no contrato ou cobrada à parte (valor único).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Installation {
    Included,
    Chargeable(Decimal),
}

// Manutenção: inclusa ou cobrada à parte (valor mensal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Maintenance {
    Included,
    Chargeable(Decimal),
}

impl Installation {
    pub fn charge(&self) -> Decimal {
        match self {
            Installation::Included => Decimal::ZERO,
            Installation::Chargeable(amount) => *amount,
        }
    }
}

impl Maintenance {
    pub fn monthly_charge(&self) -> Decimal {
        match self {
            Maintenance::Included => Decimal::ZERO,
            Maintenance::Chargeable(amount) => *amount,
        }
    }
}

// --- Snapshot (imutável) ---
// Nunca é atualizado: qualquer mudança gera uma nova versão com novo ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSnapshot {
    pub id: Uuid,
    pub project_id: Uuid,
    pub subproject_id: Option<Uuid>,
    pub version: i32,
    pub base_monthly_rent: Decimal,
    pub tenure_months: u32,
    pub installation: Installation,
    pub maintenance: Maintenance,
    pub created_at: DateTime<Utc>,
}

impl ConfigurationSnapshot {
    /// Texto curto do badge de configuração. Ex: "v3 · 1500.00/mês · 36 meses".
    pub fn badge_label(&self) -> String {
        let mut label = format!(
            "v{} · {}/mês · {} meses",
            self.version,
            self.base_monthly_rent.round_dp(2),
            self.tenure_months
        );
        if let Installation::Chargeable(amount) = self.installation {
            label.push_str(&format!(" · instalação {}", amount.round_dp(2)));
        }
        if let Maintenance::Chargeable(amount) = self.maintenance {
            label.push_str(&format!(" · manutenção {}/mês", amount.round_dp(2)));
        }
        label
    }

    /// Valor total do contrato: aluguel e manutenção pelo prazo todo, mais a instalação.
    pub fn contract_value(&self) -> Decimal {
        let months = Decimal::from(self.tenure_months);
        self.base_monthly_rent * months
            + self.installation.charge()
            + self.maintenance.monthly_charge() * months
    }
}

// ---
// Validação Customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: NewConfiguration
// Chega no formato "plano" (flag + valor opcional) e vira as variantes acima.
// ---
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewConfigurationPayload {
    pub project_id: Uuid,
    pub subproject_id: Option<Uuid>,

    #[validate(custom(function = "validate_not_negative"))]
    pub base_monthly_rent: Decimal,

    #[validate(range(min = 1, message = "O prazo deve ter pelo menos 1 mês."))]
    pub tenure_months: u32,

    #[serde(default)]
    pub installation_chargeable: bool,
    #[validate(custom(function = "validate_not_negative"))]
    pub installation_charge: Option<Decimal>,

    #[serde(default = "default_true")]
    pub maintenance_included: bool,
    #[validate(custom(function = "validate_not_negative"))]
    pub maintenance_charge: Option<Decimal>,
}

fn default_true() -> bool {
    true
}

impl NewConfigurationPayload {
    // Regras de consistência entre flag e valor.
    fn validate_consistency(&self) -> Result<(), AppError> {
        if self.installation_chargeable && self.installation_charge.is_none() {
            return Err(AppError::validation(
                "installationCharge",
                "required",
                "Informe o valor da instalação cobrada.",
            ));
        }
        if !self.maintenance_included && self.maintenance_charge.is_none() {
            return Err(AppError::validation(
                "maintenanceCharge",
                "required",
                "Informe o valor da manutenção cobrada.",
            ));
        }
        Ok(())
    }

    /// Valida o payload e devolve as variantes tipadas (instalação, manutenção).
    pub fn to_terms(&self) -> Result<(Installation, Maintenance), AppError> {
        self.validate()?;
        self.validate_consistency()?;

        let installation = match (self.installation_chargeable, self.installation_charge) {
            (true, Some(amount)) => Installation::Chargeable(amount),
            _ => Installation::Included,
        };
        let maintenance = match (self.maintenance_included, self.maintenance_charge) {
            (false, Some(amount)) => Maintenance::Chargeable(amount),
            _ => Maintenance::Included,
        };
        Ok((installation, maintenance))
    }
}
