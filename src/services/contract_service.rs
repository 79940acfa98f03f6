// src/services/contract_service.rs

use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    common::{date_utils::add_months, error::AppError},
    config::{ExpiryPolicy, LifecycleSettings},
    models::asset::{AssetUnit, ContractStatus, ContractView},
};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Percentual decorrido do contrato, de 0 a 100.
/// Sem uma das datas o contrato não começou: 0.
pub fn compute_contract_progress(
    rent_start: Option<DateTime<Utc>>,
    rent_end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> u8 {
    let (Some(start), Some(end)) = (rent_start, rent_end) else {
        return 0;
    };

    let start = start.timestamp_millis();
    let end = end.timestamp_millis();
    let now = now.timestamp_millis();

    if now < start {
        return 0;
    }
    if now > end {
        return 100;
    }
    // Janela degenerada (fim <= início) com now dentro dela: já decorreu.
    if end <= start {
        return 100;
    }

    let ratio = (now - start) as f64 / (end - start) as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Dias até o fim do aluguel, arredondados para cima e nunca negativos.
pub fn days_remaining(rent_end: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (rent_end - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Fim do aluguel: início + prazo em meses de calendário.
pub fn rent_end_date(rent_start: DateTime<Utc>, tenure_months: u32) -> Result<DateTime<Utc>, AppError> {
    add_months(rent_start, tenure_months)
}

/// Classifica o contrato. O encerramento explícito vence qualquer conta de data.
pub fn classify_contract_status(
    activation_date: Option<DateTime<Utc>>,
    rent_start: Option<DateTime<Utc>>,
    rent_end: Option<DateTime<Utc>>,
    threshold_days: i64,
    explicitly_terminated: bool,
    now: DateTime<Utc>,
) -> ContractStatus {
    if explicitly_terminated {
        return ContractStatus::Terminated;
    }
    let Some(activation) = activation_date else {
        return ContractStatus::NotStarted;
    };

    // O relógio do aluguel começa na ativação, salvo data explícita.
    let start = rent_start.unwrap_or(activation);
    let Some(end) = rent_end else {
        return ContractStatus::Active;
    };

    // Ativada com início futuro: contrato em vigor, fora da janela de aviso.
    if now < start {
        return ContractStatus::Active;
    }

    if now >= end {
        return ContractStatus::Expired;
    }
    if days_remaining(end, now) < threshold_days {
        ContractStatus::ExpiringSoon
    } else {
        ContractStatus::Active
    }
}

#[derive(Debug, Clone)]
pub struct ContractLifecycleService {
    settings: LifecycleSettings,
}

impl ContractLifecycleService {
    pub fn new(settings: LifecycleSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &LifecycleSettings {
        &self.settings
    }

    /// Deriva a visão do contrato a partir das datas e do prazo congelado.
    pub fn evaluate_dates(
        &self,
        activation_date: Option<DateTime<Utc>>,
        tenure_months: Option<u32>,
        explicitly_terminated: bool,
        now: DateTime<Utc>,
    ) -> Result<ContractView, AppError> {
        let rent_start = activation_date;
        let rent_end = match (rent_start, tenure_months) {
            (Some(start), Some(months)) => Some(rent_end_date(start, months)?),
            _ => None,
        };

        let mut status = classify_contract_status(
            activation_date,
            rent_start,
            rent_end,
            self.settings.expiring_threshold_days,
            explicitly_terminated,
            now,
        );

        // Política de expiração: vencido pode virar encerrado após a carência.
        if let (ContractStatus::Expired, ExpiryPolicy::TerminateAfterGrace { grace_days }, Some(end)) =
            (status, self.settings.expiry_policy, rent_end)
        {
            let grace_end = TimeDelta::try_days(grace_days)
                .and_then(|grace| end.checked_add_signed(grace))
                .ok_or(AppError::DateOutOfRange)?;
            if now >= grace_end {
                status = ContractStatus::Terminated;
            }
        }

        let days = match (status, rent_end) {
            (ContractStatus::NotStarted, _) => None,
            (_, Some(end)) => Some(days_remaining(end, now)),
            (_, None) => None,
        };

        tracing::debug!(?status, rent_end = ?rent_end, "contrato avaliado");

        Ok(ContractView {
            rent_start_date: rent_start,
            rent_end_date: rent_end,
            progress: compute_contract_progress(rent_start, rent_end, now),
            days_remaining: days,
            status,
            monthly_rent: None,
        })
    }

    /// Avalia uma unidade usando apenas os termos congelados na ativação.
    pub fn evaluate(&self, unit: &AssetUnit, now: DateTime<Utc>) -> Result<ContractView, AppError> {
        let terms = unit.terms;
        let mut view = self.evaluate_dates(
            unit.activation_date,
            terms.map(|t| t.tenure_months),
            unit.is_terminated_at(now),
            now,
        )?;
        view.monthly_rent = terms.map(|t| t.monthly_rent);
        Ok(view)
    }
}
