// src/common/date_utils.rs

use chrono::{DateTime, Months, NaiveDate, Utc};

use crate::common::error::AppError;

/// Converte um valor de data vindo de fora ("2024-01-01" ou RFC 3339) para UTC.
/// Datas simples são tratadas como meia-noite UTC.
pub fn parse_date_like(value: &str) -> Result<DateTime<Utc>, AppError> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::InvalidDate(value.to_string()))
}

/// Versão para campos opcionais: ausente continua ausente, malformado é erro.
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    value.map(parse_date_like).transpose()
}

/// Soma de meses de calendário (não de dias fixos).
/// Fim de mês é ajustado: 31/01 + 1 mês = 28/02 (ou 29/02).
pub fn add_months(start: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>, AppError> {
    start
        .checked_add_months(Months::new(months))
        .ok_or(AppError::DateOutOfRange)
}
