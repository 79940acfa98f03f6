// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

// 1. Resumo da carteira (os cards do topo)
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_units: usize,
    pub not_started: usize,
    pub active: usize,
    pub expiring_soon: usize,
    pub expired: usize,
    pub terminated: usize,
    pub monthly_recurring_rent: Decimal, // Soma dos aluguéis em vigor
}

// 2. Lista de contratos vencendo (aviso de renovação)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringUnitEntry {
    pub unit_id: Uuid,
    pub serial_number: String,
    pub days_remaining: i64,
}
