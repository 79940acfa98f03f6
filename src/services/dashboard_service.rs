// src/services/dashboard_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    asset::{ContractStatus, ContractView},
    dashboard::{ExpiringUnitEntry, PortfolioSummary},
};

#[derive(Clone, Default)]
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    /// Conta as unidades por status e soma o aluguel que está em vigor.
    pub fn summarize<'a, I>(&self, views: I) -> PortfolioSummary
    where
        I: IntoIterator<Item = &'a ContractView>,
    {
        let mut summary = PortfolioSummary::default();

        for view in views {
            summary.total_units += 1;
            match view.status {
                ContractStatus::NotStarted => summary.not_started += 1,
                ContractStatus::Active => summary.active += 1,
                ContractStatus::ExpiringSoon => summary.expiring_soon += 1,
                ContractStatus::Expired => summary.expired += 1,
                ContractStatus::Terminated => summary.terminated += 1,
            }

            if matches!(view.status, ContractStatus::Active | ContractStatus::ExpiringSoon) {
                summary.monthly_recurring_rent += view.monthly_rent.unwrap_or(Decimal::ZERO);
            }
        }

        summary
    }

    /// Unidades vencendo, as mais urgentes primeiro.
    pub fn expiring_units<'a, I>(&self, units: I) -> Vec<ExpiringUnitEntry>
    where
        I: IntoIterator<Item = (Uuid, &'a str, &'a ContractView)>,
    {
        let mut entries: Vec<ExpiringUnitEntry> = units
            .into_iter()
            .filter(|(_, _, view)| view.status == ContractStatus::ExpiringSoon)
            .map(|(unit_id, serial, view)| ExpiringUnitEntry {
                unit_id,
                serial_number: serial.to_string(),
                days_remaining: view.days_remaining.unwrap_or(0),
            })
            .collect();

        entries.sort_by_key(|e| e.days_remaining);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(status: ContractStatus, rent: Option<i64>, days: Option<i64>) -> ContractView {
        ContractView {
            rent_start_date: None,
            rent_end_date: None,
            progress: 0,
            days_remaining: days,
            status,
            monthly_rent: rent.map(|r| Decimal::new(r, 0)),
        }
    }

    #[test]
    fn summary_counts_and_recurring_rent() {
        let views = vec![
            view(ContractStatus::NotStarted, None, None),
            view(ContractStatus::Active, Some(1000), Some(300)),
            view(ContractStatus::ExpiringSoon, Some(500), Some(20)),
            view(ContractStatus::Expired, Some(700), Some(0)),
            view(ContractStatus::Terminated, Some(900), Some(100)),
        ];

        let summary = DashboardService::new().summarize(&views);
        assert_eq!(summary.total_units, 5);
        assert_eq!(summary.not_started, 1);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.expiring_soon, 1);
        assert_eq!(summary.expired, 1);
        assert_eq!(summary.terminated, 1);
        assert_eq!(summary.monthly_recurring_rent, Decimal::new(1500, 0));
    }

    #[test]
    fn expiring_units_sorted_by_urgency() {
        let a = view(ContractStatus::ExpiringSoon, Some(100), Some(60));
        let b = view(ContractStatus::ExpiringSoon, Some(100), Some(5));
        let c = view(ContractStatus::Active, Some(100), Some(400));
        let (ia, ib, ic) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let entries = DashboardService::new()
            .expiring_units(vec![(ia, "A", &a), (ib, "B", &b), (ic, "C", &c)]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].unit_id, ib);
        assert_eq!(entries[0].days_remaining, 5);
        assert_eq!(entries[1].serial_number, "A");
    }
}
