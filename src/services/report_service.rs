// src/services/report_service.rs

use chrono::{DateTime, Utc};

use crate::{
    common::{date_utils::parse_optional_date, error::AppError},
    models::report::{PortfolioExport, PortfolioReport, UnitRecord, UnitReport},
    services::{
        contract_service::ContractLifecycleService,
        dashboard_service::DashboardService,
        timeline_service::build_timeline,
    },
};

#[derive(Clone)]
pub struct ReportService {
    lifecycle: ContractLifecycleService,
    dashboard: DashboardService,
}

impl ReportService {
    pub fn new(lifecycle: ContractLifecycleService, dashboard: DashboardService) -> Self {
        Self { lifecycle, dashboard }
    }

    pub fn report_from_json(&self, json: &str, now: DateTime<Utc>) -> Result<PortfolioReport, AppError> {
        let export: PortfolioExport = serde_json::from_str(json)?;
        self.build(export, now)
    }

    /// Deriva contrato e timeline de cada unidade e monta o resumo.
    /// Qualquer data ou tipo de evento inválido aborta o relatório inteiro.
    pub fn build(&self, export: PortfolioExport, now: DateTime<Utc>) -> Result<PortfolioReport, AppError> {
        let units = export
            .units
            .into_iter()
            .map(|record| self.unit_report(record, now))
            .collect::<Result<Vec<_>, _>>()?;

        let summary = self.dashboard.summarize(units.iter().map(|u| &u.contract));
        let expiring = self.dashboard.expiring_units(
            units
                .iter()
                .map(|u| (u.id, u.serial_number.as_str(), &u.contract)),
        );

        tracing::info!(
            total = summary.total_units,
            expiring = summary.expiring_soon,
            "Relatório da carteira gerado"
        );

        Ok(PortfolioReport { generated_at: now, summary, expiring, units })
    }

    fn unit_report(&self, record: UnitRecord, now: DateTime<Utc>) -> Result<UnitReport, AppError> {
        let activation_date = parse_optional_date(record.activation_date.as_deref())?;

        let mut contract = self.lifecycle.evaluate_dates(
            activation_date,
            record.tenure_months,
            record.terminated,
            now,
        )?;
        contract.monthly_rent = record.monthly_rent;

        Ok(UnitReport {
            id: record.id,
            serial_number: record.serial_number,
            site_name: record.site_name,
            contract,
            timeline: build_timeline(record.events)?,
        })
    }
}
