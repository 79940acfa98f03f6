// src/services/site_service.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{AssetRepository, ConfigurationRepository, SiteRepository},
    models::{
        asset::{AssetUnit, ContractTerms, ContractView},
        lifecycle::{LifecycleEventType, TimelineEntry},
        site::{NewSitePayload, Site, UpdateSitePayload},
    },
    services::{
        contract_service::{ContractLifecycleService, rent_end_date},
        timeline_service::{sort_lifecycle_events, timeline_entries},
    },
};

#[derive(Clone)]
pub struct SiteService {
    configuration_repo: ConfigurationRepository,
    site_repo: SiteRepository,
    asset_repo: AssetRepository,
    lifecycle: ContractLifecycleService,
}

impl SiteService {
    pub fn new(
        configuration_repo: ConfigurationRepository,
        site_repo: SiteRepository,
        asset_repo: AssetRepository,
        lifecycle: ContractLifecycleService,
    ) -> Self {
        Self { configuration_repo, site_repo, asset_repo, lifecycle }
    }

    /// LÓGICA DE NEGÓCIO: cria o site e o vincula, para sempre,
    /// à versão mais recente da configuração do (sub)projeto.
    pub fn create_site(&self, payload: &NewSitePayload, now: DateTime<Utc>) -> Result<Site, AppError> {
        payload.validate()?;

        let configuration = self
            .configuration_repo
            .find_latest(payload.project_id, payload.subproject_id)?
            .ok_or_else(|| {
                AppError::ConfigurationNotFound(format!(
                    "projeto {} / subprojeto {:?}",
                    payload.project_id, payload.subproject_id
                ))
            })?;

        let site = self
            .site_repo
            .create_site(payload.name.trim(), payload.address.as_deref(), &configuration, now)?;

        tracing::info!(
            site_id = %site.id,
            configuration_id = %site.configuration_id,
            version = site.configuration_version,
            "Site criado e vinculado à configuração"
        );
        Ok(site)
    }

    pub fn get_site(&self, site_id: Uuid) -> Result<Site, AppError> {
        self.site_repo.find_by_id(site_id)?.ok_or(AppError::SiteNotFound(site_id))
    }

    pub fn list_sites(&self) -> Result<Vec<Site>, AppError> {
        self.site_repo.list_sites()
    }

    /// Edita nome/endereço. Projeto, subprojeto e configuração são travados.
    pub fn update_site(
        &self,
        site_id: Uuid,
        payload: &UpdateSitePayload,
        now: DateTime<Utc>,
    ) -> Result<Site, AppError> {
        payload.validate()?;
        let site = self.get_site(site_id)?;

        if let Err(e) = payload.check_binding(&site) {
            tracing::warn!(%site_id, error = %e, "Alteração de vínculo recusada");
            return Err(e);
        }

        self.site_repo
            .update_details(site_id, payload.name.as_deref().map(str::trim), payload.address.as_deref(), now)
    }

    /// Cadastra uma unidade no site; ela herda o vínculo de configuração do site.
    pub fn register_unit(
        &self,
        site_id: Uuid,
        serial_number: &str,
        now: DateTime<Utc>,
    ) -> Result<AssetUnit, AppError> {
        if serial_number.trim().is_empty() {
            return Err(AppError::validation(
                "serialNumber",
                "required",
                "O número de série é obrigatório.",
            ));
        }
        let site = self.get_site(site_id)?;

        let unit = self.asset_repo.create_unit(&site, serial_number.trim(), now)?;

        // Histórico
        self.asset_repo
            .record_event(unit.id, LifecycleEventType::Created, now, None)?;
        self.asset_repo.record_event(
            unit.id,
            LifecycleEventType::AssignedToSite,
            now,
            Some(&site.name),
        )?;

        tracing::info!(unit_id = %unit.id, %site_id, "Unidade cadastrada");
        Ok(unit)
    }

    pub fn get_unit(&self, unit_id: Uuid) -> Result<AssetUnit, AppError> {
        self.asset_repo.find_by_id(unit_id)?.ok_or(AppError::UnitNotFound(unit_id))
    }

    pub fn list_units(&self, site_id: Uuid) -> Result<Vec<AssetUnit>, AppError> {
        self.get_site(site_id)?;
        self.asset_repo.list_by_site(site_id)
    }

    pub fn list_all_units(&self) -> Result<Vec<AssetUnit>, AppError> {
        self.asset_repo.list_units()
    }

    /// Ativa a unidade: o relógio do aluguel começa e os termos da
    /// configuração vinculada são copiados e congelados.
    pub fn activate_unit(
        &self,
        unit_id: Uuid,
        activation_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<AssetUnit, AppError> {
        let unit = self.get_unit(unit_id)?;
        if unit.activation_date.is_some() {
            return Err(AppError::UnitAlreadyActivated(unit_id));
        }
        if unit.is_terminated() {
            return Err(AppError::UnitAlreadyTerminated(unit_id));
        }

        let configuration = self
            .configuration_repo
            .find_by_id(unit.configuration_id)?
            .ok_or_else(|| AppError::ConfigurationNotFound(unit.configuration_id.to_string()))?;

        let terms = ContractTerms {
            tenure_months: configuration.tenure_months,
            monthly_rent: configuration.base_monthly_rent,
        };

        let activated = self.asset_repo.set_activation(
            unit_id,
            activation_date,
            terms,
            &[LifecycleEventType::Activated, LifecycleEventType::RentStarted],
            now,
        )?;

        tracing::info!(
            %unit_id,
            tenure_months = terms.tenure_months,
            monthly_rent = %terms.monthly_rent,
            "Unidade ativada"
        );
        Ok(activated)
    }

    /// Encerramento explícito (descomissionamento antes do fim natural).
    /// A data precisa cair entre a ativação e o fim do aluguel.
    pub fn terminate_unit(
        &self,
        unit_id: Uuid,
        terminated_at: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<AssetUnit, AppError> {
        let unit = self.get_unit(unit_id)?;
        let Some(activation_date) = unit.activation_date else {
            return Err(AppError::UnitNotActivated(unit_id));
        };
        if unit.is_terminated() {
            return Err(AppError::UnitAlreadyTerminated(unit_id));
        }
        if terminated_at < activation_date {
            return Err(AppError::TerminationBeforeActivation(unit_id));
        }
        if let Some(terms) = unit.terms {
            let rent_end = rent_end_date(activation_date, terms.tenure_months)?;
            if terminated_at >= rent_end {
                tracing::warn!(%unit_id, %rent_end, "Encerramento após o vencimento recusado");
                return Err(AppError::ContractAlreadyExpired(unit_id));
            }
        }

        let terminated = self.asset_repo.set_terminated(unit_id, terminated_at, notes)?;

        tracing::info!(%unit_id, "Unidade encerrada");
        Ok(terminated)
    }

    /// Registra um evento operacional avulso (envio, manutenção, ocorrência...).
    pub fn record_event(
        &self,
        unit_id: Uuid,
        event_type: LifecycleEventType,
        timestamp: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<(), AppError> {
        self.get_unit(unit_id)?;
        self.asset_repo.record_event(unit_id, event_type, timestamp, notes)?;
        Ok(())
    }

    pub fn unit_timeline(&self, unit_id: Uuid) -> Result<Vec<TimelineEntry>, AppError> {
        self.get_unit(unit_id)?;
        let events = self.asset_repo.list_events(unit_id)?;
        Ok(timeline_entries(sort_lifecycle_events(events)))
    }

    pub fn contract_view(&self, unit_id: Uuid, now: DateTime<Utc>) -> Result<ContractView, AppError> {
        let unit = self.get_unit(unit_id)?;
        self.lifecycle.evaluate(&unit, now)
    }
}
