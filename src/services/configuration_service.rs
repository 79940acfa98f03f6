// src/services/configuration_service.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ConfigurationRepository,
    models::configuration::{ConfigurationSnapshot, NewConfigurationPayload},
};

#[derive(Clone)]
pub struct ConfigurationService {
    repo: ConfigurationRepository,
}

impl ConfigurationService {
    pub fn new(repo: ConfigurationRepository) -> Self {
        Self { repo }
    }

    /// Cria a configuração de um (sub)projeto. Cada chamada gera uma versão nova.
    pub fn create_configuration(
        &self,
        payload: &NewConfigurationPayload,
        now: DateTime<Utc>,
    ) -> Result<ConfigurationSnapshot, AppError> {
        let (installation, maintenance) = payload.to_terms()?;

        let snapshot = self.repo.insert_version(
            payload.project_id,
            payload.subproject_id,
            payload.base_monthly_rent,
            payload.tenure_months,
            installation,
            maintenance,
            now,
        )?;

        tracing::info!(
            configuration_id = %snapshot.id,
            version = snapshot.version,
            "Configuração criada"
        );
        Ok(snapshot)
    }

    /// "Editar" uma configuração: gera uma nova versão para o mesmo (sub)projeto.
    /// A versão antiga continua intacta para quem já está vinculado a ela.
    pub fn revise_configuration(
        &self,
        configuration_id: Uuid,
        payload: &NewConfigurationPayload,
        now: DateTime<Utc>,
    ) -> Result<ConfigurationSnapshot, AppError> {
        let current = self.get(configuration_id)?;

        if payload.project_id != current.project_id || payload.subproject_id != current.subproject_id {
            tracing::warn!(%configuration_id, "Tentativa de mover configuração para outro projeto");
            return Err(AppError::BindingImmutable("projectId"));
        }

        self.create_configuration(payload, now)
    }

    pub fn get(&self, configuration_id: Uuid) -> Result<ConfigurationSnapshot, AppError> {
        self.repo
            .find_by_id(configuration_id)?
            .ok_or_else(|| AppError::ConfigurationNotFound(configuration_id.to_string()))
    }

    pub fn find_latest(
        &self,
        project_id: Uuid,
        subproject_id: Option<Uuid>,
    ) -> Result<Option<ConfigurationSnapshot>, AppError> {
        self.repo.find_latest(project_id, subproject_id)
    }

    pub fn list_versions(
        &self,
        project_id: Uuid,
        subproject_id: Option<Uuid>,
    ) -> Result<Vec<ConfigurationSnapshot>, AppError> {
        self.repo.list_versions(project_id, subproject_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    fn payload(project_id: Uuid, subproject_id: Option<Uuid>, rent: i64) -> NewConfigurationPayload {
        NewConfigurationPayload {
            project_id,
            subproject_id,
            base_monthly_rent: Decimal::new(rent, 0),
            tenure_months: 36,
            installation_chargeable: false,
            installation_charge: None,
            maintenance_included: true,
            maintenance_charge: None,
        }
    }

    #[test]
    fn versions_increase_per_key() {
        let service = ConfigurationService::new(ConfigurationRepository::new());
        let project = Uuid::new_v4();
        let sub = Some(Uuid::new_v4());

        let v1 = service.create_configuration(&payload(project, sub, 1000), now()).unwrap();
        let v2 = service.create_configuration(&payload(project, sub, 1200), now()).unwrap();
        let other = service.create_configuration(&payload(project, None, 800), now()).unwrap();

        assert_eq!(v1.version, 1);
        assert_eq!(v2.version, 2);
        assert_eq!(other.version, 1);
        assert_ne!(v1.id, v2.id);
    }

    #[test]
    fn revision_keeps_the_old_snapshot() {
        let service = ConfigurationService::new(ConfigurationRepository::new());
        let project = Uuid::new_v4();

        let original = service.create_configuration(&payload(project, None, 1000), now()).unwrap();
        let revised = service
            .revise_configuration(original.id, &payload(project, None, 1500), now())
            .unwrap();

        assert_eq!(revised.version, 2);
        assert_eq!(service.get(original.id).unwrap(), original);
        assert_eq!(service.find_latest(project, None).unwrap(), Some(revised.clone()));

        let versions = service.list_versions(project, None).unwrap();
        assert_eq!(versions.iter().map(|v| v.version).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn revision_cannot_move_project() {
        let service = ConfigurationService::new(ConfigurationRepository::new());
        let original = service.create_configuration(&payload(Uuid::new_v4(), None, 1000), now()).unwrap();

        let err = service
            .revise_configuration(original.id, &payload(Uuid::new_v4(), None, 1000), now())
            .unwrap_err();
        assert!(matches!(err, AppError::BindingImmutable(_)));
    }

    #[test]
    fn invalid_payload_stores_nothing() {
        let service = ConfigurationService::new(ConfigurationRepository::new());
        let project = Uuid::new_v4();
        let mut p = payload(project, None, 1000);
        p.tenure_months = 0;

        assert!(service.create_configuration(&p, now()).is_err());
        assert!(service.find_latest(project, None).unwrap().is_none());
    }

    #[test]
    fn unknown_configuration() {
        let service = ConfigurationService::new(ConfigurationRepository::new());
        let err = service.get(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::ConfigurationNotFound(_)));
    }
}
