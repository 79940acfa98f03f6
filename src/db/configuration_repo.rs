// src/db/configuration_repo.rs

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::configuration::{ConfigurationSnapshot, Installation, Maintenance},
};

// Repositório em memória das configurações. Só insere: snapshot nunca é atualizado.
#[derive(Clone, Default)]
pub struct ConfigurationRepository {
    snapshots: Arc<RwLock<Vec<ConfigurationSnapshot>>>,
}

impl ConfigurationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grava uma nova versão para (projeto, subprojeto). A versão é max + 1.
    pub fn insert_version(
        &self,
        project_id: Uuid,
        subproject_id: Option<Uuid>,
        base_monthly_rent: Decimal,
        tenure_months: u32,
        installation: Installation,
        maintenance: Maintenance,
        created_at: DateTime<Utc>,
    ) -> Result<ConfigurationSnapshot, AppError> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| anyhow::anyhow!("lock de configurações envenenado"))?;

        let version = snapshots
            .iter()
            .filter(|s| s.project_id == project_id && s.subproject_id == subproject_id)
            .map(|s| s.version)
            .max()
            .unwrap_or(0)
            + 1;

        let snapshot = ConfigurationSnapshot {
            id: Uuid::new_v4(),
            project_id,
            subproject_id,
            version,
            base_monthly_rent,
            tenure_months,
            installation,
            maintenance,
            created_at,
        };
        snapshots.push(snapshot.clone());
        Ok(snapshot)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Option<ConfigurationSnapshot>, AppError> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| anyhow::anyhow!("lock de configurações envenenado"))?;
        Ok(snapshots.iter().find(|s| s.id == id).cloned())
    }

    pub fn find_latest(
        &self,
        project_id: Uuid,
        subproject_id: Option<Uuid>,
    ) -> Result<Option<ConfigurationSnapshot>, AppError> {
        Ok(self.list_versions(project_id, subproject_id)?.pop())
    }

    /// Todas as versões da chave, da mais antiga para a mais nova.
    pub fn list_versions(
        &self,
        project_id: Uuid,
        subproject_id: Option<Uuid>,
    ) -> Result<Vec<ConfigurationSnapshot>, AppError> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| anyhow::anyhow!("lock de configurações envenenado"))?;

        let mut versions: Vec<ConfigurationSnapshot> = snapshots
            .iter()
            .filter(|s| s.project_id == project_id && s.subproject_id == subproject_id)
            .cloned()
            .collect();
        versions.sort_by_key(|s| s.version);
        Ok(versions)
    }
}
