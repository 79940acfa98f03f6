// src/db/site_repo.rs

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{common::error::AppError, models::{configuration::ConfigurationSnapshot, site::Site}};

#[derive(Clone, Default)]
pub struct SiteRepository {
    sites: Arc<RwLock<HashMap<Uuid, Site>>>,
}

impl SiteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // O vínculo vem do snapshot recebido e não tem setter depois.
    pub fn create_site(
        &self,
        name: &str,
        address: Option<&str>,
        configuration: &ConfigurationSnapshot,
        created_at: DateTime<Utc>,
    ) -> Result<Site, AppError> {
        let site = Site {
            id: Uuid::new_v4(),
            name: name.to_string(),
            address: address.map(str::to_string),
            project_id: configuration.project_id,
            subproject_id: configuration.subproject_id,
            configuration_id: configuration.id,
            configuration_version: configuration.version,
            created_at,
            updated_at: created_at,
        };

        self.sites
            .write()
            .map_err(|_| anyhow::anyhow!("lock de sites envenenado"))?
            .insert(site.id, site.clone());
        Ok(site)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Site>, AppError> {
        let sites = self
            .sites
            .read()
            .map_err(|_| anyhow::anyhow!("lock de sites envenenado"))?;
        Ok(sites.get(&id).cloned())
    }

    /// Atualiza só os dados descritivos (nome, endereço).
    pub fn update_details(
        &self,
        id: Uuid,
        name: Option<&str>,
        address: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Result<Site, AppError> {
        let mut sites = self
            .sites
            .write()
            .map_err(|_| anyhow::anyhow!("lock de sites envenenado"))?;
        let site = sites.get_mut(&id).ok_or(AppError::SiteNotFound(id))?;

        if let Some(name) = name {
            site.name = name.to_string();
        }
        if let Some(address) = address {
            site.address = Some(address.to_string());
        }
        site.updated_at = updated_at;
        Ok(site.clone())
    }

    pub fn list_sites(&self) -> Result<Vec<Site>, AppError> {
        let sites = self
            .sites
            .read()
            .map_err(|_| anyhow::anyhow!("lock de sites envenenado"))?;
        let mut all: Vec<Site> = sites.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}
