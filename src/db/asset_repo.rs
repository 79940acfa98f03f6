// src/db/asset_repo.rs

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        asset::{AssetUnit, ContractTerms},
        lifecycle::{LifecycleEvent, LifecycleEventType},
        site::Site,
    },
};

#[derive(Clone, Default)]
pub struct AssetRepository {
    units: Arc<RwLock<HashMap<Uuid, AssetUnit>>>,
    // Histórico (append-only), na ordem de gravação
    events: Arc<RwLock<Vec<LifecycleEvent>>>,
}

impl AssetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_unit(
        &self,
        site: &Site,
        serial_number: &str,
        created_at: DateTime<Utc>,
    ) -> Result<AssetUnit, AppError> {
        let unit = AssetUnit {
            id: Uuid::new_v4(),
            site_id: site.id,
            serial_number: serial_number.to_string(),
            configuration_id: site.configuration_id,
            configuration_version: site.configuration_version,
            activation_date: None,
            terms: None,
            terminated_at: None,
            created_at,
            updated_at: created_at,
        };

        self.units
            .write()
            .map_err(|_| anyhow::anyhow!("lock de unidades envenenado"))?
            .insert(unit.id, unit.clone());
        Ok(unit)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Option<AssetUnit>, AppError> {
        let units = self
            .units
            .read()
            .map_err(|_| anyhow::anyhow!("lock de unidades envenenado"))?;
        Ok(units.get(&id).cloned())
    }

    pub fn list_by_site(&self, site_id: Uuid) -> Result<Vec<AssetUnit>, AppError> {
        let units = self
            .units
            .read()
            .map_err(|_| anyhow::anyhow!("lock de unidades envenenado"))?;
        let mut found: Vec<AssetUnit> = units.values().filter(|u| u.site_id == site_id).cloned().collect();
        found.sort_by(|a, b| a.serial_number.cmp(&b.serial_number));
        Ok(found)
    }

    pub fn list_units(&self) -> Result<Vec<AssetUnit>, AppError> {
        let units = self
            .units
            .read()
            .map_err(|_| anyhow::anyhow!("lock de unidades envenenado"))?;
        let mut all: Vec<AssetUnit> = units.values().cloned().collect();
        all.sort_by(|a, b| a.serial_number.cmp(&b.serial_number));
        Ok(all)
    }

    /// Grava ativação, termos e os eventos de ativação numa única operação.
    /// Quem chama garante que a unidade ainda não foi ativada.
    pub fn set_activation(
        &self,
        id: Uuid,
        activation_date: DateTime<Utc>,
        terms: ContractTerms,
        history: &[LifecycleEventType],
        updated_at: DateTime<Utc>,
    ) -> Result<AssetUnit, AppError> {
        // Ordem dos locks: unidades, depois eventos.
        let mut units = self
            .units
            .write()
            .map_err(|_| anyhow::anyhow!("lock de unidades envenenado"))?;
        let mut events = self
            .events
            .write()
            .map_err(|_| anyhow::anyhow!("lock de eventos envenenado"))?;
        let unit = units.get_mut(&id).ok_or(AppError::UnitNotFound(id))?;

        unit.activation_date = Some(activation_date);
        unit.terms = Some(terms);
        unit.updated_at = updated_at;
        events.extend(
            history
                .iter()
                .map(|&event_type| new_event(id, event_type, activation_date, None)),
        );
        Ok(unit.clone())
    }

    /// Grava o encerramento junto com o evento de descomissionamento.
    pub fn set_terminated(
        &self,
        id: Uuid,
        terminated_at: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<AssetUnit, AppError> {
        let mut units = self
            .units
            .write()
            .map_err(|_| anyhow::anyhow!("lock de unidades envenenado"))?;
        let mut events = self
            .events
            .write()
            .map_err(|_| anyhow::anyhow!("lock de eventos envenenado"))?;
        let unit = units.get_mut(&id).ok_or(AppError::UnitNotFound(id))?;

        unit.terminated_at = Some(terminated_at);
        unit.updated_at = terminated_at;
        events.push(new_event(id, LifecycleEventType::Decommissioned, terminated_at, notes));
        Ok(unit.clone())
    }

    pub fn record_event(
        &self,
        asset_id: Uuid,
        event_type: LifecycleEventType,
        timestamp: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<LifecycleEvent, AppError> {
        let event = new_event(asset_id, event_type, timestamp, notes);

        self.events
            .write()
            .map_err(|_| anyhow::anyhow!("lock de eventos envenenado"))?
            .push(event.clone());
        Ok(event)
    }

    pub fn list_events(&self, asset_id: Uuid) -> Result<Vec<LifecycleEvent>, AppError> {
        let events = self
            .events
            .read()
            .map_err(|_| anyhow::anyhow!("lock de eventos envenenado"))?;
        Ok(events.iter().filter(|e| e.asset_id == Some(asset_id)).cloned().collect())
    }
}

fn new_event(
    asset_id: Uuid,
    event_type: LifecycleEventType,
    timestamp: DateTime<Utc>,
    notes: Option<&str>,
) -> LifecycleEvent {
    LifecycleEvent {
        id: Uuid::new_v4(),
        asset_id: Some(asset_id),
        event_type,
        timestamp,
        notes: notes.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn site() -> Site {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Site {
            id: Uuid::new_v4(),
            name: "Aeroporto".into(),
            address: None,
            project_id: Uuid::new_v4(),
            subproject_id: None,
            configuration_id: Uuid::new_v4(),
            configuration_version: 1,
            created_at: at,
            updated_at: at,
        }
    }

    fn terms() -> ContractTerms {
        ContractTerms { tenure_months: 12, monthly_rent: Decimal::new(500, 0) }
    }

    #[test]
    fn activation_and_its_events_are_written_together() {
        let repo = AssetRepository::new();
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let unit = repo.create_unit(&site(), "ACS-200", at).unwrap();

        repo.set_activation(
            unit.id,
            at,
            terms(),
            &[LifecycleEventType::Activated, LifecycleEventType::RentStarted],
            at,
        )
        .unwrap();

        let types: Vec<_> = repo.list_events(unit.id).unwrap().into_iter().map(|e| e.event_type).collect();
        assert_eq!(types, vec![LifecycleEventType::Activated, LifecycleEventType::RentStarted]);
    }

    #[test]
    fn broken_event_log_leaves_unit_untouched() {
        let repo = AssetRepository::new();
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let unit = repo.create_unit(&site(), "ACS-201", at).unwrap();

        // Envenena o lock do histórico.
        let events = repo.events.clone();
        let _ = std::thread::spawn(move || {
            let _guard = events.write().unwrap();
            panic!("falha simulada");
        })
        .join();

        let err = repo
            .set_activation(unit.id, at, terms(), &[LifecycleEventType::Activated], at)
            .unwrap_err();
        assert!(matches!(err, AppError::InternalServerError(_)));

        let stored = repo.find_by_id(unit.id).unwrap().unwrap();
        assert!(stored.activation_date.is_none());
        assert!(stored.terms.is_none());

        let err = repo.set_terminated(unit.id, at, None).unwrap_err();
        assert!(matches!(err, AppError::InternalServerError(_)));
        assert!(repo.find_by_id(unit.id).unwrap().unwrap().terminated_at.is_none());
    }
}
