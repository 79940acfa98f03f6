// src/models/lifecycle.rs

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::error::AppError;

// --- Tipos de evento (enumeração fechada) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleEventType {
    Created,
    AssignedToSite,
    Shipped,
    Delivered,
    InstallationStarted,
    InstallationCompleted,
    Activated,
    RentStarted,
    MaintenanceScheduled,
    MaintenanceCompleted,
    IssueReported,
    IssueResolved,
    PartReplaced,
    Deactivated,
    RentEnded,
    Removed,
    Decommissioned,
    Reassigned,
    ConfigChanged,
}

impl LifecycleEventType {
    pub const ALL: [LifecycleEventType; 19] = [
        LifecycleEventType::Created,
        LifecycleEventType::AssignedToSite,
        LifecycleEventType::Shipped,
        LifecycleEventType::Delivered,
        LifecycleEventType::InstallationStarted,
        LifecycleEventType::InstallationCompleted,
        LifecycleEventType::Activated,
        LifecycleEventType::RentStarted,
        LifecycleEventType::MaintenanceScheduled,
        LifecycleEventType::MaintenanceCompleted,
        LifecycleEventType::IssueReported,
        LifecycleEventType::IssueResolved,
        LifecycleEventType::PartReplaced,
        LifecycleEventType::Deactivated,
        LifecycleEventType::RentEnded,
        LifecycleEventType::Removed,
        LifecycleEventType::Decommissioned,
        LifecycleEventType::Reassigned,
        LifecycleEventType::ConfigChanged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEventType::Created => "CREATED",
            LifecycleEventType::AssignedToSite => "ASSIGNED_TO_SITE",
            LifecycleEventType::Shipped => "SHIPPED",
            LifecycleEventType::Delivered => "DELIVERED",
            LifecycleEventType::InstallationStarted => "INSTALLATION_STARTED",
            LifecycleEventType::InstallationCompleted => "INSTALLATION_COMPLETED",
            LifecycleEventType::Activated => "ACTIVATED",
            LifecycleEventType::RentStarted => "RENT_STARTED",
            LifecycleEventType::MaintenanceScheduled => "MAINTENANCE_SCHEDULED",
            LifecycleEventType::MaintenanceCompleted => "MAINTENANCE_COMPLETED",
            LifecycleEventType::IssueReported => "ISSUE_REPORTED",
            LifecycleEventType::IssueResolved => "ISSUE_RESOLVED",
            LifecycleEventType::PartReplaced => "PART_REPLACED",
            LifecycleEventType::Deactivated => "DEACTIVATED",
            LifecycleEventType::RentEnded => "RENT_ENDED",
            LifecycleEventType::Removed => "REMOVED",
            LifecycleEventType::Decommissioned => "DECOMMISSIONED",
            LifecycleEventType::Reassigned => "REASSIGNED",
            LifecycleEventType::ConfigChanged => "CONFIG_CHANGED",
        }
    }

    /// Ícone e cor de cada tipo. Sem braço genérico: tipo novo sem mapeamento não compila.
    pub fn affordance(&self) -> EventAffordance {
        use EventColor::*;
        let (icon, color) = match self {
            LifecycleEventType::Created => ("plus-circle", Neutral),
            LifecycleEventType::AssignedToSite => ("map-pin", Info),
            LifecycleEventType::Shipped => ("truck", Info),
            LifecycleEventType::Delivered => ("package-check", Info),
            LifecycleEventType::InstallationStarted => ("wrench", Warning),
            LifecycleEventType::InstallationCompleted => ("check-circle", Success),
            LifecycleEventType::Activated => ("power", Success),
            LifecycleEventType::RentStarted => ("banknote", Success),
            LifecycleEventType::MaintenanceScheduled => ("calendar-clock", Warning),
            LifecycleEventType::MaintenanceCompleted => ("hammer", Success),
            LifecycleEventType::IssueReported => ("alert-triangle", Danger),
            LifecycleEventType::IssueResolved => ("check", Success),
            LifecycleEventType::PartReplaced => ("refresh-cw", Info),
            LifecycleEventType::Deactivated => ("power-off", Neutral),
            LifecycleEventType::RentEnded => ("receipt", Neutral),
            LifecycleEventType::Removed => ("trash-2", Danger),
            LifecycleEventType::Decommissioned => ("archive", Danger),
            LifecycleEventType::Reassigned => ("shuffle", Info),
            LifecycleEventType::ConfigChanged => ("settings", Warning),
        };
        EventAffordance { icon, color }
    }
}

// Aceita "INSTALLATION_COMPLETED" e "installation-completed".
// Qualquer outra coisa é defeito do dado de origem e vira erro.
impl FromStr for LifecycleEventType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        LifecycleEventType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| AppError::UnknownEventType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventAffordance {
    pub icon: &'static str,
    pub color: EventColor,
}

// --- EVENTO (Histórico / auditoria) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleEvent {
    pub id: Uuid,
    pub asset_id: Option<Uuid>,
    pub event_type: LifecycleEventType,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

// Formato cru vindo de fora: tipo e data ainda como texto.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLifecycleEvent {
    pub id: Uuid,
    pub asset_id: Option<Uuid>,
    pub event_type: String,
    pub timestamp: String,
    pub notes: Option<String>,
}

// Linha da timeline já pronta para exibição.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    #[serde(flatten)]
    pub event: LifecycleEvent,
    pub affordance: EventAffordance,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parses_both_spellings() {
        assert_eq!(
            "installation-completed".parse::<LifecycleEventType>().unwrap(),
            LifecycleEventType::InstallationCompleted
        );
        assert_eq!(
            "ASSIGNED_TO_SITE".parse::<LifecycleEventType>().unwrap(),
            LifecycleEventType::AssignedToSite
        );
    }

    #[test]
    fn unknown_type_fails_loudly() {
        let err = "teleported".parse::<LifecycleEventType>().unwrap_err();
        assert!(matches!(err, AppError::UnknownEventType(ref s) if s == "teleported"));
    }

    #[test]
    fn as_str_matches_serde_name() {
        for t in LifecycleEventType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
            assert_eq!(t.as_str().parse::<LifecycleEventType>().unwrap(), t);
        }
    }

    #[test]
    fn every_type_has_a_distinct_icon() {
        let icons: HashSet<_> = LifecycleEventType::ALL
            .iter()
            .map(|t| t.affordance().icon)
            .collect();
        assert_eq!(icons.len(), LifecycleEventType::ALL.len());
    }
}
