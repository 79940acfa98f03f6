// src/services/timeline_service.rs

use crate::{
    common::{date_utils::parse_date_like, error::AppError},
    models::lifecycle::{LifecycleEvent, RawLifecycleEvent, TimelineEntry},
};

/// Mais recente primeiro. `sort_by` é estável: empates mantêm a ordem de entrada.
pub fn sort_lifecycle_events(mut events: Vec<LifecycleEvent>) -> Vec<LifecycleEvent> {
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    events
}

/// Converte o evento cru. Tipo desconhecido ou data malformada falham.
pub fn parse_raw_event(raw: RawLifecycleEvent) -> Result<LifecycleEvent, AppError> {
    Ok(LifecycleEvent {
        id: raw.id,
        asset_id: raw.asset_id,
        event_type: raw.event_type.parse()?,
        timestamp: parse_date_like(&raw.timestamp)?,
        notes: raw.notes,
    })
}

/// Monta a timeline completa: valida, ordena e anexa ícone/cor.
pub fn build_timeline(raw_events: Vec<RawLifecycleEvent>) -> Result<Vec<TimelineEntry>, AppError> {
    let events = raw_events
        .into_iter()
        .map(parse_raw_event)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(timeline_entries(sort_lifecycle_events(events)))
}

pub fn timeline_entries(sorted: Vec<LifecycleEvent>) -> Vec<TimelineEntry> {
    sorted
        .into_iter()
        .map(|event| TimelineEntry {
            affordance: event.event_type.affordance(),
            event,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lifecycle::{EventColor, LifecycleEventType};
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    fn event(event_type: LifecycleEventType, ts: DateTime<Utc>) -> LifecycleEvent {
        LifecycleEvent { id: Uuid::new_v4(), asset_id: None, event_type, timestamp: ts, notes: None }
    }

    fn raw(event_type: &str, timestamp: &str) -> RawLifecycleEvent {
        RawLifecycleEvent {
            id: Uuid::new_v4(),
            asset_id: None,
            event_type: event_type.to_string(),
            timestamp: timestamp.to_string(),
            notes: None,
        }
    }

    #[test]
    fn newest_first() {
        let t1 = event(LifecycleEventType::Created, at(1));
        let t2 = event(LifecycleEventType::Shipped, at(2));
        let t3 = event(LifecycleEventType::Delivered, at(3));

        let sorted = sort_lifecycle_events(vec![t3.clone(), t1.clone(), t2.clone()]);
        assert_eq!(sorted, vec![t3, t2, t1]);
    }

    #[test]
    fn ties_keep_input_order() {
        let a = event(LifecycleEventType::Activated, at(5));
        let b = event(LifecycleEventType::RentStarted, at(5));
        let older = event(LifecycleEventType::InstallationCompleted, at(4));

        let sorted = sort_lifecycle_events(vec![older.clone(), a.clone(), b.clone()]);
        assert_eq!(sorted, vec![a, b, older]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let events = vec![
            event(LifecycleEventType::Created, at(1)),
            event(LifecycleEventType::IssueReported, at(9)),
            event(LifecycleEventType::IssueResolved, at(9)),
            event(LifecycleEventType::PartReplaced, at(3)),
        ];
        let once = sort_lifecycle_events(events);
        let twice = sort_lifecycle_events(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn build_timeline_attaches_affordances() {
        let entries = build_timeline(vec![
            raw("created", "2024-01-01"),
            raw("ISSUE_REPORTED", "2024-02-10T08:30:00Z"),
        ])
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event.event_type, LifecycleEventType::IssueReported);
        assert_eq!(entries[0].affordance.color, EventColor::Danger);
        assert_eq!(entries[1].affordance.icon, "plus-circle");
    }

    #[test]
    fn unknown_type_aborts_the_timeline() {
        let err = build_timeline(vec![raw("created", "2024-01-01"), raw("exploded", "2024-01-02")])
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownEventType(_)));
    }

    #[test]
    fn malformed_timestamp_aborts_the_timeline() {
        let err = build_timeline(vec![raw("shipped", "32/01/2024")]).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));
    }

    #[test]
    fn timeline_entry_flattens_event_fields() {
        let entries = timeline_entries(vec![event(LifecycleEventType::ConfigChanged, at(7))]);
        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["eventType"], "CONFIG_CHANGED");
        assert_eq!(json["affordance"]["color"], "warning");
    }
}
