use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use dock_scheduler::models::{Dock, DockStatus, OperatingHours, YardEvent};
use dock_scheduler::rules::PredictiveMaintenanceRule;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 31)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn mock_dock(dock_id: &str, status: DockStatus, operations: u32) -> Dock {
    Dock {
        dock_id: dock_id.to_string(),
        warehouse_id: "WH1".to_string(),
        name: format!("Dock {}", dock_id),
        status,
        bay: "A".to_string(),
        capacity: 1,
        operating_hours: OperatingHours {
            open: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            close: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        },
        compatible_vehicle_types: vec![],
        safety_tags: vec![],
        operations_since_maintenance: operations,
        notes: None,
    }
}

#[test]
fn flags_available_docks_over_the_threshold() {
    let rule = PredictiveMaintenanceRule::new(50);
    let mut docks = vec![
        mock_dock("D1", DockStatus::Available, 51),
        mock_dock("D2", DockStatus::Available, 10),
    ];

    let events = rule.sweep("WH1", &mut docks, now());

    assert_eq!(events.len(), 1);
    match &events[0] {
        YardEvent::DockMaintenanceFlagged(e) => {
            assert_eq!(e.dock_id, "D1");
            assert_eq!(e.operations_since_maintenance, 51);
            assert_eq!(e.warehouse_id, "WH1");
        }
        other => panic!("unexpected event: {:?}", other),
    }
    assert_eq!(docks[0].status, DockStatus::Maintenance);
    assert!(docks[0].notes.as_deref().unwrap_or("").contains("51 operations"));
    assert_eq!(docks[1].status, DockStatus::Available);
}

#[test]
fn a_dock_exactly_at_the_threshold_stays_in_service() {
    let rule = PredictiveMaintenanceRule::new(50);
    let mut docks = vec![mock_dock("D1", DockStatus::Available, 50)];

    assert!(rule.sweep("WH1", &mut docks, now()).is_empty());
    assert_eq!(docks[0].status, DockStatus::Available);
}

#[test]
fn occupied_docks_are_never_pulled_mid_operation() {
    let rule = PredictiveMaintenanceRule::new(50);
    let mut docks = vec![mock_dock("D1", DockStatus::Occupied, 99)];

    assert!(rule.sweep("WH1", &mut docks, now()).is_empty());
    assert_eq!(docks[0].status, DockStatus::Occupied);
}

#[test]
fn docks_already_in_maintenance_are_not_reflagged() {
    let rule = PredictiveMaintenanceRule::new(50);
    let mut docks = vec![mock_dock("D1", DockStatus::Maintenance, 99)];

    assert!(rule.sweep("WH1", &mut docks, now()).is_empty());
}

#[test]
fn clearing_maintenance_resets_the_counter() {
    let mut dock = mock_dock("D1", DockStatus::Available, 60);
    dock.flag_maintenance();
    assert_eq!(dock.status, DockStatus::Maintenance);

    dock.clear_maintenance();
    assert_eq!(dock.status, DockStatus::Available);
    assert_eq!(dock.operations_since_maintenance, 0);
    assert!(dock.notes.is_none());
}
