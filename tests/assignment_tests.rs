use chrono::{NaiveDate, NaiveTime};
use dock_scheduler::models::{
    Appointment, AppointmentRequirements, AppointmentType, Dock, DockStatus, OperatingHours,
    Vehicle, VehicleStatus, COLD_STORAGE_TAG,
};
use dock_scheduler::scheduling::{assign, requirements_for, AssignmentOutcome};

fn hours() -> OperatingHours {
    OperatingHours {
        open: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        close: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    }
}

fn mock_dock(dock_id: &str, status: DockStatus, safety_tags: &[&str]) -> Dock {
    Dock {
        dock_id: dock_id.to_string(),
        warehouse_id: "WH1".to_string(),
        name: format!("Dock {}", dock_id),
        status,
        bay: "A".to_string(),
        capacity: 1,
        operating_hours: hours(),
        compatible_vehicle_types: vec!["Semi-Trailer".to_string()],
        safety_tags: safety_tags.iter().map(|t| t.to_string()).collect(),
        operations_since_maintenance: 0,
        notes: None,
    }
}

fn mock_vehicle(vehicle_id: &str, assigned_dock_id: Option<&str>) -> Vehicle {
    Vehicle {
        vehicle_id: vehicle_id.to_string(),
        driver_name: "J. Doe".to_string(),
        carrier_name: "Acme Freight".to_string(),
        vendor_id: "VND-1".to_string(),
        appointment_time: "9:00AM".to_string(),
        assigned_dock_id: assigned_dock_id.map(|d| d.to_string()),
        status: VehicleStatus::Approved,
        entry_time: None,
        exit_time: None,
    }
}

fn mock_appointment(vehicle_number: &str, dock_id: &str, refrigerated: bool) -> Appointment {
    let start = NaiveDate::from_ymd_opt(2026, 8, 31)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    Appointment::new(
        "APT-1".to_string(),
        "A-100".to_string(),
        "Acme Freight".to_string(),
        dock_id.to_string(),
        start,
        60,
        AppointmentType::Inbound,
        vehicle_number.to_string(),
        AppointmentRequirements {
            is_refrigerated: refrigerated,
        },
    )
}

#[test]
fn assigns_first_available_dock_in_stored_order() {
    let docks = vec![
        mock_dock("D1", DockStatus::Available, &[]),
        mock_dock("D2", DockStatus::Available, &[]),
    ];
    let vehicle = mock_vehicle("V1", None);

    let outcome = assign(&vehicle, &docks, &[]);
    assert_eq!(
        outcome,
        AssignmentOutcome::Assigned {
            dock_id: "D1".to_string(),
            kept_scheduled_dock: false,
        }
    );
}

#[test]
fn prefers_originally_scheduled_dock() {
    let docks = vec![
        mock_dock("D1", DockStatus::Available, &[]),
        mock_dock("D2", DockStatus::Available, &[]),
    ];
    let vehicle = mock_vehicle("V1", Some("D2"));

    let outcome = assign(&vehicle, &docks, &[]);
    assert_eq!(
        outcome,
        AssignmentOutcome::Assigned {
            dock_id: "D2".to_string(),
            kept_scheduled_dock: true,
        }
    );
}

#[test]
fn falls_back_when_scheduled_dock_is_occupied() {
    let docks = vec![
        mock_dock("D1", DockStatus::Available, &[]),
        mock_dock("D2", DockStatus::Occupied, &[]),
    ];
    let vehicle = mock_vehicle("V1", Some("D2"));

    let outcome = assign(&vehicle, &docks, &[]);
    assert_eq!(
        outcome,
        AssignmentOutcome::Assigned {
            dock_id: "D1".to_string(),
            kept_scheduled_dock: false,
        }
    );
}

#[test]
fn refrigeration_requirement_steers_past_untagged_docks() {
    let docks = vec![
        mock_dock("D1", DockStatus::Available, &[]),
        mock_dock("D2", DockStatus::Available, &[COLD_STORAGE_TAG]),
    ];
    let vehicle = mock_vehicle("V1", None);
    let appointments = vec![mock_appointment("V1", "D1", true)];

    let outcome = assign(&vehicle, &docks, &appointments);
    assert_eq!(
        outcome,
        AssignmentOutcome::Assigned {
            dock_id: "D2".to_string(),
            kept_scheduled_dock: false,
        }
    );
}

#[test]
fn scheduled_dock_is_skipped_when_it_fails_requirements() {
    let docks = vec![
        mock_dock("D1", DockStatus::Available, &[]),
        mock_dock("D2", DockStatus::Available, &[COLD_STORAGE_TAG]),
    ];
    let vehicle = mock_vehicle("V1", Some("D1"));
    let appointments = vec![mock_appointment("V1", "D1", true)];

    let outcome = assign(&vehicle, &docks, &appointments);
    assert_eq!(
        outcome,
        AssignmentOutcome::Assigned {
            dock_id: "D2".to_string(),
            kept_scheduled_dock: false,
        }
    );
}

#[test]
fn none_available_when_all_docks_busy() {
    let docks = vec![
        mock_dock("D1", DockStatus::Occupied, &[]),
        mock_dock("D2", DockStatus::Maintenance, &[]),
    ];
    let vehicle = mock_vehicle("V1", None);

    assert_eq!(assign(&vehicle, &docks, &[]), AssignmentOutcome::NoneAvailable);
}

#[test]
fn none_available_when_requirement_cannot_be_met() {
    let docks = vec![
        mock_dock("D1", DockStatus::Available, &[]),
        mock_dock("D2", DockStatus::Occupied, &[COLD_STORAGE_TAG]),
    ];
    let vehicle = mock_vehicle("V1", None);
    let appointments = vec![mock_appointment("V1", "D1", true)];

    assert_eq!(
        assign(&vehicle, &docks, &appointments),
        AssignmentOutcome::NoneAvailable
    );
}

#[test]
fn vehicle_without_matching_appointment_has_no_requirements() {
    let vehicle = mock_vehicle("V1", None);
    let appointments = vec![mock_appointment("V99", "D1", true)];

    assert_eq!(
        requirements_for(&vehicle, &appointments),
        AppointmentRequirements::default()
    );

    // And it is assignable to any free dock.
    let docks = vec![mock_dock("D1", DockStatus::Available, &[])];
    assert_eq!(
        assign(&vehicle, &docks, &appointments),
        AssignmentOutcome::Assigned {
            dock_id: "D1".to_string(),
            kept_scheduled_dock: false,
        }
    );
}

#[test]
fn requirements_come_from_the_matching_appointment() {
    let vehicle = mock_vehicle("V1", None);
    let appointments = vec![
        mock_appointment("V99", "D1", false),
        mock_appointment("V1", "D2", true),
    ];

    assert!(requirements_for(&vehicle, &appointments).is_refrigerated);
}
