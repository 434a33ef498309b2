use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use dock_scheduler::config::{
    ActivityLogSettings, AutomationSettings, DateWindows, DockSettings, LoggingSettings,
    MaintenanceSettings, Settings, TimeSlotSettings, WarehouseSettings, WeekdayWindows,
};
use dock_scheduler::errors::DockSchedulerError;
use dock_scheduler::models::{
    Appointment, AppointmentRequirements, AppointmentType, AutomationMode, DockStatus,
    OperationType, TimeSlotWindow, Vehicle, VehicleStatus,
};
use dock_scheduler::scheduling::SlotSearchSettings;
use dock_scheduler::state_management::YardStateManager;

fn hours(open: (u32, u32), close: (u32, u32)) -> dock_scheduler::models::OperatingHours {
    dock_scheduler::models::OperatingHours {
        open: NaiveTime::from_hms_opt(open.0, open.1, 0).unwrap(),
        close: NaiveTime::from_hms_opt(close.0, close.1, 0).unwrap(),
    }
}

fn test_settings() -> Settings {
    Settings {
        logging: LoggingSettings::default(),
        automation: AutomationSettings::default(),
        slot_search: SlotSearchSettings::default(),
        maintenance: MaintenanceSettings::default(),
        activity_log: ActivityLogSettings::default(),
        warehouses: vec![WarehouseSettings {
            warehouse_id: "WH1".to_string(),
            name: "Test Warehouse".to_string(),
            enabled: true,
            zones: vec!["Ambient".to_string()],
            operating_hours: hours((6, 0), (22, 0)),
            docks: vec![
                DockSettings {
                    dock_id: "D1".to_string(),
                    name: "Dock 1".to_string(),
                    bay: "A".to_string(),
                    capacity: 1,
                    operating_hours: None,
                    compatible_vehicle_types: vec![],
                    safety_tags: vec![],
                },
                DockSettings {
                    dock_id: "D2".to_string(),
                    name: "Dock 2".to_string(),
                    bay: "A".to_string(),
                    capacity: 1,
                    operating_hours: None,
                    compatible_vehicle_types: vec![],
                    safety_tags: vec!["Cold Storage".to_string()],
                },
            ],
            time_slots: TimeSlotSettings::default(),
        }],
    }
}

async fn start_engine(settings: Settings) -> YardStateManager {
    let (manager, mut processor) = YardStateManager::new(&settings)
        .await
        .expect("engine should start");
    tokio::spawn(async move {
        let _ = processor.run().await;
    });
    manager
}

fn approved_vehicle(vehicle_id: &str, appointment_time: &str) -> Vehicle {
    Vehicle {
        vehicle_id: vehicle_id.to_string(),
        driver_name: "J. Doe".to_string(),
        carrier_name: "Acme Freight".to_string(),
        vendor_id: "VND-1".to_string(),
        appointment_time: appointment_time.to_string(),
        assigned_dock_id: None,
        status: VehicleStatus::Approved,
        entry_time: None,
        exit_time: None,
    }
}

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    test_date().and_hms_opt(hour, minute, 0).unwrap()
}

fn appointment(
    appointment_id: &str,
    dock_id: &str,
    vehicle_number: &str,
    start: NaiveDateTime,
    minutes: i64,
    refrigerated: bool,
) -> Appointment {
    Appointment::new(
        appointment_id.to_string(),
        format!("A-{}", appointment_id),
        "Acme Freight".to_string(),
        dock_id.to_string(),
        start,
        minutes,
        AppointmentType::Inbound,
        vehicle_number.to_string(),
        AppointmentRequirements {
            is_refrigerated: refrigerated,
        },
    )
}

#[tokio::test]
async fn check_in_assigns_and_occupies_the_first_dock() {
    let manager = start_engine(test_settings()).await;
    manager
        .register_vehicle("WH1", approved_vehicle("V1", "9:00AM"))
        .await
        .unwrap();

    let dock_id = manager.check_in_vehicle("WH1", "V1").await.unwrap();
    assert_eq!(dock_id, "D1");

    let dock = manager.get_dock("WH1", "D1").await.unwrap();
    assert_eq!(dock.status, DockStatus::Occupied);

    let vehicle = manager.get_vehicle("WH1", "V1").await.unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Entered);
    assert_eq!(vehicle.assigned_dock_id.as_deref(), Some("D1"));
    assert!(vehicle.entry_time.is_some());
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let manager = start_engine(test_settings()).await;
    manager
        .register_vehicle("WH1", approved_vehicle("V1", "9:00AM"))
        .await
        .unwrap();

    let result = manager
        .register_vehicle("WH1", approved_vehicle("V1", "10:00AM"))
        .await;
    assert!(matches!(result, Err(DockSchedulerError::StateError(_))));
}

#[tokio::test]
async fn refrigerated_appointment_steers_the_check_in() {
    let manager = start_engine(test_settings()).await;
    manager
        .register_vehicle("WH1", approved_vehicle("V1", "9:00AM"))
        .await
        .unwrap();
    manager
        .book_appointment("WH1", appointment("APT-1", "D1", "V1", at(9, 0), 60, true))
        .await
        .unwrap();

    let dock_id = manager.check_in_vehicle("WH1", "V1").await.unwrap();
    assert_eq!(dock_id, "D2");
}

#[tokio::test]
async fn full_facility_sends_the_vehicle_to_the_yard() {
    let manager = start_engine(test_settings()).await;
    for (id, time) in [("V1", "8:00AM"), ("V2", "8:30AM"), ("V3", "9:00AM")] {
        manager
            .register_vehicle("WH1", approved_vehicle(id, time))
            .await
            .unwrap();
    }
    manager.check_in_vehicle("WH1", "V1").await.unwrap();
    manager.check_in_vehicle("WH1", "V2").await.unwrap();

    let result = manager.check_in_vehicle("WH1", "V3").await;
    assert!(matches!(result, Err(DockSchedulerError::NoCompatibleDock(_))));

    let vehicle = manager.get_vehicle("WH1", "V3").await.unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Yard);
}

#[tokio::test]
async fn completing_the_operation_releases_the_dock_and_exits_the_vehicle() {
    let manager = start_engine(test_settings()).await;
    manager
        .register_vehicle("WH1", approved_vehicle("V1", "9:00AM"))
        .await
        .unwrap();
    let dock_id = manager.check_in_vehicle("WH1", "V1").await.unwrap();

    let operation_id = manager
        .start_operation("WH1", "V1", &dock_id, OperationType::Unloading, 45, "A. Smith")
        .await
        .unwrap();
    manager
        .complete_operation("WH1", &operation_id)
        .await
        .unwrap();

    let dock = manager.get_dock("WH1", &dock_id).await.unwrap();
    assert_eq!(dock.status, DockStatus::Available);
    assert_eq!(dock.operations_since_maintenance, 1);

    let vehicle = manager.get_vehicle("WH1", "V1").await.unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Exited);
    assert!(vehicle.exit_time.is_some());

    let operations = manager.get_operations("WH1").await.unwrap();
    assert_eq!(operations.len(), 1);
    assert!(!operations[0].is_active());
}

#[tokio::test]
async fn a_vehicle_runs_one_operation_at_a_time() {
    let manager = start_engine(test_settings()).await;
    manager
        .register_vehicle("WH1", approved_vehicle("V1", "9:00AM"))
        .await
        .unwrap();
    let dock_id = manager.check_in_vehicle("WH1", "V1").await.unwrap();

    manager
        .start_operation("WH1", "V1", &dock_id, OperationType::Unloading, 45, "A. Smith")
        .await
        .unwrap();
    let second = manager
        .start_operation("WH1", "V1", &dock_id, OperationType::Inspection, 15, "A. Smith")
        .await;
    assert!(matches!(second, Err(DockSchedulerError::StateError(_))));
}

#[tokio::test]
async fn delayed_operations_stay_active() {
    let manager = start_engine(test_settings()).await;
    manager
        .register_vehicle("WH1", approved_vehicle("V1", "9:00AM"))
        .await
        .unwrap();
    let dock_id = manager.check_in_vehicle("WH1", "V1").await.unwrap();
    let operation_id = manager
        .start_operation("WH1", "V1", &dock_id, OperationType::Loading, 60, "A. Smith")
        .await
        .unwrap();

    manager
        .report_delay("WH1", &operation_id, "forklift down")
        .await
        .unwrap();

    let operations = manager.get_operations("WH1").await.unwrap();
    assert!(operations[0].is_active());
    assert_eq!(operations[0].delay_reason.as_deref(), Some("forklift down"));
}

#[tokio::test]
async fn overlapping_bookings_are_rejected() {
    let manager = start_engine(test_settings()).await;
    manager
        .book_appointment("WH1", appointment("APT-1", "D1", "V1", at(9, 0), 60, false))
        .await
        .unwrap();

    let conflict = manager
        .book_appointment("WH1", appointment("APT-2", "D1", "V2", at(9, 30), 60, false))
        .await;
    assert!(matches!(conflict, Err(DockSchedulerError::SlotConflict(_))));

    // The same window on the other dock is fine.
    manager
        .book_appointment("WH1", appointment("APT-3", "D2", "V3", at(9, 30), 60, false))
        .await
        .unwrap();
}

#[tokio::test]
async fn booking_registers_the_expected_vehicle() {
    let manager = start_engine(test_settings()).await;
    manager
        .book_appointment("WH1", appointment("APT-1", "D2", "V-NEW", at(9, 0), 60, false))
        .await
        .unwrap();

    let vehicle = manager.get_vehicle("WH1", "V-NEW").await.unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Approved);
    assert_eq!(vehicle.assigned_dock_id.as_deref(), Some("D2"));
    assert_eq!(vehicle.appointment_time, "9:00AM");
}

#[tokio::test]
async fn find_slot_skips_booked_windows() {
    let manager = start_engine(test_settings()).await;
    manager
        .book_appointment("WH1", appointment("APT-1", "D1", "V1", at(9, 0), 60, false))
        .await
        .unwrap();
    manager
        .book_appointment("WH1", appointment("APT-2", "D2", "V2", at(9, 0), 60, false))
        .await
        .unwrap();

    let proposal = manager.find_slot("WH1", 60, false, test_date()).await.unwrap();
    assert_eq!(proposal.dock_id, "D1");
    assert_eq!(proposal.start, at(10, 0));
}

#[tokio::test]
async fn exhausted_day_reports_no_slot() {
    let manager = start_engine(test_settings()).await;
    // D2 is the only refrigeration-capable dock; book it solid.
    manager
        .book_appointment("WH1", appointment("APT-1", "D2", "V1", at(9, 0), 9 * 60, false))
        .await
        .unwrap();

    let result = manager.find_slot("WH1", 60, true, test_date()).await;
    assert!(matches!(result, Err(DockSchedulerError::NoSlotAvailable(_))));
}

#[tokio::test]
async fn maintenance_sweep_pulls_worn_docks_out_of_service() {
    let manager = start_engine(test_settings()).await;
    manager
        .get_repository()
        .with_state_mut("WH1", |state| {
            state.dock_mut("D1")?.operations_since_maintenance = 60;
            Ok(())
        })
        .await
        .unwrap();

    let flagged = manager.run_maintenance_sweep("WH1").await.unwrap();
    assert_eq!(flagged, vec!["D1".to_string()]);

    let dock = manager.get_dock("WH1", "D1").await.unwrap();
    assert_eq!(dock.status, DockStatus::Maintenance);
}

#[tokio::test]
async fn automation_assigns_yard_vehicles_in_appointment_order() {
    let manager = start_engine(test_settings()).await;
    manager
        .get_repository()
        .with_state_mut("WH1", |state| {
            let mut late = approved_vehicle("V-LATE", "1:00PM");
            late.status = VehicleStatus::Yard;
            let mut early = approved_vehicle("V-EARLY", "8:00AM");
            early.status = VehicleStatus::Yard;
            state.vehicles.push(late);
            state.vehicles.push(early);
            Ok(())
        })
        .await
        .unwrap();

    // Manual mode: ticks are no-ops.
    assert!(manager.run_automation_tick("WH1").await.unwrap().is_empty());

    manager
        .set_automation_mode(AutomationMode::Automatic)
        .await
        .unwrap();

    let first = manager.run_automation_tick("WH1").await.unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].vehicle_id, "V-EARLY");
    assert_eq!(first[0].dock_id, "D1");

    let second = manager.run_automation_tick("WH1").await.unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].vehicle_id, "V-LATE");
    assert_eq!(second[0].dock_id, "D2");

    // Yard drained, docks full: further ticks do nothing.
    assert!(manager.run_automation_tick("WH1").await.unwrap().is_empty());

    let early = manager.get_vehicle("WH1", "V-EARLY").await.unwrap();
    assert_eq!(early.status, VehicleStatus::Entered);
}

#[tokio::test]
async fn warehouse_removal_is_blocked_while_anything_is_active() {
    let manager = start_engine(test_settings()).await;
    manager
        .register_vehicle("WH1", approved_vehicle("V1", "9:00AM"))
        .await
        .unwrap();
    let dock_id = manager.check_in_vehicle("WH1", "V1").await.unwrap();

    let blocked = manager.remove_warehouse("WH1").await;
    assert!(matches!(blocked, Err(DockSchedulerError::StateError(_))));

    let operation_id = manager
        .start_operation("WH1", "V1", &dock_id, OperationType::Unloading, 30, "A. Smith")
        .await
        .unwrap();
    manager
        .complete_operation("WH1", &operation_id)
        .await
        .unwrap();

    let docks_removed = manager.remove_warehouse("WH1").await.unwrap();
    assert_eq!(docks_removed, 2);

    let gone = manager.get_docks("WH1").await;
    assert!(matches!(gone, Err(DockSchedulerError::WarehouseNotFound(_))));
}

#[tokio::test]
async fn activity_feed_keeps_only_the_most_recent_entries() {
    let mut settings = test_settings();
    settings.activity_log.capacity = 3;
    let manager = start_engine(settings).await;

    for (i, hour) in (9..14).enumerate() {
        let id = format!("APT-{}", i + 1);
        manager
            .book_appointment(
                "WH1",
                appointment(&id, "D1", &format!("V{}", i + 1), at(hour, 0), 60, false),
            )
            .await
            .unwrap();
    }

    let feed = manager.recent_activity().await;
    assert_eq!(feed.len(), 3);
    assert!(feed[0].message.contains("APT-3"));
    assert!(feed[2].message.contains("APT-5"));
}

#[tokio::test]
async fn booking_windows_honor_date_overrides() {
    let mut settings = test_settings();
    settings.warehouses[0].time_slots = TimeSlotSettings {
        weekday_windows: vec![WeekdayWindows {
            weekday: 0,
            windows: vec![TimeSlotWindow {
                from: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                to: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            }],
        }],
        date_overrides: vec![DateWindows {
            date: NaiveDate::from_ymd_opt(2026, 12, 24).unwrap(),
            windows: vec![TimeSlotWindow {
                from: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                to: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            }],
        }],
    };
    let manager = start_engine(settings).await;

    // 2026-08-31 is a Monday.
    let monday = manager.booking_windows("WH1", test_date()).await.unwrap();
    assert_eq!(monday.len(), 1);
    assert_eq!(monday[0].to, NaiveTime::from_hms_opt(12, 0, 0).unwrap());

    let christmas_eve = manager
        .booking_windows("WH1", NaiveDate::from_ymd_opt(2026, 12, 24).unwrap())
        .await
        .unwrap();
    assert_eq!(christmas_eve.len(), 1);
    assert_eq!(christmas_eve[0].to, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
}
