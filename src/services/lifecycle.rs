//! Coordinador de ciclo de vida de estados
//!
//! Reglas cruzadas entre entidades: una mutación de estado en un viaje o en
//! un registro de mantenimiento propaga cambios de estado al vehículo y al
//! conductor involucrados. La validez de las transiciones se aplica aquí,
//! centralmente, sobre los enums cerrados de los modelos.
//!
//! Política para cascadas: si el vehículo o el conductor referenciado fue
//! eliminado, la actualización en cascada se omite en silencio (solo warn).
//! La excepción es `start_trip`, que falla con error de validación si el
//! vehículo o el conductor ya no existen.

use tracing::warn;

use crate::models::{DriverStatus, MaintenanceRecord, MaintenanceStatus, TripStatus, VehicleStatus};
use crate::store::FleetStore;
use crate::utils::errors::{invalid_transition_error, not_found_error, AppError, AppResult};

/// Inicia un viaje planificado: trip → in-progress, vehículo → in-use,
/// conductor → on-trip.
pub fn start_trip(store: &mut FleetStore, trip_id: &str) -> AppResult<()> {
    let trip = store
        .trip(trip_id)
        .ok_or_else(|| not_found_error("Trip", trip_id))?;

    if trip.status != TripStatus::Planned {
        return Err(invalid_transition_error(
            "Trip",
            &trip.status.to_string(),
            "in-progress",
        ));
    }

    let vehicle_id = trip.vehicle_id.clone();
    let driver_id = trip.driver_id.clone();

    if store.vehicle(&vehicle_id).is_none() {
        return Err(AppError::Validation(format!(
            "El vehículo '{}' del viaje ya no existe",
            vehicle_id
        )));
    }
    if store.driver(&driver_id).is_none() {
        return Err(AppError::Validation(format!(
            "El conductor '{}' del viaje ya no existe",
            driver_id
        )));
    }

    if let Some(trip) = store.trip_mut(trip_id) {
        trip.status = TripStatus::InProgress;
    }
    if let Some(vehicle) = store.vehicle_mut(&vehicle_id) {
        vehicle.status = VehicleStatus::InUse;
    }
    if let Some(driver) = store.driver_mut(&driver_id) {
        driver.status = DriverStatus::OnTrip;
    }
    Ok(())
}

/// Completa un viaje en curso: trip → completed, vehículo y conductor →
/// available, y el contador de viajes del conductor sube exactamente en 1.
pub fn complete_trip(store: &mut FleetStore, trip_id: &str) -> AppResult<()> {
    let trip = store
        .trip(trip_id)
        .ok_or_else(|| not_found_error("Trip", trip_id))?;

    if trip.status != TripStatus::InProgress {
        return Err(invalid_transition_error(
            "Trip",
            &trip.status.to_string(),
            "completed",
        ));
    }

    let vehicle_id = trip.vehicle_id.clone();
    let driver_id = trip.driver_id.clone();

    if let Some(trip) = store.trip_mut(trip_id) {
        trip.status = TripStatus::Completed;
    }
    release_vehicle(store, &vehicle_id, trip_id);
    match store.driver_mut(&driver_id) {
        Some(driver) => {
            driver.status = DriverStatus::Available;
            driver.total_trips += 1;
        }
        None => warn!(
            "Conductor '{}' del viaje '{}' ya no existe, cascada omitida",
            driver_id, trip_id
        ),
    }
    Ok(())
}

/// Cancela un viaje planificado o en curso: trip → cancelled, vehículo y
/// conductor vuelven a available.
pub fn cancel_trip(store: &mut FleetStore, trip_id: &str) -> AppResult<()> {
    let trip = store
        .trip(trip_id)
        .ok_or_else(|| not_found_error("Trip", trip_id))?;

    if trip.status.is_terminal() {
        return Err(invalid_transition_error(
            "Trip",
            &trip.status.to_string(),
            "cancelled",
        ));
    }

    let vehicle_id = trip.vehicle_id.clone();
    let driver_id = trip.driver_id.clone();

    if let Some(trip) = store.trip_mut(trip_id) {
        trip.status = TripStatus::Cancelled;
    }
    release_vehicle(store, &vehicle_id, trip_id);
    match store.driver_mut(&driver_id) {
        Some(driver) => driver.status = DriverStatus::Available,
        None => warn!(
            "Conductor '{}' del viaje '{}' ya no existe, cascada omitida",
            driver_id, trip_id
        ),
    }
    Ok(())
}

/// Crea un registro de mantenimiento. Si se crea directamente `in-progress`,
/// el vehículo pasa a `maintenance` en el momento de la creación.
pub fn schedule_maintenance(store: &mut FleetStore, record: MaintenanceRecord) -> AppResult<String> {
    if store.vehicle(&record.vehicle_id).is_none() {
        return Err(AppError::Validation(format!(
            "El vehículo '{}' no existe",
            record.vehicle_id
        )));
    }

    let vehicle_id = record.vehicle_id.clone();
    let starts_in_progress = record.status == MaintenanceStatus::InProgress;
    let id = store.add_maintenance_record(record);

    if starts_in_progress {
        if let Some(vehicle) = store.vehicle_mut(&vehicle_id) {
            vehicle.status = VehicleStatus::Maintenance;
        }
    }
    Ok(id)
}

/// Transición de estado de un registro de mantenimiento con su cascada:
/// a `in-progress` el vehículo pasa a `maintenance`; a `completed` o
/// `cancelled` vuelve a `available`. La transición de vuelta a `scheduled`
/// no revierte el estado del vehículo (asimetría heredada del comportamiento
/// original, pineada por test).
pub fn update_maintenance_status(
    store: &mut FleetStore,
    record_id: &str,
    new_status: MaintenanceStatus,
) -> AppResult<()> {
    let record = store
        .maintenance_record(record_id)
        .ok_or_else(|| not_found_error("Maintenance record", record_id))?;

    if record.status.is_terminal() {
        return Err(invalid_transition_error(
            "Maintenance record",
            &record.status.to_string(),
            &new_status.to_string(),
        ));
    }

    let vehicle_id = record.vehicle_id.clone();

    if let Some(record) = store.maintenance_record_mut(record_id) {
        record.status = new_status;
    }

    match new_status {
        MaintenanceStatus::InProgress => match store.vehicle_mut(&vehicle_id) {
            Some(vehicle) => vehicle.status = VehicleStatus::Maintenance,
            None => warn!(
                "Vehículo '{}' del mantenimiento '{}' ya no existe, cascada omitida",
                vehicle_id, record_id
            ),
        },
        MaintenanceStatus::Completed | MaintenanceStatus::Cancelled => {
            release_vehicle(store, &vehicle_id, record_id);
        }
        MaintenanceStatus::Scheduled => {}
    }
    Ok(())
}

/// Elimina un registro de mantenimiento; si estaba `in-progress`, el
/// vehículo vuelve a `available`.
pub fn remove_maintenance_record(
    store: &mut FleetStore,
    record_id: &str,
) -> AppResult<MaintenanceRecord> {
    let record = store
        .remove_maintenance_record(record_id)
        .ok_or_else(|| not_found_error("Maintenance record", record_id))?;

    if record.status == MaintenanceStatus::InProgress {
        release_vehicle(store, &record.vehicle_id, record_id);
    }
    Ok(record)
}

fn release_vehicle(store: &mut FleetStore, vehicle_id: &str, source_id: &str) {
    match store.vehicle_mut(vehicle_id) {
        Some(vehicle) => vehicle.status = VehicleStatus::Available,
        None => warn!(
            "Vehículo '{}' referenciado por '{}' ya no existe, cascada omitida",
            vehicle_id, source_id
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Driver, MaintenanceType, Trip, Vehicle, VehicleType,
    };
    use rust_decimal::Decimal;

    fn vehicle() -> Vehicle {
        Vehicle {
            id: String::new(),
            make: "Ford".to_string(),
            model: "Transit".to_string(),
            year: 2021,
            license_plate: "XYZ-987".to_string(),
            status: VehicleStatus::Available,
            fuel_level: 60.0,
            mileage: 48_000.0,
            fuel_efficiency: 10.2,
            vehicle_type: VehicleType::Van,
            last_service: "2026-05-01".to_string(),
            next_service: None,
            insurance_expiry: "2027-05-01".to_string(),
            registration_expiry: "2027-05-01".to_string(),
            assigned_driver_id: None,
        }
    }

    fn driver() -> Driver {
        Driver {
            id: String::new(),
            name: "Ana Torres".to_string(),
            license_number: "LIC-555".to_string(),
            license_expiry: "2028-01-01".to_string(),
            contact_number: "600111222".to_string(),
            email: "ana@example.com".to_string(),
            status: DriverStatus::Available,
            assigned_vehicle_id: None,
            rating: 4.6,
            total_trips: 12,
            join_date: "2024-03-15".to_string(),
            emergency_contact: "600333444".to_string(),
        }
    }

    fn trip(vehicle_id: &str, driver_id: &str) -> Trip {
        Trip {
            id: String::new(),
            vehicle_id: vehicle_id.to_string(),
            driver_id: driver_id.to_string(),
            start_time: "2026-08-07T09:00:00".to_string(),
            end_time: None,
            start_location: "Madrid".to_string(),
            end_location: "Valencia".to_string(),
            distance: 357.0,
            status: TripStatus::Planned,
            purpose: "Entrega".to_string(),
            fuel_consumed: None,
            notes: None,
        }
    }

    fn maintenance(vehicle_id: &str, status: MaintenanceStatus) -> MaintenanceRecord {
        MaintenanceRecord {
            id: String::new(),
            vehicle_id: vehicle_id.to_string(),
            date: "2026-08-10".to_string(),
            maintenance_type: MaintenanceType::Routine,
            description: "Cambio de aceite".to_string(),
            status,
            cost: Decimal::new(12050, 2),
            technician_name: "Luis".to_string(),
            parts_used: Vec::new(),
            notes: None,
        }
    }

    fn store_with_trip() -> (FleetStore, String, String, String) {
        let mut store = FleetStore::new();
        let v = store.add_vehicle(vehicle());
        let d = store.add_driver(driver());
        let t = store.add_trip(trip(&v, &d));
        (store, v, d, t)
    }

    #[test]
    fn test_start_trip_cascades_statuses() {
        let (mut store, v, d, t) = store_with_trip();
        start_trip(&mut store, &t).unwrap();
        assert_eq!(store.trip(&t).unwrap().status, TripStatus::InProgress);
        assert_eq!(store.vehicle(&v).unwrap().status, VehicleStatus::InUse);
        assert_eq!(store.driver(&d).unwrap().status, DriverStatus::OnTrip);
    }

    #[test]
    fn test_complete_trip_releases_and_counts() {
        let (mut store, v, d, t) = store_with_trip();
        start_trip(&mut store, &t).unwrap();
        complete_trip(&mut store, &t).unwrap();
        assert_eq!(store.trip(&t).unwrap().status, TripStatus::Completed);
        assert_eq!(store.vehicle(&v).unwrap().status, VehicleStatus::Available);
        let driver = store.driver(&d).unwrap();
        assert_eq!(driver.status, DriverStatus::Available);
        assert_eq!(driver.total_trips, 13);
    }

    #[test]
    fn test_complete_increments_total_trips_exactly_once() {
        let (mut store, _, d, t) = store_with_trip();
        start_trip(&mut store, &t).unwrap();
        complete_trip(&mut store, &t).unwrap();
        assert!(complete_trip(&mut store, &t).is_err());
        assert_eq!(store.driver(&d).unwrap().total_trips, 13);
    }

    #[test]
    fn test_start_requires_planned() {
        let (mut store, _, _, t) = store_with_trip();
        start_trip(&mut store, &t).unwrap();
        assert!(matches!(
            start_trip(&mut store, &t),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_start_fails_if_driver_missing() {
        let (mut store, _, d, t) = store_with_trip();
        store.remove_driver(&d);
        assert!(matches!(
            start_trip(&mut store, &t),
            Err(AppError::Validation(_))
        ));
        // el viaje queda intacto
        assert_eq!(store.trip(&t).unwrap().status, TripStatus::Planned);
    }

    #[test]
    fn test_complete_requires_in_progress() {
        let (mut store, _, _, t) = store_with_trip();
        assert!(complete_trip(&mut store, &t).is_err());
    }

    #[test]
    fn test_cancel_from_planned_and_in_progress() {
        let (mut store, v, d, t) = store_with_trip();
        cancel_trip(&mut store, &t).unwrap();
        assert_eq!(store.trip(&t).unwrap().status, TripStatus::Cancelled);
        assert_eq!(store.vehicle(&v).unwrap().status, VehicleStatus::Available);
        assert_eq!(store.driver(&d).unwrap().status, DriverStatus::Available);

        let t2 = store.add_trip(trip(&v, &d));
        start_trip(&mut store, &t2).unwrap();
        cancel_trip(&mut store, &t2).unwrap();
        assert_eq!(store.trip(&t2).unwrap().status, TripStatus::Cancelled);
        assert_eq!(store.vehicle(&v).unwrap().status, VehicleStatus::Available);
    }

    #[test]
    fn test_terminal_trips_are_immutable() {
        let (mut store, _, _, t) = store_with_trip();
        cancel_trip(&mut store, &t).unwrap();
        assert!(start_trip(&mut store, &t).is_err());
        assert!(complete_trip(&mut store, &t).is_err());
        assert!(cancel_trip(&mut store, &t).is_err());
    }

    #[test]
    fn test_missing_trip_is_not_found() {
        let mut store = FleetStore::new();
        assert!(matches!(
            start_trip(&mut store, "t99"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_cascade_skips_deleted_vehicle_silently() {
        let (mut store, v, d, t) = store_with_trip();
        start_trip(&mut store, &t).unwrap();
        store.remove_vehicle(&v);
        complete_trip(&mut store, &t).unwrap();
        assert_eq!(store.trip(&t).unwrap().status, TripStatus::Completed);
        // el conductor se libera y cuenta el viaje igualmente
        assert_eq!(store.driver(&d).unwrap().total_trips, 13);
    }

    #[test]
    fn test_schedule_maintenance_in_progress_flags_vehicle() {
        let mut store = FleetStore::new();
        let v = store.add_vehicle(vehicle());
        let m = schedule_maintenance(&mut store, maintenance(&v, MaintenanceStatus::InProgress))
            .unwrap();
        assert_eq!(store.vehicle(&v).unwrap().status, VehicleStatus::Maintenance);

        // eliminar el registro in-progress revierte el vehículo
        remove_maintenance_record(&mut store, &m).unwrap();
        assert_eq!(store.vehicle(&v).unwrap().status, VehicleStatus::Available);
    }

    #[test]
    fn test_schedule_maintenance_scheduled_leaves_vehicle() {
        let mut store = FleetStore::new();
        let v = store.add_vehicle(vehicle());
        schedule_maintenance(&mut store, maintenance(&v, MaintenanceStatus::Scheduled)).unwrap();
        assert_eq!(store.vehicle(&v).unwrap().status, VehicleStatus::Available);
    }

    #[test]
    fn test_schedule_maintenance_requires_vehicle() {
        let mut store = FleetStore::new();
        assert!(schedule_maintenance(&mut store, maintenance("v9", MaintenanceStatus::Scheduled))
            .is_err());
    }

    #[test]
    fn test_maintenance_status_cascades() {
        let mut store = FleetStore::new();
        let v = store.add_vehicle(vehicle());
        let m = schedule_maintenance(&mut store, maintenance(&v, MaintenanceStatus::Scheduled))
            .unwrap();

        update_maintenance_status(&mut store, &m, MaintenanceStatus::InProgress).unwrap();
        assert_eq!(store.vehicle(&v).unwrap().status, VehicleStatus::Maintenance);

        update_maintenance_status(&mut store, &m, MaintenanceStatus::Completed).unwrap();
        assert_eq!(store.vehicle(&v).unwrap().status, VehicleStatus::Available);
    }

    #[test]
    fn test_back_to_scheduled_does_not_release_vehicle() {
        let mut store = FleetStore::new();
        let v = store.add_vehicle(vehicle());
        let m = schedule_maintenance(&mut store, maintenance(&v, MaintenanceStatus::InProgress))
            .unwrap();
        assert_eq!(store.vehicle(&v).unwrap().status, VehicleStatus::Maintenance);

        update_maintenance_status(&mut store, &m, MaintenanceStatus::Scheduled).unwrap();
        // comportamiento heredado: el vehículo queda en maintenance
        assert_eq!(store.vehicle(&v).unwrap().status, VehicleStatus::Maintenance);
    }

    #[test]
    fn test_terminal_maintenance_is_immutable() {
        let mut store = FleetStore::new();
        let v = store.add_vehicle(vehicle());
        let m = schedule_maintenance(&mut store, maintenance(&v, MaintenanceStatus::Scheduled))
            .unwrap();
        update_maintenance_status(&mut store, &m, MaintenanceStatus::Cancelled).unwrap();
        assert!(
            update_maintenance_status(&mut store, &m, MaintenanceStatus::InProgress).is_err()
        );
    }

    #[test]
    fn test_remove_completed_record_leaves_vehicle() {
        let mut store = FleetStore::new();
        let v = store.add_vehicle(vehicle());
        let m = schedule_maintenance(&mut store, maintenance(&v, MaintenanceStatus::InProgress))
            .unwrap();
        update_maintenance_status(&mut store, &m, MaintenanceStatus::InProgress).unwrap();
        update_maintenance_status(&mut store, &m, MaintenanceStatus::Completed).unwrap();

        // ya no estaba in-progress al eliminarse: sin cascada
        store.vehicle_mut(&v).unwrap().status = VehicleStatus::InUse;
        remove_maintenance_record(&mut store, &m).unwrap();
        assert_eq!(store.vehicle(&v).unwrap().status, VehicleStatus::InUse);
    }
}
