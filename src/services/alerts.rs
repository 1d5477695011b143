//! Motor de derivación de alertas
//!
//! Recorre el estado actual de vehículos, conductores e inventario y
//! sintetiza alertas cuando se cruzan vencimientos o umbrales. El escaneo
//! (`scan`) es una función pura de sus entradas, incluida la fecha "hoy",
//! así que es trivial de testear; el hook de cambio de estado lo invocan los
//! controllers mientras sostienen el write lock del store.
//!
//! Monitoreo best-effort: un falso negativo (alerta perdida por una fecha
//! ilegible) se tolera; un falso positivo (alerta duplicada para una
//! condición sin resolver) no. Una fecha mal formada salta la regla de esa
//! entidad y el escaneo continúa.

use chrono::{Duration, NaiveDate};

use crate::models::{
    Alert, AlertSeverity, AlertStatus, AlertType, Driver, InventoryItem, Vehicle,
};
use crate::store::FleetStore;
use crate::utils::errors::{invalid_transition_error, not_found_error, AppResult};

/// Ventana de aviso para seguros, matriculaciones y licencias
pub const EXPIRY_WINDOW_DAYS: i64 = 30;
/// Ventana de aviso para el próximo servicio
pub const SERVICE_WINDOW_DAYS: i64 = 7;

/// Escaneo completo: produce las alertas nuevas que no dupliquen una alerta
/// sin resolver para el mismo (type, related_id). Los ids de las alertas
/// devueltas vienen vacíos; los asigna el store al insertarlas.
pub fn scan(
    vehicles: &[Vehicle],
    drivers: &[Driver],
    inventory: &[InventoryItem],
    existing: &[Alert],
    today: NaiveDate,
) -> Vec<Alert> {
    let mut new_alerts = Vec::new();

    for vehicle in vehicles {
        if within_window(&vehicle.insurance_expiry, today, EXPIRY_WINDOW_DAYS)
            && !has_active_alert(existing, AlertType::Insurance, &vehicle.id)
        {
            new_alerts.push(Alert {
                id: String::new(),
                alert_type: AlertType::Insurance,
                severity: AlertSeverity::High,
                message: format!(
                    "Insurance for {} {} ({}) expires on {}",
                    vehicle.make, vehicle.model, vehicle.license_plate, vehicle.insurance_expiry
                ),
                date: vehicle.insurance_expiry.clone(),
                status: AlertStatus::New,
                related_id: Some(vehicle.id.clone()),
            });
        }

        if within_window(&vehicle.registration_expiry, today, EXPIRY_WINDOW_DAYS)
            && !has_active_alert(existing, AlertType::Registration, &vehicle.id)
        {
            new_alerts.push(Alert {
                id: String::new(),
                alert_type: AlertType::Registration,
                severity: AlertSeverity::High,
                message: format!(
                    "Registration for {} {} ({}) expires on {}",
                    vehicle.make, vehicle.model, vehicle.license_plate, vehicle.registration_expiry
                ),
                date: vehicle.registration_expiry.clone(),
                status: AlertStatus::New,
                related_id: Some(vehicle.id.clone()),
            });
        }

        if let Some(next_service) = &vehicle.next_service {
            if within_window(next_service, today, SERVICE_WINDOW_DAYS)
                && !has_active_alert(existing, AlertType::Maintenance, &vehicle.id)
            {
                new_alerts.push(Alert {
                    id: String::new(),
                    alert_type: AlertType::Maintenance,
                    severity: AlertSeverity::Medium,
                    message: format!(
                        "Maintenance due for {} {} ({}) on {}",
                        vehicle.make, vehicle.model, vehicle.license_plate, next_service
                    ),
                    date: next_service.clone(),
                    status: AlertStatus::New,
                    related_id: Some(vehicle.id.clone()),
                });
            }
        }
    }

    for driver in drivers {
        if within_window(&driver.license_expiry, today, EXPIRY_WINDOW_DAYS)
            && !has_active_alert(existing, AlertType::License, &driver.id)
        {
            new_alerts.push(Alert {
                id: String::new(),
                alert_type: AlertType::License,
                severity: AlertSeverity::High,
                message: format!(
                    "Driver's license for {} expires on {}",
                    driver.name, driver.license_expiry
                ),
                date: driver.license_expiry.clone(),
                status: AlertStatus::New,
                related_id: Some(driver.id.clone()),
            });
        }
    }

    for item in inventory {
        if item.is_low_stock() && !has_active_alert(existing, AlertType::Inventory, &item.id) {
            let severity = if item.quantity == 0 {
                AlertSeverity::High
            } else {
                AlertSeverity::Medium
            };
            new_alerts.push(Alert {
                id: String::new(),
                alert_type: AlertType::Inventory,
                severity,
                message: format!("Low stock alert: {} ({} remaining)", item.name, item.quantity),
                // el stock bajo no tiene fecha asociada
                date: String::new(),
                status: AlertStatus::New,
                related_id: Some(item.id.clone()),
            });
        }
    }

    new_alerts
}

/// Hook de cambio de estado: re-escanea y agrega las alertas nuevas al
/// conjunto activo. Devuelve cuántas se agregaron.
pub fn refresh(store: &mut FleetStore, today: NaiveDate) -> usize {
    let new_alerts = scan(
        &store.vehicles,
        &store.drivers,
        &store.inventory,
        &store.alerts,
        today,
    );
    let count = new_alerts.len();
    for alert in new_alerts {
        store.add_alert(alert);
    }
    count
}

/// Reconoce una alerta: requiere estado `new`
pub fn acknowledge(store: &mut FleetStore, alert_id: &str) -> AppResult<()> {
    let alert = store
        .alert(alert_id)
        .ok_or_else(|| not_found_error("Alert", alert_id))?;

    if alert.status != AlertStatus::New {
        return Err(invalid_transition_error(
            "Alert",
            &alert.status.to_string(),
            "acknowledged",
        ));
    }
    if let Some(alert) = store.alert_mut(alert_id) {
        alert.status = AlertStatus::Acknowledged;
    }
    Ok(())
}

/// Resuelve una alerta desde cualquier estado no terminal. La eliminación
/// diferida del conjunto activo la programa el controller.
pub fn resolve(store: &mut FleetStore, alert_id: &str) -> AppResult<()> {
    let alert = store
        .alert(alert_id)
        .ok_or_else(|| not_found_error("Alert", alert_id))?;

    if alert.status == AlertStatus::Resolved {
        return Err(invalid_transition_error("Alert", "resolved", "resolved"));
    }
    if let Some(alert) = store.alert_mut(alert_id) {
        alert.status = AlertStatus::Resolved;
    }
    Ok(())
}

/// Una alerta suprime a otra nueva si comparte (type, related_id) y su
/// estado es distinto de `resolved`
fn has_active_alert(alerts: &[Alert], alert_type: AlertType, related_id: &str) -> bool {
    alerts.iter().any(|a| {
        a.alert_type == alert_type
            && a.related_id.as_deref() == Some(related_id)
            && a.status != AlertStatus::Resolved
    })
}

/// La fecha cae antes de hoy + ventana. Una fecha ilegible nunca dispara.
fn within_window(date: &str, today: NaiveDate, window_days: i64) -> bool {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d < today + Duration::days(window_days),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DriverStatus, InventoryCategory, VehicleStatus, VehicleType};
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn in_days(days: i64) -> String {
        (today() + Duration::days(days)).format("%Y-%m-%d").to_string()
    }

    fn vehicle(id: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            make: "Toyota".to_string(),
            model: "Hilux".to_string(),
            year: 2022,
            license_plate: "AAA-111".to_string(),
            status: VehicleStatus::Available,
            fuel_level: 50.0,
            mileage: 30_000.0,
            fuel_efficiency: 11.0,
            vehicle_type: VehicleType::Truck,
            last_service: in_days(-90),
            next_service: None,
            insurance_expiry: in_days(365),
            registration_expiry: in_days(365),
            assigned_driver_id: None,
        }
    }

    fn driver(id: &str) -> Driver {
        Driver {
            id: id.to_string(),
            name: "Marta Ruiz".to_string(),
            license_number: "LIC-001".to_string(),
            license_expiry: in_days(365),
            contact_number: "600555666".to_string(),
            email: "marta@example.com".to_string(),
            status: DriverStatus::Available,
            assigned_vehicle_id: None,
            rating: 4.9,
            total_trips: 40,
            join_date: "2023-01-01".to_string(),
            emergency_contact: "600777888".to_string(),
        }
    }

    fn item(id: &str, quantity: i32, minimum: i32) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            name: "Filtro de aceite".to_string(),
            category: InventoryCategory::Part,
            quantity,
            minimum_quantity: minimum,
            unit_price: Decimal::new(899, 2),
            location: "A-3".to_string(),
            supplier: "Recambios SA".to_string(),
            last_restocked: in_days(-20),
            compatible_vehicles: vec!["v1".to_string()],
        }
    }

    #[test]
    fn test_insurance_expiring_soon_emits_high_alert() {
        let mut v = vehicle("v1");
        v.insurance_expiry = in_days(10);
        let alerts = scan(&[v], &[], &[], &[], today());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::Insurance);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
        assert_eq!(alerts[0].status, AlertStatus::New);
        assert_eq!(alerts[0].related_id.as_deref(), Some("v1"));
        assert_eq!(
            alerts[0].message,
            format!("Insurance for Toyota Hilux (AAA-111) expires on {}", in_days(10))
        );
    }

    #[test]
    fn test_expiry_outside_window_is_silent() {
        let mut v = vehicle("v1");
        v.insurance_expiry = in_days(40);
        v.registration_expiry = in_days(31);
        assert!(scan(&[v], &[], &[], &[], today()).is_empty());
    }

    #[test]
    fn test_already_passed_dates_still_alert() {
        let mut v = vehicle("v1");
        v.registration_expiry = in_days(-5);
        let alerts = scan(&[v], &[], &[], &[], today());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::Registration);
    }

    #[test]
    fn test_unresolved_alert_suppresses_duplicate() {
        let mut v = vehicle("v1");
        v.insurance_expiry = in_days(10);
        let mut store = FleetStore::new();
        store.vehicles.push(v);

        assert_eq!(refresh(&mut store, today()), 1);
        // segundo escaneo sin resolver: nada nuevo
        assert_eq!(refresh(&mut store, today()), 0);
        assert_eq!(store.alerts.len(), 1);

        // acknowledged sigue suprimiendo
        let id = store.alerts[0].id.clone();
        acknowledge(&mut store, &id).unwrap();
        assert_eq!(refresh(&mut store, today()), 0);
    }

    #[test]
    fn test_resolved_alert_allows_reemission() {
        let mut store = FleetStore::new();
        store.inventory.push(item("i1", 2, 5));
        assert_eq!(refresh(&mut store, today()), 1);

        let id = store.alerts[0].id.clone();
        resolve(&mut store, &id).unwrap();
        assert_eq!(refresh(&mut store, today()), 1);
        // exactamente una nueva sin resolver
        let unresolved: Vec<_> = store
            .alerts
            .iter()
            .filter(|a| a.status != AlertStatus::Resolved)
            .collect();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].related_id.as_deref(), Some("i1"));
    }

    #[test]
    fn test_next_service_window_is_seven_days() {
        let mut v = vehicle("v1");
        v.next_service = Some(in_days(5));
        let alerts = scan(&[v.clone()], &[], &[], &[], today());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::Maintenance);
        assert_eq!(alerts[0].severity, AlertSeverity::Medium);

        v.next_service = Some(in_days(10));
        assert!(scan(&[v], &[], &[], &[], today()).is_empty());
    }

    #[test]
    fn test_missing_next_service_is_silent() {
        let v = vehicle("v1");
        assert!(scan(&[v], &[], &[], &[], today()).is_empty());
    }

    #[test]
    fn test_driver_license_expiring_soon() {
        let mut d = driver("d1");
        d.license_expiry = in_days(15);
        let alerts = scan(&[], &[d], &[], &[], today());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::License);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
        assert_eq!(
            alerts[0].message,
            format!("Driver's license for Marta Ruiz expires on {}", in_days(15))
        );
    }

    #[test]
    fn test_inventory_severity_rules() {
        let alerts = scan(&[], &[], &[item("i1", 0, 5), item("i2", 3, 5)], &[], today());
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
        assert_eq!(alerts[1].severity, AlertSeverity::Medium);
        assert_eq!(alerts[1].message, "Low stock alert: Filtro de aceite (3 remaining)");
    }

    #[test]
    fn test_stock_above_minimum_is_silent() {
        assert!(scan(&[], &[], &[item("i1", 6, 5)], &[], today()).is_empty());
    }

    #[test]
    fn test_malformed_date_skips_rule_and_continues() {
        let mut bad = vehicle("v1");
        bad.insurance_expiry = "no es una fecha".to_string();
        bad.registration_expiry = in_days(3);
        let mut d = driver("d1");
        d.license_expiry = in_days(3);

        let alerts = scan(&[bad], &[d], &[], &[], today());
        // la regla de seguro se salta; matriculación y licencia siguen
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].alert_type, AlertType::Registration);
        assert_eq!(alerts[1].alert_type, AlertType::License);
    }

    #[test]
    fn test_acknowledge_requires_new() {
        let mut store = FleetStore::new();
        store.inventory.push(item("i1", 0, 5));
        refresh(&mut store, today());
        let id = store.alerts[0].id.clone();

        acknowledge(&mut store, &id).unwrap();
        assert_eq!(store.alerts[0].status, AlertStatus::Acknowledged);
        assert!(acknowledge(&mut store, &id).is_err());
    }

    #[test]
    fn test_resolve_from_acknowledged() {
        let mut store = FleetStore::new();
        store.inventory.push(item("i1", 0, 5));
        refresh(&mut store, today());
        let id = store.alerts[0].id.clone();

        acknowledge(&mut store, &id).unwrap();
        resolve(&mut store, &id).unwrap();
        assert_eq!(store.alerts[0].status, AlertStatus::Resolved);
        assert!(resolve(&mut store, &id).is_err());
    }
}
