//! Contenedor de estado de dominio
//!
//! `FleetStore` es el dueño de todos los registros de entidades durante la
//! sesión: una colección ordenada por tipo de entidad, con mutaciones
//! add/update/remove. Es single-writer: se comparte detrás de un único
//! `RwLock` en `AppState` y todas las mutaciones son síncronas y atómicas
//! desde la perspectiva de los lectores.
//!
//! Los ids son strings opacos con prefijo por tipo (`v1`, `d1`, `t1`, `m1`,
//! `i1`, `a1`). Los contadores son monotónicos por tipo y se siembran por
//! encima del mayor sufijo cargado, de modo que un borrado nunca provoca
//! reutilización de id.

use crate::models::{Alert, Driver, InventoryItem, MaintenanceRecord, Trip, Vehicle};

#[derive(Debug, Default)]
pub struct FleetStore {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub trips: Vec<Trip>,
    pub maintenance_records: Vec<MaintenanceRecord>,
    pub inventory: Vec<InventoryItem>,
    pub alerts: Vec<Alert>,
    next_vehicle: u64,
    next_driver: u64,
    next_trip: u64,
    next_maintenance: u64,
    next_inventory: u64,
    next_alert: u64,
}

/// Mayor sufijo numérico entre los ids dados, para sembrar un contador
fn max_suffix<'a>(ids: impl Iterator<Item = &'a str>) -> u64 {
    ids.filter_map(|id| id.get(1..).and_then(|n| n.parse::<u64>().ok()))
        .max()
        .unwrap_or(0)
}

impl FleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construye el store con los registros cargados del almacén de respaldo.
    /// Solo vehículos, conductores, viajes y mantenimientos se consultan al
    /// arranque; inventario y alertas empiezan vacíos.
    pub fn load(
        vehicles: Vec<Vehicle>,
        drivers: Vec<Driver>,
        trips: Vec<Trip>,
        maintenance_records: Vec<MaintenanceRecord>,
    ) -> Self {
        let next_vehicle = max_suffix(vehicles.iter().map(|v| v.id.as_str()));
        let next_driver = max_suffix(drivers.iter().map(|d| d.id.as_str()));
        let next_trip = max_suffix(trips.iter().map(|t| t.id.as_str()));
        let next_maintenance = max_suffix(maintenance_records.iter().map(|m| m.id.as_str()));
        Self {
            vehicles,
            drivers,
            trips,
            maintenance_records,
            inventory: Vec::new(),
            alerts: Vec::new(),
            next_vehicle,
            next_driver,
            next_trip,
            next_maintenance,
            next_inventory: 0,
            next_alert: 0,
        }
    }

    // ---- Vehicles ----

    /// Agrega un vehículo asignándole el id; devuelve el id asignado
    pub fn add_vehicle(&mut self, mut vehicle: Vehicle) -> String {
        self.next_vehicle += 1;
        vehicle.id = format!("v{}", self.next_vehicle);
        let id = vehicle.id.clone();
        self.vehicles.push(vehicle);
        id
    }

    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn vehicle_mut(&mut self, id: &str) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.id == id)
    }

    pub fn remove_vehicle(&mut self, id: &str) -> Option<Vehicle> {
        let pos = self.vehicles.iter().position(|v| v.id == id)?;
        Some(self.vehicles.remove(pos))
    }

    // ---- Drivers ----

    pub fn add_driver(&mut self, mut driver: Driver) -> String {
        self.next_driver += 1;
        driver.id = format!("d{}", self.next_driver);
        let id = driver.id.clone();
        self.drivers.push(driver);
        id
    }

    pub fn driver(&self, id: &str) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == id)
    }

    pub fn driver_mut(&mut self, id: &str) -> Option<&mut Driver> {
        self.drivers.iter_mut().find(|d| d.id == id)
    }

    pub fn remove_driver(&mut self, id: &str) -> Option<Driver> {
        let pos = self.drivers.iter().position(|d| d.id == id)?;
        Some(self.drivers.remove(pos))
    }

    // ---- Trips ----

    pub fn add_trip(&mut self, mut trip: Trip) -> String {
        self.next_trip += 1;
        trip.id = format!("t{}", self.next_trip);
        let id = trip.id.clone();
        self.trips.push(trip);
        id
    }

    pub fn trip(&self, id: &str) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id == id)
    }

    pub fn trip_mut(&mut self, id: &str) -> Option<&mut Trip> {
        self.trips.iter_mut().find(|t| t.id == id)
    }

    pub fn remove_trip(&mut self, id: &str) -> Option<Trip> {
        let pos = self.trips.iter().position(|t| t.id == id)?;
        Some(self.trips.remove(pos))
    }

    // ---- Maintenance records ----

    pub fn add_maintenance_record(&mut self, mut record: MaintenanceRecord) -> String {
        self.next_maintenance += 1;
        record.id = format!("m{}", self.next_maintenance);
        let id = record.id.clone();
        self.maintenance_records.push(record);
        id
    }

    pub fn maintenance_record(&self, id: &str) -> Option<&MaintenanceRecord> {
        self.maintenance_records.iter().find(|m| m.id == id)
    }

    pub fn maintenance_record_mut(&mut self, id: &str) -> Option<&mut MaintenanceRecord> {
        self.maintenance_records.iter_mut().find(|m| m.id == id)
    }

    pub fn remove_maintenance_record(&mut self, id: &str) -> Option<MaintenanceRecord> {
        let pos = self.maintenance_records.iter().position(|m| m.id == id)?;
        Some(self.maintenance_records.remove(pos))
    }

    // ---- Inventory ----

    pub fn add_inventory_item(&mut self, mut item: InventoryItem) -> String {
        self.next_inventory += 1;
        item.id = format!("i{}", self.next_inventory);
        let id = item.id.clone();
        self.inventory.push(item);
        id
    }

    pub fn inventory_item(&self, id: &str) -> Option<&InventoryItem> {
        self.inventory.iter().find(|i| i.id == id)
    }

    pub fn inventory_item_mut(&mut self, id: &str) -> Option<&mut InventoryItem> {
        self.inventory.iter_mut().find(|i| i.id == id)
    }

    pub fn remove_inventory_item(&mut self, id: &str) -> Option<InventoryItem> {
        let pos = self.inventory.iter().position(|i| i.id == id)?;
        Some(self.inventory.remove(pos))
    }

    // ---- Alerts ----

    pub fn add_alert(&mut self, mut alert: Alert) -> String {
        self.next_alert += 1;
        alert.id = format!("a{}", self.next_alert);
        let id = alert.id.clone();
        self.alerts.push(alert);
        id
    }

    pub fn alert(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    pub fn alert_mut(&mut self, id: &str) -> Option<&mut Alert> {
        self.alerts.iter_mut().find(|a| a.id == id)
    }

    pub fn remove_alert(&mut self, id: &str) -> Option<Alert> {
        let pos = self.alerts.iter().position(|a| a.id == id)?;
        Some(self.alerts.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{VehicleStatus, VehicleType};

    fn test_vehicle() -> Vehicle {
        Vehicle {
            id: String::new(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            license_plate: "ABC-123".to_string(),
            status: VehicleStatus::Available,
            fuel_level: 80.0,
            mileage: 25_000.0,
            fuel_efficiency: 14.5,
            vehicle_type: VehicleType::Sedan,
            last_service: "2026-01-10".to_string(),
            next_service: None,
            insurance_expiry: "2027-01-10".to_string(),
            registration_expiry: "2027-01-10".to_string(),
            assigned_driver_id: None,
        }
    }

    #[test]
    fn test_ids_are_sequential_per_kind() {
        let mut store = FleetStore::new();
        assert_eq!(store.add_vehicle(test_vehicle()), "v1");
        assert_eq!(store.add_vehicle(test_vehicle()), "v2");
        assert_eq!(store.add_vehicle(test_vehicle()), "v3");
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut store = FleetStore::new();
        store.add_vehicle(test_vehicle());
        store.add_vehicle(test_vehicle());
        store.remove_vehicle("v1");
        assert_eq!(store.add_vehicle(test_vehicle()), "v3");
    }

    #[test]
    fn test_load_seeds_counters_past_largest_suffix() {
        let mut v1 = test_vehicle();
        v1.id = "v2".to_string();
        let mut v2 = test_vehicle();
        v2.id = "v7".to_string();
        let mut store = FleetStore::load(vec![v1, v2], Vec::new(), Vec::new(), Vec::new());
        assert_eq!(store.add_vehicle(test_vehicle()), "v8");
    }

    #[test]
    fn test_max_suffix_ignores_unparseable_ids() {
        assert_eq!(max_suffix(["v3", "vX", ""].into_iter()), 3);
        assert_eq!(max_suffix(std::iter::empty()), 0);
    }

    #[test]
    fn test_remove_missing_returns_none() {
        let mut store = FleetStore::new();
        assert!(store.remove_vehicle("v1").is_none());
        assert!(store.remove_trip("t9").is_none());
    }
}
