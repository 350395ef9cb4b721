use super::VehiclesState;
use tucarga_shared::Vehicle;

// =========================================================
// Test data builders
// =========================================================

fn make_test_vehicle(id: i64, plate: &str) -> Vehicle {
    Vehicle {
        id,
        user_id: 1,
        plate: plate.to_string(),
        make: "Renault".to_string(),
        year: 2020,
        dni_owner: "123456".to_string(),
        dni_owner_type: "CC".to_string(),
        vehicle_type: "car".to_string(),
        line: "Logan".to_string(),
        engine_displacement: 1600,
        service_type: "private".to_string(),
        engine_id: "E-1".to_string(),
        vin: "VIN-1".to_string(),
        chassis_id: "CH-1".to_string(),
        color: "rojo".to_string(),
        passenger_capacity: 5,
        fuel_type: "gasolina".to_string(),
        registration_date: "2020-01-01".to_string(),
        from: "Medellin".to_string(),
        created_at: "2024-01-01T00:00:00.000Z".to_string(),
        updated_at: "2024-01-01T00:00:00.000Z".to_string(),
        vehicle_items: Vec::new(),
        maintenances: Vec::new(),
    }
}

fn state_with(vehicles: Vec<Vehicle>) -> VehiclesState {
    let mut state = VehiclesState::default();
    state.apply_fetched(vehicles);
    state
}

// =========================================================
// Tests
// =========================================================

#[test]
fn test_first_fetch_selects_first_vehicle() {
    let state = state_with(vec![make_test_vehicle(1, "ABC1"), make_test_vehicle(2, "XYZ2")]);
    assert_eq!(state.selected.as_ref().map(|v| v.id), Some(1));
    assert!(state.error.is_none());
}

#[test]
fn test_fetch_empty_list_leaves_no_selection() {
    let state = state_with(Vec::new());
    assert!(state.selected.is_none());
    assert_eq!(state.vehicles.as_ref().map(|v| v.len()), Some(0));
}

#[test]
fn test_select_by_plate() {
    let mut state = state_with(vec![make_test_vehicle(1, "ABC1"), make_test_vehicle(2, "XYZ2")]);

    state.select_by_plate("XYZ2");
    assert_eq!(state.selected.as_ref().map(|v| v.id), Some(2));
}

#[test]
fn test_select_by_unknown_plate_is_noop() {
    let mut state = state_with(vec![make_test_vehicle(1, "ABC1"), make_test_vehicle(2, "XYZ2")]);
    state.select_by_plate("XYZ2");

    // Unknown plate: selection must stay untouched, no error raised
    state.select_by_plate("NOPE9");
    assert_eq!(state.selected.as_ref().map(|v| v.id), Some(2));
}

#[test]
fn test_refresh_preserves_selection_by_id() {
    let mut state = state_with(vec![make_test_vehicle(1, "ABC1"), make_test_vehicle(2, "XYZ2")]);
    state.select_by_plate("XYZ2");

    // Same vehicles come back in a different order
    state.apply_fetched(vec![make_test_vehicle(2, "XYZ2"), make_test_vehicle(1, "ABC1")]);
    assert_eq!(state.selected.as_ref().map(|v| v.id), Some(2));
}

#[test]
fn test_refresh_falls_back_to_first_when_selected_vanishes() {
    let mut state = state_with(vec![make_test_vehicle(1, "ABC1"), make_test_vehicle(2, "XYZ2")]);
    state.select_by_plate("XYZ2");

    // The selected vehicle (id 2) is gone after the refresh
    state.apply_fetched(vec![make_test_vehicle(1, "ABC1")]);
    assert_eq!(state.selected.as_ref().map(|v| v.id), Some(1));
}

#[test]
fn test_refresh_to_empty_list_clears_selection() {
    let mut state = state_with(vec![make_test_vehicle(1, "ABC1")]);
    assert!(state.selected.is_some());

    state.apply_fetched(Vec::new());
    assert!(state.selected.is_none());
}

#[test]
fn test_fetch_error_clears_everything_and_records_message() {
    let mut state = state_with(vec![make_test_vehicle(1, "ABC1")]);
    state.apply_error("No fue posible cargar los vehículos".to_string());

    assert!(state.vehicles.is_none());
    assert!(state.selected.is_none());
    assert_eq!(
        state.error.as_deref(),
        Some("No fue posible cargar los vehículos")
    );
}

#[test]
fn test_successful_refresh_clears_previous_error() {
    let mut state = VehiclesState::default();
    state.apply_error("boom".to_string());

    state.apply_fetched(vec![make_test_vehicle(1, "ABC1")]);
    assert!(state.error.is_none());
}

#[test]
fn test_select_by_plate_before_any_fetch_is_noop() {
    let mut state = VehiclesState::default();
    state.select_by_plate("ABC1");
    assert!(state.selected.is_none());
}
