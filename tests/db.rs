mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new("test_in_memory_connection.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_default_agency_settings_are_seeded() {
    use tour_booking::repository::{DieselRepository, SettingsReader};

    let test_db = common::TestDb::new("test_default_agency_settings.db");
    let repo = DieselRepository::new(test_db.pool());
    let settings = repo.get_agency_settings().unwrap();
    assert_eq!(settings.currency, "MXN");
    assert_eq!(settings.deposit_percent.get(), 30);
}
