use authentix_core::discovery::{
    DiscoveryLocation, DiscoveryLocationUpdate, DiscoveryPreferences, LocationSource,
};
use authentix_core::store::{FileStore, KeyValueStore, MemoryStore};

fn prefs() -> DiscoveryPreferences<MemoryStore> {
    let mut store = MemoryStore::new();
    store.open().unwrap();
    DiscoveryPreferences::new(store)
}

#[test]
fn test_location_normalization() {
    let loc = DiscoveryLocation::new("  10115 ", Some("de")).unwrap();
    assert_eq!(loc.zip_code, "10115");
    assert_eq!(loc.country.as_deref(), Some("DE"));

    assert_eq!(
        DiscoveryLocation::new("SW1A 1AA", Some("GBR")).unwrap().country,
        None
    );
    assert_eq!(DiscoveryLocation::new("12345", Some("1x")).unwrap().country, None);
    assert!(DiscoveryLocation::new("   ", Some("US")).is_none());
    assert!(DiscoveryLocation::new(&"9".repeat(21), None).is_none());
    assert!(DiscoveryLocation::new(&"9".repeat(20), None).is_some());
}

#[test]
fn test_guest_location_round_trips_through_store() {
    let mut p = prefs();
    assert_eq!(p.guest().unwrap(), None);

    let loc = DiscoveryLocation::new("94103", Some("us")).unwrap();
    p.set_guest(Some(&loc)).unwrap();
    assert_eq!(p.guest().unwrap(), Some(loc));

    let no_country = DiscoveryLocation::new("75001", None).unwrap();
    p.set_guest(Some(&no_country)).unwrap();
    assert_eq!(p.guest().unwrap().unwrap().country, None);

    p.set_guest(None).unwrap();
    assert_eq!(p.guest().unwrap(), None);
}

#[test]
fn test_user_location_wins_over_guest() {
    let mut p = prefs();
    let guest = DiscoveryLocation::new("94103", Some("US")).unwrap();
    let user = DiscoveryLocation::new("10115", Some("DE")).unwrap();
    p.set_guest(Some(&guest)).unwrap();

    assert_eq!(
        p.effective(Some(&user)).unwrap(),
        Some((user, LocationSource::User))
    );
    assert_eq!(
        p.effective(None).unwrap(),
        Some((guest, LocationSource::Guest))
    );
}

#[test]
fn test_guest_location_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.toml");

    let mut store = FileStore::new(&path);
    store.open().unwrap();
    let mut p = DiscoveryPreferences::new(store);
    p.set_guest(DiscoveryLocation::new("60601", Some("us")).as_ref())
        .unwrap();
    p.into_store().close().unwrap();

    let mut store = FileStore::new(&path);
    store.open().unwrap();
    let p = DiscoveryPreferences::new(store);
    let loc = p.guest().unwrap().unwrap();
    assert_eq!(loc.zip_code, "60601");
    assert_eq!(loc.country.as_deref(), Some("US"));
}

#[test]
fn test_update_body_uses_camel_case() {
    let loc = DiscoveryLocation::new("94103", Some("US")).unwrap();
    let body = serde_json::to_value(DiscoveryLocationUpdate::from(Some(&loc))).unwrap();
    assert_eq!(body, serde_json::json!({ "zipCode": "94103", "country": "US" }));

    let cleared = serde_json::to_value(DiscoveryLocationUpdate::from(None::<&DiscoveryLocation>)).unwrap();
    assert_eq!(cleared, serde_json::json!({ "zipCode": null, "country": null }));
}
