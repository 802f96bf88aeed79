use crate::catalog::curation::annotate;
use crate::catalog::error::CatalogError;
use crate::catalog::models::RoundLocation;
use crate::catalog::Catalog;
use crate::geocoding::models::{AdminRegions, Place};
use crate::geocoding::NearestPlaceGeocoder;
use crate::ndjson::NdjsonError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::Write;

fn round(image_id: &str, latitude: f64, longitude: f64) -> RoundLocation {
    RoundLocation {
        image_id: image_id.to_string(),
        latitude,
        longitude,
        admin: AdminRegions::default(),
    }
}

fn fake_catalog() -> Catalog {
    Catalog::new(vec![
        round("paris", 48.8566, 2.3522),
        round("london", 51.5074, -0.1278),
        round("tokyo", 35.6762, 139.6503),
        round("lima", -12.0464, -77.0428),
    ])
}

#[test]
fn test_load_catalog() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create a temporary file.");
    writeln!(
        file,
        r#"{{"image_id": "a1", "latitude": 48.85, "longitude": 2.35, "city": "Paris", "country": "FR"}}"#
    )
    .expect("Failed to write catalog.");
    writeln!(file, r#"{{"image_id": "b2", "latitude": -33.9, "longitude": 151.2}}"#)
        .expect("Failed to write catalog.");

    let catalog = Catalog::load(file.path()).expect("Failed to load catalog.");

    assert_eq!(catalog.len(), 2);
    let first = &catalog.rounds()[0];
    assert_eq!(first.image_file_name(), "a1.jpg");
    assert_eq!(first.admin.city.as_deref(), Some("Paris"));
    assert_eq!(first.admin.area, None);
    assert_eq!(catalog.rounds()[1].location().lng, 151.2);
}

#[test]
fn test_empty_catalog_is_rejected() {
    let file = tempfile::NamedTempFile::new().expect("Failed to create a temporary file.");

    let result = Catalog::load(file.path());

    assert!(matches!(result, Err(CatalogError::Empty { .. })));
}

#[test]
fn test_malformed_line_is_reported_with_its_number() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create a temporary file.");
    writeln!(file, r#"{{"image_id": "a1", "latitude": 1.0, "longitude": 2.0}}"#)
        .expect("Failed to write catalog.");
    writeln!(file, r#"{{"image_id": "a2", "latitude": "north"}}"#)
        .expect("Failed to write catalog.");

    let result = Catalog::load(file.path());

    assert!(matches!(
        result,
        Err(CatalogError::Ndjson(NdjsonError::Parse { line: 2, .. }))
    ));
}

#[test]
fn test_missing_catalog_file() {
    let dir = tempfile::tempdir().expect("Failed to create a temporary directory.");

    let result = Catalog::load(&dir.path().join("nope.ndjson"));

    assert!(matches!(
        result,
        Err(CatalogError::Ndjson(NdjsonError::Open { .. }))
    ));
}

#[test]
fn test_sample_picks_distinct_rounds() {
    let catalog = fake_catalog();
    let mut rng = StdRng::seed_from_u64(7);

    let sample = catalog.sample(3, &mut rng);

    assert_eq!(sample.len(), 3);
    let mut ids = sample
        .rounds()
        .iter()
        .map(|round| round.image_id.clone())
        .collect::<Vec<_>>();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert!(sample.rounds().iter().all(|round| catalog.rounds().contains(round)));
}

#[test]
fn test_sample_larger_than_catalog_keeps_everything() {
    let catalog = fake_catalog();
    let mut rng = StdRng::seed_from_u64(7);

    assert_eq!(catalog.sample(100, &mut rng).len(), catalog.len());
}

#[test]
fn test_retain_existing_images() {
    let dir = tempfile::tempdir().expect("Failed to create a temporary directory.");
    fs::write(dir.path().join("paris.jpg"), b"jpeg").expect("Failed to write image.");
    fs::write(dir.path().join("lima.jpg"), b"jpeg").expect("Failed to write image.");
    let mut catalog = fake_catalog();

    let dropped = catalog.retain_existing_images(dir.path());

    assert_eq!(dropped, 2);
    let ids = catalog
        .rounds()
        .iter()
        .map(|round| round.image_id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["paris", "lima"]);
}

#[test]
fn test_annotate_and_write_back() {
    let geocoder = NearestPlaceGeocoder::new(vec![Place {
        lat: 48.86,
        lon: 2.34,
        name: "Paris".to_string(),
        admin1: "Ile-de-France".to_string(),
        admin2: "Paris".to_string(),
        cc: "FR".to_string(),
    }]);
    let mut catalog = fake_catalog();

    annotate(&mut catalog, &geocoder);

    assert!(catalog
        .rounds()
        .iter()
        .all(|round| round.admin.country.as_deref() == Some("FR")));

    let dir = tempfile::tempdir().expect("Failed to create a temporary directory.");
    let path = dir.path().join("select.ndjson");
    catalog.write(&path).expect("Failed to write catalog.");
    let reloaded = Catalog::load(&path).expect("Failed to reload catalog.");
    assert_eq!(reloaded, catalog);
}
