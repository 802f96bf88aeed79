use crate::geo::haversine_km;
use crate::geo::models::GeoPoint;
use crate::ndjson::{self, NdjsonError};
use models::{AdminRegions, Place};
use std::path::Path;

pub mod accuracy;
pub mod models;

/// Translates coordinates into administrative names.
///
/// Implementations answer in batches: the result has exactly one entry per input point, in
/// input order. A point nothing is known about maps to `AdminRegions::default()`.
pub trait ReverseGeocoder: Send + Sync {
    fn search(&self, points: &[GeoPoint]) -> Vec<AdminRegions>;
}

/// Reverse geocoder answering with the administrative names of the closest known place.
#[derive(Clone, Debug, Default)]
pub struct NearestPlaceGeocoder {
    places: Vec<Place>,
}

impl NearestPlaceGeocoder {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    pub fn load(path: &Path) -> Result<Self, NdjsonError> {
        let places: Vec<Place> = ndjson::read(path)?;
        tracing::info!(
            places_count = places.len(),
            path = %path.display(),
            "Loaded reverse geocoding places.",
        );
        Ok(Self::new(places))
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn nearest(&self, point: GeoPoint) -> Option<&Place> {
        self.places
            .iter()
            .map(|place| (place, haversine_km(point, place.location())))
            .filter(|(_, distance)| !distance.is_nan())
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(place, _)| place)
    }
}

impl ReverseGeocoder for NearestPlaceGeocoder {
    fn search(&self, points: &[GeoPoint]) -> Vec<AdminRegions> {
        points
            .iter()
            .map(|point| {
                self.nearest(*point)
                    .map(Place::admin_regions)
                    .unwrap_or_default()
            })
            .collect()
    }
}
