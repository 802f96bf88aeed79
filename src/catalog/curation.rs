//! Offline preparation of a catalog: picking rounds and labelling them with place names.

use crate::catalog::Catalog;
use crate::geocoding::ReverseGeocoder;

/// Overwrites every round's administrative names with what `geocoder` reports for its true
/// location.
pub fn annotate(catalog: &mut Catalog, geocoder: &dyn ReverseGeocoder) {
    let points = catalog
        .rounds()
        .iter()
        .map(|round| round.location())
        .collect::<Vec<_>>();
    let labels = geocoder.search(&points);
    for (round, admin) in catalog.rounds_mut().iter_mut().zip(labels) {
        round.admin = admin;
    }
    tracing::info!(rounds_count = catalog.len(), "Annotated catalog rounds.");
}
