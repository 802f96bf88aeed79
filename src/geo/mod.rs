//! Distance, score and map-click geometry shared by every game front end.
//!
//! Everything here is a pure function: no state, no I/O, safe to call from any thread.
//! Invalid input (NaN, out-of-range coordinates) is not rejected and propagates through the
//! arithmetic; validating it is the caller's job.

use consts::{EARTH_RADIUS_KM, MAX_SCORE, SCORE_DECAY_KM};
use models::{GeoPoint, GuessResult, MapViewport};

pub mod consts;
pub mod models;

/// Great-circle distance in kilometers between two points on a spherical Earth.
///
/// If either point is missing the distance is `0.0`, which is what a round reports before the
/// player has guessed. A missing point is therefore indistinguishable from a perfect guess.
pub fn distance_km(a: impl Into<Option<GeoPoint>>, b: impl Into<Option<GeoPoint>>) -> f64 {
    match (a.into(), b.into()) {
        (Some(a), Some(b)) => haversine_km(a, b),
        _ => 0.0,
    }
}

/// Haversine distance in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi_1 = a.lat.to_radians();
    let phi_2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lng - a.lng).to_radians();
    let h = (delta_phi / 2.0).sin().powi(2)
        + phi_1.cos() * phi_2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push `h` slightly past 1 for antipodal points. Written as a comparison so
    // that NaN is kept instead of being replaced by the bound.
    let h = if h > 1.0 { 1.0 } else { h };
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Score for a guess that landed `distance_km` kilometers away from the target.
///
/// `5000` for a perfect guess, strictly decreasing, approaching but never reaching zero over
/// any distance that exists on Earth.
pub fn score(distance_km: f64) -> f64 {
    MAX_SCORE * (-distance_km / SCORE_DECAY_KM).exp()
}

/// Distance and score of a guess, both derived from one distance computation.
pub fn evaluate_guess(
    guess: impl Into<Option<GeoPoint>>,
    truth: impl Into<Option<GeoPoint>>,
) -> GuessResult {
    let distance_km = distance_km(guess, truth);
    GuessResult {
        distance_km,
        score: score(distance_km),
    }
}

/// Converts a click on the rendered map image into geographic coordinates.
///
/// Longitude grows left to right. Pixel row 0 is the top edge (maximum latitude); the extra
/// row in the latitude term matches how the map renderer reports its rows. Clicks outside the
/// image extrapolate linearly.
pub fn pixel_to_geo(click_x: f64, click_y: f64, viewport: &MapViewport) -> GeoPoint {
    let lng = viewport.min_lon + click_x * (viewport.max_lon - viewport.min_lon) / viewport.width;
    let lat = viewport.min_lat
        + (viewport.height - click_y + 1.0) * (viewport.max_lat - viewport.min_lat)
            / viewport.height;
    GeoPoint { lat, lng }
}

/// Inverse of [`pixel_to_geo`]: where `point` is drawn on the rendered map image.
pub fn geo_to_pixel(point: GeoPoint, viewport: &MapViewport) -> (f64, f64) {
    let x = (point.lng - viewport.min_lon) * viewport.width / (viewport.max_lon - viewport.min_lon);
    let y = viewport.height + 1.0
        - (point.lat - viewport.min_lat) * viewport.height / (viewport.max_lat - viewport.min_lat);
    (x, y)
}
