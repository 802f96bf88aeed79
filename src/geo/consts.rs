/// Mean Earth radius used for all great-circle distances, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Score awarded for a guess placed exactly on the target.
pub const MAX_SCORE: f64 = 5000.0;
/// Exponential decay constant of the score curve, in kilometers.
///
/// The score halves roughly every 1035 km. Existing score tables depend on this exact value.
pub const SCORE_DECAY_KM: f64 = 1492.7;
