use crate::geo;
use crate::geo::models::{GeoPoint, MapViewport};
use crate::sessions::error::SessionError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// How many rounds to sample from the catalog. Falls back to the server default.
    #[serde(default)]
    pub rounds: Option<usize>,
    #[serde(default)]
    pub resume_id: Option<String>,
}

/// A click on the rendered map, in pixels of the rendered image.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickRequest {
    pub x: f64,
    pub y: f64,
    pub viewport: MapViewport,
}

impl ClickRequest {
    /// Map coordinates of the click. The viewport comes from the client and is checked first.
    pub fn decode(&self) -> Result<GeoPoint, SessionError> {
        let viewport = &self.viewport;
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(viewport.width) || !positive(viewport.height) {
            return Err(SessionError::InvalidGuess("viewport size must be positive"));
        }
        if !positive(viewport.max_lon - viewport.min_lon)
            || !positive(viewport.max_lat - viewport.min_lat)
        {
            return Err(SessionError::InvalidGuess("viewport extent must be finite and non-empty"));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(SessionError::InvalidGuess("click position must be finite"));
        }
        Ok(geo::pixel_to_geo(self.x, self.y, viewport))
    }
}
