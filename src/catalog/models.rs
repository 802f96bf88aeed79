use crate::geo::models::GeoPoint;
use crate::geocoding::models::AdminRegions;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundLocation {
    /// File stem of the photo, `<image_id>.jpg` in the image folder.
    pub image_id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub admin: AdminRegions,
}

impl RoundLocation {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn image_file_name(&self) -> String {
        format!("{}.jpg", self.image_id)
    }
}
