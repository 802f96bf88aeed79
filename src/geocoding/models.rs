use crate::geo::models::GeoPoint;
use serde::{Deserialize, Serialize};

/// Administrative names of a location, most specific first.
///
/// `None` means the level is unknown for this location.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRegions {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Reference place used for reverse geocoding, in the GeoNames `cities1000` layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    #[serde(default)]
    pub admin1: String,
    #[serde(default)]
    pub admin2: String,
    pub cc: String,
}

impl Place {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    pub fn admin_regions(&self) -> AdminRegions {
        AdminRegions {
            city: non_empty(&self.name),
            area: non_empty(&self.admin2),
            region: non_empty(&self.admin1),
            country: non_empty(&self.cc),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
