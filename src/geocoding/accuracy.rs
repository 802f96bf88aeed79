use crate::geocoding::models::AdminRegions;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelAccuracy {
    pub correct: usize,
    /// Rounds where the true name is known.
    pub valid: usize,
}

impl LevelAccuracy {
    fn record(&mut self, clicked: Option<&String>, truth: Option<&String>) {
        if let Some(truth) = truth {
            self.valid += 1;
            if clicked == Some(truth) {
                self.correct += 1;
            }
        }
    }

    /// Share of correct answers, `None` if no round had a known name at this level.
    pub fn ratio(&self) -> Option<f64> {
        if self.valid == 0 {
            return None;
        }
        Some(self.correct as f64 / self.valid as f64)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccuracy {
    pub city: LevelAccuracy,
    pub area: LevelAccuracy,
    pub region: LevelAccuracy,
    pub country: LevelAccuracy,
}

impl AdminAccuracy {
    /// Compares guessed and true names round by round. Extra entries on either side are ignored.
    pub fn tally(clicked: &[AdminRegions], truth: &[AdminRegions]) -> Self {
        let mut accuracy = Self::default();
        for (clicked, truth) in clicked.iter().zip(truth) {
            accuracy
                .city
                .record(clicked.city.as_ref(), truth.city.as_ref());
            accuracy
                .area
                .record(clicked.area.as_ref(), truth.area.as_ref());
            accuracy
                .region
                .record(clicked.region.as_ref(), truth.region.as_ref());
            accuracy
                .country
                .record(clicked.country.as_ref(), truth.country.as_ref());
        }
        accuracy
    }
}
