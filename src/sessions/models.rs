use crate::catalog::models::RoundLocation;
use crate::geo::models::{GeoPoint, GuessResult};
use crate::geocoding::accuracy::AdminAccuracy;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundEntry {
    pub result: GuessResult,
    pub guess: GeoPoint,
    /// Seconds between the round being shown and the guess.
    pub elapsed_secs: f64,
}

/// Append-only history of a session's guesses, one entry per played round in play order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    entries: Vec<RoundEntry>,
}

impl RoundRecord {
    pub fn push(&mut self, entry: RoundEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[RoundEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clicked_locations(&self) -> Vec<GeoPoint> {
        self.entries.iter().map(|entry| entry.guess).collect()
    }

    pub fn times(&self) -> Vec<f64> {
        self.entries.iter().map(|entry| entry.elapsed_secs).collect()
    }

    /// Mean score and distance, both `0` while nothing is recorded.
    pub fn averages(&self) -> Averages {
        if self.entries.is_empty() {
            return Averages::default();
        }
        let count = self.entries.len() as f64;
        let (score_sum, distance_sum) = self
            .entries
            .iter()
            .fold((0.0, 0.0), |(score, distance), entry| {
                (score + entry.result.score, distance + entry.result.distance_km)
            });
        Averages {
            score: score_sum / count,
            distance_km: distance_sum / count,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Averages {
    pub score: f64,
    pub distance_km: f64,
}

impl fmt::Display for Averages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Average GeoScore: {:.0}, Average distance: {:.0} km",
            self.score, self.distance_km
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessOutcome {
    /// 1-based.
    pub round_number: usize,
    pub result: GuessResult,
    pub guess: GeoPoint,
    pub truth: GeoPoint,
    pub averages: Averages,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalSummary {
    pub averages: Averages,
    pub accuracy: AdminAccuracy,
    pub times: Vec<f64>,
}

impl fmt::Display for FinalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = |ratio: Option<f64>| match ratio {
            Some(ratio) => format!("{:.1}", 100.0 * ratio),
            None => String::from("n/a"),
        };
        write!(
            f,
            "Average GeoScore: {:.0}  \n\
            Average distance: {:.0} km  \n\
            Country Acc: {}  \n\
            Region Acc: {}  \n\
            Area Acc: {}  \n\
            City Acc: {}",
            self.averages.score,
            self.averages.distance_km,
            percent(self.accuracy.country.ratio()),
            percent(self.accuracy.region.ratio()),
            percent(self.accuracy.area.ratio()),
            percent(self.accuracy.city.ratio()),
        )
    }
}

/// Snapshot written after every guess so that an interrupted game can be picked up again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProgress {
    pub image_ids: Vec<String>,
    /// 0-based index of the first round that has not been guessed.
    pub next_round: usize,
    pub record: RoundRecord,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    /// 1-based.
    pub number: usize,
    pub total: usize,
    pub image_id: String,
    pub image_file: String,
    pub guessed: bool,
    pub finished: bool,
}

impl RoundView {
    pub(crate) fn new(number: usize, total: usize, round: &RoundLocation) -> Self {
        Self {
            number,
            total,
            image_id: round.image_id.clone(),
            image_file: round.image_file_name(),
            guessed: false,
            finished: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Advance {
    NextRound(RoundView),
    Finished(FinalSummary),
}
