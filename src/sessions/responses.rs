use crate::geocoding::accuracy::AdminAccuracy;
use crate::sessions::error::SessionError;
use crate::sessions::models::{Averages, FinalSummary, GuessOutcome, RoundView};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct SessionResponse<T> {
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<SessionErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> SessionResponse<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            error: false,
            error_code: None,
            payload: Some(payload),
        }
    }

    pub fn failed(error_code: SessionErrorCode) -> Self {
        Self {
            error: true,
            error_code: Some(error_code),
            payload: None,
        }
    }

    pub fn reply(result: Result<T, SessionError>) -> (StatusCode, Json<Self>) {
        match result {
            Ok(payload) => (StatusCode::OK, Json(Self::ok(payload))),
            Err(err) => {
                let error_code = SessionErrorCode::from(&err);
                if let SessionError::Persistence(_) = err {
                    tracing::error!(error = ?err, "Failed to persist session results.");
                } else {
                    tracing::debug!(error = %err, "Rejected session request.");
                }
                (error_code.status(), Json(Self::failed(error_code)))
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionErrorCode {
    SessionNotFound,
    NothingToResume,
    NoRounds,
    InvalidGuess,
    AlreadyGuessed,
    NotGuessedYet,
    AlreadyFinished,
    NotFinished,
    PersistenceFailed,
}

impl SessionErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::SessionNotFound | Self::NothingToResume => StatusCode::NOT_FOUND,
            Self::NoRounds | Self::InvalidGuess => StatusCode::BAD_REQUEST,
            Self::AlreadyGuessed
            | Self::NotGuessedYet
            | Self::AlreadyFinished
            | Self::NotFinished => StatusCode::CONFLICT,
            Self::PersistenceFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<&SessionError> for SessionErrorCode {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::NotFound(_) => Self::SessionNotFound,
            SessionError::NothingToResume(_) => Self::NothingToResume,
            SessionError::NoRounds => Self::NoRounds,
            SessionError::InvalidGuess(_) => Self::InvalidGuess,
            SessionError::AlreadyGuessed => Self::AlreadyGuessed,
            SessionError::NotGuessedYet => Self::NotGuessedYet,
            SessionError::AlreadyFinished => Self::AlreadyFinished,
            SessionError::NotFinished => Self::NotFinished,
            SessionError::Persistence(_) => Self::PersistenceFailed,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSession {
    pub session_id: String,
    pub total_rounds: usize,
    pub resumed: bool,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessView {
    #[serde(flatten)]
    pub outcome: GuessOutcome,
    /// Human-readable result line, e.g. `GeoScore: 3972, distance: 344 km`.
    pub message: String,
}

impl From<GuessOutcome> for GuessView {
    fn from(outcome: GuessOutcome) -> Self {
        Self {
            message: format!("{}\n{}", outcome.result, outcome.averages),
            outcome,
        }
    }
}

/// Accuracy per administrative level in percent, `None` where nothing could be checked.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyPercentages {
    pub city: Option<f64>,
    pub area: Option<f64>,
    pub region: Option<f64>,
    pub country: Option<f64>,
}

impl From<&AdminAccuracy> for AccuracyPercentages {
    fn from(accuracy: &AdminAccuracy) -> Self {
        let percent = |ratio: Option<f64>| ratio.map(|ratio| 100.0 * ratio);
        Self {
            city: percent(accuracy.city.ratio()),
            area: percent(accuracy.area.ratio()),
            region: percent(accuracy.region.ratio()),
            country: percent(accuracy.country.ratio()),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub averages: Averages,
    pub accuracy: AdminAccuracy,
    pub percentages: AccuracyPercentages,
    pub times: Vec<f64>,
    pub text: String,
}

impl From<FinalSummary> for SummaryView {
    fn from(summary: FinalSummary) -> Self {
        Self {
            text: summary.to_string(),
            percentages: AccuracyPercentages::from(&summary.accuracy),
            averages: summary.averages,
            accuracy: summary.accuracy,
            times: summary.times,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextRoundView {
    pub finished: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<RoundView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryView>,
}

pub type CreateSessionResponse = SessionResponse<CreatedSession>;
pub type RoundResponse = SessionResponse<RoundView>;
pub type GuessResponse = SessionResponse<GuessView>;
pub type NextRoundResponse = SessionResponse<NextRoundView>;
pub type StatsResponse = SessionResponse<Averages>;
pub type SummaryResponse = SessionResponse<SummaryView>;
