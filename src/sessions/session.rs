use crate::catalog::models::RoundLocation;
use crate::geo;
use crate::geo::models::GeoPoint;
use crate::geocoding::accuracy::AdminAccuracy;
use crate::geocoding::ReverseGeocoder;
use crate::sessions::error::SessionError;
use crate::sessions::models::{
    Advance, FinalSummary, GuessOutcome, RoundEntry, RoundRecord, RoundView, SessionProgress,
};
use std::time::{Duration, Instant};

/// One player's game: a fixed list of rounds played strictly in order, one guess per round.
#[derive(Clone, Debug)]
pub struct Session {
    rounds: Vec<RoundLocation>,
    /// 0-based index of the round on screen.
    index: usize,
    guessed: bool,
    record: RoundRecord,
    round_started_at: Instant,
    last_active: Instant,
    summary: Option<FinalSummary>,
}

impl Session {
    pub fn new(rounds: Vec<RoundLocation>) -> Result<Self, SessionError> {
        if rounds.is_empty() {
            return Err(SessionError::NoRounds);
        }
        Ok(Self {
            rounds,
            index: 0,
            guessed: false,
            record: RoundRecord::default(),
            round_started_at: Instant::now(),
            last_active: Instant::now(),
            summary: None,
        })
    }

    /// Rebuilds a session from a saved snapshot. `rounds` must be the rounds named in
    /// `progress.image_ids`, in the same order.
    pub fn restore(
        rounds: Vec<RoundLocation>,
        progress: SessionProgress,
    ) -> Result<Self, SessionError> {
        let mut session = Self::new(rounds)?;
        let last_index = session.rounds.len() - 1;
        session.record = progress.record;
        if progress.next_round > last_index {
            // Every round was guessed before the game was interrupted; `advance` finishes it.
            session.index = last_index;
            session.guessed = true;
        } else {
            session.index = progress.next_round;
        }
        Ok(session)
    }

    pub fn total_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_finished(&self) -> bool {
        self.summary.is_some()
    }

    pub fn record(&self) -> &RoundRecord {
        &self.record
    }

    /// Time since the session was created or last guessed or advanced.
    pub fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }

    pub fn summary(&self) -> Result<&FinalSummary, SessionError> {
        self.summary.as_ref().ok_or(SessionError::NotFinished)
    }

    pub fn current_round(&self) -> RoundView {
        let mut view = RoundView::new(self.index + 1, self.rounds.len(), &self.rounds[self.index]);
        view.guessed = self.guessed;
        view.finished = self.is_finished();
        view
    }

    /// Scores `point` against the round on screen.
    pub fn guess(&mut self, point: GeoPoint) -> Result<GuessOutcome, SessionError> {
        if self.is_finished() {
            return Err(SessionError::AlreadyFinished);
        }
        if self.guessed {
            return Err(SessionError::AlreadyGuessed);
        }
        if !point.lat.is_finite() || !point.lng.is_finite() {
            return Err(SessionError::InvalidGuess("coordinates must be finite"));
        }
        self.last_active = Instant::now();
        let elapsed_secs = self.round_started_at.elapsed().as_secs_f64();
        let truth = self.rounds[self.index].location();
        let result = geo::evaluate_guess(point, truth);
        self.record.push(RoundEntry {
            result,
            guess: point,
            elapsed_secs,
        });
        self.guessed = true;
        Ok(GuessOutcome {
            round_number: self.index + 1,
            result,
            guess: point,
            truth,
            averages: self.record.averages(),
        })
    }

    /// Moves on from a guessed round. After the last round the game is finished and the
    /// guesses are reverse-geocoded for the accuracy statistics.
    pub fn advance(&mut self, geocoder: &dyn ReverseGeocoder) -> Result<Advance, SessionError> {
        if self.is_finished() {
            return Err(SessionError::AlreadyFinished);
        }
        if !self.guessed {
            return Err(SessionError::NotGuessedYet);
        }
        self.last_active = Instant::now();
        if self.index + 1 == self.rounds.len() {
            return Ok(Advance::Finished(self.finish(geocoder)));
        }
        self.index += 1;
        self.guessed = false;
        self.round_started_at = Instant::now();
        Ok(Advance::NextRound(self.current_round()))
    }

    fn finish(&mut self, geocoder: &dyn ReverseGeocoder) -> FinalSummary {
        let clicked_admins = geocoder.search(&self.record.clicked_locations());
        let true_admins = self
            .rounds
            .iter()
            .take(self.record.len())
            .map(|round| round.admin.clone())
            .collect::<Vec<_>>();
        let summary = FinalSummary {
            averages: self.record.averages(),
            accuracy: AdminAccuracy::tally(&clicked_admins, &true_admins),
            times: self.record.times(),
        };
        self.summary = Some(summary.clone());
        summary
    }

    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            image_ids: self
                .rounds
                .iter()
                .map(|round| round.image_id.clone())
                .collect(),
            next_round: if self.guessed {
                self.index + 1
            } else {
                self.index
            },
            record: self.record.clone(),
        }
    }
}
