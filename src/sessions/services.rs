use crate::app_context::{AppContext, RequestContext};
use crate::catalog::models::RoundLocation;
use crate::geo::models::GeoPoint;
use crate::geocoding::ReverseGeocoder;
use crate::sessions::error::SessionError;
use crate::sessions::models::{Advance, Averages, GuessOutcome, RoundView};
use crate::sessions::requests::{ClickRequest, CreateSessionRequest};
use crate::sessions::responses::{CreatedSession, GuessView, NextRoundView, SummaryView};
use crate::sessions::session::Session;
use crate::storage::interface::ISessionStorage;
use crate::storage::results::FileResultStore;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub struct SessionHttpHandler<'a, SS: ISessionStorage> {
    app_context: AppContext<SS>,
    request_context: &'a RequestContext,
}

impl<'a, SS> SessionHttpHandler<'a, SS>
where
    SS: ISessionStorage,
{
    pub fn new(app_context: AppContext<SS>, request_context: &'a RequestContext) -> Self {
        Self {
            app_context,
            request_context,
        }
    }

    fn session_id(&self) -> &str {
        &self.request_context.session_id
    }

    fn not_found(&self) -> SessionError {
        SessionError::NotFound(self.request_context.session_id.clone())
    }

    fn results(&self) -> FileResultStore {
        FileResultStore::new(&self.app_context.results_dir, self.session_id())
    }

    pub async fn current_round(&self) -> Result<RoundView, SessionError> {
        self.app_context
            .sessions
            .read(self.session_id(), Session::current_round)
            .await
            .ok_or_else(|| self.not_found())
    }

    /// Decodes a click on the rendered map and scores it like [`Self::guess`].
    pub async fn click(&self, request: ClickRequest) -> Result<GuessView, SessionError> {
        let point = request.decode()?;
        tracing::debug!(
            session_id = self.session_id(),
            click_x = request.x,
            click_y = request.y,
            lat = point.lat,
            lng = point.lng,
            "Decoded map click.",
        );
        self.guess(point).await
    }

    pub async fn guess(&self, point: GeoPoint) -> Result<GuessView, SessionError> {
        let results = self.results();
        let outcome = self
            .app_context
            .sessions
            .update(self.session_id(), move |session| {
                let outcome = session.guess(point)?;
                // The guess is kept in memory even if it could not be written to disk.
                if let Some(entry) = session.record().entries().last() {
                    results.record_round(outcome.round_number, entry)?;
                }
                results.save_progress(&session.progress())?;
                Ok::<GuessOutcome, SessionError>(outcome)
            })
            .await
            .ok_or_else(|| self.not_found())??;
        tracing::info!(
            task = "guess",
            session_id = self.session_id(),
            round = outcome.round_number,
            distance_km = outcome.result.distance_km,
            score = outcome.result.score,
        );
        Ok(GuessView::from(outcome))
    }

    pub async fn next(&self) -> Result<NextRoundView, SessionError> {
        let results = self.results();
        let geocoder = self.app_context.geocoder.clone();
        let advance = self
            .app_context
            .sessions
            .update(self.session_id(), advance_and_record(results, geocoder))
            .await
            .ok_or_else(|| self.not_found())??;
        let view = match advance {
            Advance::NextRound(round) => NextRoundView {
                finished: false,
                round: Some(round),
                summary: None,
            },
            Advance::Finished(summary) => {
                tracing::info!(
                    task = "session_finished",
                    session_id = self.session_id(),
                    average_score = summary.averages.score,
                    average_distance_km = summary.averages.distance_km,
                );
                NextRoundView {
                    finished: true,
                    round: None,
                    summary: Some(SummaryView::from(summary)),
                }
            }
        };
        Ok(view)
    }

    pub async fn stats(&self) -> Result<Averages, SessionError> {
        self.app_context
            .sessions
            .read(self.session_id(), |session| session.record().averages())
            .await
            .ok_or_else(|| self.not_found())
    }

    pub async fn summary(&self) -> Result<SummaryView, SessionError> {
        let summary = self
            .app_context
            .sessions
            .read(self.session_id(), |session| session.summary().cloned())
            .await
            .ok_or_else(|| self.not_found())??;
        Ok(SummaryView::from(summary))
    }
}

fn advance_and_record(
    results: FileResultStore,
    geocoder: Arc<dyn ReverseGeocoder>,
) -> impl FnOnce(&mut Session) -> Result<Advance, SessionError> + Send + 'static {
    move |session| {
        let advance = session.advance(geocoder.as_ref())?;
        if let Advance::Finished(summary) = &advance {
            results.record_final(summary)?;
        }
        Ok::<Advance, SessionError>(advance)
    }
}

pub struct CreateSessionHttpHandler<SS: ISessionStorage> {
    app_context: AppContext<SS>,
}

impl<SS> CreateSessionHttpHandler<SS>
where
    SS: ISessionStorage,
{
    pub fn new(app_context: AppContext<SS>) -> Self {
        Self { app_context }
    }

    pub async fn create(
        &self,
        request: CreateSessionRequest,
    ) -> Result<CreatedSession, SessionError> {
        match request.resume_id {
            Some(resume_id) => self.resume(&resume_id).await,
            None => self.start(request.rounds).await,
        }
    }

    async fn start(&self, rounds_count: Option<usize>) -> Result<CreatedSession, SessionError> {
        let catalog = &self.app_context.catalog;
        let rounds = match rounds_count.or(self.app_context.rounds_per_game) {
            Some(count) => catalog.sample(count, &mut rand::thread_rng()).into_rounds(),
            None => catalog.rounds().to_vec(),
        };
        let session = Session::new(rounds)?;
        let total_rounds = session.total_rounds();
        let session_id = Uuid::new_v4().simple().to_string();
        self.app_context.sessions.insert(&session_id, session).await;
        tracing::info!(
            task = "session_started",
            session_id = %session_id,
            total_rounds,
        );
        Ok(CreatedSession {
            session_id,
            total_rounds,
            resumed: false,
        })
    }

    async fn resume(&self, resume_id: &str) -> Result<CreatedSession, SessionError> {
        // Only canonical ids are accepted so that a resume id never escapes the results folder.
        let session_id = Uuid::try_parse(resume_id)
            .map_err(|_| SessionError::NothingToResume(resume_id.to_string()))?
            .simple()
            .to_string();
        let live_total = self
            .app_context
            .sessions
            .read(&session_id, Session::total_rounds)
            .await;
        if let Some(total_rounds) = live_total {
            return Ok(CreatedSession {
                session_id,
                total_rounds,
                resumed: true,
            });
        }

        let progress = FileResultStore::new(&self.app_context.results_dir, &session_id)
            .load_progress()?
            .ok_or_else(|| SessionError::NothingToResume(session_id.clone()))?;
        let by_image_id = self
            .app_context
            .catalog
            .rounds()
            .iter()
            .map(|round| (round.image_id.as_str(), round))
            .collect::<HashMap<_, _>>();
        let rounds = progress
            .image_ids
            .iter()
            .map(|image_id| by_image_id.get(image_id.as_str()).map(|round| (*round).clone()))
            .collect::<Option<Vec<RoundLocation>>>();
        let Some(rounds) = rounds else {
            tracing::warn!(
                session_id = %session_id,
                "Saved session refers to rounds missing from the catalog.",
            );
            return Err(SessionError::NothingToResume(session_id));
        };
        let session = Session::restore(rounds, progress)?;
        let total_rounds = session.total_rounds();
        self.app_context.sessions.insert(&session_id, session).await;
        tracing::info!(
            task = "session_resumed",
            session_id = %session_id,
            total_rounds,
        );
        Ok(CreatedSession {
            session_id,
            total_rounds,
            resumed: true,
        })
    }
}
