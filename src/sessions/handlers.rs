use crate::app_context::{AppContext, RequestContext};
use crate::geo::models::GeoPoint;
use crate::sessions::extractors::ExistingSession;
use crate::sessions::requests::{ClickRequest, CreateSessionRequest};
use crate::sessions::responses::{
    CreateSessionResponse, GuessResponse, NextRoundResponse, RoundResponse, StatsResponse,
    SummaryResponse,
};
use crate::sessions::services::{CreateSessionHttpHandler, SessionHttpHandler};
use crate::storage::sessions::HashMapSessionsStorage;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

#[axum::debug_handler]
pub async fn create(
    State(app_context): State<AppContext<HashMapSessionsStorage>>,
    Json(request): Json<CreateSessionRequest>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let result = CreateSessionHttpHandler::new(app_context)
        .create(request)
        .await;
    CreateSessionResponse::reply(result)
}

#[axum::debug_handler]
pub async fn current_round(
    session: ExistingSession,
    State(app_context): State<AppContext<HashMapSessionsStorage>>,
) -> (StatusCode, Json<RoundResponse>) {
    let request_context = RequestContext {
        session_id: session.session_id,
    };
    let result = SessionHttpHandler::new(app_context, &request_context)
        .current_round()
        .await;
    RoundResponse::reply(result)
}

#[axum::debug_handler]
pub async fn click(
    session: ExistingSession,
    State(app_context): State<AppContext<HashMapSessionsStorage>>,
    Json(request): Json<ClickRequest>,
) -> (StatusCode, Json<GuessResponse>) {
    let request_context = RequestContext {
        session_id: session.session_id,
    };
    let result = SessionHttpHandler::new(app_context, &request_context)
        .click(request)
        .await;
    GuessResponse::reply(result)
}

#[axum::debug_handler]
pub async fn guess(
    session: ExistingSession,
    State(app_context): State<AppContext<HashMapSessionsStorage>>,
    Json(point): Json<GeoPoint>,
) -> (StatusCode, Json<GuessResponse>) {
    let request_context = RequestContext {
        session_id: session.session_id,
    };
    let result = SessionHttpHandler::new(app_context, &request_context)
        .guess(point)
        .await;
    GuessResponse::reply(result)
}

#[axum::debug_handler]
pub async fn next(
    session: ExistingSession,
    State(app_context): State<AppContext<HashMapSessionsStorage>>,
) -> (StatusCode, Json<NextRoundResponse>) {
    let request_context = RequestContext {
        session_id: session.session_id,
    };
    let result = SessionHttpHandler::new(app_context, &request_context)
        .next()
        .await;
    NextRoundResponse::reply(result)
}

#[axum::debug_handler]
pub async fn stats(
    session: ExistingSession,
    State(app_context): State<AppContext<HashMapSessionsStorage>>,
) -> (StatusCode, Json<StatsResponse>) {
    let request_context = RequestContext {
        session_id: session.session_id,
    };
    let result = SessionHttpHandler::new(app_context, &request_context)
        .stats()
        .await;
    StatsResponse::reply(result)
}

#[axum::debug_handler]
pub async fn summary(
    session: ExistingSession,
    State(app_context): State<AppContext<HashMapSessionsStorage>>,
) -> (StatusCode, Json<SummaryResponse>) {
    let request_context = RequestContext {
        session_id: session.session_id,
    };
    let result = SessionHttpHandler::new(app_context, &request_context)
        .summary()
        .await;
    SummaryResponse::reply(result)
}
