//! HTTP route handlers.

use std::path::Path;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post, put},
};
use serde::de::DeserializeOwned;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::accounts::{AccountError, Favorite, NewUser};
use crate::planner::RouteError;

use super::dto::*;
use super::state::AppState;

/// Greeting pre-filled in the contact chat, already URI-component encoded.
const CONTACT_MESSAGE: &str = "Hello!%20I'd%20like%20to%20know%20more%20about%20the%20services.";

/// Default and maximum number of station search results.
const DEFAULT_SEARCH_LIMIT: usize = 10;
const MAX_SEARCH_LIMIT: usize = 50;

/// Create the application router.
///
/// Anything not matched by an API route is served from `static_dir`.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/route", get(plan_route))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/search", get(search_stations))
        .route("/api/stations/:id", get(get_station))
        .route("/users", post(sign_up))
        .route("/users/next-id", get(next_user_id))
        .route("/users/:id", get(get_user))
        .route("/users/:id/balance", put(top_up))
        .route("/users/:id/charges", post(charge))
        .route("/users/:id/favorites", post(add_favorite))
        .route("/login", post(log_in))
        .route("/contact", get(contact))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Fewest-hops route between two stations given by name or id.
async fn plan_route(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let (Some(origin), Some(destination)) = (req.orig, req.dest) else {
        return Err(AppError::BadRequest {
            message: "parameters orig and dest are required".to_string(),
        });
    };

    let itinerary = state.routes.route(&origin, &destination).await?;
    Ok(Json(RouteResponse::from_itinerary(&itinerary)))
}

/// All stations in dataset order.
async fn list_stations(State(state): State<AppState>) -> Json<StationListResponse> {
    let stations = state
        .routes
        .service()
        .graph()
        .all()
        .iter()
        .map(StationResult::from_station)
        .collect();

    Json(StationListResponse { stations })
}

/// Search stations by name fragment.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationListResponse> {
    let limit = req.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).min(MAX_SEARCH_LIMIT);
    let service = state.routes.service();
    let stations = service
        .names()
        .search(&req.q, limit, service.graph())
        .into_iter()
        .map(StationResult::from_station)
        .collect();

    Json(StationListResponse { stations })
}

/// One station by exact id.
async fn get_station(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<StationResult>, AppError> {
    state
        .routes
        .service()
        .graph()
        .get(&id)
        .map(|s| Json(StationResult::from_station(s)))
        .ok_or_else(|| AppError::NotFound {
            message: format!("station {id} not found"),
        })
}

/// The id the next registered user will get.
async fn next_user_id(State(state): State<AppState>) -> Result<Json<NextIdResponse>, AppError> {
    let next_id = state.accounts.next_id().await?;
    Ok(Json(NextIdResponse { next_id }))
}

/// Register a user.
async fn sign_up(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: SignUpRequest = parse_json(&body)?;
    let user = state
        .accounts
        .sign_up(NewUser {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResult::from_user(&user))).into_response())
}

/// Check an email/password pair.
async fn log_in(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UserResult>, AppError> {
    let req: LoginRequest = parse_json(&body)?;
    let user = state.accounts.log_in(&req.email, &req.password).await?;
    Ok(Json(UserResult::from_user(&user)))
}

/// Fetch a user.
async fn get_user(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<UserResult>, AppError> {
    let id = parse_user_id(&id)?;
    let user = state.accounts.get(id).await?;
    Ok(Json(UserResult::from_user(&user)))
}

/// Credit a wallet.
async fn top_up(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
    body: Bytes,
) -> Result<Json<WalletResponse>, AppError> {
    let id = parse_user_id(&id)?;
    let req: AmountRequest = parse_json(&body)?;
    let amount = req.amount.ok_or(AccountError::InvalidAmount)?;

    let user = state.accounts.top_up(id, amount).await?;
    Ok(Json(WalletResponse::from_user("Balance added", &user)))
}

/// Debit a wallet.
async fn charge(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
    body: Bytes,
) -> Result<Json<WalletResponse>, AppError> {
    let id = parse_user_id(&id)?;
    let req: AmountRequest = parse_json(&body)?;
    let amount = req.amount.ok_or(AccountError::InvalidAmount)?;

    let user = state
        .accounts
        .charge(id, amount, req.description.as_deref())
        .await?;
    Ok(Json(WalletResponse::from_user("Payment recorded", &user)))
}

/// Pin a station as a favorite.
async fn add_favorite(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
    body: Bytes,
) -> Result<Json<UserResult>, AppError> {
    let id = parse_user_id(&id)?;
    let req: FavoriteRequest = parse_json(&body)?;

    let station = state
        .routes
        .service()
        .graph()
        .get(&req.station_id)
        .ok_or_else(|| AppError::NotFound {
            message: format!("station {} not found", req.station_id),
        })?;

    let favorite = Favorite {
        station_id: station.id.to_string(),
        name: station.name.clone(),
        line: req.line,
    };
    let user = state.accounts.add_favorite(id, favorite).await?;
    Ok(Json(UserResult::from_user(&user)))
}

/// Redirect to the support chat.
async fn contact(State(state): State<AppState>) -> Redirect {
    Redirect::to(&format!(
        "https://wa.me/{}?text={}",
        state.contact_number, CONTACT_MESSAGE
    ))
}

/// Parse a JSON body, reporting failures as bad requests.
fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, body = %String::from_utf8_lossy(body), "JSON parse error");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

fn parse_user_id(id: &str) -> Result<u64, AppError> {
    id.parse().map_err(|_| AppError::BadRequest {
        message: format!("invalid user id: {id}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unauthorized { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let message = e.to_string();
        match e {
            RouteError::InvalidQuery(_) => AppError::BadRequest { message },
            RouteError::NotFound { .. } | RouteError::NoRoute { .. } => {
                AppError::NotFound { message }
            }
        }
    }
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        let message = e.to_string();
        match e {
            AccountError::MissingField(_)
            | AccountError::InvalidEmail
            | AccountError::PasswordTooShort { .. }
            | AccountError::InvalidAmount => AppError::BadRequest { message },
            AccountError::InvalidCredentials => AppError::Unauthorized { message },
            AccountError::UserNotFound(_) => AppError::NotFound { message },
            AccountError::EmailTaken
            | AccountError::InsufficientFunds { .. }
            | AccountError::DuplicateFavorite(_) => AppError::Conflict { message },
            AccountError::IdsExhausted | AccountError::Store(_) => {
                AppError::Internal { message }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
