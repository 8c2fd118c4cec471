// ============================================================================
// Auth Service
// ============================================================================
//
// User account peer. Serves the user snapshot the order service
// aggregates over, plus registration. Token issuance is handled by an
// external collaborator and is not part of this service.
//
// ============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use bazaar_shared::middleware::{handle_panic, require_gateway, translate_status};
use bazaar_shared::models::UserSnapshot;

/// Stored account. The password never leaves this service; responses
/// carry the snapshot projection only.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub telephone_number: String,
    pub address: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl Account {
    fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id,
            name: self.name.clone(),
            telephone_number: self.telephone_number.clone(),
            address: self.address.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

pub struct AccountStore {
    accounts: RwLock<HashMap<i64, Account>>,
    next_id: AtomicI64,
}

impl AccountStore {
    pub fn seeded(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts: HashMap<i64, Account> =
            accounts.into_iter().map(|a| (a.id, a)).collect();
        let next_id = accounts.keys().max().copied().unwrap_or(0) + 1;
        Self {
            accounts: RwLock::new(accounts),
            next_id: AtomicI64::new(next_id),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub telephone_number: String,
    pub address: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: String,
}

async fn get_user(
    State(store): State<Arc<AccountStore>>,
    Path(id): Path<i64>,
) -> Response {
    match store.accounts.read().await.get(&id) {
        Some(account) => Json(account.snapshot()).into_response(),
        None => (StatusCode::NOT_FOUND, "User not found").into_response(),
    }
}

async fn register(
    State(store): State<Arc<AccountStore>>,
    Json(registration): Json<Registration>,
) -> Response {
    if registration.email.is_empty() || registration.password.is_empty() {
        return (StatusCode::BAD_REQUEST, "Invalid registration details").into_response();
    }
    {
        let accounts = store.accounts.read().await;
        if accounts.values().any(|a| a.email == registration.email) {
            return (
                StatusCode::BAD_REQUEST,
                "You can't use this email for registration",
            )
                .into_response();
        }
    }

    let id = store.next_id.fetch_add(1, Ordering::SeqCst);
    let account = Account {
        id,
        name: registration.name,
        telephone_number: registration.telephone_number,
        address: registration.address,
        email: registration.email,
        password: registration.password,
        role: registration.role,
    };
    let snapshot = account.snapshot();
    store.accounts.write().await.insert(id, account);
    tracing::info!(user_id = id, "user registered");
    (StatusCode::CREATED, Json(snapshot)).into_response()
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// Build the auth service router.
pub fn app(store: Arc<AccountStore>) -> Router {
    let guarded = Router::new()
        .route("/api/Authentication/getUser/:id", get(get_user))
        .route("/api/Authentication/register", post(register))
        .layer(middleware::from_fn(require_gateway))
        .with_state(store);

    Router::new()
        .route("/health", get(health_check))
        .merge(guarded)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(middleware::from_fn(translate_status))
                .into_inner(),
        )
}
