//! Word-collection endpoints.
//!
//! The collection itself is deliberately plain CRUD; what matters here is
//! that every mutating handler asks the auth gate first and returns its deny
//! response verbatim. The read-only index is public.

use axum::{
    extract::{Extension, Query},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use ulid::Ulid;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::auth::gate;

const DEFAULT_SOURCE: &str = "merriam-webster";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WordEntry {
    pub id: String,
    pub word: String,
    pub definition: String,
    pub part_of_speech: Option<String>,
    pub pronunciation: Option<String>,
    pub source: String,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WordPayload {
    pub word: Option<String>,
    pub definition: Option<String>,
    pub part_of_speech: Option<String>,
    pub pronunciation: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WordUpdate {
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: WordPayload,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

/// In-memory word collection, keyed by entry id.
#[derive(Default)]
pub struct WordStore {
    entries: Mutex<HashMap<String, WordEntry>>,
}

impl WordStore {
    /// All entries, ordered by word.
    pub async fn list(&self) -> Vec<WordEntry> {
        let entries = self.entries.lock().await;
        let mut words: Vec<WordEntry> = entries.values().cloned().collect();
        words.sort_by(|a, b| a.word.to_lowercase().cmp(&b.word.to_lowercase()));
        words
    }

    pub async fn insert(&self, entry: WordEntry) {
        self.entries.lock().await.insert(entry.id.clone(), entry);
    }

    pub async fn update(&self, id: &str, fields: WordPayload) -> Option<WordEntry> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get_mut(id)?;

        if let Some(word) = fields.word {
            entry.word = word.trim().to_string();
        }
        if let Some(definition) = fields.definition {
            entry.definition = definition.trim().to_string();
        }
        if let Some(part_of_speech) = fields.part_of_speech {
            entry.part_of_speech = Some(part_of_speech);
        }
        if let Some(pronunciation) = fields.pronunciation {
            entry.pronunciation = Some(pronunciation);
        }
        if let Some(source) = fields.source {
            entry.source = source;
        }
        if let Some(notes) = fields.notes {
            entry.notes = Some(notes.trim().to_string());
        }

        Some(entry.clone())
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.entries.lock().await.remove(id).is_some()
    }
}

#[utoipa::path(
    get,
    path = "/words",
    responses(
        (status = 200, description = "All entries ordered by word", body = [WordEntry])
    ),
    tag = "words"
)]
pub async fn list(Extension(state): Extension<Arc<AppState>>) -> Response {
    Json(state.words.list().await).into_response()
}

#[utoipa::path(
    post,
    path = "/words",
    request_body = WordPayload,
    responses(
        (status = 201, description = "Entry created", body = WordEntry),
        (status = 400, description = "Word and definition required"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Origin mismatch")
    ),
    tag = "words"
)]
pub async fn create(
    method: Method,
    headers: HeaderMap,
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<WordPayload>,
) -> Response {
    if let Some(denied) = gate::require_admin(&state.auth, &method, &headers).await {
        return denied;
    }

    let word = payload.word.as_deref().map(str::trim).unwrap_or_default();
    let definition = payload
        .definition
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if word.is_empty() || definition.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Word and definition required"})),
        )
            .into_response();
    }

    let entry = WordEntry {
        id: Ulid::new().to_string(),
        word: word.to_string(),
        definition: definition.to_string(),
        part_of_speech: payload.part_of_speech,
        pronunciation: payload.pronunciation,
        source: payload.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        notes: payload.notes.map(|notes| notes.trim().to_string()),
    };
    state.words.insert(entry.clone()).await;

    (StatusCode::CREATED, Json(entry)).into_response()
}

#[utoipa::path(
    put,
    path = "/words",
    request_body = WordUpdate,
    responses(
        (status = 200, description = "Entry updated", body = WordEntry),
        (status = 400, description = "ID required"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Origin mismatch"),
        (status = 404, description = "Unknown entry")
    ),
    tag = "words"
)]
pub async fn update(
    method: Method,
    headers: HeaderMap,
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<WordUpdate>,
) -> Response {
    if let Some(denied) = gate::require_admin(&state.auth, &method, &headers).await {
        return denied;
    }

    let Some(id) = payload.id else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "ID required"}))).into_response();
    };

    match state.words.update(&id, payload.fields).await {
        Some(entry) => Json(entry).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/words",
    params(
        ("id" = Option<String>, Query, description = "Entry id to delete")
    ),
    responses(
        (status = 200, description = "Entry deleted"),
        (status = 400, description = "ID required"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Origin mismatch"),
        (status = 404, description = "Unknown entry")
    ),
    tag = "words"
)]
pub async fn remove(
    method: Method,
    headers: HeaderMap,
    Query(params): Query<DeleteParams>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    if let Some(denied) = gate::require_admin(&state.auth, &method, &headers).await {
        return denied;
    }

    let Some(id) = params.id else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "ID required"}))).into_response();
    };

    if state.words.remove(&id).await {
        Json(json!({"ok": true})).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response()
    }
}
