use axum::response::Json;
use utoipa::OpenApi;

use crate::api::handlers::{auth, health, words};

#[derive(OpenApi)]
#[openapi(
    info(description = "Personal lexicon service"),
    paths(
        health::health,
        auth::session,
        auth::auth,
        words::list,
        words::create,
        words::update,
        words::remove,
    ),
    components(schemas(
        auth::AuthRequest,
        auth::OkResponse,
        words::WordEntry,
        words::WordPayload,
        words::WordUpdate,
    )),
    tags(
        (name = "auth", description = "Admin session endpoints"),
        (name = "words", description = "Word collection"),
        (name = "health", description = "Liveness"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub(crate) async fn serve() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}
