use axum::{
    Json,
    extract::{Path, Query},
    response::IntoResponse,
    routing::get,
};
use http::StatusCode;
use serde::Deserialize;
use serde_json::json;

use mvs_dal::movie::{CreateMovie, MovieRepository, UpdateMovie};

use crate::error::ApiResult;
use crate::repository_from_request;
use crate::state::AppState;
use crate::validate::ValidatedJson;

repository_from_request!(MovieRepository);

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    genre: Option<String>,
}

pub async fn list(
    repository: MovieRepository,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let movies = repository.list(query.genre.as_deref());
    Ok((StatusCode::OK, Json(movies)))
}

pub async fn get_movie(
    Path(id): Path<String>,
    repository: MovieRepository,
) -> ApiResult<impl IntoResponse> {
    let record = repository.get(&id)?;

    Ok((StatusCode::OK, Json(record)))
}

pub async fn create(
    repository: MovieRepository,
    ValidatedJson(payload): ValidatedJson<CreateMovie>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.create(payload);

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update(
    Path(id): Path<String>,
    repository: MovieRepository,
    ValidatedJson(payload): ValidatedJson<UpdateMovie>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.update(&id, payload)?;

    Ok((StatusCode::OK, Json(record)))
}

pub async fn delete(
    Path(id): Path<String>,
    repository: MovieRepository,
) -> ApiResult<impl IntoResponse> {
    repository.delete(&id)?;

    Ok((StatusCode::OK, Json(json!({ "message": "Movie deleted" }))))
}

// Answers plain OPTIONS on the record route; actual CORS preflights are
// handled by the CORS layer before they reach the router.
pub async fn preflight() -> impl IntoResponse {
    StatusCode::OK
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(list).post(create))
        .route(
            "/{id}",
            get(get_movie)
                .patch(update)
                .delete(delete)
                .options(preflight),
        )
}
