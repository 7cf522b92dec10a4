//! `/media` endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::state::AppState;
use crate::core::CatalogResult;
use crate::database::{CatalogManager, Category, MediaRecord, NewMedia};

/// Media route group
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/media", get(list_media).post(create_media))
        .route("/media/category/:category", get(list_media_by_category))
        .route("/media/search", get(search_media))
        .route("/media/:id", get(get_media).delete(delete_media))
}

/// Query string of `GET /media/search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

/// Body of `POST /media`. Fields are optional so absence can be reported by name.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateMediaRequest {
    pub name: Option<String>,
    pub author: Option<String>,
    pub publication_date: Option<String>,
    pub category: Option<String>,
}

impl CreateMediaRequest {
    /// Check that every field is present and the category is known
    pub fn validate(self) -> Result<NewMedia, ApiError> {
        fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
            match value {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(ApiError::BadRequest(format!(
                    "Missing required field: {field}"
                ))),
            }
        }

        let name = required(self.name, "name")?;
        let author = required(self.author, "author")?;
        let publication_date = required(self.publication_date, "publication_date")?;
        let category = required(self.category, "category")?;

        category.parse::<Category>()?;

        Ok(NewMedia {
            name,
            author,
            publication_date,
            category,
        })
    }
}

/// `GET /media`
async fn list_media(State(state): State<AppState>) -> Json<Vec<MediaRecord>> {
    let manager = state.manager.lock().await;
    Json(manager.list_all())
}

/// `GET /media/category/{category}`
async fn list_media_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<MediaRecord>>, ApiError> {
    let category: Category = category.parse()?;

    let manager = state.manager.lock().await;
    Ok(Json(manager.list_by_category(category.as_str())))
}

/// `GET /media/search?name=...`
async fn search_media(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<MediaRecord>, ApiError> {
    let name = params
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing 'name' query parameter.".to_string()))?;

    let manager = state.manager.lock().await;
    manager
        .search_by_name(&name)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Media with name '{name}' not found.")))
}

/// `GET /media/{id}`
async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MediaRecord>, ApiError> {
    let manager = state.manager.lock().await;
    manager
        .get_by_id(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Media ID {id} not found.")))
}

/// `POST /media`
async fn create_media(
    State(state): State<AppState>,
    payload: Result<Json<CreateMediaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MediaRecord>), ApiError> {
    let Json(request) = payload.map_err(|rejection| match rejection {
        JsonRejection::MissingJsonContentType(_) | JsonRejection::JsonSyntaxError(_) => {
            ApiError::BadRequest("Request body must be JSON.".to_string())
        }
        other => ApiError::BadRequest(other.body_text()),
    })?;
    let media = request.validate()?;

    let record = write_blocking(&state, move |manager| manager.add(media)).await?;

    info!("Created media {} ({})", record.id, record.entry.name);
    Ok((StatusCode::CREATED, Json(record)))
}

/// `DELETE /media/{id}`
async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let target = id.clone();
    let (deleted, remaining) = write_blocking(&state, move |manager| {
        manager.delete(&target).map(|deleted| (deleted, manager.len()))
    })
    .await?;

    if deleted {
        info!("Deleted media {}, {} records left", id, remaining);
        Ok(StatusCode::NO_CONTENT)
    } else {
        debug!("Delete of unknown media {}", id);
        Err(ApiError::NotFound(format!(
            "Media ID {id} not found for deletion."
        )))
    }
}

/// Run a mutation that rewrites the store on the blocking pool, holding the
/// manager lock until the write is done
async fn write_blocking<T, F>(state: &AppState, mutation: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut CatalogManager) -> CatalogResult<T> + Send + 'static,
{
    let mut manager = state.manager.clone().lock_owned().await;

    let outcome = tokio::task::spawn_blocking(move || mutation(&mut manager))
        .await
        .map_err(|e| {
            error!("Catalog write task failed: {}", e);
            ApiError::Internal("Internal server error during data processing.".to_string())
        })?;

    Ok(outcome?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateMediaRequest {
        CreateMediaRequest {
            name: Some("Dune".to_string()),
            author: Some("F. Herbert".to_string()),
            publication_date: Some("1965-08-01".to_string()),
            category: Some("Book".to_string()),
        }
    }

    #[test]
    fn test_validate_accepts_full_request() {
        let media = full_request().validate().expect("valid");
        assert_eq!(media, NewMedia::new("Dune", "F. Herbert", "1965-08-01", "Book"));
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let request = CreateMediaRequest {
            author: None,
            publication_date: None,
            ..full_request()
        };

        match request.validate() {
            Err(ApiError::BadRequest(message)) => {
                assert_eq!(message, "Missing required field: author")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validate_treats_blank_as_missing() {
        let request = CreateMediaRequest {
            name: Some("   ".to_string()),
            ..full_request()
        };
        assert!(matches!(
            request.validate(),
            Err(ApiError::BadRequest(ref m)) if m == "Missing required field: name"
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let request = CreateMediaRequest {
            category: Some("Podcast".to_string()),
            ..full_request()
        };
        assert!(matches!(
            request.validate(),
            Err(ApiError::BadRequest(ref m)) if m.starts_with("Invalid category: Podcast")
        ));
    }
}
