//! HTTP handlers
//!
//! One generic adapter serves every resource kind.  The request body carries
//! the object or metadata, so every route is a bare collection path:
//!
//! | Method   | Body              | Operation | Success |
//! |----------|-------------------|-----------|---------|
//! | `GET`    | metadata (or empty) | list    | `200` + JSON array |
//! | `PUT`    | object            | create    | `201` + object |
//! | `POST`   | object            | update    | `201` + object |
//! | `DELETE` | metadata          | delete    | `204` |
//!
//! A body that does not decode is answered with `422` and nothing further
//! happens.  See [`ApiError`] for the mapping of gateway failures.

pub mod health;

pub use health::health_router;

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use http_body_util::LengthLimitError;
use netpol_kernel::{MetadataOf, ResourceConverter};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error as StdError;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult, JSON_UTF8};
use crate::state::AppState;

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 1_048_576;

// ─────────────────────────────────────────────────────────────────────────────
// Routers
// ─────────────────────────────────────────────────────────────────────────────

/// Full CRUD on `path` for the kind handled by `C`.
pub fn resource_router<C>(path: &str) -> Router<Arc<AppState>>
where
    C: ResourceConverter + Default + 'static,
{
    Router::new().route(
        path,
        get(list::<C>)
            .put(create::<C>)
            .post(update::<C>)
            .delete(delete::<C>),
    )
}

/// Read-only listing on `path` for the kind handled by `C`.
pub fn list_router<C>(path: &str) -> Router<Arc<AppState>>
where
    C: ResourceConverter + Default + 'static,
{
    Router::new().route(path, get(list::<C>))
}

// ─────────────────────────────────────────────────────────────────────────────
// Generic handlers
// ─────────────────────────────────────────────────────────────────────────────

async fn list<C>(State(state): State<Arc<AppState>>, body: Body) -> ApiResult<Response>
where
    C: ResourceConverter + Default + 'static,
{
    let bytes = read_body(body).await?;
    let metadata: MetadataOf<C> = if bytes.iter().all(u8::is_ascii_whitespace) {
        Default::default()
    } else {
        decode(&bytes)?
    };
    let list = state.client.list(&C::default(), &metadata).await?;

    let mut response = json_response(StatusCode::OK, &list.items);
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    Ok(response)
}

async fn create<C>(State(state): State<Arc<AppState>>, body: Body) -> ApiResult<Response>
where
    C: ResourceConverter + Default + 'static,
{
    let resource: C::Resource = decode(&read_body(body).await?)?;
    let created = state.client.create(&C::default(), &resource).await?;
    Ok(json_response(StatusCode::CREATED, &created))
}

async fn update<C>(State(state): State<Arc<AppState>>, body: Body) -> ApiResult<Response>
where
    C: ResourceConverter + Default + 'static,
{
    let resource: C::Resource = decode(&read_body(body).await?)?;
    let updated = state.client.update(&C::default(), &resource).await?;
    Ok(json_response(StatusCode::CREATED, &updated))
}

async fn delete<C>(State(state): State<Arc<AppState>>, body: Body) -> ApiResult<Response>
where
    C: ResourceConverter + Default + 'static,
{
    let metadata: MetadataOf<C> = decode(&read_body(body).await?)?;
    state.client.delete(&C::default(), &metadata).await?;
    Ok(empty_response(StatusCode::NO_CONTENT))
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Buffer the body, capped at [`MAX_BODY_BYTES`].
async fn read_body(body: Body) -> ApiResult<axum::body::Bytes> {
    axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|err| {
            if exceeds_limit(&err) {
                ApiError::PayloadTooLarge {
                    limit: MAX_BODY_BYTES,
                }
            } else {
                ApiError::BodyRead(err.to_string())
            }
        })
}

fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(current) = source {
        if current.is::<LengthLimitError>() {
            return true;
        }
        source = current.source();
    }
    false
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::Unprocessable(e.to_string()))
}

pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    response
}

fn empty_response(status: StatusCode) -> Response {
    let mut response = status.into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    response
}
