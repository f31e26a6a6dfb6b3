//! Feature layout handler

use axum::{
    extract::{rejection::QueryRejection, Query},
    Json,
};
use dropout_core::logic::features::layout::validate_layout;
use dropout_core::LayoutInfo;
use serde::Deserialize;

use crate::{AppError, AppResult};

/// Layout a client was built against
#[derive(Debug, Deserialize)]
pub struct LayoutQuery {
    pub version: Option<u8>,
    pub hash: Option<u32>,
}

/// Column schema the model expects, with version and layout hash.
///
/// With `?version=&hash=` the client's layout is checked first and a
/// mismatch is answered with 409.
pub async fn layout(
    query: Result<Query<LayoutQuery>, QueryRejection>,
) -> AppResult<Json<LayoutInfo>> {
    let Query(query) = query?;

    match (query.version, query.hash) {
        (Some(version), Some(hash)) => validate_layout(version, hash)?,
        (None, None) => {}
        _ => {
            return Err(AppError::ValidationError(
                "version and hash must be given together".to_string(),
            ))
        }
    }

    Ok(Json(LayoutInfo::current()))
}
