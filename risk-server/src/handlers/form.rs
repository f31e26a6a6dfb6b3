//! Form page handlers

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form,
};
use dropout_core::StudentProfile;

use crate::error::{AppError, HtmlError};
use crate::views::{page, result};
use crate::AppState;

use super::predict::run_prediction;

/// GET / - empty form with widget defaults
pub async fn index() -> Html<String> {
    Html(page::render_page(&StudentProfile::default(), None))
}

/// POST /predict - form submission, re-renders the form with the result
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<StudentProfile>, FormRejection>,
) -> Result<Html<String>, HtmlError> {
    let Form(profile) = form.map_err(AppError::from)?;
    let outcome = run_prediction(&state, profile.clone()).await?;
    let section = result::render_result(&outcome.prediction, &outcome.recommendation);
    Ok(Html(page::render_page(&profile, Some(&section))))
}
