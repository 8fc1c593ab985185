use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use domain_types::connector_types::{
    BuildProcessRequest, CallbackParams, TransactionRef, VerificationResult,
};
use interfaces::connector_types::NonmerchantGateway;

use crate::http::{
    error::HttpError,
    state::AppState,
    utils::{render_redirect_form, ValidatedJson},
};

/// Starts a hosted checkout and answers with the auto-submitting page.
pub async fn build_process(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BuildProcessRequest>,
) -> Result<Html<String>, HttpError> {
    let form = state
        .gateway
        .build_process(&state.context, request)
        .await?;
    Ok(render_redirect_form(&form))
}

fn callback_response(result: Option<VerificationResult>) -> Response {
    match result {
        Some(result) => Json(result).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn validate(state: AppState, params: CallbackParams) -> Result<Response, HttpError> {
    let result = state.gateway.validate(&state.context, params).await?;
    Ok(callback_response(result))
}

async fn success(state: AppState, params: CallbackParams) -> Result<Response, HttpError> {
    let result = state.gateway.success(&state.context, params).await?;
    Ok(callback_response(result))
}

pub async fn validate_query(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, HttpError> {
    validate(state, params).await
}

pub async fn validate_form(
    State(state): State<AppState>,
    Form(params): Form<CallbackParams>,
) -> Result<Response, HttpError> {
    validate(state, params).await
}

pub async fn success_query(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, HttpError> {
    success(state, params).await
}

pub async fn success_form(
    State(state): State<AppState>,
    Form(params): Form<CallbackParams>,
) -> Result<Response, HttpError> {
    success(state, params).await
}

pub async fn capture(
    State(state): State<AppState>,
    ValidatedJson(transaction): ValidatedJson<TransactionRef>,
) -> Result<StatusCode, HttpError> {
    state.gateway.capture(&transaction)?;
    Ok(StatusCode::OK)
}

pub async fn void(
    State(state): State<AppState>,
    ValidatedJson(transaction): ValidatedJson<TransactionRef>,
) -> Result<StatusCode, HttpError> {
    state.gateway.void(&transaction)?;
    Ok(StatusCode::OK)
}

pub async fn refund(
    State(state): State<AppState>,
    ValidatedJson(transaction): ValidatedJson<TransactionRef>,
) -> Result<StatusCode, HttpError> {
    state.gateway.refund(&transaction)?;
    Ok(StatusCode::OK)
}
