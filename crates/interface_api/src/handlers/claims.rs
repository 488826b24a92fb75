//! Claims handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::ClaimId;
use domain_claims::ClaimForm;
use domain_session::Role;

use crate::auth::{require_role, TokenClaims};
use crate::dto::claims::*;
use crate::error::ApiError;
use crate::handlers::current_session;
use crate::AppState;

fn parse_claim_id(raw: &str) -> Result<ClaimId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid claim id: {}", raw)))
}

fn not_found(id: ClaimId) -> ApiError {
    ApiError::NotFound(format!("Claim not found: {}", id))
}

/// Recalculates the amounts for a form in progress
pub async fn preview(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(form): Json<ClaimForm>,
) -> Result<Json<AmountPreviewResponse>, ApiError> {
    require_role(&claims, Role::Employee)?;

    let breakdown = form.preview(&state.rules.calculator);
    Ok(Json(AmountPreviewResponse::new(&form, &breakdown)))
}

/// Submits a claim form for the caller
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(form): Json<ClaimForm>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    require_role(&claims, Role::Employee)?;

    let mut store = state.store.write().await;
    let id = form.submit(&claims.employee(), &state.rules, &mut store)?;
    let claim = store.get(id).ok_or_else(|| not_found(id))?;

    Ok((StatusCode::CREATED, Json(ClaimResponse::from(claim))))
}

/// Lists the caller's own claims
pub async fn my_claims(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<ClaimListResponse>, ApiError> {
    require_role(&claims, Role::Employee)?;

    let store = state.store.read().await;
    Ok(Json(ClaimListResponse::new(store.claims_by_employee(&claims.sub))))
}

/// Lists every claim
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<ClaimListResponse>, ApiError> {
    require_role(&claims, Role::Reviewer)?;

    let store = state.store.read().await;
    Ok(Json(ClaimListResponse::new(store.all_claims())))
}

/// Lists claims awaiting review
pub async fn pending_claims(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<ClaimListResponse>, ApiError> {
    require_role(&claims, Role::Reviewer)?;

    let store = state.store.read().await;
    Ok(Json(ClaimListResponse::new(store.pending_claims())))
}

/// Gets a claim by ID
///
/// In the employee role only the caller's own claims are visible.
pub async fn get_claim(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let session = current_session(&state, &claims)?;
    let id = parse_claim_id(&id)?;
    let store = state.store.read().await;

    let claim = store
        .get(id)
        .filter(|c| {
            session.active_role() == Role::Reviewer || c.employee().email == session.user().email
        })
        .ok_or_else(|| not_found(id))?;

    Ok(Json(ClaimResponse::from(claim)))
}

/// Approves a pending claim
pub async fn approve_claim(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    require_role(&claims, Role::Reviewer)?;
    let id = parse_claim_id(&id)?;
    let desk = current_session(&state, &claims)?.review_desk()?;

    let mut store = state.store.write().await;
    let claim = desk.approve(&mut store, id)?;

    Ok(Json(ClaimResponse::from(claim)))
}

/// Rejects a pending claim with a reason
pub async fn reject_claim(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<String>,
    Json(request): Json<RejectRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    require_role(&claims, Role::Reviewer)?;
    request.validate()?;
    let id = parse_claim_id(&id)?;
    let desk = current_session(&state, &claims)?.review_desk()?;

    let mut store = state.store.write().await;
    let claim = desk.reject(&mut store, id, &request.reason)?;

    Ok(Json(ClaimResponse::from(claim)))
}
