use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ErrorResponse, HealthResponse, MatchCaseRequest};
use crate::services::{MatchError, MatchErrorKind, MatchService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: MatchService,
}

/// Configure all case-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/cases", web::get().to(list_cases))
        .route("/cases/match", web::post().to(match_case))
        .route("/cases/{id}", web::get().to(get_case));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.service.health_check().await { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match a prospect against the catalog
///
/// POST /api/v1/cases/match
///
/// Request body:
/// ```json
/// {
///   "industry": "string",
///   "employeeCount": 100,
///   "challenges": "string",
///   "excludeIds": [1, 2]
/// }
/// ```
async fn match_case(
    state: web::Data<AppState>,
    req: web::Json<MatchCaseRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let query = req.into_inner().into_query();

    tracing::info!(
        "Match request: industry={}, employee_count={:?}, challenges={}..., exclude_ids={:?}",
        query.industry,
        query.employee_count,
        query.challenges.chars().take(50).collect::<String>(),
        query.exclude_ids
    );

    match state.service.match_case(&query).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => match_error_response(&e),
    }
}

/// Full decoded catalog
///
/// GET /api/v1/cases
async fn list_cases(state: web::Data<AppState>) -> impl Responder {
    match state.service.all_cases().await {
        Ok(cases) => HttpResponse::Ok().json(cases),
        Err(e) => match_error_response(&e),
    }
}

/// GET /api/v1/cases/{id}
async fn get_case(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    let id = path.into_inner();

    match state.service.get_case(id).await {
        Ok(Some(case)) => HttpResponse::Ok().json(case),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse {
            error: "case_not_found".to_string(),
            message: format!("Case {} does not exist", id),
            status_code: 404,
        }),
        Err(e) => match_error_response(&e),
    }
}

/// Map a service error onto a JSON error response
fn match_error_response(err: &MatchError) -> HttpResponse {
    let kind = err.kind();
    let (status, message) = match kind {
        MatchErrorKind::DataUnavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Case data is currently unavailable, please retry later".to_string(),
        ),
        MatchErrorKind::NoCandidatesRemaining => (
            StatusCode::NOT_FOUND,
            "No more matching cases to show; try different inputs".to_string(),
        ),
        MatchErrorKind::RecordDecode | MatchErrorKind::Persistence => {
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    };

    if status.is_server_error() {
        tracing::error!("Request failed: {}", err);
    }

    HttpResponse::build(status).json(ErrorResponse {
        error: kind.as_str().to_string(),
        message,
        status_code: status.as_u16(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let unavailable = match_error_response(&MatchError::DataUnavailable { cause: None });
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let exhausted = match_error_response(&MatchError::NoCandidatesRemaining);
        assert_eq!(exhausted.status(), StatusCode::NOT_FOUND);
    }
}
