use std::sync::Arc;

use actix_web::{
    http::header::ContentType,
    web, HttpRequest, HttpResponse, ResponseError,
};
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::filter::ReviewFilter;
use crate::sentiment::SentimentScorer;
use crate::store::ReviewStore;
use crate::utils::query_string;
use crate::validator;

/// Shared state handed to every request through `web::Data`.
pub struct AppState {
    pub store: ReviewStore,
    pub scorer: Arc<dyn SentimentScorer>,
    pub score_on_write: bool,
}

impl AppState {
    pub fn new(store: ReviewStore, scorer: Arc<dyn SentimentScorer>, score_on_write: bool) -> Self {
        AppState {
            store,
            scorer,
            score_on_write,
        }
    }
}

/// Register the review routes on every path: GET lists, POST submits, anything else is
/// answered with 405. POST bodies up to `max_body_bytes` are accepted.
pub fn routes(max_body_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::resource("/{tail:.*}")
                .app_data(web::PayloadConfig::new(max_body_bytes))
                .route(web::get().to(list_reviews))
                .route(web::post().to(create_review))
                .default_service(web::to(method_not_allowed)),
        );
    }
}

pub async fn list_reviews(
    req: HttpRequest,
    query: web::Query<Vec<(String, String)>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let params = query_string::group(query.into_inner());
    logged(&req, filtered_reviews(&state, &params).await)
}

pub async fn create_review(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    logged(&req, submit_review(&state, &body).await)
}

async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, AppError> {
    logged(&req, Err(AppError::MethodNotAllowed(req.method().to_string())))
}

async fn filtered_reviews(
    state: &AppState,
    params: &query_string::FormFields,
) -> Result<HttpResponse, AppError> {
    let filter = ReviewFilter::from_params(params)?;

    let reviews = filter.apply(state.store.all().await);
    let body = serde_json::to_vec_pretty(&reviews)?;

    info!("[API] Returning {} reviews for {:?}", reviews.len(), filter);
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

async fn submit_review(state: &AppState, body: &[u8]) -> Result<HttpResponse, AppError> {
    let fields = query_string::parse_bytes(body).map_err(|_| AppError::MalformedPayload)?;

    let mut review = validator::validate(&fields, state.store.valid_locations())?;
    if state.score_on_write {
        review.sentiment = Some(state.scorer.score(&review.review_body));
    }

    // Serialize before appending so a failure leaves the store untouched
    let response_body = serde_json::to_vec(&review)?;

    info!(
        "[API] Accepted review {:?} for {}",
        review.review_id, review.location
    );
    state.store.append(review).await;

    Ok(HttpResponse::Created()
        .content_type(ContentType::json())
        .body(response_body))
}

fn logged(
    req: &HttpRequest,
    result: Result<HttpResponse, AppError>,
) -> Result<HttpResponse, AppError> {
    if let Err(err) = &result {
        if err.status_code().is_server_error() {
            error!("[API] {} {} failed: {}", req.method(), req.uri(), err);
        } else {
            warn!("[API] Rejected {} {}: {}", req.method(), req.uri(), err);
        }
    }
    result
}
