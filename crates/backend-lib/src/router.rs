// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router and request handlers.
//!
//! Handlers are thin: decode the typed request, call the service, map
//! the result. All error-to-status mapping lives on [`AppError`].
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use stockroom_common::{
    CreateProductRequest, CreateSeriesRequest, LoginRequest, ProductView, PublicProductView,
    RegisterRequest, SeriesView, TokenResponse,
};

use crate::error::AppError;
use crate::store::Store;
use crate::AppState;

/// Create the API router
pub fn create_router<S: Store>(state: Arc<AppState<S>>) -> Router {
    // the full product listing is the only protected route
    let protected = Router::new()
        .route("/api/products/full", get(list_products_full))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_token::<S>,
        ));

    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/series", post(create_series).get(list_series))
        .route("/api/series/{id}", get(get_series))
        .route("/api/products", post(create_product).get(list_products))
        .route("/api/products/{id}", get(get_product))
        .route("/api/products/series/{series_id}", get(list_products_by_series))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Middleware for protected routes: extracts the bearer token from the
/// `Authorization` header, verifies it, and attaches the decoded claims
/// to the request for downstream handlers.
async fn require_token<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split_whitespace().nth(1))
        .ok_or(AppError::MissingToken)?;

    let claims = state.tokens.verify(token).inspect_err(|e| {
        tracing::warn!(error = %e, "token rejected");
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

async fn register<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<RegisterRequest>,
) -> Result<StatusCode, AppError> {
    state.auth.register(&req.username, &req.password).await?;
    Ok(StatusCode::CREATED)
}

async fn login<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state.auth.login(&req.username, &req.password).await?;
    Ok(Json(TokenResponse { token }))
}

async fn create_series<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateSeriesRequest>,
) -> Result<(StatusCode, Json<SeriesView>), AppError> {
    let series = state.catalog.create_series(&req.name).await?;
    Ok((StatusCode::CREATED, Json(series)))
}

async fn list_series<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<SeriesView>>, AppError> {
    Ok(Json(state.catalog.list_series().await?))
}

async fn get_series<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<SeriesView>, AppError> {
    Ok(Json(state.catalog.get_series(&id).await?))
}

async fn create_product<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductView>), AppError> {
    let product = state.catalog.create_product(req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Unauthenticated listing: same record set as the full listing with the
/// cost fields projected away
async fn list_products<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<PublicProductView>>, AppError> {
    let products = state.catalog.list_products().await?;
    Ok(Json(
        products.into_iter().map(PublicProductView::from).collect(),
    ))
}

async fn list_products_full<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<ProductView>>, AppError> {
    Ok(Json(state.catalog.list_products().await?))
}

async fn get_product<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>, AppError> {
    Ok(Json(state.catalog.get_product(&id).await?))
}

async fn list_products_by_series<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(series_id): Path<String>,
) -> Result<Json<Vec<ProductView>>, AppError> {
    Ok(Json(
        state.catalog.list_products_by_series(&series_id).await?,
    ))
}
