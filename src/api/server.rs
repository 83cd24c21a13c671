use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{MethodRouter, get},
};
use serde::{Serialize, de::DeserializeOwned};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use super::calculators::{
    BorrowingArgs, Calculator, DepletionArgs, IncomeArgs, InvestmentArgs, InvestmentMode,
    InvestmentRequest, RetirementArgs, RoiArgs, StrategyArgs, run_calculator,
};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "finmetic HTTP API listening");
    info!("local access: http://127.0.0.1:{port}/health");

    axum::serve(listener, router()).await
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/future-value",
            investment_route(InvestmentMode::FutureValue),
        )
        .route(
            "/api/required-contribution",
            investment_route(InvestmentMode::RequiredContribution),
        )
        .route(
            "/api/required-principal",
            investment_route(InvestmentMode::RequiredPrincipal),
        )
        .route(
            "/api/required-rate",
            investment_route(InvestmentMode::RequiredRate),
        )
        .route(
            "/api/required-years",
            investment_route(InvestmentMode::RequiredYears),
        )
        .route("/api/retirement", calculator_route::<RetirementArgs>())
        .route("/api/income", calculator_route::<IncomeArgs>())
        .route("/api/depletion", calculator_route::<DepletionArgs>())
        .route("/api/borrowing", calculator_route::<BorrowingArgs>())
        .route("/api/strategies", calculator_route::<StrategyArgs>())
        .route("/api/roi", calculator_route::<RoiArgs>())
        .fallback(not_found_handler)
}

// The mode comes from the path, the quantities from the query string or JSON body.
fn investment_route(mode: InvestmentMode) -> MethodRouter {
    get(
        move |uri: Uri, query: Result<Query<InvestmentArgs>, QueryRejection>| async move {
            match query {
                Ok(Query(args)) => respond(&InvestmentRequest { mode, args }),
                Err(rejection) => reject_payload(&uri, &rejection.body_text()),
            }
        },
    )
    .post(
        move |uri: Uri, body: Result<Json<InvestmentArgs>, JsonRejection>| async move {
            match body {
                Ok(Json(args)) => respond(&InvestmentRequest { mode, args }),
                Err(rejection) => reject_payload(&uri, &rejection.body_text()),
            }
        },
    )
}

fn calculator_route<C>() -> MethodRouter
where
    C: Calculator + DeserializeOwned + Send + 'static,
{
    get(calculator_get_handler::<C>).post(calculator_post_handler::<C>)
}

async fn calculator_get_handler<C>(
    uri: Uri,
    query: Result<Query<C>, QueryRejection>,
) -> Response
where
    C: Calculator + DeserializeOwned + Send + 'static,
{
    match query {
        Ok(Query(request)) => respond(&request),
        Err(rejection) => reject_payload(&uri, &rejection.body_text()),
    }
}

async fn calculator_post_handler<C>(uri: Uri, body: Result<Json<C>, JsonRejection>) -> Response
where
    C: Calculator + DeserializeOwned + Send + 'static,
{
    match body {
        Ok(Json(request)) => respond(&request),
        Err(rejection) => reject_payload(&uri, &rejection.body_text()),
    }
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn respond<C: Calculator>(request: &C) -> Response {
    match run_calculator(request) {
        Ok(output) => {
            debug!(calculator = request.name(), "calculation served");
            json_response(StatusCode::OK, output)
        }
        Err(err) => {
            warn!(calculator = request.name(), error = %err, "rejected request");
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
    }
}

// Undecodable query strings and bodies get the same 400 envelope as failed validation.
fn reject_payload(uri: &Uri, reason: &str) -> Response {
    warn!(path = uri.path(), error = reason, "rejected malformed request");
    error_response(StatusCode::BAD_REQUEST, reason)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
