use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::core::{
    AUM_LEVELS, ChartPoint, ComparisonRow, FieldGroup, ParameterField, ParameterSet,
    ParameterStore, coerce_numeric, compute_comparison_table,
};
use crate::error::PartnerModelError;

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<ParameterStore>>,
}

impl AppState {
    pub fn new(store: ParameterStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

/// A form value as the browser sends it: a JSON number, raw text, or nothing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum FieldInput {
    Number(f64),
    Text(String),
}

impl FieldInput {
    fn coerce(input: Option<&FieldInput>) -> f64 {
        match input {
            Some(FieldInput::Number(v)) if v.is_finite() => *v,
            Some(FieldInput::Number(_)) => 0.0,
            Some(FieldInput::Text(raw)) => coerce_numeric(raw),
            None => 0.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpdatePayload {
    field: String,
    #[serde(default)]
    value: Option<FieldInput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonResponse {
    parameters: ParameterSet,
    aum_levels: Vec<f64>,
    rows: Vec<ComparisonRow>,
    chart: Vec<ChartPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldInfo {
    key: &'static str,
    label: &'static str,
    group: FieldGroup,
    default_value: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run_http_server(port: u16, store: ParameterStore) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(AppState::new(store));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "partner model dashboard listening");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/fields", get(fields_handler))
        .route(
            "/api/parameters",
            get(parameters_get_handler).post(parameters_update_handler),
        )
        .route("/api/parameters/reset", post(parameters_reset_handler))
        .route(
            "/api/compare",
            get(compare_get_handler).post(compare_post_handler),
        )
        .fallback(not_found_handler)
        .with_state(state)
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn fields_handler() -> Response {
    json_response(StatusCode::OK, field_catalogue())
}

async fn parameters_get_handler(State(state): State<AppState>) -> Response {
    let store = state.store.lock().await;
    json_response(StatusCode::OK, build_comparison_response(&store))
}

async fn parameters_update_handler(
    State(state): State<AppState>,
    Json(payload): Json<UpdatePayload>,
) -> Response {
    let field = match payload.field.parse::<ParameterField>() {
        Ok(field) => field,
        Err(err) => {
            warn!(field = %payload.field, "rejected parameter update");
            return error_response(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };

    let value = FieldInput::coerce(payload.value.as_ref());

    // The lock spans update and recompute so the table never lags the parameters.
    let mut store = state.store.lock().await;
    store.set(field, value);
    json_response(StatusCode::OK, build_comparison_response(&store))
}

async fn parameters_reset_handler(State(state): State<AppState>) -> Response {
    let mut store = state.store.lock().await;
    store.reset();
    info!("parameters reset");
    json_response(StatusCode::OK, build_comparison_response(&store))
}

async fn compare_get_handler(Query(query): Query<BTreeMap<String, String>>) -> Response {
    let overrides = query
        .into_iter()
        .map(|(key, raw)| (key, FieldInput::Text(raw)))
        .collect();
    compare_handler_impl(overrides)
}

async fn compare_post_handler(Json(payload): Json<BTreeMap<String, Option<FieldInput>>>) -> Response {
    let overrides = payload
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or(FieldInput::Number(0.0))))
        .collect();
    compare_handler_impl(overrides)
}

fn compare_handler_impl(overrides: BTreeMap<String, FieldInput>) -> Response {
    match store_from_overrides(overrides) {
        Ok(store) => json_response(StatusCode::OK, build_comparison_response(&store)),
        Err(err) => error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    }
}

fn store_from_overrides(
    overrides: BTreeMap<String, FieldInput>,
) -> Result<ParameterStore, PartnerModelError> {
    let mut store = ParameterStore::default();
    for (key, input) in overrides {
        let field = key.parse::<ParameterField>()?;
        store.set(field, FieldInput::coerce(Some(&input)));
    }
    Ok(store)
}

fn field_catalogue() -> Vec<FieldInfo> {
    let defaults = ParameterSet::default();
    ParameterField::ALL
        .into_iter()
        .map(|field| FieldInfo {
            key: field.as_str(),
            label: field.label(),
            group: field.group(),
            default_value: defaults.get(field),
        })
        .collect()
}

fn build_comparison_response(store: &ParameterStore) -> ComparisonResponse {
    let parameters = *store.parameters();
    let rows = compute_comparison_table(&parameters, &AUM_LEVELS);
    let chart = rows.iter().map(ComparisonRow::chart_point).collect();
    ComparisonResponse {
        parameters,
        aum_levels: AUM_LEVELS.to_vec(),
        rows,
        chart,
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
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
