//! Connector UI registration and HTTP server
//!
//! Registers the Skoda navigation section with the host web shell: one
//! top-level entry labeled "Skoda", routes under the `/skoda` prefix and
//! a template directory served alongside the API.

use crate::connector::Connector;
use axum::{
    Json, Router,
    extract::{Path as UrlPath, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Fixed navigation title of this connector
pub const NAV_TITLE: &str = "Skoda";

/// URL prefix every route of this connector lives under
pub const URL_PREFIX: &str = "/skoda";

#[derive(Clone)]
pub struct AppState {
    pub connector: Arc<Mutex<Connector>>,
}

/// One entry in the host shell's navigation bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub text: String,
    pub url: String,
}

/// Navigation items this connector contributes to the host shell
pub fn nav_items() -> Vec<NavItem> {
    vec![NavItem {
        text: NAV_TITLE.to_string(),
        url: URL_PREFIX.to_string(),
    }]
}

/// UI registration for the Skoda connector
pub struct ConnectorUi {
    state: AppState,
    templates_dir: PathBuf,
}

impl ConnectorUi {
    pub fn new(connector: Arc<Mutex<Connector>>, templates_dir: impl AsRef<Path>) -> Self {
        Self {
            state: AppState { connector },
            templates_dir: templates_dir.as_ref().to_path_buf(),
        }
    }

    pub fn title(&self) -> &'static str {
        NAV_TITLE
    }

    pub fn url_prefix(&self) -> &'static str {
        URL_PREFIX
    }

    pub fn nav_items(&self) -> Vec<NavItem> {
        nav_items()
    }

    /// Build the router for this connector, nested under [`URL_PREFIX`]
    pub fn router(&self) -> Router {
        let api = Router::new()
            .route("/api/health", get(health))
            .route("/api/nav", get(nav))
            .route("/api/vehicles", get(list_vehicles))
            .route("/api/vehicles/{vin}", get(get_vehicle))
            .nest_service("/templates", ServeDir::new(&self.templates_dir))
            .with_state(self.state.clone());

        Router::new()
            .nest(URL_PREFIX, api)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn nav() -> impl IntoResponse {
    Json(nav_items())
}

fn vehicle_summary(vin: &str, vehicle: &crate::vehicle::Vehicle) -> serde_json::Value {
    serde_json::json!({
        "vin": vin,
        "kind": vehicle.kind(),
        "manufacturer": vehicle.manufacturer(),
        "license_plate": vehicle.license_plate,
        "capabilities": vehicle
            .capabilities
            .iter()
            .map(|c| serde_json::json!({
                "id": c.id(),
                "enabled": c.enabled,
                "status": c.current_status().map(|s| s.code()),
            }))
            .collect::<Vec<_>>(),
        "charging_state": vehicle.charging.as_ref().map(|c| c.state),
        "odometer_km": vehicle.odometer.as_ref().map(|o| o.km),
    })
}

async fn list_vehicles(State(state): State<AppState>) -> impl IntoResponse {
    let connector = state.connector.lock().await;
    let vehicles: Vec<serde_json::Value> = connector
        .garage()
        .iter()
        .map(|(vin, vehicle)| vehicle_summary(vin, vehicle))
        .collect();
    Json(vehicles)
}

async fn get_vehicle(State(state): State<AppState>, UrlPath(vin): UrlPath<String>) -> Response {
    let connector = state.connector.lock().await;
    match connector.garage().get_vehicle(&vin) {
        Some(vehicle) => Json(vehicle_summary(&vin, vehicle)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": format!("unknown vin {vin}")})),
        )
            .into_response(),
    }
}

/// Bind and serve the connector UI
pub async fn serve(
    connector: Arc<Mutex<Connector>>,
    config: &crate::config::WebConfig,
) -> anyhow::Result<()> {
    let ui = ConnectorUi::new(connector, &config.templates_dir);
    let router = ui.router();

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .unwrap_or(([127, 0, 0, 1], config.port).into());
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;
    Ok(())
}
