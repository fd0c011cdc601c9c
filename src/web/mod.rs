//! Web API module for ValueCraft.
//!
//! This module provides the REST API for the ValueCraft builder, enabling a
//! web-based frontend to drive both application modes: `build` (author) and
//! `present` (viewer).
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/catalog` - List Value Assessment Drivers and input schemas
//! - `POST /api/selection` - Detect drivers in a serialized layout
//! - `GET /api/build/{project}` - Build session state
//! - `PUT /api/build/{project}/screens/{screen}` - Commit a layout edit
//! - `POST /api/build/{project}/screens/{screen}/undo` - Undo an edit
//! - `POST /api/build/{project}/screens/{screen}/redo` - Redo an undone edit
//! - `PUT /api/build/{project}/active` - Switch the active screen
//! - `PUT /api/build/{project}/theme` - Switch the theme
//! - `POST /api/build/{project}/save` - Persist a draft bundle
//! - `POST /api/build/{project}/publish` - Publish (gated on completeness)
//! - `GET /api/present/{project}` - Presentation view model
//! - `POST /api/present/{project}/calculate` - Evaluate typed inputs

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::{self, InputFieldConfig, VadId};
use crate::config::Config;
use crate::engine::{EvalResults, Evaluator, LocalEngine};
use crate::models::inputs::InputTable;
use crate::models::{Layout, Screen, StyleTokens, ThemeConfig, ThemeMode};
use crate::services::store::validate_project_id;
use crate::services::{BundleStore, JsonFileStore};
use crate::session::{BuildSession, PresentSession, PublishOutcome};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Bundle persistence backend
    store: Arc<dyn BundleStore + Send + Sync>,
    /// Live build sessions, keyed by project id. The mutex makes every
    /// commit snapshot past/future atomically with the value swap.
    sessions: Arc<Mutex<HashMap<String, BuildSession>>>,
}

impl AppState {
    /// Creates application state with the file-backed bundle store from the
    /// configured data directory.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = JsonFileStore::new(config.storage.data_dir.clone())?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Creates application state over an explicit store implementation.
    #[must_use]
    pub fn with_store(config: Config, store: Arc<dyn BundleStore + Send + Sync>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Runs a closure against the build session for a project, creating the
    /// session on first touch with the configured default theme.
    fn with_session<T>(&self, project_id: &str, f: impl FnOnce(&mut BuildSession) -> T) -> T {
        let mut sessions = self.sessions.lock().expect("session map lock poisoned");
        let session = sessions.entry(project_id.to_string()).or_insert_with(|| {
            let mut session = BuildSession::new(project_id);
            session.set_theme_mode(self.config.ui.default_theme);
            session
        });
        f(session)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Catalog listing response.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// All known drivers, in catalog declaration order.
    pub drivers: Vec<DriverInfo>,
}

/// One driver entry for API responses.
#[derive(Debug, Serialize)]
pub struct DriverInfo {
    /// Stable driver id.
    pub id: VadId,
    /// Human-readable display name (cosmetic, renameable).
    pub display_name: &'static str,
    /// Input fields the viewer fills in, ordered by field index.
    pub fields: Vec<InputFieldConfig>,
}

/// Selection detection request.
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    /// Serialized layout to scan; `null` means "no layout yet".
    pub layout: Option<String>,
}

/// Selection detection response.
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    /// Detected drivers, catalog order, no duplicates.
    pub selected: Vec<VadId>,
}

/// Per-screen state inside a build session response.
#[derive(Debug, Serialize)]
pub struct ScreenState {
    /// Current serialized layout, if the screen has been edited.
    pub layout: Layout,
    /// Whether the screen counts as built.
    pub built: bool,
    /// Whether undo is available.
    pub can_undo: bool,
    /// Whether redo is available.
    pub can_redo: bool,
}

/// Build session state response.
#[derive(Debug, Serialize)]
pub struct BuildStateResponse {
    /// Project being edited.
    pub project_id: String,
    /// Screen currently active in the builder.
    pub active_screen: Screen,
    /// Current theme selection.
    pub theme: ThemeConfig,
    /// Per-screen layout and history state.
    pub screens: BTreeMap<Screen, ScreenState>,
    /// Drivers detected on the Inputs screen.
    pub selected_vads: Vec<VadId>,
    /// Whether all three screens are built.
    pub can_publish: bool,
}

/// Layout edit commit request.
#[derive(Debug, Deserialize)]
pub struct CommitRequest {
    /// New serialized layout emitted by the editing surface.
    pub layout: String,
}

/// Undo/redo response.
#[derive(Debug, Serialize)]
pub struct HistoryStepResponse {
    /// Whether the step changed anything (`false` for an exhausted stack).
    pub applied: bool,
    /// Layout now current on the screen.
    pub layout: Layout,
    /// Whether further undo is available.
    pub can_undo: bool,
    /// Whether further redo is available.
    pub can_redo: bool,
}

/// Active-screen switch request.
#[derive(Debug, Deserialize)]
pub struct ActiveScreenRequest {
    /// Screen to activate.
    pub screen: Screen,
}

/// Theme switch request.
#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    /// Display mode to switch to.
    pub mode: ThemeMode,
}

/// Publish response.
#[derive(Debug, Serialize)]
pub struct PublishResponse {
    /// Project the bundle was published for.
    pub project_id: String,
    /// Route of the presentation view to open.
    pub present_url: String,
}

/// Presentation view model response.
#[derive(Debug, Serialize)]
pub struct PresentResponse {
    /// Project the bundle belongs to.
    pub project_id: String,
    /// Published theme.
    pub theme: ThemeConfig,
    /// Style tokens derived from the theme.
    pub style: StyleTokens,
    /// Published Home layout.
    pub home_layout: Layout,
    /// Published Inputs layout.
    pub inputs_layout: Layout,
    /// Published Results layout.
    pub results_layout: Layout,
    /// Drivers detected on the Inputs layout.
    pub selected_vads: Vec<VadId>,
    /// Input schema for the selected drivers, keyed by driver id.
    pub input_schema: BTreeMap<String, Vec<InputFieldConfig>>,
}

/// Calculation request: the viewer's typed input table.
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    /// Input values keyed by driver key and field index.
    pub inputs: InputTable,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn bad_request(e: anyhow::Error) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError::new(e.to_string())))
}

fn storage_error(e: anyhow::Error) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::with_details("Storage failure", e.to_string())),
    )
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/catalog - List all drivers and their input schemas.
async fn get_catalog() -> Json<CatalogResponse> {
    let drivers = VadId::ALL
        .into_iter()
        .map(|id| DriverInfo {
            id,
            display_name: id.display_name(),
            fields: catalog::input_fields(id),
        })
        .collect();

    Json(CatalogResponse { drivers })
}

/// POST /api/selection - Detect drivers in a serialized layout.
async fn detect_selection(Json(req): Json<SelectionRequest>) -> Json<SelectionResponse> {
    Json(SelectionResponse {
        selected: crate::selection::detect(req.layout.as_deref()),
    })
}

fn build_state(session: &BuildSession) -> BuildStateResponse {
    let screens = Screen::ALL
        .into_iter()
        .map(|screen| {
            (
                screen,
                ScreenState {
                    layout: session.layout(screen).clone(),
                    built: session.is_screen_built(screen),
                    can_undo: session.can_undo(screen),
                    can_redo: session.can_redo(screen),
                },
            )
        })
        .collect();

    BuildStateResponse {
        project_id: session.project_id().to_string(),
        active_screen: session.active_screen(),
        theme: session.theme().clone(),
        screens,
        selected_vads: session.selected_vads(),
        can_publish: session.can_publish(),
    }
}

/// GET /api/build/{project} - Build session state (created on first touch).
async fn get_build_state(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> ApiResult<Json<BuildStateResponse>> {
    validate_project_id(&project).map_err(bad_request)?;
    Ok(Json(state.with_session(&project, |s| build_state(s))))
}

/// PUT /api/build/{project}/screens/{screen} - Commit a layout edit.
async fn commit_layout(
    State(state): State<AppState>,
    Path((project, screen)): Path<(String, String)>,
    Json(req): Json<CommitRequest>,
) -> ApiResult<Json<BuildStateResponse>> {
    validate_project_id(&project).map_err(bad_request)?;
    let screen = Screen::parse(&screen).map_err(bad_request)?;

    Ok(Json(state.with_session(&project, |s| {
        s.apply_edit(screen, req.layout);
        build_state(s)
    })))
}

/// POST /api/build/{project}/screens/{screen}/undo - Undo the latest edit.
async fn undo_layout(
    State(state): State<AppState>,
    Path((project, screen)): Path<(String, String)>,
) -> ApiResult<Json<HistoryStepResponse>> {
    validate_project_id(&project).map_err(bad_request)?;
    let screen = Screen::parse(&screen).map_err(bad_request)?;

    Ok(Json(state.with_session(&project, |s| {
        let applied = s.undo(screen);
        HistoryStepResponse {
            applied,
            layout: s.layout(screen).clone(),
            can_undo: s.can_undo(screen),
            can_redo: s.can_redo(screen),
        }
    })))
}

/// POST /api/build/{project}/screens/{screen}/redo - Redo an undone edit.
async fn redo_layout(
    State(state): State<AppState>,
    Path((project, screen)): Path<(String, String)>,
) -> ApiResult<Json<HistoryStepResponse>> {
    validate_project_id(&project).map_err(bad_request)?;
    let screen = Screen::parse(&screen).map_err(bad_request)?;

    Ok(Json(state.with_session(&project, |s| {
        let applied = s.redo(screen);
        HistoryStepResponse {
            applied,
            layout: s.layout(screen).clone(),
            can_undo: s.can_undo(screen),
            can_redo: s.can_redo(screen),
        }
    })))
}

/// PUT /api/build/{project}/active - Switch the active builder screen.
async fn set_active_screen(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Json(req): Json<ActiveScreenRequest>,
) -> ApiResult<Json<BuildStateResponse>> {
    validate_project_id(&project).map_err(bad_request)?;
    Ok(Json(state.with_session(&project, |s| {
        s.set_active_screen(req.screen);
        build_state(s)
    })))
}

/// PUT /api/build/{project}/theme - Switch the builder theme.
async fn set_theme(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Json(req): Json<ThemeRequest>,
) -> ApiResult<Json<BuildStateResponse>> {
    validate_project_id(&project).map_err(bad_request)?;
    Ok(Json(state.with_session(&project, |s| {
        s.set_theme_mode(req.mode);
        build_state(s)
    })))
}

/// POST /api/build/{project}/save - Persist the current state as a draft.
async fn save_draft(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> ApiResult<StatusCode> {
    validate_project_id(&project).map_err(bad_request)?;

    state
        .with_session(&project, |s| s.save(state.store.as_ref()))
        .map_err(storage_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/build/{project}/publish - Publish when all screens are built.
async fn publish(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> ApiResult<Json<PublishResponse>> {
    validate_project_id(&project).map_err(bad_request)?;

    let outcome = state
        .with_session(&project, |s| s.publish(state.store.as_ref()))
        .map_err(storage_error)?;

    match outcome {
        PublishOutcome::Published => Ok(Json(PublishResponse {
            present_url: format!("/present?projectId={project}"),
            project_id: project,
        })),
        PublishOutcome::Incomplete => Err((
            StatusCode::CONFLICT,
            Json(ApiError::new(
                "Complete all 3 screens (Home, Inputs, Results) to publish",
            )),
        )),
    }
}

/// GET /api/present/{project} - Presentation view model for a published bundle.
async fn get_presentation(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> ApiResult<Json<PresentResponse>> {
    validate_project_id(&project).map_err(bad_request)?;

    let session = PresentSession::open(state.store.as_ref(), &project).map_err(storage_error)?;
    let presentation = match session {
        PresentSession::Ready(p) => p,
        PresentSession::NotFound => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ApiError::new(format!(
                    "No build configuration found for project '{project}'. Publish from the Build app."
                ))),
            ));
        }
    };

    let input_schema = presentation
        .selected_vads()
        .iter()
        .map(|id| (id.key().to_string(), catalog::input_fields(*id)))
        .collect();
    let bundle = presentation.bundle();

    Ok(Json(PresentResponse {
        project_id: bundle.project_id.clone(),
        style: bundle.theme.style_tokens(),
        theme: bundle.theme.clone(),
        home_layout: bundle.home_layout.clone(),
        inputs_layout: bundle.inputs_layout.clone(),
        results_layout: bundle.results_layout.clone(),
        selected_vads: presentation.selected_vads().to_vec(),
        input_schema,
    }))
}

/// POST /api/present/{project}/calculate - Evaluate the viewer's inputs.
async fn calculate(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Json(req): Json<CalculateRequest>,
) -> ApiResult<Json<EvalResults>> {
    validate_project_id(&project).map_err(bad_request)?;

    // Only published projects can calculate; the math itself is pure.
    match PresentSession::open(state.store.as_ref(), &project).map_err(storage_error)? {
        PresentSession::Ready(_) => Ok(Json(LocalEngine.evaluate(&req.inputs))),
        PresentSession::NotFound => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new(format!(
                "No build configuration found for project '{project}'"
            ))),
        )),
    }
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for development.
    // The server is designed to run locally on the author's machine
    // alongside the frontend; restrict origins before deploying elsewhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Catalog and selection
        .route("/api/catalog", get(get_catalog))
        .route("/api/selection", post(detect_selection))
        // Build mode
        .route("/api/build/{project}", get(get_build_state))
        .route("/api/build/{project}/screens/{screen}", put(commit_layout))
        .route("/api/build/{project}/screens/{screen}/undo", post(undo_layout))
        .route("/api/build/{project}/screens/{screen}/redo", post(redo_layout))
        .route("/api/build/{project}/active", put(set_active_screen))
        .route("/api/build/{project}/theme", put(set_theme))
        .route("/api/build/{project}/save", post(save_draft))
        .route("/api/build/{project}/publish", post(publish))
        // Present mode
        .route("/api/present/{project}", get(get_presentation))
        .route("/api/present/{project}/calculate", post(calculate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    let app = create_router(state);

    info!("Starting ValueCraft web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
