use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{debug, error};

use crate::assistant::{LanguageModel, ModelUpdate};
use crate::decor::{self, Decoration, SPIN_RATE};
use crate::dispatch::{dispatch, dispatch_seeded};
use crate::error::{RenderError, StudioError};
use crate::geometry::Geometry;
use crate::model::{Controls, ShapeModel};
use crate::params::{MAX_SAMPLES, ParamValue, ParameterMap};
use crate::render;
use crate::rng::Rng;
use crate::studio::{ChatMessage, Studio};

pub struct AppState<M> {
    pub studio: Studio<M>,
    pub preview_size: u32,
    pub frontend: PathBuf,
}

pub fn app<M: LanguageModel + 'static>(state: Arc<AppState<M>>) -> Router {
    let frontend = ServeDir::new(&state.frontend);
    Router::new()
        .route("/api/health", get(health))
        .route("/api/models", get(models::<M>))
        .route("/api/select", post(select::<M>))
        .route("/api/params", post(set_param::<M>))
        .route("/api/scene", get(scene::<M>))
        .route("/api/shape", post(shape))
        .route("/api/chat", get(history::<M>).post(chat::<M>))
        .route("/api/preview", get(preview::<M>))
        .fallback_service(frontend)
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<StudioError> for ApiError {
    fn from(err: StudioError) -> Self {
        let status = match err {
            StudioError::Busy => StatusCode::CONFLICT,
            StudioError::EmptyPrompt => StatusCode::BAD_REQUEST,
            StudioError::UnknownModel(_) => StatusCode::NOT_FOUND,
        };
        Self::new(status, err.to_string())
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Size { .. } => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            RenderError::Encode(_) => {
                error!(error = %err, "preview encoding failed");
                Self::internal(err.to_string())
            }
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        error!(error = %err, "generator task failed");
        Self::internal("generation failed")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

fn enforce_sample_limit(params: &ParameterMap) -> Result<(), ApiError> {
    match params.oversized_sample() {
        Some((key, n)) => Err(ApiError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("{key} = {n} exceeds the limit of {MAX_SAMPLES}"),
        )),
        None => Ok(()),
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelsResponse {
    pub models: Vec<ShapeModel>,
    pub selected: String,
    pub controls: Controls,
}

async fn models<M: LanguageModel>(State(state): State<Arc<AppState<M>>>) -> Json<ModelsResponse> {
    let library = state.studio.library().await;
    let selected = state.studio.selected().await;
    Json(ModelsResponse {
        models: library.iter().map(|m| ShapeModel::clone(m)).collect(),
        selected: selected.name.clone(),
        controls: selected.controls(),
    })
}

#[derive(Deserialize)]
struct SelectRequest {
    name: String,
}

async fn select<M: LanguageModel>(
    State(state): State<Arc<AppState<M>>>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<ShapeModel>, ApiError> {
    let model = state.studio.select(&req.name).await?;
    Ok(Json(ShapeModel::clone(&model)))
}

#[derive(Deserialize)]
struct ParamRequest {
    key: String,
    value: ParamValue,
}

async fn set_param<M: LanguageModel>(
    State(state): State<Arc<AppState<M>>>,
    Json(req): Json<ParamRequest>,
) -> Result<Json<ShapeModel>, ApiError> {
    let probe = ParameterMap::new().with(&req.key, req.value.clone());
    enforce_sample_limit(&probe)?;
    let model = state.studio.set_param(&req.key, req.value).await;
    Ok(Json(ShapeModel::clone(&model)))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneResponse {
    pub model: ShapeModel,
    pub geometry: Geometry,
    pub decorations: Vec<Decoration>,
    pub spin_rate: f32,
}

async fn scene<M: LanguageModel>(
    State(state): State<Arc<AppState<M>>>,
) -> Result<Json<SceneResponse>, ApiError> {
    let model = state.studio.selected().await;
    let response = tokio::task::spawn_blocking(move || {
        let geometry = model.geometry(&mut Rng::from_entropy());
        let decorations = decor::decorations(&model.shape_kind(), &model.params);
        SceneResponse {
            model: ShapeModel::clone(&model),
            geometry,
            decorations,
            spin_rate: SPIN_RATE,
        }
    })
    .await?;
    Ok(Json(response))
}

#[derive(Deserialize)]
struct ShapeRequest {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    params: ParameterMap,
    seed: Option<u64>,
}

async fn shape(Json(req): Json<ShapeRequest>) -> Result<Json<Geometry>, ApiError> {
    enforce_sample_limit(&req.params)?;
    let geometry = tokio::task::spawn_blocking(move || match req.seed {
        Some(seed) => dispatch_seeded(&req.kind, &req.params, seed),
        None => dispatch(&req.kind, &req.params),
    })
    .await?;
    debug!(parts = geometry.parts.len(), "shape generated");
    Ok(Json(geometry))
}

#[derive(Deserialize)]
struct ChatRequest {
    prompt: String,
}

async fn chat<M: LanguageModel>(
    State(state): State<Arc<AppState<M>>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ModelUpdate>, ApiError> {
    let update = state.studio.submit(&req.prompt).await?;
    Ok(Json(update))
}

async fn history<M: LanguageModel>(
    State(state): State<Arc<AppState<M>>>,
) -> Json<Vec<ChatMessage>> {
    Json(state.studio.history().await)
}

#[derive(Deserialize)]
struct PreviewQuery {
    size: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub name: String,
    pub size: u32,
    pub data_url: String,
}

async fn preview<M: LanguageModel>(
    State(state): State<Arc<AppState<M>>>,
    Query(query): Query<PreviewQuery>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let size = query.size.unwrap_or(state.preview_size);
    let model = state.studio.selected().await;
    let response = tokio::task::spawn_blocking(move || -> Result<PreviewResponse, RenderError> {
        let geometry = model.geometry(&mut Rng::from_entropy());
        Ok(PreviewResponse {
            name: model.name.clone(),
            size,
            data_url: render::preview_data_url(&geometry, size)?,
        })
    })
    .await??;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use axum::http::header::CONTENT_TYPE;
    use http_body_util::BodyExt;
    use serde::de::DeserializeOwned;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::assistant::Assistant;
    use crate::assistant::testing::{Script, ScriptedModel};
    use crate::catalog::seed_catalog;

    fn state(script: ScriptedModel) -> Arc<AppState<ScriptedModel>> {
        Arc::new(AppState {
            studio: Studio::new(Assistant::new(script), seed_catalog()),
            preview_size: 32,
            frontend: PathBuf::from("does-not-exist"),
        })
    }

    fn router() -> Router {
        app(state(ScriptedModel::new(Script::Fail)))
    }

    async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };
        router.oneshot(request.body(body).unwrap()).await.unwrap()
    }

    async fn read<T: DeserializeOwned>(response: Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = send(router(), Method::GET, "/api/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = read(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn models_list_catalog_and_sliders() {
        let response = send(router(), Method::GET, "/api/models", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: ModelsResponse = read(response).await;
        assert_eq!(body.models.len(), 10);
        assert_eq!(body.selected, "Love Heart");
        let keys: Vec<_> = body.controls.sliders.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, ["particles", "scale"]);
    }

    #[tokio::test]
    async fn select_then_scene() {
        let router = router();
        let response = send(
            router.clone(),
            Method::POST,
            "/api/select",
            Some(json!({ "name": "Saturn Ring" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(router, Method::GET, "/api/scene", None).await;
        let body: SceneResponse = read(response).await;
        assert_eq!(body.model.kind, "saturn");
        assert_eq!(body.geometry.parts.len(), 2);
        assert_eq!(body.decorations.len(), 1);
        assert_eq!(body.spin_rate, SPIN_RATE);
    }

    #[tokio::test]
    async fn unknown_selection_is_404() {
        let response = send(
            router(),
            Method::POST,
            "/api/select",
            Some(json!({ "name": "Nothing" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = read(response).await;
        assert!(body["error"].as_str().unwrap().contains("Nothing"));
    }

    #[tokio::test]
    async fn param_edit_updates_selection() {
        let router = router();
        let response = send(
            router.clone(),
            Method::POST,
            "/api/params",
            Some(json!({ "key": "scale", "value": 2.5 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let model: ShapeModel = read(response).await;
        assert_eq!(model.params.number("scale", 0.0), 2.5);

        let response = send(
            router,
            Method::POST,
            "/api/params",
            Some(json!({ "key": "particles", "value": 1e9 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn shape_endpoint_is_stateless_and_seedable() {
        let request = json!({ "type": "heart", "params": { "particles": 10 }, "seed": 5 });
        let a = send(router(), Method::POST, "/api/shape", Some(request.clone())).await;
        let b = send(router(), Method::POST, "/api/shape", Some(request)).await;
        let a: Geometry = read(a).await;
        let b: Geometry = read(b).await;
        assert_eq!(a, b);
        assert_eq!(a.vertex_count(), 10);
    }

    #[tokio::test]
    async fn oversized_counts_are_rejected() {
        let request = json!({ "type": "cubeCloud", "params": { "count": 200001 } });
        let response = send(router(), Method::POST, "/api/shape", Some(request)).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let request = json!({ "type": "star", "params": { "points": 1e19 } });
        let response = send(router(), Method::POST, "/api/shape", Some(request)).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn chat_failure_returns_fallback_and_logs_history() {
        let router = router();
        let response = send(
            router.clone(),
            Method::POST,
            "/api/chat",
            Some(json!({ "prompt": "make it blue" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let update: Value = read(response).await;
        assert_eq!(update["model"]["name"], "Love Heart");
        assert_eq!(update["message"], crate::assistant::FALLBACK_MESSAGE);

        let history: Vec<ChatMessage> = read(send(router, Method::GET, "/api/chat", None).await).await;
        assert_eq!(history.len(), 3);
    }

    #[tokio::test]
    async fn oversized_chat_reply_keeps_the_selection() {
        let params = ParameterMap::new().with("particles", 1e12);
        let huge = ShapeModel::new("Huge", "heart", params, "");
        let router = app(state(ScriptedModel::replying(&huge, "Enormous")));
        let response = send(
            router.clone(),
            Method::POST,
            "/api/chat",
            Some(json!({ "prompt": "a huge heart" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let update: Value = read(response).await;
        assert_eq!(update["model"]["name"], "Love Heart");

        let response = send(router, Method::GET, "/api/scene", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let scene: Value = read(response).await;
        assert_eq!(scene["model"]["name"], "Love Heart");
    }

    #[tokio::test]
    async fn empty_prompt_is_400() {
        let response = send(router(), Method::POST, "/api/chat", Some(json!({ "prompt": "" }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn second_chat_while_pending_is_409() {
        let state = state(ScriptedModel::new(Script::Hang));
        let router = app(state.clone());
        let pending = tokio::spawn(send(
            router.clone(),
            Method::POST,
            "/api/chat",
            Some(json!({ "prompt": "first" })),
        ));
        while !state.studio.is_busy() {
            tokio::task::yield_now().await;
        }
        let response = send(router, Method::POST, "/api/chat", Some(json!({ "prompt": "second" }))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        pending.abort();
    }

    #[tokio::test]
    async fn preview_is_a_png_data_url() {
        let response = send(router(), Method::GET, "/api/preview?size=16", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: PreviewResponse = read(response).await;
        assert_eq!(body.size, 16);
        assert!(body.data_url.starts_with("data:image/png;base64,"));

        let response = send(router(), Method::GET, "/api/preview?size=0", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
