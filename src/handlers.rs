use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::task;
use tracing::{info, warn};

use crate::state::{ActiveModel, AppState};
use crate::translate::{ModelFamily, TargetLang, TranslateError, TranslatorFactory};

#[derive(Debug, Deserialize)]
pub struct SetModelRequest {
    #[serde(default = "default_model_type")]
    pub model_type: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

fn default_model_type() -> String {
    "helsinki".to_string()
}

fn default_target_lang() -> String {
    "fr_XX".to_string()
}

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let session = state.session.read().await;
    Json(json!({
        "status": "ok",
        "model_loaded": session.is_some(),
        "model_type": session.as_ref().map(|active| active.family.id()),
    }))
}

/// `POST /set_model`: resolve and load the requested family, then swap it
/// into the session slot. The new engine is built outside the lock; on any
/// failure the previously loaded model stays active.
pub async fn set_model(
    State(state): State<AppState>,
    Json(req): Json<SetModelRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let family = ModelFamily::from_id(&req.model_type).ok_or_else(|| {
        warn!(model_type = %req.model_type, "rejected unknown model family");
        error_response(&TranslateError::InvalidSelection(req.model_type.clone()))
    })?;

    let target_tag = req.target_lang.clone();
    let force_cpu = state.config.system_config.force_cpu;
    let translator = task::spawn_blocking(move || {
        TranslatorFactory::create(family, &target_tag, force_cpu)
    })
    .await
    .map_err(|e| {
        error_response(&TranslateError::Operational(format!(
            "model load task failed: {e}"
        )))
    })?
    .map_err(|e| {
        warn!(family = %family, error = %e, "model load failed");
        error_response(&e)
    })?;

    let mut session = state.session.write().await;
    *session = Some(ActiveModel { family, translator });
    info!(family = %family, "model is now active");

    Ok(Json(json!({"status": "Model loaded successfully"})))
}

/// Invalid selections are the client's fault; everything else the model
/// layer throws is reported as a server-side message string.
fn error_response(err: &TranslateError) -> (StatusCode, Json<Value>) {
    match err {
        TranslateError::InvalidSelection(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid model type"})),
        ),
        TranslateError::Operational(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": message})),
        ),
    }
}

/// `POST /translate`: run one text through the resident model. Degrades
/// instead of failing: with no model loaded the input is echoed back, and
/// any generation failure is reported in-band next to the echoed input.
pub async fn translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> Json<Value> {
    let active = state.session.read().await.clone();
    let Some(active) = active else {
        return Json(json!({"translation": req.text}));
    };

    let target = match TargetLang::from_tag(&req.target_lang) {
        Ok(target) => target,
        Err(e) => {
            return Json(json!({"translation": req.text, "error": e.to_string()}));
        }
    };

    let text = req.text.clone();
    let translator = active.translator.clone();
    let result = task::spawn_blocking(move || {
        let engine = translator.lock().map_err(|_| {
            TranslateError::Operational("translation engine lock poisoned".to_string())
        })?;
        engine.translate(&text, target)
    })
    .await;

    match result {
        Ok(Ok(translation)) => Json(json!({"translation": translation})),
        Ok(Err(e)) => {
            warn!(family = %active.family, error = %e, "translation failed");
            Json(json!({"translation": req.text, "error": e.to_string()}))
        }
        Err(e) => {
            warn!(error = %e, "translation task panicked");
            Json(json!({"translation": req.text, "error": format!("translation task failed: {e}")}))
        }
    }
}
