use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/set_model", post(handlers::set_model))
        .route("/translate", post(handlers::translate))
        .route("/api/health", get(handlers::health))
        .nest_service(
            "/static",
            ServeDir::new(&state.config.system_config.static_dir),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::state::ActiveModel;
    use crate::translate::{ModelFamily, TargetLang, TranslateError, Translator};

    struct FakeTranslator {
        family: ModelFamily,
        fail_with: Option<String>,
    }

    impl Translator for FakeTranslator {
        fn family(&self) -> ModelFamily {
            self.family
        }

        fn translate(&self, text: &str, target: TargetLang) -> Result<String, TranslateError> {
            if let Some(message) = &self.fail_with {
                return Err(TranslateError::Operational(message.clone()));
            }
            Ok(format!("[{}] {}", target.tag(), text))
        }
    }

    fn app(state: AppState) -> Router {
        Router::new().merge(create_routes(&state)).with_state(state)
    }

    async fn load_fake(state: &AppState, family: ModelFamily, fail_with: Option<String>) {
        *state.session.write().await = Some(ActiveModel {
            family,
            translator: Arc::new(Mutex::new(FakeTranslator { family, fail_with })),
        });
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn set_model_rejects_unknown_family() {
        let state = AppState::new(Config::default());
        let (status, body) = post_json(
            app(state),
            "/set_model",
            r#"{"model_type": "marian", "target_lang": "fr_XX"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid model type");
    }

    #[tokio::test]
    async fn rejected_set_model_keeps_previous_model() {
        let state = AppState::new(Config::default());
        load_fake(&state, ModelFamily::M2M100, None).await;

        let (status, _) = post_json(
            app(state.clone()),
            "/set_model",
            r#"{"model_type": "bogus"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let session = state.session.read().await;
        assert_eq!(session.as_ref().unwrap().family, ModelFamily::M2M100);
    }

    #[tokio::test]
    async fn translate_without_model_echoes_input() {
        let state = AppState::new(Config::default());
        let (status, body) = post_json(
            app(state),
            "/translate",
            r#"{"text": "Hello world", "target_lang": "de_DE"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["translation"], "Hello world");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn translate_uses_the_loaded_model() {
        let state = AppState::new(Config::default());
        load_fake(&state, ModelFamily::MBart, None).await;

        let (status, body) = post_json(
            app(state),
            "/translate",
            r#"{"text": "Hello", "target_lang": "de_DE"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["translation"], "[de_DE] Hello");
    }

    #[tokio::test]
    async fn translate_defaults_to_french() {
        let state = AppState::new(Config::default());
        load_fake(&state, ModelFamily::MBart, None).await;

        let (_, body) = post_json(app(state), "/translate", r#"{"text": "Hi"}"#).await;
        assert_eq!(body["translation"], "[fr_XX] Hi");
    }

    #[tokio::test]
    async fn generation_failure_echoes_input_with_error() {
        let state = AppState::new(Config::default());
        load_fake(&state, ModelFamily::Nllb, Some("generation blew up".to_string())).await;

        let (status, body) = post_json(
            app(state),
            "/translate",
            r#"{"text": "Hello", "target_lang": "ja_XX"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["translation"], "Hello");
        assert_eq!(body["error"], "generation blew up");
    }

    #[tokio::test]
    async fn unknown_target_tag_echoes_input_with_error() {
        let state = AppState::new(Config::default());
        load_fake(&state, ModelFamily::MBart, None).await;

        let (status, body) = post_json(
            app(state),
            "/translate",
            r#"{"text": "Hello", "target_lang": "xx_YY"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["translation"], "Hello");
        assert!(body["error"].as_str().unwrap().contains("xx_YY"));
    }

    #[tokio::test]
    async fn health_reports_resident_model() {
        let state = AppState::new(Config::default());

        let response = app(state.clone())
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["model_loaded"], false);

        load_fake(&state, ModelFamily::Helsinki, None).await;
        let response = app(state)
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["model_loaded"], true);
        assert_eq!(body["model_type"], "helsinki");
    }
}
