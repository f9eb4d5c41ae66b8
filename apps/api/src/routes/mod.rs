pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Recommendations API
        .route(
            "/api/v1/recommendations/for-student/me",
            get(handlers::handle_student_recommendations),
        )
        .route(
            "/api/v1/recommendations/preview",
            post(handlers::handle_preview),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::EngineConfig;
    use crate::matching::test_support::{fixture_source, FACULTY_ID, STUDENT_ID};

    fn app() -> Router {
        build_router(AppState {
            engine: EngineConfig::default(),
            snapshots: Arc::new(fixture_source()),
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_student_recommendations_payload() {
        let uri = format!("/api/v1/recommendations/for-student/me?user_id={STUDENT_ID}");
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let opportunities = json["recommended_opportunities"].as_array().unwrap();
        assert_eq!(opportunities.len(), 2);
        assert_eq!(opportunities[0]["opportunity_id"], 2);
        assert_eq!(opportunities[1]["match_score"], 66.67);
        assert_eq!(opportunities[1]["missing_skills"][0]["name"], "Python");

        let paths = json["recommended_learning_paths"].as_array().unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0]["resource_id"], 100);
        assert_eq!(paths[0]["target_skill"]["name"], "Python");
        assert_eq!(paths[0]["kind"], "course");
        assert_eq!(paths[0]["difficulty"], "beginner");
        assert_eq!(paths[0]["estimated_minutes"], 60);
    }

    #[tokio::test]
    async fn test_faculty_is_forbidden() {
        let uri = format!("/api/v1/recommendations/for-student/me?user_id={FACULTY_ID}");
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["error"]["code"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_preview_reports_unresolved_names() {
        let request = Request::post("/api/v1/recommendations/preview")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"skills": ["sql", "Elm"]}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["unresolved_skills"], serde_json::json!(["Elm"]));
        assert_eq!(
            json["recommendations"]["recommended_opportunities"][0]["opportunity_id"],
            2
        );
    }

    #[tokio::test]
    async fn test_preview_empty_skills_is_bad_request() {
        let request = Request::post("/api/v1/recommendations/preview")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"skills": []}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
