//! Router and request handling for the episode listing.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use log::info;
use this_life_scraper::{Archive, Episode};
use url::Url;

use crate::error::AppError;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub source: Url,
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/episodes", get(list_episodes))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Scrapes the archive page and returns its episodes.
///
/// The blocking client is created and dropped on tokio's blocking pool, so
/// every request gets its own independent fetch.
pub async fn list_episodes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Episode>>, AppError> {
    let source = state.source.clone();
    let episodes = tokio::task::spawn_blocking(move || Archive::new(source).list()).await??;
    Ok(Json(episodes))
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} {} {:?}",
        method,
        path,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, StatusCode};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ARCHIVE_HTML: &str = r#"
        <html><body>
        <article class="node">
            <header>
                <figure class="episode-image"><img src="/one.jpg" width="10" height="20"></figure>
                <div class="container">
                    <h2><a href="/1/one">One</a></h2>
                    <span class="date-display-single">January 2, 2006</span>
                </div>
            </header>
            <div class="content"><div class="field-item"><p>First.</p></div></div>
        </article>
        <article class="node">
            <header><div class="container">
                <h2><a href="/2/two">Two</a></h2>
                <span class="date-display-single">Jan. 9, 2006</span>
            </div></header>
        </article>
        </body></html>
    "#;

    async fn mock_archive(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/archive"))
            .respond_with(ResponseTemplate::new(status).set_body_string(ARCHIVE_HTML))
            .mount(&server)
            .await;
        server
    }

    fn app_for(server: &MockServer) -> Router {
        let source = Url::parse(&format!("{}/archive", server.uri())).unwrap();
        build_app(AppState { source })
    }

    async fn send_get(app: Router, uri: &str) -> Response {
        let request = axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_episodes_as_json() {
        let server = mock_archive(200).await;
        let response = send_get(app_for(&server), "/episodes").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let episodes = json.as_array().unwrap();
        assert_eq!(episodes.len(), 2);

        assert_eq!(episodes[0]["name"], "One");
        assert_eq!(episodes[0]["description"], "First.");
        assert_eq!(episodes[0]["date"], "2006-01-02T00:00:00Z");
        assert_eq!(
            episodes[0]["pageURL"],
            format!("{}/1/one", server.uri()).as_str()
        );
        assert_eq!(episodes[0]["image"]["width"], 10);
        assert!(episodes[0].get("audioURL").is_none());

        assert_eq!(episodes[1]["name"], "Two");
        assert_eq!(episodes[1]["date"], "2006-01-09T00:00:00Z");
        assert!(episodes[1].get("description").is_none());
        assert!(episodes[1].get("image").is_none());

        let decoded: Vec<Episode> = serde_json::from_slice(&body).unwrap();
        assert_eq!(decoded[1].page_url, format!("{}/2/two", server.uri()));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_upstream_not_found_is_server_error() {
        let server = mock_archive(404).await;
        let response = send_get(app_for(&server), "/episodes").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let message = String::from_utf8(body.to_vec()).unwrap();
        assert!(message.contains("404"), "{}", message);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unknown_route() {
        let server = mock_archive(200).await;
        let response = send_get(app_for(&server), "/").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
