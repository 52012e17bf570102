//! HTTP front end for the catalog
//!
//! One [`App`] sits behind a mutex and every handler works on it, so
//! favorites and the comparison stack behave exactly as they do on the
//! command line, persisted to the same state file.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use axum::extract::{Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task;

use fontshelf_core::app::App;
use fontshelf_core::collections::Toggle;
use fontshelf_core::details::FontDetails;
use fontshelf_core::font::Font;
use fontshelf_core::i18n::{Locale, Translator};
use fontshelf_core::notice::Notice;
use fontshelf_core::query::{parse_name_patterns, parse_value_list, FilterState};
use fontshelf_core::search::filter_fonts;
use fontshelf_core::stylesheet::{StylesheetLink, StylesheetLoader};

pub type SharedApp = Arc<Mutex<App>>;

type HttpError = (StatusCode, String);

/// Filter request; every field is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub search: String,
    pub categories: Vec<String>,
    pub languages: Vec<String>,
    pub sources: Vec<String>,
    pub licenses: Vec<String>,
    /// Regexes matched against the font name
    pub names: Vec<String>,
    /// Admit every source outside the main group
    pub other_sources: bool,
    pub variable: bool,
    /// Cap on returned fonts; `total` still counts every match
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total: usize,
    pub fonts: Vec<Font>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub outcome: Toggle,
    pub notice: Notice,
    pub ids: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct StylesheetRequest {
    pub ids: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LangQuery {
    pub lang: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuickQuery {
    pub q: String,
}

/// Bind and serve until the process is stopped.
pub async fn serve(bind: &str, app: App) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;
    info!("serving {} fonts on {bind}", app.catalog().len());

    axum::serve(listener, router(app))
        .await
        .context("serving HTTP")?;
    Ok(())
}

pub fn router(app: App) -> Router {
    let state: SharedApp = Arc::new(Mutex::new(app));
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", post(search_handler))
        .route("/quick", get(quick_handler))
        .route("/fonts/{id}", get(font_handler))
        .route("/favorites", get(favorites_handler))
        .route("/favorites/{id}", post(toggle_favorite_handler))
        .route("/compare", get(compare_handler).delete(clear_compare_handler))
        .route("/compare/{id}", post(toggle_compare_handler))
        .route("/workbench", get(workbench_handler))
        .route("/stylesheets", post(stylesheets_handler))
        .route("/i18n/{key}", get(translate_handler))
        .with_state(state)
}

fn lock(app: &SharedApp) -> Result<MutexGuard<'_, App>, HttpError> {
    app.lock().map_err(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "application state poisoned".to_string(),
        )
    })
}

async fn search_handler(
    State(app): State<SharedApp>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, HttpError> {
    if matches!(req.limit, Some(0)) {
        return Err((
            StatusCode::BAD_REQUEST,
            "limit must be at least 1 when provided".to_string(),
        ));
    }

    let names = parse_name_patterns(&req.names).map_err(to_bad_request)?;
    let mut filter = FilterState::new()
        .with_search(req.search.clone())
        .with_categories(parse_value_list(&req.categories))
        .with_languages(parse_value_list(&req.languages))
        .with_sources(parse_value_list(&req.sources))
        .with_licenses(parse_value_list(&req.licenses))
        .with_name_patterns(names)
        .require_variable(req.variable);
    let limit = req.limit;
    let other_sources = req.other_sources;

    let response = task::spawn_blocking(move || -> Result<SearchResponse, HttpError> {
        let app = lock(&app)?;
        if other_sources {
            filter.toggle_other_sources(&app.catalog().source_groups());
        }
        let matches = filter_fonts(app.catalog().fonts(), &filter);
        let total = matches.len();
        let fonts = matches
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(SearchResponse { total, fonts })
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("task join error: {e}"),
        )
    })??;

    Ok(Json(response))
}

async fn quick_handler(
    State(app): State<SharedApp>,
    Query(query): Query<QuickQuery>,
) -> Result<Json<Vec<Font>>, HttpError> {
    let app = lock(&app)?;
    let fonts = app.quick_find(&query.q).into_iter().cloned().collect();
    Ok(Json(fonts))
}

fn translator_for(app: &App, lang: &Option<String>) -> Result<Translator, HttpError> {
    match lang {
        Some(code) => {
            let locale: Locale = code.parse().map_err(to_bad_request)?;
            Ok(Translator::new(locale))
        }
        None => Ok(app.translator()),
    }
}

async fn font_handler(
    State(app): State<SharedApp>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Value>, HttpError> {
    let app = lock(&app)?;
    let t = translator_for(&app, &query.lang)?;
    let details = FontDetails::lookup(app.catalog(), &id, &t)
        .ok_or_else(|| not_found(&t, &id))?;
    let value = serde_json::to_value(&details).map_err(to_internal)?;
    Ok(Json(value))
}

fn not_found(t: &Translator, id: &str) -> HttpError {
    (
        StatusCode::NOT_FOUND,
        format!("{}: {id}", t.t("details.notFound")),
    )
}

async fn favorites_handler(State(app): State<SharedApp>) -> Result<Json<Vec<Font>>, HttpError> {
    let app = lock(&app)?;
    Ok(Json(app.favorite_fonts().into_iter().cloned().collect()))
}

async fn toggle_favorite_handler(
    State(app): State<SharedApp>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, HttpError> {
    let mut app = lock(&app)?;
    if !app.catalog().contains(&id) {
        return Err(not_found(&app.translator(), &id));
    }
    let (outcome, notice) = app.toggle_favorite(&id);
    Ok(Json(ToggleResponse {
        outcome,
        notice,
        ids: app.favorites().list().as_slice().to_vec(),
    }))
}

async fn compare_handler(State(app): State<SharedApp>) -> Result<Json<Vec<Font>>, HttpError> {
    let app = lock(&app)?;
    Ok(Json(app.compare_fonts().into_iter().cloned().collect()))
}

async fn toggle_compare_handler(
    State(app): State<SharedApp>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, HttpError> {
    let mut app = lock(&app)?;
    if !app.catalog().contains(&id) {
        return Err(not_found(&app.translator(), &id));
    }
    let (outcome, notice) = app.toggle_compare(&id);
    if outcome == Toggle::Rejected {
        return Err((StatusCode::CONFLICT, notice.message));
    }
    Ok(Json(ToggleResponse {
        outcome,
        notice,
        ids: app.compare().list().as_slice().to_vec(),
    }))
}

async fn clear_compare_handler(State(app): State<SharedApp>) -> Result<Json<Notice>, HttpError> {
    let mut app = lock(&app)?;
    Ok(Json(app.clear_compare()))
}

async fn workbench_handler(
    State(app): State<SharedApp>,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, HttpError> {
    let app = lock(&app)?;
    let bench = app.workbench(query.as_deref().unwrap_or_default());
    let fonts = app.compare_fonts();
    Ok(Json(json!({
        "workbench": bench,
        "ratioLabel": bench.ratio_label(),
        "sizes": bench.sizes(),
        "heading": bench.heading_font(&fonts).map(|f| &f.id),
        "body": bench.body_font(&fonts).map(|f| &f.id),
        "query": bench.to_query(query.as_deref().unwrap_or_default()),
        "config": bench.tailwind_config(&fonts),
    })))
}

/// Links for `ids`, deduplicated within the request only.
async fn stylesheets_handler(
    State(app): State<SharedApp>,
    Json(req): Json<StylesheetRequest>,
) -> Result<Json<Vec<StylesheetLink>>, HttpError> {
    let app = lock(&app)?;
    let fonts: Vec<&Font> = req
        .ids
        .iter()
        .filter_map(|id| app.catalog().get(id))
        .collect();
    if fonts.len() != req.ids.len() {
        return Err((
            StatusCode::BAD_REQUEST,
            "every id must name a catalog font".to_string(),
        ));
    }
    Ok(Json(StylesheetLoader::new().plan(fonts)))
}

async fn translate_handler(
    State(app): State<SharedApp>,
    Path(key): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<String, HttpError> {
    let app = lock(&app)?;
    let t = translator_for(&app, &query.lang)?;
    Ok(t.t(&key).to_string())
}

fn to_bad_request(err: impl std::fmt::Display) -> HttpError {
    (StatusCode::BAD_REQUEST, err.to_string())
}

fn to_internal(err: impl std::fmt::Display) -> HttpError {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use fontshelf_core::catalog::Catalog;
    use fontshelf_core::storage::MemoryStore;
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    fn test_router() -> Router {
        router(App::new(Catalog::builtin(), Box::new(MemoryStore::new())))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).expect("parse response")
    }

    async fn body_text(response: axum::response::Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).expect("utf8 body")
    }

    fn post_json(uri: &str, payload: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let app = test_router();
        let request = Request::get("/health").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn search_endpoint_filters_and_limits() {
        let app = test_router();
        let payload = json!({
            "categories": ["monospaced"],
            "variable": true,
            "limit": 2
        });

        let response = app.oneshot(post_json("/search", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: SearchResponse = serde_json::from_slice(&body).expect("parse response");
        assert!(parsed.total >= parsed.fonts.len());
        assert!(parsed.fonts.len() <= 2);
        assert!(parsed
            .fonts
            .iter()
            .all(|f| f.variable && f.has_category("monospaced")));
    }

    #[tokio::test]
    async fn search_endpoint_rejects_zero_limit() {
        let app = test_router();
        let response = app
            .oneshot(post_json("/search", json!({"limit": 0})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let text = body_text(response).await;
        assert!(text.contains("limit must be at least 1"), "body: {text}");
    }

    #[tokio::test]
    async fn search_endpoint_rejects_bad_regex() {
        let app = test_router();
        let response = app
            .oneshot(post_json("/search", json!({"names": ["("]})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn font_details_and_missing_font() {
        let app = test_router();
        let request = Request::get("/fonts/pt-1?lang=en").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(value["font"]["name"], "PT Serif");
        assert!(value["pairing"]["categories"]
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c == "sans-serif"));

        let request = Request::get("/fonts/ghost").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn compare_stack_rejects_a_fourth_font() {
        let app = test_router();
        for id in ["pt-1", "gh-mona", "pretendard"] {
            let request = Request::post(format!("/compare/{id}"))
                .body(Body::empty())
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let request = Request::post("/compare/hack-font").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_text(response).await,
            "You can only compare up to 3 fonts"
        );

        let request = Request::get("/workbench?h=2&ratio=1.618")
            .body(Body::empty())
            .unwrap();
        let value = body_json(app.clone().oneshot(request).await.unwrap()).await;
        assert_eq!(value["heading"], "pretendard");
        assert_eq!(value["body"], "gh-mona");
        assert_eq!(value["ratioLabel"], "Golden Ratio");

        let request = Request::delete("/compare").body(Body::empty()).unwrap();
        let value = body_json(app.clone().oneshot(request).await.unwrap()).await;
        assert_eq!(value["message"], "Comparison cleared");

        let request = Request::get("/compare").body(Body::empty()).unwrap();
        let value = body_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(value, json!([]));
    }

    #[tokio::test]
    async fn favorites_toggle_round_trip() {
        let app = test_router();
        let request = Request::post("/favorites/gh-mona").body(Body::empty()).unwrap();
        let value = body_json(app.clone().oneshot(request).await.unwrap()).await;
        assert_eq!(value["outcome"], "added");
        assert_eq!(value["ids"], json!(["gh-mona"]));

        let request = Request::post("/favorites/ghost").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let request = Request::get("/favorites").body(Body::empty()).unwrap();
        let value = body_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(value[0]["id"], "gh-mona");
    }

    #[tokio::test]
    async fn stylesheets_and_translations() {
        let app = test_router();
        let response = app
            .clone()
            .oneshot(post_json("/stylesheets", json!({"ids": ["pt-1"]})))
            .await
            .unwrap();
        let value = body_json(response).await;
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert!(value[0]["href"]
            .as_str()
            .unwrap()
            .contains("family=PT+Serif"));

        let request = Request::get("/i18n/nav.catalog?lang=en")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!body_text(response).await.is_empty());

        let request = Request::get("/i18n/nav.catalog?lang=de")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
