use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult, ARTICLE_NOT_FOUND};
use crate::service::{article_query, FetchRequest, TranslateOutcome};
use crate::AppState;

/// Query string for `GET /articles`. Values arrive as raw strings so that
/// junk numbers fall back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub category: Option<String>,
    pub translated_only: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FetchNewsBody {
    pub locale: Option<String>,
    pub language: Option<String>,
    pub limit: Option<i64>,
}

fn parse_number(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

fn parse_article_id(raw: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| ApiError::NotFound(ARTICLE_NOT_FOUND))
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Value>> {
    let translated_only = params
        .translated_only
        .as_deref()
        .map_or(true, |v| v.eq_ignore_ascii_case("true"));
    let query = article_query(
        parse_number(params.page.as_deref()),
        parse_number(params.per_page.as_deref()),
        params.category,
        translated_only,
    );

    let page = state
        .service
        .list(&query)
        .await
        .map_err(ApiError::from_service("Failed to retrieve articles"))?;

    Ok(Json(json!({
        "success": true,
        "articles": page.items,
        "pagination": {
            "page": page.page,
            "per_page": page.per_page,
            "total": page.total,
            "total_pages": page.total_pages(),
            "has_next": page.has_next(),
            "has_prev": page.has_prev(),
        }
    })))
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_article_id(&id)?;
    let article = state
        .service
        .get(id)
        .await
        .map_err(ApiError::from_service("Failed to retrieve article"))?;

    Ok(Json(json!({ "success": true, "article": article })))
}

pub async fn fetch_news(
    State(state): State<Arc<AppState>>,
    body: Option<Json<FetchNewsBody>>,
) -> ApiResult<Json<Value>> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let request = FetchRequest::new(body.locale, body.language, body.limit);

    let outcome = state
        .service
        .fetch_news(&request)
        .await
        .map_err(ApiError::from_service("Failed to fetch news"))?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Fetched {} new articles", outcome.inserted.len()),
        "new_articles": outcome.inserted.len(),
        "existing_articles": outcome.existing,
        "articles": outcome.inserted,
    })))
}

pub async fn translate_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_article_id(&id)?;
    let outcome = state
        .service
        .translate_article(id)
        .await
        .map_err(ApiError::from_service("Failed to translate article"))?;

    let (message, article) = match outcome {
        TranslateOutcome::AlreadyTranslated(article) => ("Article already translated", article),
        TranslateOutcome::Translated(article) => ("Article translated successfully", article),
    };
    Ok(Json(json!({ "success": true, "message": message, "article": article })))
}

pub async fn translate_all(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let translated = state
        .service
        .translate_pending()
        .await
        .map_err(ApiError::from_service("Failed to translate articles"))?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Translated {} articles", translated),
        "translated_count": translated,
    })))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let stats = state
        .service
        .stats()
        .await
        .map_err(ApiError::from_service("Failed to get statistics"))?;

    Ok(Json(json!({ "success": true, "stats": stats })))
}
