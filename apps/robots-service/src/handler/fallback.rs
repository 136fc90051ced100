//! # ルート不一致・ルートパスのハンドラ
//!
//! - 未登録パス、メソッド不一致、ID 形式不一致はすべて同じ 404 ボディを返す
//! - `GET /` は API ドキュメントへ 301 リダイレクトする

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use robotics_shared::RouteNotFoundResponse;

/// ルートパスハンドラの共有状態
pub struct DocsState {
    pub api_doc_url: String,
}

/// ルート不一致時のレスポンス
pub fn route_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFoundResponse::route_not_found()),
    )
        .into_response()
}

/// フォールバックハンドラ
#[tracing::instrument(skip_all)]
pub async fn not_found() -> Response {
    tracing::debug!("ルートが見つかりません");
    route_not_found()
}

/// GET /
///
/// `301 Moved Permanently` で API ドキュメントへ誘導する。
/// axum の `Redirect::permanent` は 308 を返すため使わない。
pub async fn redirect_to_docs(State(state): State<Arc<DocsState>>) -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, state.api_doc_url.clone())],
    )
}
