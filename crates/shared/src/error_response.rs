//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーボディを提供する。
//!
//! ## 設計
//!
//! - 2 種類の形状が共存する
//!   - `ErrorResponse`: 入力エラーやストア側の拒否 `{ "status": "ERROR", "messages": [...] }`
//!   - `RouteNotFoundResponse`: ルーティング不一致 `{ "status": "ERROR", "message": "Not found" }`
//! - axum の `IntoResponse` 変換はサービス側の責務（shared に axum 依存を入れない）

use serde::{Deserialize, Serialize};

use crate::api_response::ResponseStatus;

/// 内部エラー時に返す固定メッセージ
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// ルーティング不一致時のメッセージ
const ROUTE_NOT_FOUND_MESSAGE: &str = "Not found";

/// メッセージ一覧付きエラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status:   ResponseStatus,
    pub messages: Vec<String>,
}

impl ErrorResponse {
    pub fn new(messages: Vec<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            messages,
        }
    }

    /// 単一メッセージのエラーレスポンス
    pub fn single(message: impl Into<String>) -> Self {
        Self::new(vec![message.into()])
    }

    /// 500 用。内部情報を漏らさないため固定メッセージのみ。
    pub fn internal_error() -> Self {
        Self::single(INTERNAL_ERROR_MESSAGE)
    }
}

/// ルーティング不一致時のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNotFoundResponse {
    pub status:  ResponseStatus,
    pub message: String,
}

impl RouteNotFoundResponse {
    pub fn route_not_found() -> Self {
        Self {
            status:  ResponseStatus::Error,
            message: ROUTE_NOT_FOUND_MESSAGE.to_string(),
        }
    }
}
