//! # Robots Service エラー定義
//!
//! サービス固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | エラー種別 | HTTP ステータス | ボディ |
//! |-----------|----------------|--------|
//! | `NotFound` | 404 | 空 |
//! | `Validation` | 409 | `{"status":"ERROR","messages":[...]}` |
//! | `Conflict` | 409 | `{"status":"ERROR","messages":[<ストアのメッセージ>]}` |
//! | `Database` | 500 | `{"status":"ERROR","messages":["Internal server error"]}` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use robotics_domain::DomainError;
use robotics_infra::InfraError;
use robotics_shared::ErrorResponse;
use thiserror::Error;

/// Robots Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 入力値の検証失敗
    #[error("入力値が不正です: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// ストア側の制約で書き込みが拒否された
    #[error("書き込みが拒否されました: {0}")]
    Conflict(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(InfraError),
}

impl From<DomainError> for CoreError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(messages) => Self::Validation(messages),
            DomainError::NotFound { entity_type, id } => {
                Self::NotFound(format!("{entity_type}(id={id})"))
            }
        }
    }
}

impl From<InfraError> for CoreError {
    fn from(e: InfraError) -> Self {
        match e.as_constraint() {
            Some(message) => Self::Conflict(message.to_string()),
            None => Self::Database(e),
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        match self {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            CoreError::Validation(messages) => {
                (StatusCode::CONFLICT, Json(ErrorResponse::new(messages))).into_response()
            }
            CoreError::Conflict(message) => {
                tracing::warn!(%message, "ストアが書き込みを拒否しました");
                (StatusCode::CONFLICT, Json(ErrorResponse::single(message))).into_response()
            }
            CoreError::Database(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::internal_error()),
                )
                    .into_response()
            }
        }
    }
}
