//! # API レスポンスエンベロープ
//!
//! Robots API の成功レスポンス形式 `{ "status": ..., "data": T }` を提供する。
//!
//! 一覧取得・ID 指定取得はエンベロープを使わず Robot をそのまま返すため、
//! この型を使うのは検索・作成・更新・削除のレスポンスのみ。

use serde::{Deserialize, Serialize};

/// エンベロープの `status` フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "FOUND")]
    Found,
    #[serde(rename = "NOT-FOUND")]
    NotFound,
    #[serde(rename = "ERROR")]
    Error,
}

/// 統一レスポンス型
///
/// `data` が `None` の場合はフィールドごと省略される。
///
/// ## 使用例
///
/// ```
/// use robotics_shared::{ApiResponse, ResponseStatus};
///
/// let response = ApiResponse::found("R2-D2");
/// assert_eq!(response.status, ResponseStatus::Found);
/// assert_eq!(response.data, Some("R2-D2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data:   Option<T>,
}

impl<T> ApiResponse<T> {
    /// `{ "status": "OK", "data": T }`
    pub fn ok(data: T) -> Self {
        Self {
            status: ResponseStatus::Ok,
            data:   Some(data),
        }
    }

    /// `{ "status": "FOUND", "data": T }`
    pub fn found(data: T) -> Self {
        Self {
            status: ResponseStatus::Found,
            data:   Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// `{ "status": "OK" }`
    pub fn ok_without_data() -> Self {
        Self {
            status: ResponseStatus::Ok,
            data:   None,
        }
    }

    /// `{ "status": "NOT-FOUND" }`
    pub fn not_found() -> Self {
        Self {
            status: ResponseStatus::NotFound,
            data:   None,
        }
    }
}
