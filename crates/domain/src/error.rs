//! # ドメイン層エラー定義
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 409 Conflict | 入力値の検証失敗（メッセージを全件保持） |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//!
//! 入力エラーが 400 ではなく 409 になるのは既存クライアントとの互換のため。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 複数フィールドの違反をまとめて返すため、メッセージは配列で保持する。
    /// 順序はフィールドの検証順（name, type, year）。
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// エンティティが見つからない
    #[error("{entity_type} not found: {id}")]
    NotFound {
        /// エンティティの種類（"Robot" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },
}

impl DomainError {
    /// 単一メッセージのバリデーションエラー
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// バリデーションメッセージを取り出す
    ///
    /// `Validation` 以外のバリアントは空配列を返す。
    pub fn into_messages(self) -> Vec<String> {
        match self {
            Self::Validation(messages) => messages,
            Self::NotFound { .. } => Vec::new(),
        }
    }
}
