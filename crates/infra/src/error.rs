//! # インフラ層エラー定義
//!
//! データベースとの通信で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターン:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別
//!
//! `From<sqlx::Error>` や convenience constructor で生成した時点の
//! スパン情報が自動的に記録される。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別に応じた処理には [`kind()`](InfraError::kind) を使用する:
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::Constraint(message) => { /* 409 */ }
///     _ => { /* 500 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースエラー（接続断、タイムアウト、SQL 実行失敗など）
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// ストア側の制約違反
    ///
    /// 一意制約・外部キー・NOT NULL・CHECK 制約、およびデータ例外による拒否。
    /// メッセージはストアが返したものをそのまま保持し、クライアントに返す。
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// 予期しないエラー
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 制約違反の場合、ストアのメッセージを返す
    pub fn as_constraint(&self) -> Option<&str> {
        match &self.kind {
            InfraErrorKind::Constraint(message) => Some(message),
            _ => None,
        }
    }

    /// 制約違反エラーを生成する
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Constraint(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        let rejected = match &source {
            sqlx::Error::Database(db_err) if is_rejected_by_store(db_err.as_ref()) => {
                Some(db_err.message().to_string())
            }
            _ => None,
        };
        let kind = match rejected {
            Some(message) => InfraErrorKind::Constraint(message),
            None => InfraErrorKind::Database(source),
        };
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

/// ストアが入力値を拒否したかを判定する
///
/// 制約違反（SQLSTATE クラス 23）に加え、桁あふれ・文字列長超過などの
/// データ例外（SQLSTATE クラス 22）も対象にする。
fn is_rejected_by_store(db_err: &dyn sqlx::error::DatabaseError) -> bool {
    use sqlx::error::ErrorKind;

    let constraint = matches!(
        db_err.kind(),
        ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation
    );
    let data_exception = db_err.code().is_some_and(|code| code.starts_with("22"));

    constraint || data_exception
}
