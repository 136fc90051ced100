//! # カスタムエクストラクタ
//!
//! - [`RobotIdPath`]: 数字のみのパスセグメントを [`RobotId`] として取り出す
//! - [`SearchFragmentPath`]: 検索断片のパスセグメントを取り出す
//! - [`RobotBody`]: リクエストボディを [`RobotDraft`] として取り出す
//!
//! どちらも拒否時のレスポンスを自前で組み立てる。axum 標準の
//! `Path` / `Json` の拒否レスポンス（400 / 415 / 422）は返さない。

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use robotics_domain::robot::{RobotDraft, RobotId};
use robotics_shared::ApiResponse;

use crate::{error::CoreError, handler::route_not_found};

/// ボディが JSON オブジェクトとして解釈できない場合のメッセージ
const MALFORMED_BODY_MESSAGE: &str = "request body must be a JSON object with name, type and year";

/// `{id}` パスパラメータ
///
/// 数字以外や `i64` に収まらない値はルート不一致として扱い、
/// フォールバックと同じ 404 レスポンスを返す。
#[derive(Debug, Clone, Copy)]
pub struct RobotIdPath(pub RobotId);

impl<S> FromRequestParts<S> for RobotIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| route_not_found())?;

        RobotId::parse_segment(&segment)
            .map(Self)
            .ok_or_else(route_not_found)
    }
}

/// `{name}` 検索断片のパスパラメータ
///
/// パーセントデコード後に UTF-8 として解釈できない断片は一致なしとみなし、
/// `{"status":"NOT-FOUND"}` を 200 で返す。
#[derive(Debug, Clone)]
pub struct SearchFragmentPath(pub String);

impl<S> FromRequestParts<S> for SearchFragmentPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(fragment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| Json(ApiResponse::not_found()).into_response())?;

        Ok(Self(fragment))
    }
}

/// 作成・更新リクエストのボディ
///
/// `Content-Type` は問わない。空ボディは `{}` とみなす。
#[derive(Debug, Clone)]
pub struct RobotBody(pub RobotDraft);

impl<S> FromRequest<S> for RobotBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        parse_robot_body(&bytes)
            .map(Self)
            .map_err(IntoResponse::into_response)
    }
}

fn parse_robot_body(bytes: &[u8]) -> Result<RobotDraft, CoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(RobotDraft::default());
    }

    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|_| malformed_body())?;
    if !value.is_object() {
        return Err(malformed_body());
    }

    serde_json::from_value(value).map_err(|_| malformed_body())
}

fn malformed_body() -> CoreError {
    CoreError::Validation(vec![MALFORMED_BODY_MESSAGE.to_string()])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use robotics_domain::robot::YearValue;

    use super::*;

    #[test]
    fn test_空ボディは全フィールド未指定のドラフトになる() {
        assert_eq!(parse_robot_body(b"").unwrap(), RobotDraft::default());
        assert_eq!(parse_robot_body(b" \n").unwrap(), RobotDraft::default());
    }

    #[test]
    fn test_jsonオブジェクトをドラフトに変換する() {
        let draft = parse_robot_body(br#"{"name":"C-3PO","type":"droid","year":"1977"}"#).unwrap();

        assert_eq!(draft.name.as_deref(), Some("C-3PO"));
        assert_eq!(draft.robot_type.as_deref(), Some("droid"));
        assert_eq!(draft.year, Some(YearValue::Text("1977".to_string())));
    }

    #[rstest]
    #[case::不正なjson(b"{name:".as_slice())]
    #[case::配列(br#"[{"name":"C-3PO"}]"#.as_slice())]
    #[case::文字列(br#""C-3PO""#.as_slice())]
    #[case::nameが数値(br#"{"name":42,"type":"droid","year":1977}"#.as_slice())]
    #[case::typeがオブジェクト(br#"{"name":"C-3PO","type":{},"year":1977}"#.as_slice())]
    fn test_オブジェクトとして解釈できないボディは単一メッセージになる(#[case] body: &[u8]) {
        let error = parse_robot_body(body).unwrap_err();

        assert!(
            matches!(&error, CoreError::Validation(m) if m == &vec![MALFORMED_BODY_MESSAGE.to_string()]),
            "unexpected error: {error:?}"
        );
    }
}
