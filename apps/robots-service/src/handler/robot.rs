//! # Robot ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /robots` - 一覧（name 昇順）
//! - `GET /robots/search/{name}` - name の部分一致検索
//! - `GET /robots/{id}` - ID 指定取得
//! - `POST /robots/add` - 作成
//! - `POST /robots/update/{id}` - 更新
//! - `GET /robots/delete/{id}` - 削除
//!
//! 一覧と ID 指定取得はエンベロープなしで Robot をそのまま返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use robotics_domain::robot::Robot;
use robotics_shared::ApiResponse;
use serde::Serialize;

use crate::{
    error::CoreError,
    extract::{RobotBody, RobotIdPath, SearchFragmentPath},
    usecase::RobotUseCaseImpl,
};

/// Robot API の共有状態
pub struct RobotState {
    pub usecase: RobotUseCaseImpl,
}

/// Robot DTO
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RobotDto {
    pub id:         i64,
    pub name:       String,
    #[serde(rename = "type")]
    pub robot_type: String,
    pub year:       i32,
}

impl From<&Robot> for RobotDto {
    fn from(robot: &Robot) -> Self {
        Self {
            id:         robot.id().as_i64(),
            name:       robot.name().as_str().to_string(),
            robot_type: robot.robot_type().as_str().to_string(),
            year:       robot.year().as_i32(),
        }
    }
}

/// GET /robots
///
/// ## レスポンス
///
/// - `200 OK`: Robot の配列
/// - `404 Not Found`: 1 件もない（ボディなし）
#[tracing::instrument(skip_all)]
pub async fn list_robots(
    State(state): State<Arc<RobotState>>,
) -> Result<impl IntoResponse, CoreError> {
    let robots = state.usecase.list_robots().await?;
    if robots.is_empty() {
        return Err(CoreError::NotFound("robots".to_string()));
    }

    let items: Vec<RobotDto> = robots.iter().map(RobotDto::from).collect();
    Ok(Json(items))
}

/// GET /robots/search/{name}
///
/// 該当なしでも 404 にはせず、`{"status":"NOT-FOUND"}` を 200 で返す。
#[tracing::instrument(skip_all, fields(name = %name.escape_debug()))]
pub async fn search_robots(
    State(state): State<Arc<RobotState>>,
    SearchFragmentPath(name): SearchFragmentPath,
) -> Result<Response, CoreError> {
    let robots = state.usecase.search_robots(&name).await?;
    if robots.is_empty() {
        return Ok(Json(ApiResponse::not_found()).into_response());
    }

    let items: Vec<ApiResponse<RobotDto>> = robots
        .iter()
        .map(|r| ApiResponse::found(RobotDto::from(r)))
        .collect();
    Ok(Json(items).into_response())
}

/// GET /robots/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_robot(
    State(state): State<Arc<RobotState>>,
    RobotIdPath(id): RobotIdPath,
) -> Result<impl IntoResponse, CoreError> {
    let robot = state.usecase.get_robot(id).await?;
    Ok(Json(RobotDto::from(&robot)))
}

/// POST /robots/add
///
/// ## レスポンス
///
/// - `201 Created`: `{"status":"OK","data":{...}}`（採番された id を含む）
/// - `409 Conflict`: 検証エラーまたはストアによる拒否
#[tracing::instrument(skip_all)]
pub async fn create_robot(
    State(state): State<Arc<RobotState>>,
    RobotBody(draft): RobotBody,
) -> Result<impl IntoResponse, CoreError> {
    let robot = state.usecase.create_robot(draft).await?;

    let response = ApiResponse::ok(RobotDto::from(&robot));
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /robots/update/{id}
///
/// 該当行がなくても `200 OK` を返す。
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_robot(
    State(state): State<Arc<RobotState>>,
    RobotIdPath(id): RobotIdPath,
    RobotBody(draft): RobotBody,
) -> Result<impl IntoResponse, CoreError> {
    state.usecase.update_robot(id, draft).await?;
    Ok(Json(ApiResponse::ok_without_data()))
}

/// GET /robots/delete/{id}
///
/// 該当行がなければ `404 Not Found`（ボディなし）。
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_robot(
    State(state): State<Arc<RobotState>>,
    RobotIdPath(id): RobotIdPath,
) -> Result<impl IntoResponse, CoreError> {
    state.usecase.delete_robot(id).await?;
    Ok(Json(ApiResponse::ok_without_data()))
}
