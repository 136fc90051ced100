//! # Robots API ルーターテスト
//!
//! `build_router` で組み立てたルーターに対し、インメモリの
//! `MockRobotRepository` を差し込んでエンドツーエンドの HTTP 挙動を検証する。

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use pretty_assertions::assert_eq;
use robotics_domain::robot::{RobotAttributes, RobotDraft, RobotId, YearValue};
use robotics_infra::mock::MockRobotRepository;
use robotics_service::{
    build_router,
    handler::{DocsState, RobotState},
    usecase::RobotUseCaseImpl,
};
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

// =============================================================================
// ヘルパー
// =============================================================================

fn attributes(name: &str, robot_type: &str, year: i64) -> RobotAttributes {
    RobotDraft {
        name:       Some(name.to_string()),
        robot_type: Some(robot_type.to_string()),
        year:       Some(YearValue::Integer(year)),
    }
    .validate()
    .unwrap()
}

fn create_test_app(repo: &MockRobotRepository) -> Router {
    let robot_state = Arc::new(RobotState {
        usecase: RobotUseCaseImpl::new(Arc::new(repo.clone())),
    });
    let docs_state = Arc::new(DocsState {
        api_doc_url: "/apidoc/".to_string(),
    });
    build_router(robot_state, docs_state, None)
}

/// R2-D2 / C-3PO / Bender を登録済みのリポジトリ
fn seeded_repo() -> MockRobotRepository {
    let repo = MockRobotRepository::new();
    repo.add_robot(attributes("R2-D2", "astromech", 1977));
    repo.add_robot(attributes("C-3PO", "droid", 1977));
    repo.add_robot(attributes("Bender", "bending", 2999));
    repo
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(body.into())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    post(uri, body.to_string())
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn route_not_found_body() -> Value {
    json!({ "status": "ERROR", "message": "Not found" })
}

// =============================================================================
// GET /robots
// =============================================================================

#[tokio::test]
async fn test_get_robots_name昇順の配列で200が返る() {
    // Given
    let sut = create_test_app(&seeded_repo());

    // When
    let response = send(&sut, get("/robots")).await;

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bender", "C-3PO", "R2-D2"]);
    assert_eq!(
        body[0],
        json!({ "id": 3, "name": "Bender", "type": "bending", "year": 2999 })
    );
}

#[tokio::test]
async fn test_get_robots_0件なら空ボディの404が返る() {
    let sut = create_test_app(&MockRobotRepository::new());

    let response = send(&sut, get("/robots")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

// =============================================================================
// GET /robots/search/{name}
// =============================================================================

#[tokio::test]
async fn test_search_一致したrobotがfoundエンベロープの配列で返る() {
    let sut = create_test_app(&seeded_repo());

    let response = send(&sut, get("/robots/search/-")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([
            { "status": "FOUND", "data": { "id": 2, "name": "C-3PO", "type": "droid", "year": 1977 } },
            { "status": "FOUND", "data": { "id": 1, "name": "R2-D2", "type": "astromech", "year": 1977 } },
        ])
    );
}

#[tokio::test]
async fn test_search_該当なしでもnot_foundステータスの200が返る() {
    let sut = create_test_app(&seeded_repo());

    let response = send(&sut, get("/robots/search/zzz")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "NOT-FOUND" }));
}

#[tokio::test]
async fn test_search_パーセントエンコードされた断片はデコードして検索する() {
    let repo = seeded_repo();
    repo.add_robot(attributes("100% Robot", "test", 2000));
    let sut = create_test_app(&repo);

    let response = send(&sut, get("/robots/search/100%25")).await;

    let body = body_json(response).await;
    assert_eq!(body[0]["data"]["name"], "100% Robot");
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[rstest]
#[case::不正なutf8("/robots/search/%FF")]
#[case::途中で切れたutf8("/robots/search/%C3")]
#[case::nul文字("/robots/search/%00")]
#[tokio::test]
async fn test_search_検索できない断片はnot_foundステータスの200が返る(#[case] uri: &str) {
    let sut = create_test_app(&seeded_repo());

    let response = send(&sut, get(uri)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "NOT-FOUND" }));
}

// =============================================================================
// GET /robots/{id}
// =============================================================================

#[tokio::test]
async fn test_get_robot_存在するidで200が返る() {
    let sut = create_test_app(&seeded_repo());

    let response = send(&sut, get("/robots/2")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "id": 2, "name": "C-3PO", "type": "droid", "year": 1977 })
    );
}

#[tokio::test]
async fn test_get_robot_存在しないidで空ボディの404が返る() {
    let sut = create_test_app(&seeded_repo());

    let response = send(&sut, get("/robots/999")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[rstest]
#[case::英字("/robots/abc")]
#[case::負数("/robots/-1")]
#[case::i64超過("/robots/9223372036854775808")]
#[case::検索断片なし("/robots/search")]
#[case::削除で英字("/robots/delete/abc")]
#[tokio::test]
async fn test_数字でないidはルート不一致の404が返る(#[case] uri: &str) {
    let sut = create_test_app(&seeded_repo());

    let response = send(&sut, get(uri)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, route_not_found_body());
}

// =============================================================================
// POST /robots/add
// =============================================================================

#[tokio::test]
async fn test_post_add_作成したrobotが採番idつきで201として返る() {
    // Given
    let repo = MockRobotRepository::new();
    let sut = create_test_app(&repo);

    // When
    let response = send(
        &sut,
        post_json(
            "/robots/add",
            json!({ "name": "C-3PO", "type": "droid", "year": 1977 }),
        ),
    )
    .await;

    // Then
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "OK");
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(
        body["data"],
        json!({ "id": id, "name": "C-3PO", "type": "droid", "year": 1977 })
    );

    // 作成した robot を ID で取得できる
    let response = send(&sut, get(&format!("/robots/{id}"))).await;
    assert_eq!(
        body_json(response).await,
        json!({ "id": id, "name": "C-3PO", "type": "droid", "year": 1977 })
    );
}

#[tokio::test]
async fn test_post_add_content_typeがなくても文字列のyearを受け付ける() {
    let sut = create_test_app(&MockRobotRepository::new());

    let response = send(
        &sut,
        post(
            "/robots/add",
            r#"{"name":"Robotina","type":"virtual","year":"2016"}"#,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["year"], 2016);
}

#[tokio::test]
async fn test_post_add_nameがなければ409が返り保存されない() {
    let repo = MockRobotRepository::new();
    let sut = create_test_app(&repo);

    let response = send(
        &sut,
        post_json("/robots/add", json!({ "type": "droid", "year": 1977 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "ERROR", "messages": ["name is required"] })
    );
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_post_add_空ボディは3件の必須メッセージで409が返る() {
    let sut = create_test_app(&MockRobotRepository::new());

    let response = send(&sut, post("/robots/add", Body::empty())).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["messages"],
        json!(["name is required", "type is required", "year is required"])
    );
}

#[rstest]
#[case::数字以外(json!("19x7"), "year must be an integer")]
#[case::負数(json!(-1), "year cannot be less than zero")]
#[case::範囲外(json!(3_000_000_000_i64), "year is out of range")]
#[tokio::test]
async fn test_post_add_不正なyearは409が返る(#[case] year: Value, #[case] message: &str) {
    let sut = create_test_app(&MockRobotRepository::new());

    let response = send(
        &sut,
        post_json(
            "/robots/add",
            json!({ "name": "C-3PO", "type": "droid", "year": year }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["messages"], json!([message]));
}

#[tokio::test]
async fn test_post_add_jsonオブジェクトでないボディは409が返る() {
    let sut = create_test_app(&MockRobotRepository::new());

    let response = send(&sut, post("/robots/add", "not json")).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["messages"],
        json!(["request body must be a JSON object with name, type and year"])
    );
}

#[tokio::test]
async fn test_post_add_ストアが拒否するとストアのメッセージで409が返る() {
    let repo = MockRobotRepository::new();
    repo.reject_writes_with("duplicate key value violates unique constraint");
    let sut = create_test_app(&repo);

    let response = send(
        &sut,
        post_json(
            "/robots/add",
            json!({ "name": "C-3PO", "type": "droid", "year": 1977 }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "ERROR",
            "messages": ["duplicate key value violates unique constraint"]
        })
    );
}

#[tokio::test]
async fn test_get_add_メソッド不一致はルート不一致の404が返る() {
    let sut = create_test_app(&MockRobotRepository::new());

    let response = send(&sut, get("/robots/add")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, route_not_found_body());
}

// =============================================================================
// POST /robots/update/{id}
// =============================================================================

#[tokio::test]
async fn test_post_update_既存robotを更新して200が返る() {
    let repo = seeded_repo();
    let sut = create_test_app(&repo);

    let response = send(
        &sut,
        post_json(
            "/robots/update/2",
            json!({ "name": "C-3PO", "type": "protocol droid", "year": 1983 }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "OK" }));

    let response = send(&sut, get("/robots/2")).await;
    assert_eq!(body_json(response).await["type"], "protocol droid");
}

#[tokio::test]
async fn test_post_update_存在しないidでも200が返る() {
    let sut = create_test_app(&MockRobotRepository::new());

    let response = send(
        &sut,
        post_json(
            "/robots/update/999",
            json!({ "name": "Ghost", "type": "none", "year": 1 }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "OK" }));
}

#[tokio::test]
async fn test_post_update_yearがなければ409が返り値は変わらない() {
    let repo = seeded_repo();
    let sut = create_test_app(&repo);

    let response = send(
        &sut,
        post_json(
            "/robots/update/1",
            json!({ "name": "R2-D2", "type": "astromech" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["messages"],
        json!(["year is required"])
    );
    let response = send(&sut, get("/robots/1")).await;
    assert_eq!(body_json(response).await["year"], 1977);
}

// =============================================================================
// GET /robots/delete/{id}
// =============================================================================

#[tokio::test]
async fn test_delete_削除後の取得は404になる() {
    // Given
    let repo = seeded_repo();
    let sut = create_test_app(&repo);

    // When
    let response = send(&sut, get("/robots/delete/1")).await;

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "OK" }));
    let response = send(&sut, get("/robots/1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(repo.len(), 2);
}

#[tokio::test]
async fn test_delete_存在しないidで空ボディの404が返る() {
    let sut = create_test_app(&seeded_repo());

    let response = send(&sut, get("/robots/delete/999")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

// =============================================================================
// ルート不一致 / ルートパス / ヘルスチェック
// =============================================================================

#[tokio::test]
async fn test_未登録パスはルート不一致の404が返る() {
    let sut = create_test_app(&MockRobotRepository::new());

    let response = send(&sut, get("/unknown")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, route_not_found_body());
}

#[tokio::test]
async fn test_ルートパスはapiドキュメントへ301でリダイレクトする() {
    let sut = create_test_app(&MockRobotRepository::new());

    let response = send(&sut, get("/")).await;

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[header::LOCATION], "/apidoc/");
}

#[tokio::test]
async fn test_healthはhealthyを返す() {
    let sut = create_test_app(&MockRobotRepository::new());

    let response = send(&sut, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_作成した連番idは削除後も再利用されない() {
    let repo = seeded_repo();
    let sut = create_test_app(&repo);
    send(&sut, get("/robots/delete/3")).await;

    let response = send(
        &sut,
        post_json(
            "/robots/add",
            json!({ "name": "Marvin", "type": "android", "year": 1978 }),
        ),
    )
    .await;

    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    assert_eq!(RobotId::new(id), RobotId::new(4));
}
