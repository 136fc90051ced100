//! Robot 管理ユースケース

use std::sync::Arc;

use robotics_domain::{
    DomainError,
    robot::{Robot, RobotDraft, RobotId},
};
use robotics_infra::repository::RobotRepository;

use crate::error::CoreError;

/// Robot 管理ユースケース
pub struct RobotUseCaseImpl {
    robot_repository: Arc<dyn RobotRepository>,
}

impl RobotUseCaseImpl {
    pub fn new(robot_repository: Arc<dyn RobotRepository>) -> Self {
        Self { robot_repository }
    }

    /// 全 Robot を name 昇順で取得する
    pub async fn list_robots(&self) -> Result<Vec<Robot>, CoreError> {
        let robots = self.robot_repository.find_all().await?;
        Ok(robots)
    }

    /// name の部分一致で検索する
    ///
    /// NUL 文字を含む断片はストアが受け付けないため、問い合わせずに 0 件を返す。
    pub async fn search_robots(&self, fragment: &str) -> Result<Vec<Robot>, CoreError> {
        if fragment.contains('\0') {
            return Ok(Vec::new());
        }

        let robots = self.robot_repository.search_by_name(fragment).await?;
        Ok(robots)
    }

    /// ID で取得する
    pub async fn get_robot(&self, id: RobotId) -> Result<Robot, CoreError> {
        self.robot_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Robot を作成する
    ///
    /// 1. ドラフトを検証（全違反をまとめて返す）
    /// 2. 挿入して採番された ID を受け取る
    /// 3. 採番済み ID と検証済み属性から Robot を組み立てる
    pub async fn create_robot(&self, draft: RobotDraft) -> Result<Robot, CoreError> {
        let attributes = draft.validate()?;
        let id = self.robot_repository.insert(&attributes).await?;

        tracing::info!(robot_id = %id, "Robot を作成しました");
        Ok(Robot::new(id, attributes))
    }

    /// Robot を更新する
    ///
    /// 存在確認は行わない。該当行がなくても成功として扱う。
    pub async fn update_robot(&self, id: RobotId, draft: RobotDraft) -> Result<(), CoreError> {
        let attributes = draft.validate()?;
        let affected = self.robot_repository.update(id, &attributes).await?;

        if affected == 0 {
            tracing::debug!(robot_id = %id, "更新対象の Robot が存在しません");
        } else {
            tracing::info!(robot_id = %id, "Robot を更新しました");
        }
        Ok(())
    }

    /// Robot を削除する
    ///
    /// 該当行がなければ `NotFound` を返す。
    pub async fn delete_robot(&self, id: RobotId) -> Result<(), CoreError> {
        let affected = self.robot_repository.delete(id).await?;
        if affected == 0 {
            return Err(not_found(id));
        }

        tracing::info!(robot_id = %id, "Robot を削除しました");
        Ok(())
    }
}

fn not_found(id: RobotId) -> CoreError {
    DomainError::NotFound {
        entity_type: "Robot",
        id:          id.to_string(),
    }
    .into()
}
