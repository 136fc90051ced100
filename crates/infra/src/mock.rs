//! # テスト用モックリポジトリ
//!
//! ハンドラ・ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! robotics-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use robotics_domain::robot::{Robot, RobotAttributes, RobotId};

use crate::{error::InfraError, repository::RobotRepository};

// ===== MockRobotRepository =====

#[derive(Default)]
struct MockState {
    robots:        Vec<Robot>,
    next_id:       i64,
    reject_writes: Option<String>,
}

/// インメモリの RobotRepository
///
/// ID は 1 からの連番で採番する。検索は大文字小文字を区別する部分一致。
#[derive(Clone, Default)]
pub struct MockRobotRepository {
    state: Arc<Mutex<MockState>>,
}

impl MockRobotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 検証済み属性から Robot を追加し、採番した ID を返す
    pub fn add_robot(&self, attributes: RobotAttributes) -> RobotId {
        let mut state = self.state.lock().unwrap();
        let id = next_id(&mut state);
        state.robots.push(Robot::new(id, attributes));
        id
    }

    /// 以降の insert / update をストア側の制約違反として拒否させる
    pub fn reject_writes_with(&self, message: impl Into<String>) {
        self.state.lock().unwrap().reject_writes = Some(message.into());
    }

    /// 現在保持している Robot 数
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().robots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn next_id(state: &mut MockState) -> RobotId {
    state.next_id += 1;
    RobotId::new(state.next_id)
}

fn sorted_by_name(mut robots: Vec<Robot>) -> Vec<Robot> {
    robots.sort_by(|a, b| {
        a.name()
            .as_str()
            .cmp(b.name().as_str())
            .then(a.id().cmp(&b.id()))
    });
    robots
}

#[async_trait]
impl RobotRepository for MockRobotRepository {
    async fn find_all(&self) -> Result<Vec<Robot>, InfraError> {
        let robots = self.state.lock().unwrap().robots.clone();
        Ok(sorted_by_name(robots))
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Robot>, InfraError> {
        let robots = self
            .state
            .lock()
            .unwrap()
            .robots
            .iter()
            .filter(|r| r.name().as_str().contains(fragment))
            .cloned()
            .collect();
        Ok(sorted_by_name(robots))
    }

    async fn find_by_id(&self, id: RobotId) -> Result<Option<Robot>, InfraError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .robots
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    async fn insert(&self, attributes: &RobotAttributes) -> Result<RobotId, InfraError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.reject_writes {
            return Err(InfraError::constraint(message.clone()));
        }
        let id = next_id(&mut state);
        state.robots.push(Robot::new(id, attributes.clone()));
        Ok(id)
    }

    async fn update(&self, id: RobotId, attributes: &RobotAttributes) -> Result<u64, InfraError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.reject_writes {
            return Err(InfraError::constraint(message.clone()));
        }
        match state.robots.iter_mut().find(|r| r.id() == id) {
            Some(robot) => {
                *robot = Robot::new(id, attributes.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: RobotId) -> Result<u64, InfraError> {
        let mut state = self.state.lock().unwrap();
        let before = state.robots.len();
        state.robots.retain(|r| r.id() != id);
        Ok((before - state.robots.len()) as u64)
    }
}
