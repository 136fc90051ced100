//! # Robot
//!
//! Robots API が扱う唯一のエンティティと、その値オブジェクト・入力ドラフトを定義する。
//!
//! ## 設計方針
//!
//! - **入力と検証の分離**: リクエストボディは全フィールド任意の [`RobotDraft`] として受け取り、
//!   [`RobotDraft::validate`] で [`RobotAttributes`] に変換する
//! - **エラーは全件収集**: 最初の違反で打ち切らず、name → type → year の順で全メッセージを返す
//! - **ID はストアが採番**: クライアントから ID を受け取る経路は存在しない

use serde::{Deserialize, Serialize};

use crate::DomainError;

// =========================================================================
// RobotId
// =========================================================================

/// Robot の一意識別子
///
/// ストアの identity 列で採番される。生成後は不変。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
#[display("{_0}")]
pub struct RobotId(i64);

impl RobotId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// パスセグメントから ID を読み取る
    ///
    /// ASCII 数字のみで構成され、`i64` に収まる場合のみ `Some` を返す。
    /// 符号や空白は受け付けない。
    pub fn parse_segment(segment: &str) -> Option<Self> {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        segment.parse::<i64>().ok().map(Self)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

// =========================================================================
// RobotName / RobotType
// =========================================================================

define_validated_string! {
    /// Robot 名（1〜70 文字、前後の空白は除去）
    pub struct RobotName {
        label: "name",
        max_length: 70,
    }
}

define_validated_string! {
    /// Robot 種別（1〜32 文字、前後の空白は除去）
    pub struct RobotType {
        label: "type",
        max_length: 32,
    }
}

// =========================================================================
// RobotYear
// =========================================================================

/// 製造年（0 以上の `i32`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("{_0}")]
pub struct RobotYear(i32);

impl RobotYear {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value < 0 {
            return Err(DomainError::validation("year cannot be less than zero"));
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| DomainError::validation("year is out of range"))
    }

    /// リクエストボディの year 値を検証する
    pub fn from_value(value: &YearValue) -> Result<Self, DomainError> {
        match value {
            YearValue::Integer(n) => Self::new(*n),
            YearValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Err(DomainError::validation("year is required"));
                }
                let n = s
                    .parse::<i64>()
                    .map_err(|_| DomainError::validation("year must be an integer"))?;
                Self::new(n)
            }
            // i64 を超える正の整数
            YearValue::Other(serde_json::Value::Number(n)) if n.is_u64() => {
                Err(DomainError::validation("year is out of range"))
            }
            YearValue::Other(_) => Err(DomainError::validation("year must be an integer")),
        }
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

/// リクエストボディ上の year 表現
///
/// 数値 `1977` と数値文字列 `"1977"` のどちらも受け付ける。
/// それ以外の JSON 値は `Other` に落ち、検証時にエラーになる。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    Integer(i64),
    Text(String),
    Other(serde_json::Value),
}

// =========================================================================
// RobotDraft / RobotAttributes
// =========================================================================

/// 作成・更新リクエストのボディ
///
/// 全フィールドが任意。欠落・null はどちらも `None` になる。
/// 未知のフィールド（`id` など）は無視する。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RobotDraft {
    pub name:       Option<String>,
    #[serde(rename = "type")]
    pub robot_type: Option<String>,
    pub year:       Option<YearValue>,
}

/// 検証済みの Robot 属性
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotAttributes {
    pub name:       RobotName,
    pub robot_type: RobotType,
    pub year:       RobotYear,
}

impl RobotDraft {
    /// 全フィールドを検証する
    ///
    /// # Errors
    ///
    /// 1 つでも違反があれば、全違反のメッセージを name → type → year の順で
    /// まとめた `DomainError::Validation` を返す。
    pub fn validate(self) -> Result<RobotAttributes, DomainError> {
        let mut messages = Vec::new();

        let name = collect(
            &mut messages,
            required(self.name, RobotName::LABEL).and_then(RobotName::new),
        );
        let robot_type = collect(
            &mut messages,
            required(self.robot_type, RobotType::LABEL).and_then(RobotType::new),
        );
        let year = collect(
            &mut messages,
            required(self.year, "year").and_then(|v| RobotYear::from_value(&v)),
        );

        match (name, robot_type, year) {
            (Some(name), Some(robot_type), Some(year)) if messages.is_empty() => {
                Ok(RobotAttributes {
                    name,
                    robot_type,
                    year,
                })
            }
            _ => Err(DomainError::Validation(messages)),
        }
    }
}

fn required<T>(value: Option<T>, label: &str) -> Result<T, DomainError> {
    value.ok_or_else(|| DomainError::validation(format!("{label} is required")))
}

fn collect<T>(messages: &mut Vec<String>, result: Result<T, DomainError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            messages.extend(e.into_messages());
            None
        }
    }
}

// =========================================================================
// Robot
// =========================================================================

/// Robot エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robot {
    id:         RobotId,
    name:       RobotName,
    robot_type: RobotType,
    year:       RobotYear,
}

impl Robot {
    /// 採番済み ID と検証済み属性から組み立てる
    pub fn new(id: RobotId, attributes: RobotAttributes) -> Self {
        Self {
            id,
            name: attributes.name,
            robot_type: attributes.robot_type,
            year: attributes.year,
        }
    }

    /// 永続化済みの行から復元する
    ///
    /// ストア側の制約で検証済みとみなし、再検証しない。
    pub fn from_db(id: i64, name: String, robot_type: String, year: i32) -> Self {
        Self {
            id:         RobotId(id),
            name:       RobotName::from_db(name),
            robot_type: RobotType::from_db(robot_type),
            year:       RobotYear(year),
        }
    }

    pub fn id(&self) -> RobotId {
        self.id
    }

    pub fn name(&self) -> &RobotName {
        &self.name
    }

    pub fn robot_type(&self) -> &RobotType {
        &self.robot_type
    }

    pub fn year(&self) -> RobotYear {
        self.year
    }
}
