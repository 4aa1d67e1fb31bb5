//! 値オブジェクト
//!
//! 生成時にバリデーションを行い、不正な値を持つインスタンスが存在しないことを保証します。

use std::fmt;

use super::ValidationError;

pub(super) const ROOM_NAME_MAX_CHARS: usize = 100;
const ANONYMOUS_OWNER: &str = "anonymous";

/// ルーム ID（採番順の整数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(u64);

impl RoomId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<&str> for RoomId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value
            .trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidRoomId(value.to_string()))
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ルーム名（前後の空白を除去した、空でない 100 文字以下の文字列）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyRoomName);
        }
        let chars = trimmed.chars().count();
        if chars > ROOM_NAME_MAX_CHARS {
            return Err(ValidationError::RoomNameTooLong(chars));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ルームの所有者
///
/// HTTP ではベアラートークン、WebSocket ではパス中のユーザー名がそのまま所有者名になる。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Owner(String);

impl Owner {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Self::anonymous()
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS_OWNER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
