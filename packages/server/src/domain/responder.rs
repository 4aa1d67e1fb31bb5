//! Responder trait 定義
//!
//! チャットソケットが受け取ったテキストへの返答を生成するインターフェース。

use async_trait::async_trait;

use super::Room;

/// Responder trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Responder: Send + Sync {
    /// `text` への返答を生成する
    async fn respond(&self, room: &Room, username: &str, text: &str) -> String;
}
