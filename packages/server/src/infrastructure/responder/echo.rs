//! Echo Responder 実装

use async_trait::async_trait;

use crate::domain::{Responder, Room};

/// 受け取ったテキストをそのまま返す Responder
#[derive(Debug, Clone, Default)]
pub struct EchoResponder;

#[async_trait]
impl Responder for EchoResponder {
    async fn respond(&self, _room: &Room, _username: &str, text: &str) -> String {
        format!("echo: {}", text)
    }
}
