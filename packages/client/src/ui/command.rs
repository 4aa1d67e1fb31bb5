//! Parsing of REPL input lines.

use thiserror::Error;

use crate::domain::{Rating, RoomId};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text to send to the current room
    Send(String),
    ListRooms,
    NewRoom,
    SelectRoom(RoomId),
    RenameRoom(String),
    DeleteRoom(RoomId),
    /// Rate the message at a 1-based position in the displayed log
    Rate { position: usize, rating: Rating },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: /{0} (try /help)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl ReplCommand {
    /// Parse a trimmed input line. Lines not starting with `/` are messages.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(ReplCommand::Send(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "rooms" => Ok(ReplCommand::ListRooms),
            "new" => Ok(ReplCommand::NewRoom),
            "select" => required(arg, "/select <room-id>")
                .map(|id| ReplCommand::SelectRoom(RoomId::new(id))),
            "rename" => {
                required(arg, "/rename <name>").map(|name| ReplCommand::RenameRoom(name.to_string()))
            }
            "delete" => required(arg, "/delete <room-id>")
                .map(|id| ReplCommand::DeleteRoom(RoomId::new(id))),
            "up" => position(arg, "/up <n>").map(|position| ReplCommand::Rate {
                position,
                rating: Rating::Up,
            }),
            "down" => position(arg, "/down <n>").map(|position| ReplCommand::Rate {
                position,
                rating: Rating::Down,
            }),
            "help" => Ok(ReplCommand::Help),
            "quit" | "exit" => Ok(ReplCommand::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn required<'a>(arg: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(arg)
    }
}

fn position(arg: &str, usage: &'static str) -> Result<usize, CommandError> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::Usage(usage)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_message() {
        // テスト項目: スラッシュで始まらない行はメッセージとして扱われる
        // given (前提条件):
        let line = "hello there";

        // when (操作):
        let result = ReplCommand::parse(line);

        // then (期待する結果):
        assert_eq!(result, Ok(ReplCommand::Send("hello there".to_string())));
    }

    #[test]
    fn test_room_commands() {
        // テスト項目: ルーム操作コマンドが引数付きで解析される
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(ReplCommand::parse("/rooms"), Ok(ReplCommand::ListRooms));
        assert_eq!(ReplCommand::parse("/new"), Ok(ReplCommand::NewRoom));
        assert_eq!(
            ReplCommand::parse("/select 42"),
            Ok(ReplCommand::SelectRoom(RoomId::new("42")))
        );
        assert_eq!(
            ReplCommand::parse("/rename  Quiet Corner "),
            Ok(ReplCommand::RenameRoom("Quiet Corner".to_string()))
        );
        assert_eq!(
            ReplCommand::parse("/delete 7"),
            Ok(ReplCommand::DeleteRoom(RoomId::new("7")))
        );
    }

    #[test]
    fn test_rating_commands() {
        // テスト項目: /up と /down は 1 始まりの位置を受け取る
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(
            ReplCommand::parse("/up 2"),
            Ok(ReplCommand::Rate {
                position: 2,
                rating: Rating::Up
            })
        );
        assert_eq!(
            ReplCommand::parse("/down 1"),
            Ok(ReplCommand::Rate {
                position: 1,
                rating: Rating::Down
            })
        );
        assert_eq!(
            ReplCommand::parse("/up 0"),
            Err(CommandError::Usage("/up <n>"))
        );
        assert_eq!(
            ReplCommand::parse("/down x"),
            Err(CommandError::Usage("/down <n>"))
        );
    }

    #[test]
    fn test_missing_argument_reports_usage() {
        // テスト項目: 必須引数が無い場合は使い方を返す
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(
            ReplCommand::parse("/select"),
            Err(CommandError::Usage("/select <room-id>"))
        );
        assert_eq!(
            ReplCommand::parse("/rename   "),
            Err(CommandError::Usage("/rename <name>"))
        );
    }

    #[test]
    fn test_unknown_command() {
        // テスト項目: 未知のコマンドはエラーになる
        // given (前提条件):
        let line = "/dance";

        // when (操作):
        let result = ReplCommand::parse(line);

        // then (期待する結果):
        assert_eq!(result, Err(CommandError::Unknown("dance".to_string())));
    }
}
