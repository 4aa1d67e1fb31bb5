//! Snapshot formatting for terminal display.

use kaiwa_shared::time::timestamp_to_rfc3339;

use crate::{
    connection::ConnectionState,
    domain::{ChatMessage, Feedback, Role, Room, RoomId},
    session::{Notification, SendError, SessionSnapshot},
};

const RULE: &str = "============================================================";

const HELP: &str = "\
Commands:
  /rooms            list your rooms
  /new              create a room and switch to it
  /select <id>      switch to a room
  /rename <name>    rename the current room
  /delete <id>      delete a room
  /up <n>           thumbs-up reply number n
  /down <n>         thumbs-down reply number n
  /quit             leave
Anything else is sent to the current room.
";

/// Session snapshot formatter for terminal display
pub struct SnapshotFormatter;

impl SnapshotFormatter {
    /// Format the room list, marking the current room with `*`
    pub fn format_room_list(rooms: &[Room], current: Option<&RoomId>) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\nRooms:\n", RULE));
        if rooms.is_empty() {
            output.push_str("(No rooms)\n");
        }
        for room in rooms {
            let marker = if Some(&room.id) == current { "*" } else { " " };
            output.push_str(&format!("{} {:>4}  {}\n", marker, room.id, room.name));
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format the banner shown when entering a room, followed by its log
    pub fn format_room_entered(room: &Room, messages: &[ChatMessage], username: &str) -> String {
        let mut output = format!("\n{}\nRoom: {} ({})\n{}\n", RULE, room.name, room.id, RULE);
        for (index, message) in messages.iter().enumerate() {
            output.push_str(&Self::format_message(index + 1, message, username));
        }
        output
    }

    /// Format one message with its 1-based position in the log
    ///
    /// # Arguments
    ///
    /// * `position` - Position used by `/up` and `/down`
    /// * `message` - The message to render
    /// * `username` - Display name for the local user's messages
    pub fn format_message(position: usize, message: &ChatMessage, username: &str) -> String {
        let author = match message.role() {
            Role::User => username,
            Role::Assistant => "assistant",
        };
        let mark = match message.feedback() {
            Feedback::None => "",
            Feedback::Up => " (+1)",
            Feedback::Down => " (-1)",
        };
        format!(
            "[{}] {} @{}: {}{}\n",
            position,
            timestamp_to_rfc3339(message.timestamp()).unwrap_or_else(|| "-".to_string()),
            author,
            message.content(),
            mark
        )
    }

    pub fn format_connection(state: &ConnectionState) -> String {
        match state {
            ConnectionState::Disconnected => "[disconnected]\n".to_string(),
            ConnectionState::Connecting => "[connecting...]\n".to_string(),
            ConnectionState::Open => "[connected]\n".to_string(),
            ConnectionState::ClosedWithError(reason) => format!("[connection error: {}]\n", reason),
        }
    }

    pub fn format_notification(notification: &Notification) -> String {
        format!("! {}\n", notification.message)
    }

    pub fn format_send_failure(error: &SendError) -> String {
        format!("! Message not sent: {}\n", error)
    }

    pub fn format_help() -> &'static str {
        HELP
    }

    /// Describe what changed between two snapshots, or `None` if nothing visible did.
    pub fn format_changes(
        previous: &SessionSnapshot,
        next: &SessionSnapshot,
        username: &str,
    ) -> Option<String> {
        let mut output = String::new();
        let previous_id = previous.current_room.as_ref().map(|r| &r.id);
        let next_id = next.current_room.as_ref().map(|r| &r.id);

        if previous_id != next_id {
            match &next.current_room {
                Some(room) => {
                    output.push_str(&Self::format_room_entered(room, &next.messages, username))
                }
                None => output.push_str("\n(No room selected)\n"),
            }
        } else {
            if let (Some(before), Some(after)) = (&previous.current_room, &next.current_room)
                && before.name != after.name
            {
                output.push_str(&format!("Room renamed to '{}'\n", after.name));
            }
            for (index, message) in next.messages.iter().enumerate() {
                let changed = match previous.messages.get(index) {
                    Some(before) => before.feedback() != message.feedback(),
                    None => true,
                };
                if changed {
                    output.push_str(&Self::format_message(index + 1, message, username));
                }
            }
        }

        if previous.connection != next.connection {
            output.push_str(&Self::format_connection(&next.connection));
        }

        if let Some(notification) = &next.notification
            && previous.notification.as_ref().map(|n| n.id) != Some(notification.id)
        {
            output.push_str(&Self::format_notification(notification));
        }

        if output.is_empty() { None } else { Some(output) }
    }
}
