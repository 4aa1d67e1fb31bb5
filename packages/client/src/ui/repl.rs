//! Interactive session loop.

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{mpsc, watch};

use crate::{
    domain::Role,
    session::{SendOutcome, SessionHandle, SessionSnapshot},
};

use super::{ReplCommand, SnapshotFormatter, redisplay_prompt};

/// Run the REPL until the user quits, then shut the session down.
///
/// Input is read on a dedicated thread (rustyline is blocking); session
/// changes are rendered by a separate task as snapshots arrive.
pub async fn run_repl(session: SessionHandle, username: String) {
    let render_task = tokio::spawn(render_snapshots(session.subscribe(), username.clone()));

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let prompt = format!("{}> ", username);
    let _readline_handle = std::thread::spawn(move || read_lines(&prompt, input_tx));

    println!(
        "\nYou are '{}'. Type messages and press Enter to send. /help lists commands.\n",
        username
    );
    session.initialize().await;

    while let Some(line) = input_rx.recv().await {
        match ReplCommand::parse(&line) {
            Ok(ReplCommand::Quit) => break,
            Ok(command) => execute(&session, command).await,
            Err(e) => println!("{}", e),
        }
        redisplay_prompt(&username);
    }

    tracing::info!("Leaving chat");
    session.shutdown().await;
    render_task.abort();
}

async fn execute(session: &SessionHandle, command: ReplCommand) {
    match command {
        ReplCommand::Send(text) => {
            if let SendOutcome::Failed { error, .. } = session.send_message(text).await {
                print!("{}", SnapshotFormatter::format_send_failure(&error));
            }
        }
        ReplCommand::ListRooms => {
            let snapshot = session.snapshot();
            let current = snapshot.current_room.as_ref().map(|r| &r.id);
            print!(
                "{}",
                SnapshotFormatter::format_room_list(&snapshot.rooms, current)
            );
        }
        ReplCommand::NewRoom => session.create_room().await,
        ReplCommand::SelectRoom(room_id) => {
            let room = session
                .snapshot()
                .rooms
                .into_iter()
                .find(|r| r.id == room_id);
            match room {
                Some(room) => session.select_room(Some(room)).await,
                None => println!("Unknown room {}. Try /rooms.", room_id),
            }
        }
        ReplCommand::RenameRoom(name) => {
            if session.snapshot().current_room.is_none() {
                println!("No room selected.");
            } else {
                session.rename_current_room(name).await;
            }
        }
        ReplCommand::DeleteRoom(room_id) => session.delete_room(room_id).await,
        ReplCommand::Rate { position, rating } => {
            let snapshot = session.snapshot();
            match snapshot.messages.get(position - 1) {
                Some(message) if message.role() == Role::Assistant => {
                    session.set_feedback(message.id(), rating).await
                }
                Some(_) => println!("Only replies can be rated."),
                None => println!("No message [{}].", position),
            }
        }
        ReplCommand::Help => print!("{}", SnapshotFormatter::format_help()),
        ReplCommand::Quit => {}
    }
}

async fn render_snapshots(mut snapshots: watch::Receiver<SessionSnapshot>, username: String) {
    let mut previous = snapshots.borrow_and_update().clone();
    while snapshots.changed().await.is_ok() {
        let next = snapshots.borrow_and_update().clone();
        if let Some(output) = SnapshotFormatter::format_changes(&previous, &next, &username) {
            print!("{}", output);
            redisplay_prompt(&username);
        }
        previous = next;
    }
}

fn read_lines(prompt: &str, input_tx: mpsc::UnboundedSender<String>) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            tracing::error!("Failed to initialize readline: {}", e);
            return;
        }
    };

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if !line.is_empty() {
                    rl.add_history_entry(line).ok();
                    if input_tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                tracing::info!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                tracing::info!("EOF");
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {}", err);
                break;
            }
        }
    }
}
