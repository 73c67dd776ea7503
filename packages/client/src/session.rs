//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use tsunagi_shared::protocol::{
    ClientMessage, PeerRole, ROOM_OCCUPIED_MESSAGE, ServerMessage,
};

use crate::{
    error::ClientError,
    formatter::{MessageFormatter, local_time},
    input::parse_input,
    ui::redisplay_prompt,
};

/// Why the read half of the session stopped.
enum ReadOutcome {
    /// The relay announced the meeting is over.
    MeetingEnded,
    /// The sender slot was already taken.
    RoomOccupied,
    /// The connection dropped or errored.
    ConnectionLost,
}

/// Why the write half of the session stopped.
enum WriteOutcome {
    /// The user left the room or closed the prompt.
    Finished,
    /// A send failed.
    ConnectionLost,
}

/// Run one WebSocket session: join the room, relay prompt input, print
/// received frames. Returns when the session ends or the connection drops.
pub async fn run_client_session(
    url: &str,
    room_id: &str,
    role: PeerRole,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to signaling relay");
    println!(
        "\nJoined room '{}' as {}. Type a message and press Enter to chat.\n\
         Commands: /offer <sdp> [r_link], /answer <sdp>, /ice <candidate>, /editor <content>, /leave\n",
        room_id, role
    );

    let (mut write, mut read) = ws_stream.split();

    // Claim the role before anything else flows.
    let join = ClientMessage::JoinRoom {
        room_id: room_id.to_string(),
        role,
    };
    let join_json =
        serde_json::to_string(&join).map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write
        .send(Message::Text(join_json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    let prompt_label = format!("{}@{}", role, room_id);

    // Spawn a task to handle incoming frames
    let label_for_read = prompt_label.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(ServerMessage::ChatMessage { text }) => {
                            print!(
                                "{}",
                                MessageFormatter::format_chat_message(&text, &local_time())
                            );
                        }
                        Ok(ServerMessage::EditorContent { content }) => {
                            print!("{}", MessageFormatter::format_editor_content(&content));
                        }
                        Ok(ServerMessage::CreateOffer { sdp, r_link }) => {
                            print!("{}", MessageFormatter::format_offer(&sdp, &r_link));
                        }
                        Ok(ServerMessage::CreateAnswer { sdp }) => {
                            print!("{}", MessageFormatter::format_answer(&sdp));
                        }
                        Ok(ServerMessage::IceCandidate { candidate }) => {
                            print!("{}", MessageFormatter::format_ice_candidate(&candidate));
                        }
                        Ok(ServerMessage::ParticipantLeft { role }) => {
                            print!("{}", MessageFormatter::format_participant_left(role));
                        }
                        Ok(ServerMessage::MeetingEnded { role }) => {
                            print!("{}", MessageFormatter::format_meeting_ended(role));
                            return ReadOutcome::MeetingEnded;
                        }
                        Ok(ServerMessage::Error { message }) => {
                            print!("{}", MessageFormatter::format_error(&message));
                            if message == ROOM_OCCUPIED_MESSAGE {
                                return ReadOutcome::RoomOccupied;
                            }
                        }
                        Err(_) => {
                            print!("{}", MessageFormatter::format_raw_message(&text));
                        }
                    }
                    redisplay_prompt(&label_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return ReadOutcome::ConnectionLost;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return ReadOutcome::ConnectionLost;
                }
                _ => {}
            }
        }
        ReadOutcome::ConnectionLost
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let label_for_prompt = prompt_label.clone();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", label_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
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
    });

    // Spawn a task to turn prompt lines into frames
    let room_id_for_write = room_id.to_string();
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let Some(message) = parse_input(&line, &room_id_for_write, role) else {
                if line.starts_with('/') {
                    eprintln!("Unknown command: {}", line);
                }
                continue;
            };
            let leaving = matches!(message, ClientMessage::TerminateRoom { .. });

            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize frame: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send frame: {}", e);
                return WriteOutcome::ConnectionLost;
            }

            if leaving {
                tracing::info!("Left the room");
                return WriteOutcome::Finished;
            }
        }

        WriteOutcome::Finished
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            match read_result.unwrap_or(ReadOutcome::ConnectionLost) {
                ReadOutcome::MeetingEnded => Ok(()),
                ReadOutcome::RoomOccupied => Err(ClientError::RoomOccupied(room_id.to_string())),
                ReadOutcome::ConnectionLost => {
                    Err(ClientError::ConnectionError("Connection lost".to_string()))
                }
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            match write_result.unwrap_or(WriteOutcome::ConnectionLost) {
                WriteOutcome::Finished => Ok(()),
                WriteOutcome::ConnectionLost => {
                    Err(ClientError::ConnectionError("Connection lost".to_string()))
                }
            }
        }
    }
}
