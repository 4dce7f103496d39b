use crate::anim::SharedFrame;
use crate::events::AppEvent;
use crate::gesture::SharedGestureState;
use crate::protocol::{Command, ProtocolError, SOCKET_PATH};
use async_channel::Sender;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

/// Read-only views the server answers queries from.
#[derive(Debug, Clone, Default)]
pub struct Inspect {
    pub gesture: SharedGestureState,
    pub frame: SharedFrame,
}

pub async fn run_server(tx: Sender<AppEvent>, inspect: Inspect) {
    // Cleanup old socket if it exists
    if fs_err::metadata(SOCKET_PATH).is_ok() {
        let _ = fs_err::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                let inspect = inspect.clone();
                tokio::spawn(async move {
                    serve(stream, tx, inspect).await;
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn serve(stream: UnixStream, tx: Sender<AppEvent>, inspect: Inspect) {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let command = match line.parse::<Command>() {
            Ok(c) => c,
            Err(ProtocolError::Empty) => continue,
            Err(e) => {
                log::warn!("Ignoring socket line '{}': {}", line.trim(), e);
                continue;
            }
        };

        let reply = match command {
            Command::State => inspect.gesture.read().to_string(),
            Command::Frame => inspect
                .frame
                .read()
                .map_or_else(|| "none".to_string(), |f| f.to_string()),
            _ => {
                if let Some(event) = app_event(command, Instant::now())
                    && tx.send(event).await.is_err()
                {
                    log::error!("Interaction loop is gone, closing connection");
                    return;
                }
                continue;
            }
        };

        if let Err(e) = write.write_all(format!("{}\n", reply.trim_end()).as_bytes()).await {
            log::warn!("Failed to answer '{}': {}", command, e);
            return;
        }
    }
}

/// Events are stamped on receipt so activation timing follows the daemon's clock.
fn app_event(command: Command, at: Instant) -> Option<AppEvent> {
    match command {
        Command::Show => Some(AppEvent::Show),
        Command::Hide => Some(AppEvent::Hide),
        other => other.pointer_event(at).map(AppEvent::Pointer),
    }
}
