use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};
use tracing::warn;

use crate::cards::Outbound;
use crate::engine::{Engine, EngineError};
use crate::intent::Activity;
use crate::limits::MAX_LINE_LEN;

/// Serve one transport connection: one JSON activity per line in, one JSON
/// payload per line out. Turns on a connection are processed strictly in
/// order, which upholds the engine's single-writer-per-scope precondition;
/// the host must not spread one conversation across connections.
pub async fn process_connection(socket: TcpStream, engine: Arc<Engine>) -> Result<(), WireError> {
    let mut framed = Framed::new(socket, LinesCodec::new_with_max_length(MAX_LINE_LEN));

    while let Some(line) = framed.next().await {
        let line = line?;
        let responses = match serde_json::from_str::<Activity>(&line) {
            Ok(activity) => engine.process_turn(&activity),
            Err(e) => {
                // Malformed input costs the turn, never the connection.
                let err = EngineError::BadActivity(e.to_string());
                warn!(%err, "turn dropped");
                vec![Outbound::text(format!("Could not read that activity: {e}"))]
            }
        };
        for payload in responses {
            let json = serde_json::to_string(&payload).map_err(WireError::Encode)?;
            framed.send(json).await?;
        }
    }

    Ok(())
}

#[derive(Debug)]
pub enum WireError {
    Codec(LinesCodecError),
    Encode(serde_json::Error),
}

impl From<LinesCodecError> for WireError {
    fn from(e: LinesCodecError) -> Self {
        WireError::Codec(e)
    }
}

impl std::fmt::Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireError::Codec(e) => write!(f, "line codec: {e}"),
            WireError::Encode(e) => write!(f, "payload encoding: {e}"),
        }
    }
}

impl std::error::Error for WireError {}
