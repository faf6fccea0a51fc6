//! Byte encoding of a command log.
//!
//! A payload is a JSON document:
//!
//! ```text
//! {"version":1,"canvas":{"width":800,"height":480},"commands":[
//!   {"op":"rectangle","top_left":{"x":0,"y":0},...},
//!   {"op":"text","position":{"x":10,"y":20},"message":"Mon","font":{"family":"Inter","size":25.0},...}
//! ]}
//! ```
//!
//! Encoding is a pure function of the log. Decoding is all-or-nothing: the
//! first bad record rejects the whole stream.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::{CanvasSize, DrawCommand};

/// Version written into every payload; anything else is rejected on decode.
pub const WIRE_VERSION: u32 = 1;

/// Errors raised while encoding or decoding a draw stream
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("malformed draw stream: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed {op:?} record at index {index}: {source}")]
    MalformedRecord {
        index: usize,
        op: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("record at index {index} carries no operation tag")]
    UntaggedRecord { index: usize },

    #[error("unknown draw command {op:?} at index {index}")]
    UnknownCommand { index: usize, op: String },

    #[error("unsupported stream version {found} (this build reads {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("failed to encode draw stream: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

impl WireError {
    /// True for every failure that means "these bytes are not a valid stream",
    /// as opposed to a well-formed stream from a newer producer.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            WireError::Malformed { .. }
                | WireError::MalformedRecord { .. }
                | WireError::UntaggedRecord { .. }
        )
    }
}

pub type WireResult<T> = Result<T, WireError>;

/// A decoded stream: the canvas it was recorded against and its commands in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Payload {
    pub canvas: CanvasSize,
    pub commands: Vec<DrawCommand>,
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    canvas: CanvasSize,
    commands: &'a [DrawCommand],
}

#[derive(Deserialize)]
struct RawEnvelope {
    version: u32,
    canvas: CanvasSize,
    commands: Vec<Value>,
}

/// Encode a command log recorded against `canvas`.
pub fn encode(canvas: CanvasSize, commands: &[DrawCommand]) -> WireResult<Vec<u8>> {
    let envelope = Envelope {
        version: WIRE_VERSION,
        canvas,
        commands,
    };
    serde_json::to_vec(&envelope).map_err(|source| WireError::Encode { source })
}

/// Decode a payload produced by [`encode`].
pub fn decode(bytes: &[u8]) -> WireResult<Payload> {
    let raw: RawEnvelope =
        serde_json::from_slice(bytes).map_err(|source| WireError::Malformed { source })?;

    if raw.version != WIRE_VERSION {
        return Err(WireError::UnsupportedVersion {
            found: raw.version,
            expected: WIRE_VERSION,
        });
    }

    let commands = raw
        .commands
        .into_iter()
        .enumerate()
        .map(|(index, record)| decode_record(index, record))
        .collect::<WireResult<Vec<_>>>()?;

    Ok(Payload {
        canvas: raw.canvas,
        commands,
    })
}

fn decode_record(index: usize, record: Value) -> WireResult<DrawCommand> {
    let op = match record.get("op").and_then(Value::as_str) {
        Some(op) => op.to_string(),
        None => return Err(WireError::UntaggedRecord { index }),
    };

    if !DrawCommand::KNOWN_OPS.contains(&op.as_str()) {
        return Err(WireError::UnknownCommand { index, op });
    }

    serde_json::from_value(record).map_err(|source| WireError::MalformedRecord { index, op, source })
}
