//! Replaying adapters that serve recorded interactions.

pub mod filesystem;
pub mod llm;

use std::sync::{Mutex, PoisonError};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::BoxError;

pub use filesystem::ReplayingFileSystem;
pub use llm::ReplayingLlmClient;

/// Pulls the next recorded output for `port::method`.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    replayer.next_interaction(port, method).output.clone()
}

/// Turns a recorded output back into a `Result`.
///
/// Mirror of `recording::record_result`: expects `{"ok": <value>}` or
/// `{"err": "message"}`. A bare value is treated as `ok`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, BoxError> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
