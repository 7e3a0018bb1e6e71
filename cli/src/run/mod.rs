//! Drives one or more conductor turns and prints output for the `skein` binary.

mod display;

use std::io::Write as _;

use serde_json::Value;
use skein::{ConductorState, RunError, RunOptions, StreamEvent};

use display::{format_conductor_state_display, truncate_display};

/// Renders one `StreamEvent<ConductorState>` as a JSON value (for `--json` output).
fn event_to_json(ev: &StreamEvent<ConductorState>) -> Value {
    match ev {
        StreamEvent::Values(state) => serde_json::json!({
            "type": "values",
            "messages": state.messages,
            "round": state.round,
        }),
        StreamEvent::Updates { node_id, state } => serde_json::json!({
            "type": "updates",
            "node_id": node_id,
            "messages": state.messages,
            "round": state.round,
        }),
        StreamEvent::Messages { chunk, metadata } => serde_json::json!({
            "type": "messages",
            "node": metadata.node,
            "content": chunk.content,
        }),
        StreamEvent::Custom(value) => serde_json::json!({
            "type": "custom",
            "data": value,
        }),
    }
}

/// Prints one `StreamEvent` to stderr in human-readable form (verbose mode).
fn print_event_verbose(ev: &StreamEvent<ConductorState>, display_max_len: usize) {
    match ev {
        StreamEvent::Updates { node_id, state } => {
            eprintln!("--- state after {} ---", node_id);
            eprintln!("{}", format_conductor_state_display(state, display_max_len));
        }
        StreamEvent::Messages { chunk, metadata } => {
            eprint!("[{}] {}", metadata.node, chunk.content);
            let _ = std::io::stderr().flush();
        }
        StreamEvent::Custom(value) => {
            eprintln!("--- custom event ---\n{}", value);
        }
        StreamEvent::Values(_) => {}
    }
}

/// Result of one turn: the final reply text, plus JSON stream events when `--json` was requested.
pub struct TurnOutput {
    pub reply: String,
    pub events: Option<Vec<Value>>,
}

/// Runs one conversation turn and returns its reply (plus collected JSON events, when requested).
///
/// `verbose` prints each node's state to stderr as the run progresses; `json` collects every
/// stream event as a JSON value instead (verbose and json are mutually exclusive display modes).
pub async fn run_one_turn(
    opts: &RunOptions,
    verbose: bool,
    json: bool,
    display_max_len: usize,
) -> Result<TurnOutput, RunError> {
    if !verbose && !json {
        let state = skein::run_agent(opts, None).await?;
        return Ok(TurnOutput {
            reply: state.final_response().unwrap_or_default().to_string(),
            events: None,
        });
    }

    let events: std::sync::Arc<std::sync::Mutex<Vec<Value>>> = Default::default();
    let events_clone = events.clone();
    let on_event: Box<dyn FnMut(StreamEvent<ConductorState>) + Send> = if json {
        Box::new(move |ev| {
            events_clone.lock().unwrap().push(event_to_json(&ev));
        })
    } else {
        Box::new(move |ev| print_event_verbose(&ev, display_max_len))
    };

    let state = skein::run_agent(opts, Some(on_event)).await?;
    let reply = state.final_response().unwrap_or_default().to_string();
    let events = if json {
        Some(events.lock().unwrap().clone())
    } else {
        None
    };
    Ok(TurnOutput { reply, events })
}

/// Truncates a reply for non-JSON display. `max_len == 0` means no truncation.
pub fn truncate_reply(reply: &str, max_len: usize) -> String {
    truncate_display(reply, max_len)
}
