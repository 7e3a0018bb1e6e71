use crate::message::Message;

/// State threaded through the conductor's two-node graph (§4.7).
///
/// `round` counts completed replan cycles (incremented each time the joiner
/// chooses `Replan`), checked against `Conductor`'s `max_rounds` option.
#[derive(Clone, Debug, Default)]
pub struct ConductorState {
    pub messages: Vec<Message>,
    pub round: usize,
}

impl ConductorState {
    pub fn new(human_message: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::human(human_message)],
            round: 0,
        }
    }

    /// True once the last message is an `AIMessage` — the conductor's exit condition.
    pub fn is_done(&self) -> bool {
        matches!(self.messages.last(), Some(Message::Ai(_)))
    }

    /// The text of the final `AIMessage`, once the run has completed.
    pub fn final_response(&self) -> Option<&str> {
        match self.messages.last() {
            Some(Message::Ai(text)) => Some(text.as_str()),
            _ => None,
        }
    }
}
