//! Conversation turn handlers.

mod submit_turn;

pub use submit_turn::{SubmitTurnCommand, SubmitTurnHandler, TurnOutcome};
