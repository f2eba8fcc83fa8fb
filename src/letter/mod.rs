//! Letter Session: the generate/modify state machine.

pub mod session;

pub use session::{
    format_timestamp, FormInputs, LetterSession, PendingGenerate, PendingModify, RequestToken,
    SessionPhase,
};
