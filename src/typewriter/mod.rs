//! The command typewriter: a looping type / hold / clear animation over a list of
//! commands.
//!
//! [`machine`] holds the pure state machine, [`scheduler`] runs it on tokio timers and
//! [`cursor`] describes the blinking cursor drawn after the text.

mod commands;
mod cursor;
mod machine;
mod scheduler;

pub(crate) use commands::{CommandList, DEFAULT_COMMANDS};
pub(crate) use cursor::Cursor;
pub(crate) use machine::{Snapshot, Timings, Typewriter};
pub(crate) use scheduler::spawn;
