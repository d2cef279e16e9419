mod controller;
mod state;

pub use {
    controller::{PollPolicy, ReadyAudio, RecorderCommand, SessionController},
    state::SessionPhase,
};
