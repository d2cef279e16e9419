/// Lifecycle phase of a recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session is active.
    Idle,
    /// The external recorder process is capturing audio.
    Recording,
    /// The recorder was signalled; waiting for the output file to settle.
    Stopping,
    /// The output file was read successfully and is held in memory.
    Ready,
    /// The session failed; a new session may be started after reset.
    Failed,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Recording => "recording",
            SessionPhase::Stopping => "stopping",
            SessionPhase::Ready => "ready",
            SessionPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}
