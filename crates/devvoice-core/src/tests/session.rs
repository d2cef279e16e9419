use crate::{PollPolicy, RecorderCommand, SessionController, SessionPhase, VoiceError};

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};

fn fake_recorder(scratch: &std::path::Path) -> RecorderCommand {
    // A stand-in recorder that stays alive until killed; the output path and
    // duration ceiling land in $0/$1 and are ignored.
    RecorderCommand {
        program: "/bin/sh".to_string(),
        args: vec!["-c".to_string(), "exec sleep 30".to_string()],
        max_duration_secs: 300,
        scratch_dir: scratch.to_path_buf(),
    }
}

fn fast_poll() -> PollPolicy {
    PollPolicy {
        grace: Duration::from_millis(20),
        interval: Duration::from_millis(20),
        max_attempts: 10,
        min_bytes: 200,
    }
}

/// WHAT: A missing recorder program yields SpawnError and leaves phase Idle
/// WHY: Spawn failures must be reported without corrupting session state
#[tokio::test]
async fn given_missing_program_when_starting_then_spawn_error_and_idle() {
    // Given: A recorder command pointing at a non-existent program
    let scratch = tempfile::tempdir().unwrap();
    let recorder = RecorderCommand {
        program: "/nonexistent/devvoice-recorder".to_string(),
        args: Vec::new(),
        max_duration_secs: 300,
        scratch_dir: scratch.path().to_path_buf(),
    };
    let mut session = SessionController::new(recorder, fast_poll());

    // When: Starting a session
    let result = session.start().await;

    // Then: SpawnError is returned and the phase stays Idle
    assert!(matches!(result, Err(VoiceError::SpawnError { .. })));
    assert_eq!(session.phase(), SessionPhase::Idle);
}

/// WHAT: start() while a session is active is rejected with SessionActive
/// WHY: Prevents orphaned recorder processes from competing sessions
#[tokio::test]
async fn given_active_session_when_starting_again_then_session_active_error() {
    // Given: A controller with a running session
    let scratch = tempfile::tempdir().unwrap();
    let mut session = SessionController::new(fake_recorder(scratch.path()), fast_poll());
    session.start().await.unwrap();

    // When: Starting a second session
    let result = session.start().await;

    // Then: The second start is rejected and the first session is untouched
    assert!(matches!(result, Err(VoiceError::SessionActive { .. })));
    assert_eq!(session.phase(), SessionPhase::Recording);

    session.cancel().await;
}

/// WHAT: stop() reaches Ready and exposes the output bytes base64-encoded
/// WHY: The presentation surface previews exactly what the recorder captured
#[tokio::test]
async fn given_synthesized_output_when_stopping_then_ready_with_exact_bytes() {
    // Given: A recording session whose output file appears with 5000 bytes
    let scratch = tempfile::tempdir().unwrap();
    let mut session = SessionController::new(fake_recorder(scratch.path()), fast_poll());
    session.start().await.unwrap();

    let bytes = vec![0x5Au8; 5000];
    let output_path = session.output_path().unwrap().to_path_buf();
    tokio::fs::write(&output_path, &bytes).await.unwrap();

    // When: Stopping the session
    let audio = session.stop().await.unwrap();

    // Then: The controller is Ready with exactly those bytes encoded
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(audio.byte_len, 5000);
    assert_eq!(audio.mime_type, "audio/wav");
    assert_eq!(audio.data, STANDARD.encode(&bytes));
}

/// WHAT: stop() fails with FileNotCreated when no file ever appears
/// WHY: Poll exhaustion must be distinguishable from an empty capture
#[tokio::test]
async fn given_no_output_file_when_stopping_then_file_not_created_and_failed() {
    // Given: A recording session whose recorder never writes its output
    let scratch = tempfile::tempdir().unwrap();
    let mut session = SessionController::new(fake_recorder(scratch.path()), fast_poll());
    session.start().await.unwrap();

    // When: Stopping and exhausting the poll budget
    let result = session.stop().await;

    // Then: FileNotCreated is reported and the phase is Failed
    assert!(matches!(result, Err(VoiceError::FileNotCreated { .. })));
    assert_eq!(session.phase(), SessionPhase::Failed);
}

/// WHAT: An output file below the size threshold yields NoAudioCaptured
/// WHY: A header-only file means the microphone produced no data
#[tokio::test]
async fn given_undersized_output_when_stopping_then_no_audio_captured() {
    // Given: A recording session whose output file stays under 200 bytes
    let scratch = tempfile::tempdir().unwrap();
    let mut session = SessionController::new(fake_recorder(scratch.path()), fast_poll());
    session.start().await.unwrap();

    let output_path = session.output_path().unwrap().to_path_buf();
    tokio::fs::write(&output_path, vec![0u8; 50]).await.unwrap();

    // When: Stopping and exhausting the poll budget
    let result = session.stop().await;

    // Then: NoAudioCaptured is reported and the phase is Failed
    assert!(matches!(result, Err(VoiceError::NoAudioCaptured { .. })));
    assert_eq!(session.phase(), SessionPhase::Failed);
}

/// WHAT: cancel() from Recording resets to Idle without error
/// WHY: Panel teardown must kill the recorder and allow a fresh session
#[tokio::test]
async fn given_recording_when_cancelled_then_idle() {
    // Given: A controller with a running session
    let scratch = tempfile::tempdir().unwrap();
    let mut session = SessionController::new(fake_recorder(scratch.path()), fast_poll());
    session.start().await.unwrap();
    assert_eq!(session.phase(), SessionPhase::Recording);

    // When: Cancelling the session
    session.cancel().await;

    // Then: The controller is Idle and a new session can start
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.output_path().is_none());
    session.start().await.unwrap();
    session.cancel().await;
}

/// WHAT: stop() without an active session yields NoActiveSession
/// WHY: The phase check is the reentrancy guard between interleaved handlers
#[tokio::test]
async fn given_idle_controller_when_stopping_then_no_active_session_error() {
    // Given: An idle controller
    let scratch = tempfile::tempdir().unwrap();
    let mut session = SessionController::new(fake_recorder(scratch.path()), fast_poll());

    // When: Stopping without a session
    let result = session.stop().await;

    // Then: NoActiveSession is returned and the phase stays Idle
    assert!(matches!(result, Err(VoiceError::NoActiveSession { .. })));
    assert_eq!(session.phase(), SessionPhase::Idle);
}
