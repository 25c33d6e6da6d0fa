//! Capture-session state machine shared by the webcam and upload scanners.
//!
//! All transitions are synchronous; the surrounding component performs the
//! actual I/O (device acquisition, frame encode, request dispatch) and
//! reports back through these methods. The `Classifying` phase doubles as
//! the single-flight guard: at most one classification request is ever in
//! flight per session.

use shared::Prediction;
use thiserror::Error;

/// Lifecycle of one scanner interaction flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Streaming,
    Capturing,
    Classifying,
    Error,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Streaming => "streaming",
            Phase::Capturing => "capturing",
            Phase::Classifying => "classifying",
            Phase::Error => "error",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("camera is not streaming")]
    NotStreaming,
    #[error("a classification is already in flight")]
    InFlight,
}

/// Client-local state for one scanner flow. Generic over the stream handle
/// type; the webcam view instantiates it with a track-stopping guard, the
/// upload view never holds a stream at all.
pub struct CaptureSession<S> {
    stream: Option<S>,
    phase: Phase,
    last_prediction: Option<Prediction>,
    last_error: Option<String>,
}

impl<S> Default for CaptureSession<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> CaptureSession<S> {
    pub fn new() -> Self {
        Self {
            stream: None,
            phase: Phase::Idle,
            last_prediction: None,
            last_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last_prediction.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True while a capture or classification is in progress.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Capturing | Phase::Classifying)
    }

    /// Camera acquired. The session owns the handle until `stop`.
    pub fn stream_started(&mut self, stream: S) {
        self.stream = Some(stream);
        self.phase = Phase::Streaming;
        self.last_error = None;
    }

    /// Device acquisition failed (permission denied or no device).
    /// Recoverable by starting the camera again.
    pub fn stream_failed(&mut self, message: impl Into<String>) {
        self.stream = None;
        self.phase = Phase::Error;
        self.last_error = Some(message.into());
    }

    /// Drop the stream handle and return to `Idle`. Safe to call with no
    /// active stream. An in-flight request is not cancelled; its result is
    /// applied later against whatever stream state exists then.
    pub fn stop(&mut self) {
        self.stream = None;
        self.phase = Phase::Idle;
    }

    /// Freeze a frame off the live stream. Valid only while streaming.
    pub fn begin_capture(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Streaming => {
                self.phase = Phase::Capturing;
                self.last_error = None;
                Ok(())
            }
            Phase::Capturing | Phase::Classifying => Err(SessionError::InFlight),
            Phase::Idle | Phase::Error => Err(SessionError::NotStreaming),
        }
    }

    /// Hand an encoded payload off for classification. Rejected while a
    /// previous submission is still outstanding.
    pub fn begin_classify(&mut self) -> Result<(), SessionError> {
        if self.phase == Phase::Classifying {
            return Err(SessionError::InFlight);
        }
        self.phase = Phase::Classifying;
        Ok(())
    }

    /// Apply a classification result. Returns to `Streaming` only if the
    /// stream is still held; a stop while the request was in flight leaves
    /// the session in `Idle` with the prediction recorded.
    pub fn resolve_ok(&mut self, prediction: Prediction) {
        self.last_prediction = Some(prediction);
        self.last_error = None;
        self.phase = if self.stream.is_some() {
            Phase::Streaming
        } else {
            Phase::Idle
        };
    }

    /// Record a submission failure. A live stream survives and the session
    /// returns to `Streaming` so the user can retry without re-acquiring
    /// the device; without one the session parks in `Error`.
    pub fn resolve_err(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.phase = if self.stream.is_some() {
            Phase::Streaming
        } else {
            Phase::Error
        };
    }

    /// Surface a validation failure without any phase transition.
    pub fn reject_input(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestSession = CaptureSession<u8>;

    fn prediction(waste_type: &str) -> Prediction {
        Prediction {
            waste_type: waste_type.to_string(),
            ..Prediction::default()
        }
    }

    fn streaming_session() -> TestSession {
        let mut session = TestSession::new();
        session.stream_started(1);
        session
    }

    #[test]
    fn capture_requires_live_stream() {
        let mut session = TestSession::new();
        assert_eq!(session.begin_capture(), Err(SessionError::NotStreaming));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn second_capture_rejected_while_classifying() {
        let mut session = streaming_session();
        session.begin_capture().unwrap();
        session.begin_classify().unwrap();
        assert_eq!(session.begin_capture(), Err(SessionError::InFlight));
        assert_eq!(session.begin_classify(), Err(SessionError::InFlight));
        assert_eq!(session.phase(), Phase::Classifying);
    }

    #[test]
    fn stop_without_stream_is_a_noop() {
        let mut session = TestSession::new();
        session.stop();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.stream().is_none());
    }

    #[test]
    fn success_returns_to_streaming_for_further_captures() {
        let mut session = streaming_session();
        session.begin_capture().unwrap();
        session.begin_classify().unwrap();
        session.resolve_ok(prediction("plastic"));
        assert_eq!(session.phase(), Phase::Streaming);
        assert!(session.stream().is_some());
        assert_eq!(session.last_prediction().unwrap().waste_type, "plastic");
    }

    #[test]
    fn result_after_stop_lands_in_idle() {
        let mut session = streaming_session();
        session.begin_capture().unwrap();
        session.begin_classify().unwrap();
        session.stop();
        session.resolve_ok(prediction("glass"));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.stream().is_none());
        assert_eq!(session.last_prediction().unwrap().waste_type, "glass");
    }

    #[test]
    fn camera_path_failure_keeps_stream_for_retry() {
        let mut session = streaming_session();
        session.begin_capture().unwrap();
        session.begin_classify().unwrap();
        session.resolve_err("network error");
        assert_eq!(session.phase(), Phase::Streaming);
        assert!(session.stream().is_some());
        assert_eq!(session.last_error(), Some("network error"));
        assert!(session.begin_capture().is_ok());
    }

    #[test]
    fn upload_path_failure_parks_in_error_and_allows_retry() {
        let mut session = TestSession::new();
        session.begin_classify().unwrap();
        session.resolve_err("server error: 502");
        assert_eq!(session.phase(), Phase::Error);
        assert!(session.begin_classify().is_ok());
    }

    #[test]
    fn device_failure_is_recoverable() {
        let mut session = TestSession::new();
        session.stream_failed("Camera access denied!");
        assert_eq!(session.phase(), Phase::Error);
        assert!(session.stream().is_none());
        session.stream_started(2);
        assert_eq!(session.phase(), Phase::Streaming);
        assert_eq!(session.last_error(), None);
    }

    #[test]
    fn reject_input_leaves_phase_untouched() {
        let mut session = TestSession::new();
        session.reject_input("Not an image file: notes.txt");
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.last_error(), Some("Not an image file: notes.txt"));
    }
}
