//! Integration tests for the `log_*!` macros and the shared dispatcher.
//!
//! These tests install a [`CaptureBackend`] in the process-wide dispatcher and
//! verify that each macro form produces exactly one backend call carrying the
//! expected severity, text, and call site. The shared dispatcher is global, so
//! every test runs serially.

use std::fmt;
use std::io;
use std::time::{Duration, SystemTime};

use logging::{
    CaptureBackend, Record, RecordSource, Severity, log_debug, log_error, log_info, log_verbose,
    log_warning, set_backend,
};
use serial_test::serial;

fn install_capture() -> CaptureBackend {
    let capture = CaptureBackend::new();
    set_backend(capture.clone());
    capture
}

fn single(capture: &CaptureBackend) -> Record {
    let mut records = capture.drain();
    assert_eq!(records.len(), 1, "expected exactly one backend call");
    records.remove(0)
}

struct Temperature(f32);

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

#[derive(Debug)]
struct QuotaExceeded;

impl fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("quota exceeded")
    }
}

impl std::error::Error for QuotaExceeded {}

// ============================================================================
// Text Overload Tests
// ============================================================================

/// Verifies each severity macro routes text to its own severity.
#[test]
#[serial]
fn text_macros_route_to_matching_severity() {
    let capture = install_capture();

    log_verbose!("v");
    log_info!("i");
    log_warning!("w");
    log_error!("e");
    log_debug!("d");

    let records = capture.drain();
    let severities: Vec<_> = records.iter().map(|r| r.severity).collect();
    assert_eq!(severities, Severity::ALL);
    let messages: Vec<_> = records.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, ["v", "i", "w", "e", "d"]);
    assert!(records.iter().all(|r| r.source == RecordSource::Text));
}

/// Verifies format arguments and inline captures are rendered.
#[test]
#[serial]
fn format_arguments_are_rendered_once() {
    let capture = install_capture();
    let host = "db-1";

    log_info!("connected to {host} in {} ms", 12);

    assert_eq!(single(&capture).message, "connected to db-1 in 12 ms");
}

/// Verifies a trailing comma is accepted after format arguments.
#[test]
#[serial]
fn trailing_comma_is_accepted() {
    let capture = install_capture();

    log_debug!("{} + {} = {}", 1, 1, 2,);

    assert_eq!(single(&capture).message, "1 + 1 = 2");
}

// ============================================================================
// Describable Overload Tests
// ============================================================================

/// Verifies a Display value is logged through its canonical string form.
#[test]
#[serial]
fn describable_values_use_display() {
    let capture = install_capture();
    let reading = Temperature(21.5);
    let status = 404_u16;

    log_info!(reading);
    log_verbose!(String::from("owned text"));
    log_warning!(status);

    let messages: Vec<_> = capture.drain().into_iter().map(|r| r.message).collect();
    assert_eq!(messages, ["21.5°C", "owned text", "404"]);
}

// ============================================================================
// Error Overload Tests
// ============================================================================

/// Verifies error values are logged as their description text.
#[test]
#[serial]
fn error_values_are_logged_as_text() {
    let capture = install_capture();

    log_warning!(error = QuotaExceeded);
    log_error!(error = io::Error::other("boom"));

    let records = capture.drain();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].severity, Severity::Warning);
    assert_eq!(records[0].message, "quota exceeded");
    assert_eq!(records[0].source, RecordSource::Text);
    assert_eq!(records[1].severity, Severity::Error);
    assert_eq!(records[1].message, "boom");
    assert_eq!(records[1].source, RecordSource::Text);
}

/// Verifies a boxed error can be logged by re-borrowing it.
#[test]
#[serial]
fn boxed_errors_can_be_logged() {
    let capture = install_capture();
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(QuotaExceeded);

    log_error!(error = &*boxed);

    assert_eq!(single(&capture).message, "quota exceeded");
}

/// Verifies logging an error produces the same text as logging its description.
#[test]
#[serial]
fn error_round_trip_matches_plain_text() {
    let capture = install_capture();

    let first_line = line!() + 1;
    log_error!(error = io::Error::other("boom"));
    log_error!("boom");

    let records = capture.drain();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].severity, records[1].severity);
    assert_eq!(records[0].message, records[1].message);
    assert_eq!(records[0].site.file(), records[1].site.file());
    assert_eq!(records[0].site.function(), records[1].site.function());
    assert_eq!(records[0].site.line(), first_line);
    assert_eq!(records[1].site.line(), first_line + 1);
}

// ============================================================================
// Timestamp Tests
// ============================================================================

/// Verifies macros stamp the call site with the capture time by default.
#[test]
#[serial]
fn default_timestamp_is_capture_time() {
    let capture = install_capture();
    let before = SystemTime::now();

    log_info!("stamped");

    let stamped = single(&capture).site.timestamp().expect("timestamp");
    assert!(stamped >= before);
    assert!(stamped <= SystemTime::now());
}

/// Verifies an explicit timestamp replaces the capture time.
#[test]
#[serial]
fn explicit_timestamp_is_used() {
    let capture = install_capture();
    let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);

    log_warning!(at = at, "late {}", "event");
    log_error!(at = at, error = QuotaExceeded);

    let records = capture.drain();
    assert_eq!(records[0].message, "late event");
    assert!(records.iter().all(|r| r.site.timestamp() == Some(at)));
}

// ============================================================================
// Replacement Tests
// ============================================================================

/// Verifies calls after a replacement never reach the previous backend.
#[test]
#[serial]
fn replacement_takes_effect_for_subsequent_calls() {
    let first = install_capture();
    log_info!("to first");

    let second = install_capture();
    log_info!("to second");
    log_error!("to second again");

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 2);
}

/// Verifies logging the same message twice yields two identical records.
#[test]
#[serial]
fn repeated_messages_are_not_deduplicated() {
    let capture = install_capture();

    for _ in 0..2 {
        log_info!("same");
    }

    let records = capture.drain();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].message, records[1].message);
    assert_eq!(records[0].site.line(), records[1].site.line());
}
