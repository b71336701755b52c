//! Edge case tests for message payloads passing through the facade.
//!
//! Tests cover:
//! - Empty and whitespace-only messages
//! - Control and special characters
//! - Unicode text
//! - Long lines and many arguments
//! - Rendering of unusual payloads by the console line format

use logging::{
    CallSite, CaptureBackend, Line, Record, Severity, log_debug, log_error, log_info,
    log_verbose, log_warning, set_backend,
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

// ============================================================================
// Empty Message Tests
// ============================================================================

/// Verifies an empty message is still delivered.
#[test]
#[serial]
fn empty_message_is_delivered() {
    let capture = install_capture();

    log_info!("");

    let record = single(&capture);
    assert_eq!(record.severity, Severity::Info);
    assert!(record.message.is_empty());
}

/// Verifies an empty describable value is delivered as empty text.
#[test]
#[serial]
fn empty_describable_is_delivered() {
    let capture = install_capture();
    let nothing = String::new();

    log_debug!(nothing);

    assert!(single(&capture).message.is_empty());
}

/// Verifies whitespace-only messages are not trimmed.
#[test]
#[serial]
fn whitespace_only_message() {
    let capture = install_capture();

    log_verbose!("   ");

    assert_eq!(single(&capture).message, "   ");
}

// ============================================================================
// Special Character Tests
// ============================================================================

/// Verifies newlines in messages are preserved.
#[test]
#[serial]
fn message_with_newlines() {
    let capture = install_capture();

    log_info!("line1\nline2\nline3");

    let message = single(&capture).message;
    assert_eq!(message, "line1\nline2\nline3");
    assert_eq!(message.lines().count(), 3);
}

/// Verifies tabs and carriage returns are preserved.
#[test]
#[serial]
fn message_with_tabs_and_carriage_return() {
    let capture = install_capture();

    log_info!("col1\tcol2\tcol3");
    log_info!("progress: 50%\r");

    let messages: Vec<_> = capture.drain().into_iter().map(|r| r.message).collect();
    assert_eq!(messages, ["col1\tcol2\tcol3", "progress: 50%\r"]);
}

/// Verifies null bytes in the middle of a message survive.
#[test]
#[serial]
fn message_with_null_bytes() {
    let capture = install_capture();

    log_debug!("before\0after");

    let message = single(&capture).message;
    assert_eq!(message, "before\0after");
    assert_eq!(message.len(), 12);
}

/// Verifies escaped braces and percent signs are not treated as placeholders.
#[test]
#[serial]
fn message_with_braces_and_percent() {
    let capture = install_capture();

    log_warning!("{{literal}} at 100%");
    let literal = "{not a placeholder} %s";
    log_warning!(literal);

    let messages: Vec<_> = capture.drain().into_iter().map(|r| r.message).collect();
    assert_eq!(messages, ["{literal} at 100%", "{not a placeholder} %s"]);
}

/// Verifies backslashes and quotes in messages.
#[test]
#[serial]
fn message_with_backslashes_and_quotes() {
    let capture = install_capture();

    log_error!("path with\\backslash and \"quotes\".txt");

    assert_eq!(
        single(&capture).message,
        "path with\\backslash and \"quotes\".txt"
    );
}

// ============================================================================
// Unicode Tests
// ============================================================================

/// Verifies multi-byte text is delivered unchanged.
#[test]
#[serial]
fn message_with_unicode() {
    let capture = install_capture();
    let name = "日本語ファイル.txt";

    log_info!("café {name} שלום 🚀");

    assert_eq!(single(&capture).message, "café 日本語ファイル.txt שלום 🚀");
}

/// Verifies unicode survives the console line format next to the tag.
#[test]
fn unicode_renders_after_tag() {
    let site = CallSite::new("src/ファイル.rs", "main", 1);
    let rendered = Line::new(Severity::Debug, "naïve ✓", &site).to_string();
    assert_eq!(rendered, "[🐞 ファイル.rs:main@1]: naïve ✓");
}

// ============================================================================
// Long Line Tests
// ============================================================================

/// Verifies very long messages are neither truncated nor split.
#[test]
#[serial]
fn very_long_message() {
    let capture = install_capture();
    let long = "x".repeat(64 * 1024);

    log_info!("{long}");

    let message = single(&capture).message;
    assert_eq!(message.len(), 64 * 1024);
    assert!(message.chars().all(|c| c == 'x'));
}

/// Verifies many format arguments are all rendered.
#[test]
#[serial]
fn message_with_many_arguments() {
    let capture = install_capture();

    log_debug!(
        "{} {} {} {} {} {} {} {} {} {}",
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9
    );

    assert_eq!(single(&capture).message, "0 1 2 3 4 5 6 7 8 9");
}

/// Verifies a single character message.
#[test]
#[serial]
fn single_character_message() {
    let capture = install_capture();

    log_warning!("x");

    assert_eq!(single(&capture).message, "x");
}

// ============================================================================
// Volume Tests
// ============================================================================

/// Verifies a burst of calls yields one record each, in order.
#[test]
#[serial]
fn many_calls_are_recorded_in_order() {
    let capture = install_capture();

    for index in 0..500 {
        log_verbose!("event {index}");
    }

    let records = capture.drain();
    assert_eq!(records.len(), 500);
    for (index, record) in records.iter().enumerate() {
        assert_eq!(record.message, format!("event {index}"));
    }
}
