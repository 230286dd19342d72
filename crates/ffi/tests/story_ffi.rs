// ABOUTME: Integration tests for the storyline FFI story functions.
// ABOUTME: Tests the C ABI round trip, empty input, invalid input, and null handling.

use std::ptr;
use std::slice;
use std::str;

use storyline_ffi::{
    storyline_free_story, storyline_prepare, storyline_story_result, DError, DErrorCode, DString,
};

/// Helper to convert a DString to a &str for assertions.
unsafe fn dstring_to_str(ds: &DString) -> &str {
    if ds.data.is_null() || ds.len == 0 {
        return "";
    }
    let slice = slice::from_raw_parts(ds.data, ds.len);
    str::from_utf8(slice).unwrap_or("")
}

fn pending_error() -> DError {
    DError {
        code: DErrorCode::Internal as u32,
        message: DString::empty(),
    }
}

#[test]
fn test_prepare_success() {
    let html = r#"<h1>Story</h1><p class="lead" onclick="x()">Once upon a time.</p>"#;

    unsafe {
        let mut err = pending_error();
        let arena = storyline_prepare(html.as_ptr(), html.len(), 0, 0, &mut err);

        assert!(!arena.is_null(), "arena should not be null on success");
        assert_eq!(err.code, DErrorCode::Ok as u32, "error code should be OK");

        let view = storyline_story_result(arena);
        assert!(!view.is_null(), "view should not be null");

        assert_eq!(
            dstring_to_str(&(*view).content),
            "<h2>Story</h2>\n<p>Once upon a time.</p>"
        );
        assert_eq!(dstring_to_str(&(*view).plain_text), "Story Once upon a time.");
        assert_eq!(dstring_to_str(&(*view).excerpt), "Story Once upon a time.");
        assert_eq!((*view).word_count, 5);
        assert_eq!((*view).reading_time_minutes, 1);

        storyline_free_story(arena);
    }
}

#[test]
fn test_prepare_custom_rate_and_excerpt() {
    let text = vec!["word"; 30].join(" ");

    unsafe {
        let mut err = pending_error();
        let arena = storyline_prepare(text.as_ptr(), text.len(), 10, 9, &mut err);
        assert!(!arena.is_null());

        let view = storyline_story_result(arena);
        assert_eq!((*view).word_count, 30);
        assert_eq!((*view).reading_time_minutes, 3);
        assert_eq!(dstring_to_str(&(*view).excerpt), "word word…");

        storyline_free_story(arena);
    }
}

#[test]
fn test_prepare_empty_input() {
    unsafe {
        let mut err = pending_error();
        let arena = storyline_prepare(ptr::null(), 0, 0, 0, &mut err);

        assert!(!arena.is_null());
        assert_eq!(err.code, DErrorCode::Ok as u32);

        let view = storyline_story_result(arena);
        assert!((*view).content.data.is_null());
        assert!((*view).excerpt.data.is_null());
        assert_eq!((*view).word_count, 0);
        assert_eq!((*view).reading_time_minutes, 1);

        storyline_free_story(arena);
    }
}

#[test]
fn test_prepare_null_with_length() {
    unsafe {
        let mut err = pending_error();
        let arena = storyline_prepare(ptr::null(), 5, 0, 0, &mut err);

        assert!(arena.is_null());
        assert_eq!(err.code, DErrorCode::Invalid as u32);
        assert_eq!(dstring_to_str(&err.message), "content is null");
    }
}

#[test]
fn test_prepare_invalid_utf8() {
    let bytes = [0x3c, 0x70, 0x3e, 0xff, 0xfe];

    unsafe {
        let mut err = pending_error();
        let arena = storyline_prepare(bytes.as_ptr(), bytes.len(), 0, 0, &mut err);

        assert!(arena.is_null());
        assert_eq!(err.code, DErrorCode::Invalid as u32);
        assert!(dstring_to_str(&err.message).contains("UTF-8"));
    }
}

#[test]
fn test_prepare_too_deep() {
    let html = "<div>".repeat(storyline_content::dom::MAX_DEPTH + 20);

    unsafe {
        let mut err = pending_error();
        let arena = storyline_prepare(html.as_ptr(), html.len(), 0, 0, &mut err);

        assert!(arena.is_null());
        assert_eq!(err.code, DErrorCode::TooLarge as u32);
    }
}

#[test]
fn test_null_out_err_is_allowed() {
    let html = "<p>ok</p>";

    unsafe {
        let arena = storyline_prepare(html.as_ptr(), html.len(), 0, 0, ptr::null_mut());
        assert!(!arena.is_null());
        storyline_free_story(arena);
    }
}

#[test]
fn test_null_arena_handling() {
    unsafe {
        assert!(storyline_story_result(ptr::null()).is_null());
        storyline_free_story(ptr::null_mut());
    }
}
