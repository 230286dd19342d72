// ABOUTME: C FFI bindings for the storyline content normalizer.
// ABOUTME: Exposes arena-allocated sanitized stories and their metrics to host runtimes.

use std::panic;
use std::ptr;

use bumpalo::Bump;
use storyline_content::{SanitizeError, SanitizedStory, Sanitizer, DEFAULT_EXCERPT_LENGTH};

/// FFI version constant for ABI compatibility checking.
pub const STORYLINE_FFI_VERSION: u32 = 1;

/// Returns the FFI ABI version number.
/// Consumers should check this matches their expected version.
#[no_mangle]
pub extern "C" fn storyline_ffi_version() -> u32 {
    STORYLINE_FFI_VERSION
}

// ----------------------------------------------------------------------------
// Error handling
// ----------------------------------------------------------------------------

/// Error codes matching the C ABI DErrorCode enum.
#[repr(u32)]
pub enum DErrorCode {
    Ok = 0,
    Parse = 1,
    TooLarge = 2,
    Invalid = 3,
    Internal = 255,
}

/// UTF-8 string slice for FFI. Not null-terminated.
/// Consumer must not mutate or free; memory owned by the arena or static.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct DString {
    pub data: *const u8,
    pub len: usize,
}

impl DString {
    /// Creates an empty DString with null pointer and zero length.
    pub const fn empty() -> Self {
        DString {
            data: ptr::null(),
            len: 0,
        }
    }

    /// Points at a string that lives for the whole program.
    pub const fn from_static(s: &'static str) -> Self {
        DString {
            data: s.as_ptr(),
            len: s.len(),
        }
    }
}

impl Default for DString {
    fn default() -> Self {
        Self::empty()
    }
}

/// FFI error struct matching C ABI DError.
#[repr(C)]
pub struct DError {
    pub code: u32,
    pub message: DString,
}

// ----------------------------------------------------------------------------
// DStoryView - matches C ABI struct
// ----------------------------------------------------------------------------

/// Sanitized story content plus metrics. An empty `excerpt` means there is none.
#[repr(C)]
pub struct DStoryView {
    pub content: DString,
    pub plain_text: DString,
    pub excerpt: DString,
    pub word_count: u64,
    pub reading_time_minutes: u32,
}

/// Arena holding a prepared story.
/// All allocations for the view live in the bump allocator.
pub struct DStoryArena {
    #[allow(dead_code)]
    bump: Bump,
    view: *const DStoryView,
}

// ----------------------------------------------------------------------------
// Helper functions
// ----------------------------------------------------------------------------

/// Copies a string into the arena and returns a DString pointing to it.
fn copy_str_to_arena(bump: &Bump, s: &str) -> DString {
    if s.is_empty() {
        return DString::empty();
    }
    let bytes = bump.alloc_slice_copy(s.as_bytes());
    DString {
        data: bytes.as_ptr(),
        len: bytes.len(),
    }
}

/// Creates a DStoryView in the arena from a SanitizedStory.
fn make_story_view(bump: &Bump, story: &SanitizedStory) -> *const DStoryView {
    let view = bump.alloc(DStoryView {
        content: copy_str_to_arena(bump, &story.content),
        plain_text: copy_str_to_arena(bump, &story.plain_text),
        excerpt: copy_str_to_arena(bump, story.excerpt.as_deref().unwrap_or("")),
        word_count: story.word_count as u64,
        reading_time_minutes: story.reading_time_minutes,
    });
    view as *const DStoryView
}

/// Maps a SanitizeError to a DErrorCode and a message with static lifetime.
fn map_error(err: &SanitizeError) -> (u32, &'static str) {
    match err {
        SanitizeError::Parse(_) => (DErrorCode::Parse as u32, "content could not be parsed"),
        SanitizeError::TooLarge { .. } => (DErrorCode::TooLarge as u32, "content too large"),
        SanitizeError::TooDeep { .. } => {
            (DErrorCode::TooLarge as u32, "content nested too deeply")
        }
    }
}

/// Sets the out_err with the given code and message.
/// If out_err is null, this is a no-op.
unsafe fn set_error(out_err: *mut DError, code: u32, message: &'static str) {
    if !out_err.is_null() {
        (*out_err).code = code;
        (*out_err).message = DString::from_static(message);
    }
}

/// Sets out_err to success (D_OK with empty message).
/// If out_err is null, this is a no-op.
unsafe fn set_success(out_err: *mut DError) {
    if !out_err.is_null() {
        (*out_err).code = DErrorCode::Ok as u32;
        (*out_err).message = DString::empty();
    }
}

// ----------------------------------------------------------------------------
// Story FFI functions
// ----------------------------------------------------------------------------

/// Sanitizes story content and computes its metrics. Returns an arena-allocated story.
///
/// # Arguments
/// * `content` - Raw story content bytes (UTF-8, HTML or plain text). May be null when `content_len` is 0.
/// * `content_len` - Length of content in bytes
/// * `words_per_minute` - Reading speed; 0 uses the default
/// * `excerpt_length` - Maximum excerpt length in characters; 0 uses the default
/// * `out_err` - Output error struct (may be null)
///
/// # Returns
/// Pointer to DStoryArena on success, null on failure.
/// On failure, out_err (if non-null) contains error details.
///
/// # Safety
/// `content` must point to `content_len` readable bytes.
/// Caller must free the returned arena via storyline_free_story.
#[no_mangle]
pub unsafe extern "C" fn storyline_prepare(
    content: *const u8,
    content_len: usize,
    words_per_minute: u32,
    excerpt_length: usize,
    out_err: *mut DError,
) -> *mut DStoryArena {
    if content.is_null() && content_len != 0 {
        set_error(out_err, DErrorCode::Invalid as u32, "content is null");
        return ptr::null_mut();
    }

    let content_str = if content_len == 0 {
        ""
    } else {
        let content_slice = std::slice::from_raw_parts(content, content_len);
        match std::str::from_utf8(content_slice) {
            Ok(s) => s,
            Err(_) => {
                set_error(
                    out_err,
                    DErrorCode::Invalid as u32,
                    "content is not valid UTF-8",
                );
                return ptr::null_mut();
            }
        }
    };

    let excerpt_length = if excerpt_length == 0 {
        DEFAULT_EXCERPT_LENGTH
    } else {
        excerpt_length
    };

    // Catch panics to avoid unwinding across FFI boundary
    let result = panic::catch_unwind(|| {
        Sanitizer::builder()
            .words_per_minute(words_per_minute)
            .excerpt_length(excerpt_length)
            .build()
            .prepare(content_str)
    });

    match result {
        Ok(Ok(story)) => {
            let bump = Bump::new();
            let view = make_story_view(&bump, &story);
            let arena = Box::new(DStoryArena { bump, view });
            set_success(out_err);
            Box::into_raw(arena)
        }
        Ok(Err(err)) => {
            let (code, msg) = map_error(&err);
            set_error(out_err, code, msg);
            ptr::null_mut()
        }
        Err(_) => {
            set_error(
                out_err,
                DErrorCode::Internal as u32,
                "internal panic during sanitization",
            );
            ptr::null_mut()
        }
    }
}

/// Returns a pointer to the DStoryView inside the arena.
///
/// # Safety
/// The arena pointer must be valid or null.
/// The returned pointer is valid until storyline_free_story is called.
#[no_mangle]
pub unsafe extern "C" fn storyline_story_result(arena: *const DStoryArena) -> *const DStoryView {
    if arena.is_null() {
        return ptr::null();
    }
    (*arena).view
}

/// Frees the story arena and all associated allocations.
///
/// # Safety
/// The arena pointer must have been returned by storyline_prepare.
/// After this call, the arena pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn storyline_free_story(arena: *mut DStoryArena) {
    if !arena.is_null() {
        drop(Box::from_raw(arena));
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
