//! FFI bindings for Repform
//!
//! This module provides C-compatible functions for driving the evaluator from
//! other languages. All functions use C strings (null-terminated); frame
//! results and summaries cross the boundary as JSON strings that must be
//! freed by the caller using `repform_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_double};
use std::ptr;

use crate::adapters::{BlazePoseAdapter, MediaPipeAdapter, PoseFrameAdapter};
use crate::profiles::ProfileTable;
use crate::session::WorkoutEvaluator;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

// ============================================================================
// Evaluator Lifecycle
// ============================================================================

/// Opaque handle to a WorkoutEvaluator
pub struct WorkoutEvaluatorHandle {
    evaluator: WorkoutEvaluator,
}

/// Create a new evaluator.
///
/// # Safety
/// - `profiles_json` is either NULL (use the built-in profile table) or a
///   valid null-terminated C string holding a profile-table JSON object.
/// - Returns a pointer that must be freed with `repform_evaluator_free`.
/// - Returns NULL on error; call `repform_last_error` for the message.
#[no_mangle]
pub unsafe extern "C" fn repform_evaluator_new(
    profiles_json: *const c_char,
) -> *mut WorkoutEvaluatorHandle {
    clear_last_error();

    let table = if profiles_json.is_null() {
        ProfileTable::builtin()
    } else {
        let json = match cstr_to_string(profiles_json) {
            Some(s) => s,
            None => {
                set_last_error("Invalid profiles JSON string pointer");
                return ptr::null_mut();
            }
        };
        match ProfileTable::from_json(&json) {
            Ok(table) => table,
            Err(e) => {
                set_last_error(&e.to_string());
                return ptr::null_mut();
            }
        }
    };

    let handle = Box::new(WorkoutEvaluatorHandle {
        evaluator: WorkoutEvaluator::new(table),
    });
    Box::into_raw(handle)
}

/// Free an evaluator.
///
/// # Safety
/// - `evaluator` must be a valid pointer returned by `repform_evaluator_new`.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn repform_evaluator_free(evaluator: *mut WorkoutEvaluatorHandle) {
    if !evaluator.is_null() {
        drop(Box::from_raw(evaluator));
    }
}

/// Start a fresh session for the given exercise, discarding the previous one.
///
/// # Safety
/// - `evaluator` must be a valid pointer returned by `repform_evaluator_new`.
/// - `exercise` must be a valid null-terminated C string.
/// - Returns 0 on success, non-zero on error.
#[no_mangle]
pub unsafe extern "C" fn repform_evaluator_start_exercise(
    evaluator: *mut WorkoutEvaluatorHandle,
    exercise: *const c_char,
) -> i32 {
    clear_last_error();

    if evaluator.is_null() {
        set_last_error("Null evaluator pointer");
        return -1;
    }
    let handle = &mut *evaluator;

    let exercise_str = match cstr_to_string(exercise) {
        Some(s) => s,
        None => {
            set_last_error("Invalid exercise string pointer");
            return -1;
        }
    };

    handle.evaluator.start_exercise(&exercise_str);
    0
}

// ============================================================================
// Frame Evaluation
// ============================================================================

/// Evaluate one BlazePose frame and return the frame result as JSON.
///
/// # Safety
/// - `evaluator` must be a valid pointer returned by `repform_evaluator_new`.
/// - `poses_json` must be a valid null-terminated C string holding the
///   pose-detection output; `frame_width`/`frame_height` are the pixel
///   dimensions the keypoints are expressed in.
/// - Returns a newly allocated string that must be freed with
///   `repform_free_string`.
/// - Returns NULL on error; call `repform_last_error` for the message.
#[no_mangle]
pub unsafe extern "C" fn repform_evaluator_evaluate_blazepose(
    evaluator: *mut WorkoutEvaluatorHandle,
    poses_json: *const c_char,
    frame_width: c_double,
    frame_height: c_double,
) -> *mut c_char {
    clear_last_error();

    if evaluator.is_null() {
        set_last_error("Null evaluator pointer");
        return ptr::null_mut();
    }
    let handle = &mut *evaluator;

    let json = match cstr_to_string(poses_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid poses JSON string pointer");
            return ptr::null_mut();
        }
    };

    let adapter = match BlazePoseAdapter::new(frame_width, frame_height) {
        Ok(adapter) => adapter,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    evaluate_with_adapter(&mut handle.evaluator, &adapter, &json)
}

/// Evaluate one MediaPipe frame and return the frame result as JSON.
///
/// # Safety
/// - `evaluator` must be a valid pointer returned by `repform_evaluator_new`.
/// - `landmarks_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with
///   `repform_free_string`.
/// - Returns NULL on error; call `repform_last_error` for the message.
#[no_mangle]
pub unsafe extern "C" fn repform_evaluator_evaluate_mediapipe(
    evaluator: *mut WorkoutEvaluatorHandle,
    landmarks_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if evaluator.is_null() {
        set_last_error("Null evaluator pointer");
        return ptr::null_mut();
    }
    let handle = &mut *evaluator;

    let json = match cstr_to_string(landmarks_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid landmarks JSON string pointer");
            return ptr::null_mut();
        }
    };

    let adapter = MediaPipeAdapter::new();
    evaluate_with_adapter(&mut handle.evaluator, &adapter, &json)
}

fn evaluate_with_adapter(
    evaluator: &mut WorkoutEvaluator,
    adapter: &dyn PoseFrameAdapter,
    raw_json: &str,
) -> *mut c_char {
    let landmarks = match adapter.parse(raw_json) {
        Ok(landmarks) => landmarks,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    let Some(result) = evaluator.evaluate_frame(&landmarks) else {
        set_last_error("No active exercise; call repform_evaluator_start_exercise first");
        return ptr::null_mut();
    };

    match serde_json::to_string(&result) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Get the active session's summary as JSON.
///
/// # Safety
/// - `evaluator` must be a valid pointer returned by `repform_evaluator_new`.
/// - Returns a newly allocated string that must be freed with
///   `repform_free_string`.
/// - Returns NULL on error or when no session is active.
#[no_mangle]
pub unsafe extern "C" fn repform_evaluator_summary(
    evaluator: *mut WorkoutEvaluatorHandle,
) -> *mut c_char {
    clear_last_error();

    if evaluator.is_null() {
        set_last_error("Null evaluator pointer");
        return ptr::null_mut();
    }
    let handle = &*evaluator;

    let Some(summary) = handle.evaluator.summary() else {
        set_last_error("No active exercise");
        return ptr::null_mut();
    };

    match serde_json::to_string(&summary) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Repform functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Repform function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn repform_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Repform call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn repform_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the Repform library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn repform_version() -> *const c_char {
    // Use a static CString to avoid allocation
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn extended_arm_json() -> CString {
        CString::new(
            r#"[{
                "score": 0.97,
                "keypoints": [
                    { "x": 192.0, "y": 144.0, "score": 0.99, "name": "left_shoulder" },
                    { "x": 320.0, "y": 144.0, "score": 0.98, "name": "left_elbow" },
                    { "x": 448.0, "y": 144.0, "score": 0.96, "name": "left_wrist" }
                ]
            }]"#,
        )
        .unwrap()
    }

    fn contracted_arm_json() -> CString {
        CString::new(
            r#"[{
                "score": 0.97,
                "keypoints": [
                    { "x": 192.0, "y": 144.0, "score": 0.99, "name": "left_shoulder" },
                    { "x": 320.0, "y": 144.0, "score": 0.98, "name": "left_elbow" },
                    { "x": 320.0, "y": 240.0, "score": 0.96, "name": "left_wrist" }
                ]
            }]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_ffi_evaluator_lifecycle() {
        unsafe {
            let evaluator = repform_evaluator_new(ptr::null());
            assert!(!evaluator.is_null());

            let exercise = CString::new("push_up").unwrap();
            assert_eq!(repform_evaluator_start_exercise(evaluator, exercise.as_ptr()), 0);

            // Up, Down, Up, Down completes one repetition
            let frames = [
                extended_arm_json(),
                contracted_arm_json(),
                extended_arm_json(),
                contracted_arm_json(),
            ];
            let mut last = String::new();
            for frame in &frames {
                let result = repform_evaluator_evaluate_blazepose(
                    evaluator,
                    frame.as_ptr(),
                    640.0,
                    480.0,
                );
                assert!(!result.is_null());
                last = CStr::from_ptr(result).to_str().unwrap().to_string();
                repform_free_string(result);
            }
            assert!(last.contains("\"repetition_count\":1"));
            assert!(last.contains("\"repetition_completed\":true"));

            let summary = repform_evaluator_summary(evaluator);
            assert!(!summary.is_null());
            let summary_str = CStr::from_ptr(summary).to_str().unwrap();
            assert!(summary_str.contains("\"exercise\":\"push_up\""));
            repform_free_string(summary);

            repform_evaluator_free(evaluator);
        }
    }

    #[test]
    fn test_ffi_evaluate_without_exercise_is_error() {
        unsafe {
            let evaluator = repform_evaluator_new(ptr::null());
            let frame = extended_arm_json();

            let result =
                repform_evaluator_evaluate_blazepose(evaluator, frame.as_ptr(), 640.0, 480.0);
            assert!(result.is_null());

            let error = repform_last_error();
            assert!(!error.is_null());
            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(error_str.contains("No active exercise"));

            repform_evaluator_free(evaluator);
        }
    }

    #[test]
    fn test_ffi_invalid_profile_table() {
        unsafe {
            let bad_profiles = CString::new("{}").unwrap();
            let evaluator = repform_evaluator_new(bad_profiles.as_ptr());
            assert!(evaluator.is_null());

            let error = repform_last_error();
            assert!(!error.is_null());
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = repform_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert!(!version_str.is_empty());
        }
    }
}
