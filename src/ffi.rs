//! JSON entry point and C ABI wrappers (feature `ffi`).
//!
//! Request:
//!
//! ```json
//! { "points": [{"latitude": 40.7, "longitude": -74.0, "weight": 2.0}],
//!   "radius_km": 3.0, "max_centers": 10, "config": {"strategy": "doubling"} }
//! ```
//!
//! Response: `{"ok": <Solution>}` or `{"error": "<message>"}`.

use std::ffi::{CStr, CString};

use libc::c_char;
use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::models::{DemandPoint, Solution};
use crate::solver::Solver;

#[derive(Debug, Deserialize)]
struct SolveRequest {
    points: Vec<DemandPoint>,
    radius_km: f64,
    max_centers: usize,
    #[serde(default)]
    config: SolverConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum SolveResponse {
    Ok(Solution),
    Error(String),
}

/// Solves a JSON request and returns a JSON response.
///
/// Never fails: malformed JSON and solver errors become `{"error": ...}`.
pub fn solve_json(input: &str) -> String {
    let response = match serde_json::from_str::<SolveRequest>(input) {
        Ok(req) => match Solver::new(req.config).solve(&req.points, req.radius_km, req.max_centers) {
            Ok(solution) => SolveResponse::Ok(solution),
            Err(e) => SolveResponse::Error(e.to_string()),
        },
        Err(e) => SolveResponse::Error(format!("invalid request: {e}")),
    };
    serde_json::to_string(&response)
        .unwrap_or_else(|e| format!(r#"{{"error":"failed to encode response: {e}"}}"#))
}

/// C entry point for [`solve_json`].
///
/// Returns a newly allocated NUL-terminated string that must be released
/// with [`u_location_free_string`], or null if `input` is null.
///
/// # Safety
///
/// `input` must be null or point to a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn u_location_solve_json(input: *const c_char) -> *mut c_char {
    if input.is_null() {
        return std::ptr::null_mut();
    }
    let request = CStr::from_ptr(input).to_string_lossy();
    match CString::new(solve_json(&request)) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Releases a string returned by [`u_location_solve_json`].
///
/// # Safety
///
/// `ptr` must be null or a pointer obtained from [`u_location_solve_json`]
/// that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn u_location_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_json_ok() {
        let input = r#"{
            "points": [
                {"latitude": 0.0, "longitude": 0.0},
                {"latitude": 0.0, "longitude": 1.0},
                {"latitude": 1.0, "longitude": 0.0},
                {"latitude": 1.0, "longitude": 1.0}
            ],
            "radius_km": 0.01,
            "max_centers": 4,
            "config": {"metric": "euclidean"}
        }"#;
        let out: serde_json::Value = serde_json::from_str(&solve_json(input)).expect("json");
        assert_eq!(out["ok"]["outcome"]["min_centers"], 4);
        assert_eq!(out["ok"]["facilities"].as_array().map(|a| a.len()), Some(4));
    }

    #[test]
    fn test_solve_json_error() {
        let input = r#"{"points": [], "radius_km": 1.0, "max_centers": 1}"#;
        let out: serde_json::Value = serde_json::from_str(&solve_json(input)).expect("json");
        assert_eq!(out["error"], "no demand points supplied");
    }

    #[test]
    fn test_solve_json_huge_time_budget() {
        let input = r#"{
            "points": [{"latitude": 40.7, "longitude": -74.0}],
            "radius_km": 1.0,
            "max_centers": 1,
            "config": {"time_budget": {"secs": 18446744073709551615, "nanos": 0}}
        }"#;
        let out: serde_json::Value = serde_json::from_str(&solve_json(input)).expect("json");
        assert_eq!(out["ok"]["outcome"]["min_centers"], 1);
        assert_eq!(out["ok"]["timed_out"], false);
    }

    #[test]
    fn test_solve_json_malformed() {
        let out: serde_json::Value = serde_json::from_str(&solve_json("not json")).expect("json");
        assert!(out["error"]
            .as_str()
            .is_some_and(|m| m.starts_with("invalid request")));
    }

    #[test]
    fn test_c_roundtrip() {
        let input = CString::new(
            r#"{"points": [{"latitude": 40.7, "longitude": -74.0}], "radius_km": 1.0, "max_centers": 1}"#,
        )
        .expect("no interior nul");
        unsafe {
            let out = u_location_solve_json(input.as_ptr());
            assert!(!out.is_null());
            let text = CStr::from_ptr(out).to_string_lossy().into_owned();
            u_location_free_string(out);
            assert!(text.contains("\"min_centers\":1"));
            assert!(u_location_solve_json(std::ptr::null()).is_null());
        }
    }
}
