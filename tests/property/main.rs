//! Property-based tests for scheduler invariants.
//!
//! Run with: `cargo test --test property`

mod scheduler_invariants;

/// Case count: `PROPTEST_CASES` wins, CI runs the full default, local runs
/// stay short. Mirrors the in-crate `test_utils::proptest_cases`.
pub fn proptest_cases(default: u32) -> u32 {
    if let Some(value) = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
    {
        return value.max(1);
    }
    if std::env::var_os("CI").is_some() {
        return default.max(1);
    }
    default.clamp(1, 16)
}

#[test]
fn local_case_count_is_clamped() {
    if std::env::var_os("PROPTEST_CASES").is_some() || std::env::var_os("CI").is_some() {
        return;
    }
    assert_eq!(proptest_cases(48), 16);
    assert_eq!(proptest_cases(8), 8);
    assert_eq!(proptest_cases(0), 1);
}
