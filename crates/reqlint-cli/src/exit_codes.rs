//! Process exit codes. These are part of the public contract.

pub const OK: i32 = 0;
/// Issues were found and `--fail-on-issues` was given.
pub const ISSUES_FOUND: i32 = 1;
/// Pre-flight validation or configuration error; no model call was made.
pub const CONFIG_ERROR: i32 = 2;
pub const INTERNAL_ERROR: i32 = 3;
