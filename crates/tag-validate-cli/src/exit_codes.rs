//! Unified exit codes for tag-validate.
//! These codes are part of the public contract and must stay stable for CI
//! consumers.

pub const SUCCESS: i32 = 0;
pub const NOT_REGISTERED: i32 = 1; // Verification ran, key not bound to the account
pub const USAGE_ERROR: i32 = 2; // Bad arguments or server configuration
pub const ACCOUNT_NOT_FOUND: i32 = 3; // Owner has no account on the server
pub const SERVICE_ERROR: i32 = 4; // Transport/auth/protocol failure
