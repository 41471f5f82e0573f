//! Error classification and exit codes.

use runway_core::constants::exit_codes;
use runway_core::GrowthError;

/// Map an application error to the process exit code.
///
/// The whole cause chain is inspected, so context added on the way up does
/// not hide the underlying domain or configuration error.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if cause.is::<GrowthError>() {
            return exit_codes::ERROR_DOMAIN;
        }
        if cause.is::<serde_json::Error>() {
            return exit_codes::ERROR_CONFIG;
        }
    }
    exit_codes::ERROR_GENERIC
}
