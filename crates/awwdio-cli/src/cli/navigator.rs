use awwdio_core::{Navigator, LOGIN_PATH};
use tracing::debug;

/// The terminal has no routes, so "navigating" to the login page means
/// telling the user how to sign in again.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        debug!(path, "Navigation requested");
        if path == LOGIN_PATH {
            eprintln!("Your session has expired. Sign in again with `awwdio send-otp` and `awwdio verify-otp`.");
        }
    }
}
