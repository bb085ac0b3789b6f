//! Client-side navigation and the execution context it depends on.

use std::fmt;
use std::sync::Arc;

/// Route the user is sent to when their session is no longer accepted
pub const LOGIN_PATH: &str = "/login";

/// Performs a client-side transition to another route.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that goes nowhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _path: &str) {}
}

/// Where the client is running.
///
/// Only an interactive context reacts to an expired session by logging out
/// and navigating to the login route; a headless one just reports the 401.
#[derive(Clone)]
pub enum Environment {
    Interactive { navigator: Arc<dyn Navigator> },
    Headless,
}

impl Environment {
    pub fn interactive(navigator: impl Navigator + 'static) -> Self {
        Environment::Interactive {
            navigator: Arc::new(navigator),
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Interactive { .. } => f.write_str("Interactive"),
            Environment::Headless => f.write_str("Headless"),
        }
    }
}
