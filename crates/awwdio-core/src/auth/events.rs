use crate::models::User;

/// Why the current user was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The user (or the application) asked to log out
    Requested,
    /// A request came back 401 and the session was dropped
    SessionExpired,
}

/// Change notification delivered to auth store subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// Delivered once, at subscription time, with the state as it stands
    Current(Option<User>),
    LoggedIn(User),
    LoggedOut { reason: LogoutReason },
    DisplayNameUpdated(User),
}

impl AuthEvent {
    /// The user that is current once this event has been applied.
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthEvent::Current(user) => user.as_ref(),
            AuthEvent::LoggedIn(user) | AuthEvent::DisplayNameUpdated(user) => Some(user),
            AuthEvent::LoggedOut { .. } => None,
        }
    }
}
