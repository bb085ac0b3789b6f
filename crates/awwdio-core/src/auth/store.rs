use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, info, warn};

use crate::models::User;
use crate::storage::{self, DurableStore, NoopStore, TOKEN_KEY, USER_KEY};

use super::{AuthEvent, LogoutReason};

type Callback = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

/// Events waiting for delivery, in the order their changes were applied.
#[derive(Default)]
struct Dispatch {
    pending: VecDeque<AuthEvent>,
    running: bool,
}

struct Inner {
    storage: Arc<dyn DurableStore>,
    current: Mutex<Option<User>>,
    subscribers: Mutex<Vec<(u64, Callback)>>,
    dispatch: Mutex<Dispatch>,
    next_subscriber_id: AtomicU64,
}

/// Holder of the current user, mirrored into durable storage.
///
/// Clone is cheap - all clones share the same state and subscribers.
/// Build one at startup and hand clones to whatever needs it.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<Inner>,
}

impl fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl AuthStore {
    /// Create a store, restoring any session previously saved in `storage`.
    ///
    /// A record that cannot be read or parsed leaves the store logged out;
    /// an unparseable record is also deleted.
    pub fn new(storage: Arc<dyn DurableStore>) -> Self {
        let restored = restore(storage.as_ref());
        Self {
            inner: Arc::new(Inner {
                storage,
                current: Mutex::new(restored),
                subscribers: Mutex::new(Vec::new()),
                dispatch: Mutex::new(Dispatch::default()),
                next_subscriber_id: AtomicU64::new(0),
            }),
        }
    }

    /// A store with no durable backing, for non-interactive contexts.
    pub fn headless() -> Self {
        Self::new(Arc::new(NoopStore))
    }

    /// Bearer token of the current user, if any
    pub fn get_token(&self) -> Option<String> {
        self.lock_current().as_ref().and_then(|user| user.token.clone())
    }

    pub fn current_user(&self) -> Option<User> {
        self.lock_current().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock_current().is_some()
    }

    /// Make `user` the current user and persist it.
    ///
    /// The in-memory state changes and subscribers are notified even when
    /// persisting fails; the storage error is returned afterwards.
    pub fn login(&self, user: User) -> storage::Result<()> {
        let result = {
            let mut current = self.lock_current();
            *current = Some(user.clone());
            let result = self.persist_user(&user).and_then(|()| match user.token.as_deref() {
                Some(token) => self.inner.storage.set(TOKEN_KEY, token),
                None => self.inner.storage.remove(TOKEN_KEY),
            });
            info!(channel = %user.channel, "Logged in");
            self.enqueue(AuthEvent::LoggedIn(user));
            result
        };
        log_storage_failure("login", &result);
        self.dispatch();
        result
    }

    /// Clear the current user and its stored records.
    pub fn logout(&self) -> storage::Result<()> {
        let result = self.clear(LogoutReason::Requested);
        log_storage_failure("logout", &result);
        result
    }

    /// Drop the session after the server rejected its token.
    ///
    /// Storage failures are logged only; callers of this path have no way
    /// to report them.
    pub fn expire_session(&self) {
        if let Err(e) = self.clear(LogoutReason::SessionExpired) {
            warn!(error = %e, "Session expired, but its stored records could not be removed");
        }
    }

    /// Replace the current user's display name. Does nothing when logged out.
    pub fn update_display_name(&self, name: impl Into<String>) -> storage::Result<()> {
        let result = {
            let mut current = self.lock_current();
            let Some(user) = current.as_ref() else {
                return Ok(());
            };
            let updated = User {
                display_name: Some(name.into()),
                ..user.clone()
            };
            *current = Some(updated.clone());
            let result = self.persist_user(&updated);
            self.enqueue(AuthEvent::DisplayNameUpdated(updated));
            result
        };
        log_storage_failure("update_display_name", &result);
        self.dispatch();
        result
    }

    /// Register `callback` for change events.
    ///
    /// The callback runs immediately with [`AuthEvent::Current`], then once
    /// per change, in subscription order. Changes are delivered one at a
    /// time in the order they were applied. Callbacks run with no store
    /// locks held and may read or mutate the store; a change made during
    /// delivery is queued and delivered after the event in progress, which
    /// can mean by another thread.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        let callback: Callback = Arc::new(callback);
        let id = self.inner.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        let current = {
            let current = self.lock_current();
            self.lock_subscribers().push((id, Arc::clone(&callback)));
            current.clone()
        };
        callback(&AuthEvent::Current(current));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn clear(&self, reason: LogoutReason) -> storage::Result<()> {
        let result = {
            let mut current = self.lock_current();
            *current = None;
            let user_removed = self.inner.storage.remove(USER_KEY);
            let token_removed = self.inner.storage.remove(TOKEN_KEY);
            match reason {
                LogoutReason::Requested => info!("Logged out"),
                LogoutReason::SessionExpired => warn!("Session expired, logged out"),
            }
            self.enqueue(AuthEvent::LoggedOut { reason });
            user_removed.and(token_removed)
        };
        self.dispatch();
        result
    }

    fn persist_user(&self, user: &User) -> storage::Result<()> {
        let json = serde_json::to_string(user)?;
        self.inner.storage.set(USER_KEY, &json)
    }

    /// Must be called with the `current` lock held, so the queue order
    /// matches the order changes were applied.
    fn enqueue(&self, event: AuthEvent) {
        self.lock_dispatch().pending.push_back(event);
    }

    /// Deliver queued events unless another call is already doing so.
    fn dispatch(&self) {
        {
            let mut dispatch = self.lock_dispatch();
            if dispatch.running {
                return;
            }
            dispatch.running = true;
        }
        let _unwind = ResetOnUnwind(&self.inner.dispatch);

        loop {
            let event = {
                let mut dispatch = self.lock_dispatch();
                match dispatch.pending.pop_front() {
                    Some(event) => event,
                    None => {
                        dispatch.running = false;
                        return;
                    }
                }
            };
            self.notify(&event);
        }
    }

    fn notify(&self, event: &AuthEvent) {
        let callbacks: Vec<Callback> = self
            .lock_subscribers()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(event);
        }
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<User>> {
        self.inner
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<(u64, Callback)>> {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_dispatch(&self) -> MutexGuard<'_, Dispatch> {
        self.inner
            .dispatch
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Lets a later change start delivery again if a callback panicked.
struct ResetOnUnwind<'a>(&'a Mutex<Dispatch>);

impl Drop for ResetOnUnwind<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.lock().unwrap_or_else(PoisonError::into_inner).running = false;
        }
    }
}

/// Handle returned by [`AuthStore::subscribe`].
///
/// Dropping the handle unsubscribes.
#[must_use = "dropping a Subscription unsubscribes its callback"]
pub struct Subscription {
    id: u64,
    inner: Weak<Inner>,
}

impl Subscription {
    pub fn unsubscribe(self) {}

    /// Keep the callback registered for as long as the store lives.
    pub fn detach(mut self) {
        self.inner = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(id, _)| *id != self.id);
        }
    }
}

fn restore(storage: &dyn DurableStore) -> Option<User> {
    let raw = match storage.get(USER_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "Failed to read stored session, starting logged out");
            return None;
        }
    };

    match serde_json::from_str::<User>(&raw) {
        Ok(user) => {
            debug!(channel = %user.channel, "Restored stored session");
            Some(user)
        }
        Err(e) => {
            warn!(error = %e, "Stored session is corrupt, discarding it");
            if let Err(e) = storage.remove(USER_KEY) {
                warn!(error = %e, "Failed to remove corrupt session record");
            }
            None
        }
    }
}

fn log_storage_failure(operation: &str, result: &storage::Result<()>) {
    if let Err(e) = result {
        warn!(operation, error = %e, "Failed to persist session state");
    }
}

// ============================================================================
// Tests
// ============================================================================
