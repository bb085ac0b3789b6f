use std::sync::Arc;

use crate::api::{ApiClient, ReqwestTransport, TransportError};
use crate::auth::AuthStore;
use crate::config::Config;
use crate::navigation::Environment;
use crate::storage::DurableStore;

/// Everything a front end needs, built once at startup.
pub struct AppContext {
    pub config: Config,
    pub store: AuthStore,
    pub api: ApiClient<ReqwestTransport>,
}

impl AppContext {
    pub fn new(
        config: Config,
        storage: Arc<dyn DurableStore>,
        environment: Environment,
    ) -> Result<Self, TransportError> {
        let store = AuthStore::new(storage);
        let transport = ReqwestTransport::with_timeout(config.request_timeout())?;
        let api = ApiClient::with_transport(transport, store.clone(), environment)
            .with_base_url(config.api_base_url.clone());
        Ok(Self { config, store, api })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, User};
    use crate::storage::MemoryStore;

    #[test]
    fn test_api_client_shares_the_context_store() {
        let ctx = AppContext::new(Config::default(), Arc::new(MemoryStore::new()), Environment::Headless).unwrap();
        ctx.store
            .login(User::new(Channel::Email, "ada@example.com").with_token("t"))
            .unwrap();
        assert_eq!(ctx.api.store().get_token().as_deref(), Some("t"));
        assert_eq!(ctx.api.resolve("/video/token"), "http://localhost:8080/api/video/token");
    }
}
