use std::sync::Arc;

use crate::{
    config::Config,
    email::{Mailer, ResendMailer},
    store::{RedisStore, RegistrationStore},
};

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RegistrationStore>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let store = RedisStore::connect(&config.redis_url, &config.registrations_key)
            .await
            .expect("Store unreachable!");

        let mailer = ResendMailer::new(&config.resend_api_key, &config.resend_base_url)
            .expect("Email client misconfigured!");

        Arc::new(Self {
            config,
            store: Arc::new(store),
            mailer: Arc::new(mailer),
        })
    }

    /// Assembles state from pre-built collaborators. Tests use this to swap
    /// in the in-memory store and a fake mailer.
    pub fn with_parts(
        config: Config,
        store: Arc<dyn RegistrationStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            store,
            mailer,
        })
    }
}
