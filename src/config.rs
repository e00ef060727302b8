use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub redis_url: String,
    pub registrations_key: String,
    pub resend_api_key: String,
    pub resend_base_url: String,
    pub from_address: String,
    pub reply_to: String,
    pub admin_email: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "8080"),
            redis_url: try_load("REDIS_URL", "redis://127.0.0.1:6379"),
            registrations_key: try_load("REGISTRATIONS_KEY", "registrations"),
            resend_api_key: read_secret("RESEND_API_KEY"),
            resend_base_url: try_load("RESEND_BASE_URL", "https://api.resend.com"),
            from_address: try_load("FROM_ADDRESS", "LICENCIA P <noreply@bukoflow.com>"),
            reply_to: try_load("REPLY_TO", "abrinay1997@gmail.com"),
            admin_email: require("ADMIN_EMAIL"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn require(key: &str) -> String {
    env::var(key)
        .map_err(|_| {
            warn!("Required environment variable {key} not set");
        })
        .expect("Environment misconfigured!")
}

// Plain env var wins, then the mounted docker secret.
fn read_secret(secret_name: &str) -> String {
    if let Ok(value) = env::var(secret_name) {
        return value;
    }

    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
        })
        .expect("Secrets misconfigured!")
}
