//! Configuration for the AyuSetu service clients

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

pub const SANDBOX_BASE_URL: &str = "https://dev.abdm.gov.in/gateway";
pub const PRODUCTION_BASE_URL: &str = "https://live.abdm.gov.in/gateway";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// ABDM environment the live clients talk to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "sbx" | "dev" => Ok(Environment::Sandbox),
            "production" | "prod" | "live" => Ok(Environment::Production),
            other => anyhow::bail!("unknown ABDM environment: {}", other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub developer_mode: bool,
    pub environment: Environment,
    /// Takes precedence over the environment's base URL when set.
    pub base_url_override: Option<String>,
    pub request_timeout_seconds: u64,
    pub log_level: String,
    pub credentials: ClientCredentials,
    pub developer: DeveloperProfile,
    pub mock: MockConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Identifiers the mock services hand back in developer mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperProfile {
    pub abha_number: String,
    pub abha_address: String,
    pub mobile: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    pub simulate_latency: bool,
}

impl Default for ClientCredentials {
    fn default() -> Self {
        Self {
            client_id: "SBX_AYUSETU_DEV".to_string(),
            client_secret: "dev-client-secret".to_string(),
        }
    }
}

impl Default for DeveloperProfile {
    fn default() -> Self {
        Self {
            abha_number: "91-1234-5678-9012".to_string(),
            abha_address: "dev.user@sbx".to_string(),
            mobile: "9876543210".to_string(),
            email: "dev.user@ayusetu.in".to_string(),
            first_name: "Dev".to_string(),
            last_name: "User".to_string(),
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            simulate_latency: true,
        }
    }
}

impl Config {
    /// Reads the process environment. Callers load `.env` first.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = ClientCredentials::default();

        Ok(Config {
            developer_mode: parse_bool(
                &env::var("AYUSETU_DEVELOPER_MODE").unwrap_or_else(|_| "true".to_string()),
            )?,
            environment: env::var("ABDM_ENVIRONMENT")
                .unwrap_or_else(|_| "sandbox".to_string())
                .parse()?,
            base_url_override: env::var("ABDM_BASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECONDS.to_string())
                .parse()?,
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            credentials: ClientCredentials {
                client_id: env::var("ABDM_CLIENT_ID").unwrap_or(defaults.client_id),
                client_secret: env::var("ABDM_CLIENT_SECRET").unwrap_or(defaults.client_secret),
            },
            developer: DeveloperProfile::default(),
            mock: MockConfig {
                simulate_latency: parse_bool(
                    &env::var("MOCK_SIMULATE_LATENCY").unwrap_or_else(|_| "true".to_string()),
                )?,
            },
        })
    }

    /// Developer-mode configuration with fabricated responses.
    pub fn developer() -> Self {
        Self {
            developer_mode: true,
            environment: Environment::Sandbox,
            base_url_override: None,
            request_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            log_level: "info".to_string(),
            credentials: ClientCredentials::default(),
            developer: DeveloperProfile::default(),
            mock: MockConfig::default(),
        }
    }

    /// Live configuration pinned to an explicit gateway URL.
    pub fn live(base_url: impl Into<String>) -> Self {
        Self {
            developer_mode: false,
            base_url_override: Some(base_url.into()),
            ..Self::developer()
        }
    }

    pub fn without_latency(mut self) -> Self {
        self.mock.simulate_latency = false;
        self
    }

    pub fn base_url(&self) -> String {
        self.base_url_override
            .clone()
            .unwrap_or_else(|| self.environment.base_url().to_string())
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {:?}", other),
    }
}
