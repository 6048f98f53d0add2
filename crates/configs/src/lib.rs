use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Process-wide auth configuration. Loaded once at startup and held
/// immutably for the process lifetime; no rotation.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub token: TokenConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// HS256 signing secret. May be left empty in the file and supplied via
    /// the AUTH_JWT_SECRET environment variable.
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_access_ttl")]
    pub access_ttl_secs: i64,
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_secs: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_ttl_secs: default_access_ttl(),
            refresh_ttl_secs: default_refresh_ttl(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_password_min")]
    pub min_length: usize,
    #[serde(default = "default_password_max")]
    pub max_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            min_length: default_password_min(),
            max_length: default_password_max(),
        }
    }
}

fn default_access_ttl() -> i64 { 86_400 } // 24h
fn default_refresh_ttl() -> i64 { 604_800 } // 7d
fn default_algorithm() -> String { "argon2".into() }
fn default_password_min() -> usize { 6 }
fn default_password_max() -> usize { 100 }

pub fn load_default() -> Result<AuthConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AuthConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AuthConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AuthConfig {
    pub fn load_and_validate() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.token.normalize_from_env();
        self.token.validate()?;
        self.password.validate()?;
        Ok(())
    }
}

impl TokenConfig {
    pub fn normalize_from_env(&mut self) {
        if self.secret.trim().is_empty() {
            if let Ok(secret) = std::env::var("AUTH_JWT_SECRET") {
                self.secret = secret;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.secret.trim().is_empty() {
            return Err(anyhow!(
                "token.secret is empty; set it in config.toml or via AUTH_JWT_SECRET"
            ));
        }
        if self.secret.len() < 16 {
            return Err(anyhow!("token.secret must be at least 16 bytes"));
        }
        if self.access_ttl_secs <= 0 || self.refresh_ttl_secs <= 0 {
            return Err(anyhow!("token TTLs must be positive seconds"));
        }
        if self.refresh_ttl_secs < self.access_ttl_secs {
            return Err(anyhow!("token.refresh_ttl_secs must be >= access_ttl_secs"));
        }
        Ok(())
    }
}

impl PasswordConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_length == 0 || self.max_length < self.min_length {
            return Err(anyhow!("password length bounds are inconsistent"));
        }
        Ok(())
    }
}
