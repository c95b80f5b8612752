use config::{Config, File};
use serde::{self, Deserialize};
use std::{ops::Deref, sync::Arc};
use wallman_error::WMResult;

use crate::constants::{ASSET_DIR, DATA_DIR};

#[derive(Debug, Clone)]
pub struct Settings(Arc<Inner>);

impl Deref for Settings {
    type Target = Inner;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl Settings {
    /// Load settings from an optional TOML file, overridden by `WM__*`
    /// environment variables (e.g. `WM__WEB__PORT=9000`).
    pub fn new(config_path: String) -> WMResult<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(config_path.as_str()).required(false))
            .add_source(
                config::Environment::with_prefix("WM")
                    .separator("__")
                    .try_parsing(true),
            );
        let inner: Inner = builder.build()?.try_deserialize()?;
        Ok(Self(Arc::new(inner)))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self(Arc::new(Inner::default()))
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Inner {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub web: Web,
    #[serde(default)]
    pub db: Db,
    #[serde(default)]
    pub assets: Assets,
    #[serde(default)]
    pub log: Log,
}

#[derive(Debug, Clone, Deserialize)]
pub struct General {
    /// Domain every registered or promoted account email must belong to.
    #[serde(default = "General::org_email_domain_default")]
    pub org_email_domain: String,
    /// Sender address used on outgoing notifications.
    #[serde(default = "General::notification_sender_default")]
    pub notification_sender: String,
    /// Public base url, used in notification bodies
    #[serde(default = "General::site_url_default")]
    pub site_url: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            org_email_domain: General::org_email_domain_default(),
            notification_sender: General::notification_sender_default(),
            site_url: General::site_url_default(),
        }
    }
}

impl General {
    fn org_email_domain_default() -> String {
        "uc.pt".into()
    }

    fn notification_sender_default() -> String {
        "wallman@uc.pt".into()
    }

    fn site_url_default() -> String {
        "http://localhost:8000".into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Web {
    #[serde(default = "Web::host_default")]
    pub host: String,
    #[serde(default = "Web::port_default")]
    pub port: u16,
    /// Worker threads; 0 keeps the actix default of one per core
    #[serde(default)]
    pub workers: usize,
    #[serde(default = "Web::login_url_default")]
    pub login_url: String,
    #[serde(default)]
    pub jwt: Jwt,
}

impl Default for Web {
    fn default() -> Self {
        Web {
            host: Web::host_default(),
            port: Web::port_default(),
            workers: 0,
            login_url: Web::login_url_default(),
            jwt: Default::default(),
        }
    }
}

impl Web {
    fn port_default() -> u16 {
        8000
    }

    fn host_default() -> String {
        "0.0.0.0".into()
    }

    fn login_url_default() -> String {
        "/accounts/login/".into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Jwt {
    #[serde(default = "Jwt::secret_default")]
    pub secret: String,
    /// Token lifetime in seconds
    #[serde(default = "Jwt::expire_default")]
    pub expire: i64,
    #[serde(default = "Jwt::issuer_default")]
    pub issuer: String,
}

impl Default for Jwt {
    fn default() -> Self {
        Jwt {
            secret: Jwt::secret_default(),
            expire: Jwt::expire_default(),
            issuer: Jwt::issuer_default(),
        }
    }
}

impl Jwt {
    fn secret_default() -> String {
        "wallman".into()
    }

    fn expire_default() -> i64 {
        86_400
    }

    fn issuer_default() -> String {
        "wallman".into()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Db {
    #[serde(default)]
    pub sqlite: Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sqlite {
    #[serde(default = "Sqlite::path_default")]
    pub path: String,
    #[serde(default = "Sqlite::timeout_default")]
    pub timeout: u64,
    #[serde(default = "Sqlite::idle_timeout_default")]
    pub idle_timeout: u64,
    #[serde(default = "Sqlite::max_lifetime_default")]
    pub max_lifetime: u64,
    #[serde(default = "Sqlite::max_connections_default")]
    pub max_connections: u32,
    #[serde(default = "Sqlite::auto_create_default")]
    pub auto_create: bool,
}

impl Default for Sqlite {
    fn default() -> Self {
        Sqlite {
            path: Sqlite::path_default(),
            timeout: Sqlite::timeout_default(),
            idle_timeout: Sqlite::idle_timeout_default(),
            max_lifetime: Sqlite::max_lifetime_default(),
            max_connections: Sqlite::max_connections_default(),
            auto_create: Sqlite::auto_create_default(),
        }
    }
}

impl Sqlite {
    fn path_default() -> String {
        "wallman.db".into()
    }

    fn timeout_default() -> u64 {
        5000
    }

    fn idle_timeout_default() -> u64 {
        5000
    }

    fn max_lifetime_default() -> u64 {
        5000
    }

    fn max_connections_default() -> u32 {
        16
    }

    fn auto_create_default() -> bool {
        true
    }

    pub fn db_dir(&self) -> String {
        DATA_DIR.into()
    }

    /// Connection URL; `mode=rwc` creates the file when missing
    pub fn to_url(&self) -> String {
        if self.auto_create {
            format!("sqlite:{}/{}?mode=rwc", DATA_DIR, self.path)
        } else {
            format!("sqlite:{}/{}", DATA_DIR, self.path)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assets {
    /// Directory uploaded icons and archives are written under
    #[serde(default = "Assets::root_default")]
    pub root: String,
}

impl Default for Assets {
    fn default() -> Self {
        Assets {
            root: Assets::root_default(),
        }
    }
}

impl Assets {
    fn root_default() -> String {
        ASSET_DIR.into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    #[serde(default = "Log::level_default")]
    pub level: String,
    #[serde(default = "Log::dir_default")]
    pub dir: String,
}

impl Default for Log {
    fn default() -> Self {
        Log {
            level: Log::level_default(),
            dir: Log::dir_default(),
        }
    }
}

impl Log {
    fn level_default() -> String {
        "info".into()
    }

    fn dir_default() -> String {
        "./logs".into()
    }
}
