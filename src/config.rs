//! CLI 参数、环境变量与门禁常量。

use clap::{Parser, ValueEnum};
use shadow_rs::formatcp;

use crate::build;
use crate::gate::GateConfig;
use crate::grant::SessionGrant;
use crate::secrets::SecretSet;

const VERSION_INFO: &str = formatcp!(
    r#"{}\ncommit_hash: {}\nbuild_time: {}\nbuild_env: {},{}"#,
    build::PKG_VERSION,
    build::SHORT_COMMIT,
    build::BUILD_TIME,
    build::RUST_VERSION,
    build::RUST_CHANNEL
);

pub const GRANT_COOKIE_NAME: &str = "site_access_granted";
pub const GRANT_COOKIE_VALUE: &str = "true";
pub const GRANT_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;
pub const UNLOCK_PAGE_PATH: &str = "/password";
pub const UNLOCK_API_PATH: &str = "/api/unlock";
pub const STATIC_ASSET_PREFIX: &str = "/assets";
pub const RETURN_TARGET_PARAM: &str = "from";
pub const SHUTDOWN_GRACE_SECS: u64 = 10;

/// 运行模式：生产环境下授权 Cookie 仅通过 HTTPS 发送。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    #[default]
    Development,
    Production,
}

/// CLI arguments and environment configuration for the server.
#[derive(Parser, Debug)]
#[command(name = "site-gate", version = VERSION_INFO, about = "Password gated upload site")]
pub struct Args {
    #[arg(long, env = "SITE_PASSWORD1", help = "Site password (slot 1)")]
    pub password1: Option<String>,
    #[arg(long, env = "SITE_PASSWORD2", help = "Site password (slot 2)")]
    pub password2: Option<String>,
    #[arg(
        long,
        env = "SITE_PASSWORD",
        help = "Legacy single site password, still accepted"
    )]
    pub password: Option<String>,
    #[arg(
        long,
        env = "SITE_ENV",
        value_enum,
        default_value_t = RunMode::Development,
        help = "Deployment mode, production marks the access cookie Secure"
    )]
    pub mode: RunMode,
    #[arg(
        short = 'b',
        long,
        env = "SITE_BIND",
        default_value = "0.0.0.0",
        help = "Bind address for HTTP/HTTPS"
    )]
    pub host: String,
    #[arg(
        short = 'p',
        long,
        env = "SITE_HTTP_PORT",
        default_value_t = 3000,
        help = "HTTP port"
    )]
    pub http_port: u16,
    #[arg(
        short = 'P',
        long,
        env = "SITE_HTTPS_PORT",
        default_value_t = 3443,
        help = "HTTPS port, used only when a cert and key are given"
    )]
    pub https_port: u16,
    #[arg(short = 'c', long, env = "SITE_TLS_CERT", help = "TLS cert path")]
    pub tls_cert: Option<String>,
    #[arg(short = 'k', long, env = "SITE_TLS_KEY", help = "TLS key path")]
    pub tls_key: Option<String>,
}

impl Args {
    /// 汇总所有密码槽位，构建只读的门禁配置。
    pub fn gate_config(&self) -> GateConfig {
        let secrets = SecretSet::from_slots([
            self.password1.as_deref(),
            self.password2.as_deref(),
            self.password.as_deref(),
        ]);
        GateConfig {
            secrets,
            grant: SessionGrant::new(self.mode == RunMode::Production),
        }
    }

    /// 证书与私钥同时提供时才启用 HTTPS。
    pub fn tls_paths(&self) -> Option<(&str, &str)> {
        match (&self.tls_cert, &self.tls_key) {
            (Some(cert), Some(key)) => Some((cert.as_str(), key.as_str())),
            _ => None,
        }
    }
}
