//! TLS 证书加载。

use axum_server::tls_rustls::RustlsConfig;
use tokio::fs;
use tracing::info;

/// 从 PEM 文件构建 Rustls 配置。
pub async fn load_rustls_config(
    cert_path: &str,
    key_path: &str,
) -> Result<RustlsConfig, std::io::Error> {
    let cert = fs::read(cert_path).await?;
    let key = fs::read(key_path).await?;
    info!(cert = cert_path, "loaded tls certificate");
    RustlsConfig::from_pem(cert, key).await
}
