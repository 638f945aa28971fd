//! 构建信息与门禁策略概览（位于门禁之后）。

use axum::extract::Extension;
use axum::response::Json as JsonResponse;
use serde::Serialize;
use std::sync::Arc;

use crate::config::{GRANT_COOKIE_NAME, GRANT_MAX_AGE_SECS};
use crate::gate::GateConfig;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    version: &'static str,
    commit: &'static str,
    build_time: &'static str,
}

/// 授权 Cookie 的策略，不含任何密码信息。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantPolicy {
    cookie: &'static str,
    max_age_secs: i64,
    secure: bool,
    configured: bool,
}

#[derive(Debug, Serialize)]
pub struct SiteInfo {
    build: BuildInfo,
    grant: GrantPolicy,
}

impl SiteInfo {
    fn describe(gate: &GateConfig) -> Self {
        Self {
            build: BuildInfo {
                version: crate::build::PKG_VERSION,
                commit: crate::build::SHORT_COMMIT,
                build_time: crate::build::BUILD_TIME,
            },
            grant: GrantPolicy {
                cookie: GRANT_COOKIE_NAME,
                max_age_secs: GRANT_MAX_AGE_SECS,
                secure: gate.grant.is_secure(),
                configured: !gate.secrets.is_empty(),
            },
        }
    }
}

pub async fn get_version_info(
    Extension(gate): Extension<Arc<GateConfig>>,
) -> JsonResponse<SiteInfo> {
    JsonResponse(SiteInfo::describe(&gate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grant::SessionGrant;
    use crate::secrets::SecretSet;

    #[tokio::test]
    async fn reports_grant_policy_without_secrets() {
        let gate = Arc::new(GateConfig {
            secrets: SecretSet::from_slots([Some("hunter2")]),
            grant: SessionGrant::new(true),
        });
        let JsonResponse(info) = get_version_info(Extension(gate)).await;
        let value = serde_json::to_value(&info).expect("serialize");

        assert_eq!(value["grant"]["cookie"], GRANT_COOKIE_NAME);
        assert_eq!(value["grant"]["maxAgeSecs"], 604_800);
        assert_eq!(value["grant"]["secure"], true);
        assert_eq!(value["grant"]["configured"], true);
        assert_eq!(value["build"]["version"], env!("CARGO_PKG_VERSION"));
        assert!(!value.to_string().contains("hunter2"));
    }

    #[test]
    fn unconfigured_gate_is_reported() {
        let gate = GateConfig {
            secrets: SecretSet::default(),
            grant: SessionGrant::new(false),
        };
        let info = SiteInfo::describe(&gate);
        assert!(!info.grant.configured);
        assert!(!info.grant.secure);
    }
}
