//! 解锁接口：校验站点密码并签发授权 Cookie。

use axum::body::Bytes;
use axum::extract::Extension;
use axum::response::Json as JsonResponse;
use axum_extra::extract::CookieJar;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::gate::GateConfig;
use crate::secrets::SecretSet;

#[derive(Debug, Serialize)]
pub(crate) struct UnlockResponse {
    ok: bool,
}

/// 解锁接口：密码命中任一配置项即写入授权 Cookie。
///
/// 请求体按 JSON 解析，不要求 `Content-Type`。
pub async fn unlock(
    Extension(gate): Extension<Arc<GateConfig>>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, JsonResponse<UnlockResponse>), ApiError> {
    let payload = serde_json::from_slice::<Value>(&body).map_err(|err| {
        debug!(error = %err, "unlock body is not json");
        ApiError::MalformedRequest
    })?;

    verify_password(&gate.secrets, &payload)?;

    info!("site unlocked");
    let jar = jar.add(gate.grant.issue());
    Ok((jar, JsonResponse(UnlockResponse { ok: true })))
}

/// 依次检查配置、密码格式与成员关系。
fn verify_password(secrets: &SecretSet, payload: &Value) -> Result<(), ApiError> {
    if secrets.is_empty() {
        error!("no site password configured");
        return Err(ApiError::ServerMisconfigured);
    }

    let password = payload
        .get("password")
        .and_then(Value::as_str)
        .filter(|password| !password.is_empty())
        .ok_or(ApiError::MissingCredential)?;

    if !secrets.contains(password) {
        warn!("unlock rejected: invalid password");
        return Err(ApiError::InvalidCredential);
    }
    Ok(())
}
