//! 站点门禁中间件：路径豁免判断与未授权重定向。

use axum::body::Body as AxumBody;
use axum::http::{HeaderValue, Request, StatusCode, Uri, header};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use tracing::debug;
use url::form_urlencoded;

use crate::config::{
    RETURN_TARGET_PARAM, STATIC_ASSET_PREFIX, UNLOCK_API_PATH, UNLOCK_PAGE_PATH,
};
use crate::grant::SessionGrant;
use crate::secrets::SecretSet;

/// 启动时构建、请求间共享的只读门禁配置。
#[derive(Debug)]
pub struct GateConfig {
    pub secrets: SecretSet,
    pub grant: SessionGrant,
}

/// 无需授权即可访问的路径规则，任一条件满足即豁免。
pub struct ExemptPaths {
    pub prefixes: &'static [&'static str],
    pub exact: &'static [&'static str],
    pub suffixes: &'static [&'static str],
}

pub const EXEMPT_PATHS: ExemptPaths = ExemptPaths {
    prefixes: &[STATIC_ASSET_PREFIX, UNLOCK_PAGE_PATH, UNLOCK_API_PATH],
    exact: &["/favicon.ico", "/robots.txt", "/sitemap.xml"],
    suffixes: &[
        ".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg", ".css", ".js", ".txt",
    ],
};

impl ExemptPaths {
    pub fn matches(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
            || self.exact.iter().any(|exact| *exact == path)
            || self.suffixes.iter().any(|suffix| path.ends_with(suffix))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum GateDecision {
    Exempt,
    Authorized,
    /// 携带解锁页地址（含原始目标）。
    Unauthorized(String),
}

/// 根据路径与授权状态判定请求去向。
pub fn classify(uri: &Uri, granted: bool) -> GateDecision {
    if EXEMPT_PATHS.matches(uri.path()) {
        return GateDecision::Exempt;
    }
    if granted {
        return GateDecision::Authorized;
    }
    GateDecision::Unauthorized(unlock_redirect_target(uri))
}

/// 构建 `/password?from=<path+query>`。
pub fn unlock_redirect_target(uri: &Uri) -> String {
    let from = match uri.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", uri.path(), query),
        _ => uri.path().to_string(),
    };
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(RETURN_TARGET_PARAM, &from)
        .finish();
    format!("{UNLOCK_PAGE_PATH}?{query}")
}

/// 门禁中间件：豁免路径直接放行，其余路径需有效授权。
pub async fn gate_middleware(
    jar: CookieJar,
    req: Request<AxumBody>,
    next: middleware::Next,
) -> Response {
    match classify(req.uri(), SessionGrant::is_granted(&jar)) {
        GateDecision::Exempt | GateDecision::Authorized => next.run(req).await,
        GateDecision::Unauthorized(target) => {
            debug!(path = req.uri().path(), "access not granted, redirecting");
            redirect_found(&target)
        }
    }
}

fn redirect_found(target: &str) -> Response {
    match HeaderValue::from_str(target) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        // 目标经过 urlencode，理论上总是合法头部值；兜底回到解锁页。
        Err(_) => (
            StatusCode::FOUND,
            [(header::LOCATION, HeaderValue::from_static(UNLOCK_PAGE_PATH))],
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(value: &str) -> Uri {
        value.parse().expect("valid uri")
    }

    #[test]
    fn exempt_paths_ignore_grant_state() {
        let exempt = [
            "/password",
            "/password/reset",
            "/api/unlock",
            "/favicon.ico",
            "/robots.txt",
            "/sitemap.xml",
            "/assets/index-3f2a.js",
            "/assets",
            "/images/logo.png",
            "/photo.JPG.jpg",
            "/a.jpeg",
            "/b.gif",
            "/c.webp",
            "/d.svg",
            "/styles/site.css",
            "/notes.txt",
        ];
        for path in exempt {
            assert_eq!(classify(&uri(path), false), GateDecision::Exempt, "{path}");
            assert_eq!(classify(&uri(path), true), GateDecision::Exempt, "{path}");
        }
    }

    #[test]
    fn other_paths_are_gated() {
        for path in [
            "/",
            "/dashboard",
            "/api/version",
            "/api/post",
            "/favicon.ico/x",
            "/photo.PNG",
            "/unlock",
        ] {
            assert!(!EXEMPT_PATHS.matches(path), "{path}");
        }
    }

    #[test]
    fn granted_requests_pass() {
        assert_eq!(classify(&uri("/dashboard"), true), GateDecision::Authorized);
    }

    #[test]
    fn missing_grant_redirects_with_return_target() {
        assert_eq!(
            classify(&uri("/dashboard"), false),
            GateDecision::Unauthorized("/password?from=%2Fdashboard".into())
        );
        assert_eq!(
            classify(&uri("/"), false),
            GateDecision::Unauthorized("/password?from=%2F".into())
        );
    }

    #[test]
    fn return_target_keeps_query_string() {
        assert_eq!(
            unlock_redirect_target(&uri("/files?page=2&sort=name")),
            "/password?from=%2Ffiles%3Fpage%3D2%26sort%3Dname"
        );
    }

    #[test]
    fn empty_query_is_dropped_from_return_target() {
        assert_eq!(
            unlock_redirect_target(&uri("/files?")),
            "/password?from=%2Ffiles"
        );
    }

    #[test]
    fn redirect_uses_found_status() {
        let response = redirect_found("/password?from=%2F");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION),
            Some(&HeaderValue::from_static("/password?from=%2F"))
        );
    }
}
