//! 访问授权 Cookie：签发与校验。
//!
//! 授权只是一个"已通过"的标记，不携带身份或签发时间；过期交给 Cookie 的
//! `Max-Age` 处理。校验逻辑集中在这里，换成签名令牌时门禁中间件无需改动。

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use cookie::time::Duration as CookieDuration;

use crate::config::{GRANT_COOKIE_NAME, GRANT_COOKIE_VALUE, GRANT_MAX_AGE_SECS};

/// 授权 Cookie 的签发策略。
#[derive(Clone, Copy, Debug)]
pub struct SessionGrant {
    secure: bool,
}

impl SessionGrant {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub fn is_secure(self) -> bool {
        self.secure
    }

    /// 生成授权 Cookie，有效期七天，整站路径可见。
    pub fn issue(self) -> Cookie<'static> {
        Cookie::build((GRANT_COOKIE_NAME, GRANT_COOKIE_VALUE))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(GRANT_MAX_AGE_SECS))
            .build()
    }

    /// 值必须与标记完全一致；缺失视为无效。
    pub fn is_valid(value: Option<&str>) -> bool {
        value == Some(GRANT_COOKIE_VALUE)
    }

    /// 从请求 Cookie 中读取并校验授权。
    pub fn is_granted(jar: &CookieJar) -> bool {
        Self::is_valid(jar.get(GRANT_COOKIE_NAME).map(|cookie| cookie.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_cookie_carries_required_attributes() {
        let cookie = SessionGrant::new(false).issue();
        assert_eq!(cookie.name(), GRANT_COOKIE_NAME);
        assert_eq!(cookie.value(), GRANT_COOKIE_VALUE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(604_800)));
        assert_eq!(cookie.secure(), Some(false));
    }

    #[test]
    fn production_cookie_is_secure() {
        let cookie = SessionGrant::new(true).issue();
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn reissuing_yields_the_same_grant() {
        let grant = SessionGrant::new(true);
        assert_eq!(grant.issue().to_string(), grant.issue().to_string());
    }

    #[test]
    fn validity_requires_exact_sentinel() {
        assert!(SessionGrant::is_valid(Some("true")));
        assert!(!SessionGrant::is_valid(None));
        assert!(!SessionGrant::is_valid(Some("")));
        assert!(!SessionGrant::is_valid(Some("TRUE")));
        assert!(!SessionGrant::is_valid(Some(" true")));
        assert!(!SessionGrant::is_valid(Some("true ")));
        assert!(!SessionGrant::is_valid(Some("1")));
    }

    #[test]
    fn reads_grant_from_cookie_jar() {
        let jar = CookieJar::new();
        assert!(!SessionGrant::is_granted(&jar));

        let jar = jar.add(SessionGrant::new(false).issue());
        assert!(SessionGrant::is_granted(&jar));

        let jar = CookieJar::new().add(Cookie::new(GRANT_COOKIE_NAME, "false"));
        assert!(!SessionGrant::is_granted(&jar));
    }
}
