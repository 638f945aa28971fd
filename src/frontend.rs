//! 嵌入式前端：解锁页、上传页外壳与静态资源。
//!
//! HTML 页面一律 `no-store`，解锁前后不会命中缓存的旧页面。

use axum::http::{Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;

use crate::config::STATIC_ASSET_PREFIX;
use crate::error::ApiError;

const SHELL_PAGE: &str = "index.html";
const UNLOCK_PAGE: &str = "password.html";
const NO_STORE: &str = "no-store";
const ASSET_CACHE: &str = "public, max-age=3600";

#[derive(RustEmbed)]
#[folder = "frontend/dist"]
pub struct FrontendAssets;

/// 请求路径对应的资源类别。
#[derive(Debug, PartialEq, Eq)]
enum Target<'a> {
    /// 页面路由，统一交给上传页外壳。
    Page,
    /// 具体文件（带扩展名或位于静态资源目录下）。
    File(&'a str),
}

fn resolve(path: &str) -> Target<'_> {
    let relative = path.trim_start_matches('/');
    let is_file = path.starts_with(STATIC_ASSET_PREFIX)
        || relative.rsplit('/').next().is_some_and(|name| name.contains('.'));
    if relative.is_empty() || !is_file {
        Target::Page
    } else {
        Target::File(relative)
    }
}

fn embedded(path: &str, cache: &'static str) -> Option<Response> {
    let asset = FrontendAssets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(
        (
            [
                (header::CONTENT_TYPE, mime.essence_str().to_string()),
                (header::CACHE_CONTROL, cache.to_string()),
            ],
            asset.data.into_owned(),
        )
            .into_response(),
    )
}

/// 解锁页（密码输入表单）。
pub async fn serve_unlock_page() -> Result<Response, ApiError> {
    embedded(UNLOCK_PAGE, NO_STORE)
        .ok_or_else(|| ApiError::Internal("unlock page missing from build".into()))
}

/// 回退处理：文件按原路径查找，其余路径返回上传页外壳。
pub async fn serve_frontend(uri: Uri) -> Result<Response, ApiError> {
    let response = match resolve(uri.path()) {
        Target::Page => embedded(SHELL_PAGE, NO_STORE),
        Target::File(path) => embedded(path, ASSET_CACHE),
    };
    response.ok_or_else(|| ApiError::NotFound("Not found".into()))
}
