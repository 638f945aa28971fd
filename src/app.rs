//! 路由装配：门禁、解锁接口、前端与请求追踪。

use axum::extract::Extension;
use axum::http::Request;
use axum::routing::{get, post};
use axum::{Router, middleware};
use std::sync::Arc;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, info_span};

use crate::config::{UNLOCK_API_PATH, UNLOCK_PAGE_PATH};
use crate::gate::{GateConfig, gate_middleware};
use crate::http::{add_security_headers, client_ip};
use crate::{frontend, unlock, version};

/// 构建完整路由；门禁位于所有路由（含回退）之前。
pub fn build_router(gate: Arc<GateConfig>) -> Router {
    Router::new()
        .route(UNLOCK_API_PATH, post(unlock::unlock))
        .route(UNLOCK_PAGE_PATH, get(frontend::serve_unlock_page))
        .route("/api/version", get(version::get_version_info))
        .fallback(frontend::serve_frontend)
        .layer(middleware::from_fn(gate_middleware))
        .layer(middleware::from_fn(add_security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    info_span!(
                        env!("CARGO_CRATE_NAME"),
                        client_ip = client_ip(request),
                        method = ?request.method(),
                        path = ?request.uri().path(),
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(Extension(gate))
}
