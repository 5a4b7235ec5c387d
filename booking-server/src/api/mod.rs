//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`bookings`] - 预订管理接口 (聚合读取 + 写入)
//! - [`payments`] - 支付记录接口
//! - [`vehicles`] - 车辆目录接口
//! - [`hotels`] - 酒店目录接口
//! - [`diving`] - 潜水服务目录接口
//! - [`van_destinations`] - 面包车目的地目录接口
//! - [`tours`] - 行程目录接口
//! - [`packages`] - 套餐目录接口
//! - [`qr_codes`] - 收款二维码接口

pub mod bookings;
pub mod diving;
pub mod health;
pub mod hotels;
pub mod packages;
pub mod payments;
pub mod qr_codes;
pub mod tours;
pub mod van_destinations;
pub mod vehicles;

use std::time::Duration;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResult, db_error, ok, ok_with_message};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Booking API - aggregation reads and child-replacing writes
        .merge(bookings::router())
        .merge(payments::router())
        // Catalog APIs - uniform CRUD
        .merge(vehicles::router())
        .merge(hotels::router())
        .merge(diving::router())
        .merge(van_destinations::router())
        .merge(tours::router())
        .merge(packages::router())
        .merge(qr_codes::router())
}

/// Build a fully configured application with all middleware
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests (admin panel is served elsewhere)
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Per-request timeout
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}
