//! Security Module
//!
//! Security headers applied to every response the service sends.

pub mod middleware;

pub use middleware::security_headers_middleware;
