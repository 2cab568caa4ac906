//! Fixed-window rate limiting for destructive and general operation classes.

pub mod limiter;
pub mod models;
pub mod store;

pub use limiter::RateLimiter;
pub use models::{OperationClass, RateDecision, WindowState};
pub use store::{InMemoryRateLimitStore, RateLimitStore};
