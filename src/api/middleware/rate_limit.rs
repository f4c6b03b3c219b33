//! Token-bucket admission gate in front of every route.
//!
//! One [`RateGate`] is built at startup and shared through [`AppState`]. In
//! `global` scope every request draws from one bucket; in `client` scope each
//! client IP gets its own bucket and idle buckets are evicted by a background
//! task (see [`crate::server::run`]).

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use governor::{DefaultDirectRateLimiter, DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::fmt;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::{error::AppError, state::AppState};

/// Which requests share a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateLimitScope {
    /// One bucket for the whole process.
    #[default]
    Global,
    /// One bucket per client IP.
    Client,
}

#[derive(Debug, thiserror::Error)]
#[error("expected 'global' or 'client'")]
pub struct ParseScopeError;

impl FromStr for RateLimitScope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "client" => Ok(Self::Client),
            _ => Err(ParseScopeError),
        }
    }
}

impl fmt::Display for RateLimitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Global => "global",
            Self::Client => "client",
        })
    }
}

enum Buckets {
    Global(DefaultDirectRateLimiter),
    Client(DefaultKeyedRateLimiter<String>),
}

/// GCRA rate limiter. Admission is a single atomic compare-and-swap on the
/// bucket state: callers never wait and never queue.
pub struct RateGate {
    buckets: Buckets,
    quota: Quota,
    behind_proxy: bool,
}

impl RateGate {
    /// Builds a gate refilling `per_second` permits each second with room for `burst`.
    pub fn new(
        per_second: NonZeroU32,
        burst: NonZeroU32,
        scope: RateLimitScope,
        behind_proxy: bool,
    ) -> Self {
        let quota = Quota::per_second(per_second).allow_burst(burst);

        let buckets = match scope {
            RateLimitScope::Global => Buckets::Global(RateLimiter::direct(quota)),
            RateLimitScope::Client => Buckets::Client(RateLimiter::keyed(quota)),
        };

        Self {
            buckets,
            quota,
            behind_proxy,
        }
    }

    /// Convenience constructor taking plain integers; zero is clamped to one.
    pub fn with_limits(per_second: u32, burst: u32, scope: RateLimitScope) -> Self {
        Self::new(
            NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(burst).unwrap_or(NonZeroU32::MIN),
            scope,
            false,
        )
    }

    /// Reads client IP from forwarding headers instead of the peer address.
    pub fn behind_proxy(mut self, behind_proxy: bool) -> Self {
        self.behind_proxy = behind_proxy;
        self
    }

    pub fn scope(&self) -> RateLimitScope {
        match self.buckets {
            Buckets::Global(_) => RateLimitScope::Global,
            Buckets::Client(_) => RateLimitScope::Client,
        }
    }

    /// Takes one permit from the shared bucket.
    ///
    /// In `client` scope this draws from the bucket of an anonymous client.
    pub fn try_admit(&self) -> bool {
        self.try_admit_client(UNKNOWN_CLIENT)
    }

    /// Takes one permit on behalf of `client`. The key is ignored in `global` scope.
    pub fn try_admit_client(&self, client: &str) -> bool {
        match &self.buckets {
            Buckets::Global(limiter) => limiter.check().is_ok(),
            Buckets::Client(limiter) => limiter.check_key(&client.to_string()).is_ok(),
        }
    }

    /// Seconds until the next permit is minted, rounded up.
    pub fn retry_after_secs(&self) -> u64 {
        let interval = self.quota.replenish_interval();
        let secs = interval.as_secs() + u64::from(interval.subsec_nanos() > 0);
        secs.max(1)
    }

    /// Drops per-client buckets that have refilled completely.
    pub fn retain_recent(&self) {
        if let Buckets::Client(limiter) = &self.buckets {
            limiter.retain_recent();
            limiter.shrink_to_fit();
        }
    }

    /// Number of client buckets currently tracked (always 0 in `global` scope).
    pub fn tracked_clients(&self) -> usize {
        match &self.buckets {
            Buckets::Global(_) => 0,
            Buckets::Client(limiter) => limiter.len(),
        }
    }

    fn client_key(&self, req: &Request) -> String {
        if self.behind_proxy
            && let Some(ip) = forwarded_ip(req.headers())
        {
            return ip;
        }

        req.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
    }

    fn admit_request(&self, req: &Request) -> bool {
        match self.scope() {
            RateLimitScope::Global => self.try_admit(),
            RateLimitScope::Client => self.try_admit_client(&self.client_key(req)),
        }
    }
}

const UNKNOWN_CLIENT: &str = "unknown";

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let from_forwarded_for = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let from_real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    from_forwarded_for.or_else(from_real_ip).map(str::to_string)
}

/// Admits or rejects the request before any other work is done.
///
/// # Errors
///
/// Returns `429 Too Many Requests` with `Retry-After` when the bucket is empty.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), rate_limit::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !st.rate_gate.admit_request(&req) {
        tracing::debug!(path = %req.uri().path(), "Rate limit exceeded");
        return Err(AppError::rate_limited(st.rate_gate.retry_after_secs()));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use std::sync::Arc;
    use std::time::Duration;

    fn gate(scope: RateLimitScope) -> RateGate {
        RateGate::with_limits(1, 5, scope)
    }

    #[test]
    fn test_sixth_request_is_rejected() {
        let gate = gate(RateLimitScope::Global);

        for _ in 0..5 {
            assert!(gate.try_admit());
        }
        assert!(!gate.try_admit());
    }

    #[test]
    fn test_one_permit_after_refill_interval() {
        let gate = gate(RateLimitScope::Global);

        for _ in 0..5 {
            assert!(gate.try_admit());
        }
        assert!(!gate.try_admit());

        std::thread::sleep(Duration::from_millis(1100));

        assert!(gate.try_admit());
        assert!(!gate.try_admit());
    }

    #[test]
    fn test_concurrent_callers_share_capacity() {
        let gate = Arc::new(gate(RateLimitScope::Global));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let gate = gate.clone();
                std::thread::spawn(move || gate.try_admit())
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(admitted, 5);
    }

    #[test]
    fn test_client_scope_isolates_buckets() {
        let gate = gate(RateLimitScope::Client);

        for _ in 0..5 {
            assert!(gate.try_admit_client("10.0.0.1"));
        }
        assert!(!gate.try_admit_client("10.0.0.1"));
        assert!(gate.try_admit_client("10.0.0.2"));
        assert_eq!(gate.tracked_clients(), 2);
    }

    #[test]
    fn test_global_scope_ignores_client_key() {
        let gate = gate(RateLimitScope::Global);

        for i in 0..5 {
            assert!(gate.try_admit_client(&format!("10.0.0.{i}")));
        }
        assert!(!gate.try_admit_client("10.0.0.99"));
        assert_eq!(gate.tracked_clients(), 0);
    }

    #[test]
    fn test_retry_after_rounds_up() {
        assert_eq!(RateGate::with_limits(1, 5, RateLimitScope::Global).retry_after_secs(), 1);
        assert_eq!(RateGate::with_limits(10, 5, RateLimitScope::Global).retry_after_secs(), 1);
    }

    #[test]
    fn test_zero_limits_are_clamped() {
        let gate = RateGate::with_limits(0, 0, RateLimitScope::Global);
        assert!(gate.try_admit());
        assert!(!gate.try_admit());
    }

    #[test]
    fn test_scope_parsing() {
        assert_eq!("global".parse::<RateLimitScope>().unwrap(), RateLimitScope::Global);
        assert_eq!(" Client ".parse::<RateLimitScope>().unwrap(), RateLimitScope::Client);
        assert!("per-ip".parse::<RateLimitScope>().is_err());
        assert_eq!(RateLimitScope::Client.to_string(), "client");
    }

    #[test]
    fn test_client_key_prefers_forwarded_headers_behind_proxy() {
        let gate = gate(RateLimitScope::Client).behind_proxy(true);

        let req = axum::http::Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(gate.client_key(&req), "203.0.113.7");

        let req = axum::http::Request::builder()
            .header("x-real-ip", "198.51.100.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(gate.client_key(&req), "198.51.100.2");
    }

    #[test]
    fn test_client_key_ignores_headers_without_proxy() {
        let gate = gate(RateLimitScope::Client);

        let mut req = axum::http::Request::builder()
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap();
        assert_eq!(gate.client_key(&req), "unknown");

        let peer: SocketAddr = "192.0.2.10:4000".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(peer));
        assert_eq!(gate.client_key(&req), "192.0.2.10");
    }
}
