//! Per-client throttling of registration submissions.

use crate::error::ApiError;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use governor::{clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
    sync::Arc,
};
use tracing::warn;

/// Submission limiter keyed by client address.
pub type ClientLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Header a fronting proxy uses to name the original client.
const FORWARDED_FOR: &str = "x-forwarded-for";

/// Requests whose client cannot be determined share this bucket.
const UNKNOWN_CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Limiter state shared across requests.
#[derive(Clone)]
pub struct RateLimitState {
    pub clients: Arc<ClientLimiter>,
    /// Take the client from `X-Forwarded-For` instead of the peer address
    pub trust_forwarded_for: bool,
}

impl RateLimitState {
    /// Allow each client `submissions_per_minute`; zero is treated as one.
    pub fn new(submissions_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(submissions_per_minute).unwrap_or(NonZeroU32::MIN);

        Self {
            clients: Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute))),
            trust_forwarded_for: false,
        }
    }

    /// Identify clients by the first `X-Forwarded-For` hop.
    pub fn behind_proxy(mut self) -> Self {
        self.trust_forwarded_for = true;
        self
    }

    /// Create a permissive rate limiter for testing.
    pub fn permissive() -> Self {
        Self::new(1000)
    }

    /// Address a request is accounted to.
    pub fn client_of(&self, request: &Request) -> IpAddr {
        if self.trust_forwarded_for {
            if let Some(ip) = forwarded_client(request.headers()) {
                return ip;
            }
        }

        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .unwrap_or(UNKNOWN_CLIENT)
    }

    /// Drop idle client entries.
    pub fn shrink(&self) {
        self.clients.retain_recent();
        self.clients.shrink_to_fit();
    }
}

fn forwarded_client(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get(FORWARDED_FOR)?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

/// Returns 429 once a client has spent its submission quota.
pub async fn rate_limit_middleware(
    State(rate_limit): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = rate_limit.client_of(&request);

    if rate_limit.clients.check_key(&client).is_err() {
        warn!(%client, "Submission rate limit exceeded");
        return Err(ApiError::RateLimitExceeded);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_from(peer: Option<&str>, forwarded: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/v1/registrations");
        if let Some(forwarded) = forwarded {
            builder = builder.header(FORWARDED_FOR, forwarded);
        }
        let mut request = builder.body(Body::empty()).unwrap();
        if let Some(peer) = peer {
            let addr: SocketAddr = peer.parse().unwrap();
            request.extensions_mut().insert(ConnectInfo(addr));
        }
        request
    }

    #[test]
    fn test_quota_is_per_client() {
        let state = RateLimitState::new(1);
        let a: IpAddr = "10.0.0.1".parse().unwrap();
        let b: IpAddr = "10.0.0.2".parse().unwrap();

        assert!(state.clients.check_key(&a).is_ok());
        assert!(state.clients.check_key(&a).is_err());
        assert!(state.clients.check_key(&b).is_ok());
    }

    #[test]
    fn test_zero_quota_still_admits_one() {
        let state = RateLimitState::new(0);
        assert!(state.clients.check_key(&UNKNOWN_CLIENT).is_ok());
    }

    #[test]
    fn test_client_from_peer_address() {
        let state = RateLimitState::new(5);
        let request = request_from(Some("192.0.2.7:51000"), Some("198.51.100.1"));

        assert_eq!(state.client_of(&request), "192.0.2.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_client_from_forwarded_header_behind_proxy() {
        let state = RateLimitState::new(5).behind_proxy();

        let request = request_from(Some("10.0.0.1:443"), Some("198.51.100.1, 10.0.0.1"));
        assert_eq!(state.client_of(&request), "198.51.100.1".parse::<IpAddr>().unwrap());

        // Unparseable header falls back to the peer
        let request = request_from(Some("10.0.0.1:443"), Some("not-an-ip"));
        assert_eq!(state.client_of(&request), "10.0.0.1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_unknown_client_bucket() {
        let state = RateLimitState::new(5);
        assert_eq!(state.client_of(&request_from(None, None)), UNKNOWN_CLIENT);
    }
}
