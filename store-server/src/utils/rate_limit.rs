//! Per-client-address rate limiting
//!
//! Keyed governor limiter guarding the abuse-prone endpoints (quote
//! requests). The client address comes from proxy headers when present,
//! falling back to the socket peer address.

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;

use axum::http::HeaderMap;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

/// Rate limiter keyed by client IP
pub struct ClientRateLimiter {
    limiter: DefaultKeyedRateLimiter<IpAddr>,
}

impl ClientRateLimiter {
    /// Allow `limit` requests per client per minute (minimum 1)
    pub fn per_minute(limit: u32) -> Self {
        let cells = NonZeroU32::new(limit).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::keyed(Quota::per_minute(cells)),
        }
    }

    /// True when the request is within the client's quota
    pub fn check(&self, ip: IpAddr) -> bool {
        self.limiter.check_key(&ip).is_ok()
    }
}

/// Extract the real client IP
///
/// Checks `X-Forwarded-For` (first hop) and `X-Real-IP` before trusting the
/// peer address, so the limiter keys on end clients rather than a reverse
/// proxy.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> IpAddr {
    if let Some(ip) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .and_then(|s| s.trim().parse::<IpAddr>().ok())
    {
        return ip;
    }

    if let Some(ip) = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<IpAddr>().ok())
    {
        return ip;
    }

    peer.ip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_burst_then_rejects() {
        let limiter = ClientRateLimiter::per_minute(3);
        let ip: IpAddr = "203.0.113.7".parse().unwrap();

        assert!(limiter.check(ip));
        assert!(limiter.check(ip));
        assert!(limiter.check(ip));
        assert!(!limiter.check(ip));

        // Another client is unaffected
        let other: IpAddr = "203.0.113.8".parse().unwrap();
        assert!(limiter.check(other));
    }

    #[test]
    fn prefers_forwarded_header_over_peer() {
        let peer: SocketAddr = "10.0.0.1:9999".parse().unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers, peer), "203.0.113.9".parse::<IpAddr>().unwrap());

        let empty = HeaderMap::new();
        assert_eq!(client_ip(&empty, peer), "10.0.0.1".parse::<IpAddr>().unwrap());
    }
}
