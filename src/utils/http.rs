//! HTTP utility functions

use hyper::header::{CONNECTION, UPGRADE};
use hyper::{Body, Method, Request};

/// Whether the client asked to take the connection over: a protocol
/// upgrade or a `CONNECT` tunnel
pub fn wants_upgrade(req: &Request<Body>) -> bool {
    req.method() == Method::CONNECT || req.headers().contains_key(UPGRADE)
}

/// Value of the `Upgrade` header, if the request carries one
pub fn upgrade_protocol(req: &Request<Body>) -> Option<&str> {
    req.headers().get(UPGRADE).and_then(|v| v.to_str().ok())
}

/// Check whether the `Connection` header lists `token`
pub fn connection_has(req: &Request<Body>, token: &str) -> bool {
    req.headers()
        .get_all(CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(|t| t.trim().eq_ignore_ascii_case(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_upgrade() {
        let plain = Request::get("/").body(Body::empty()).unwrap();
        assert!(!wants_upgrade(&plain));

        let ws = Request::get("/chat")
            .header("connection", "keep-alive, Upgrade")
            .header("upgrade", "websocket")
            .body(Body::empty())
            .unwrap();
        assert!(wants_upgrade(&ws));
        assert!(connection_has(&ws, "upgrade"));
        assert_eq!(upgrade_protocol(&ws), Some("websocket"));

        let tunnel = Request::connect("example.com:443")
            .body(Body::empty())
            .unwrap();
        assert!(wants_upgrade(&tunnel));
    }
}
