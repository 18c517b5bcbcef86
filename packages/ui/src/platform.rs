//! Shared gateway constructor for all platforms.
//!
//! The credential store behind the gateway depends on the build:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStore`]
//! - **Everything else** (native builds, tests): [`store::MemoryStore`]

use api::{ApiRequest, ApiResponse, Gateway, HttpTransport, Transport, TransportError};
use store::config::ApiConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = store::MemoryStore;

/// Transport behind [`ConsoleGateway`].
#[derive(Clone, Debug)]
pub enum ConsoleTransport {
    Http(HttpTransport),
    /// Scripted responses, for mounting screens in tests.
    #[cfg(test)]
    Scripted(api::StubTransport),
}

impl Transport for ConsoleTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        match self {
            ConsoleTransport::Http(http) => http.send(request).await,
            #[cfg(test)]
            ConsoleTransport::Scripted(stub) => stub.send(request).await,
        }
    }
}

/// The gateway the running console talks through.
pub type ConsoleGateway = Gateway<ConsoleTransport, PlatformStore>;

pub fn make_store() -> PlatformStore {
    PlatformStore::new()
}

/// Turn a configured base URL into an absolute one.
///
/// Absolute URLs are kept. A relative prefix such as `/api/v1` is joined to the
/// page origin when one is known, otherwise returned unchanged.
pub fn resolve_base_url(base_url: &str, origin: Option<&str>) -> String {
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        return base_url.to_string();
    }
    match origin {
        Some(origin) => format!(
            "{}/{}",
            origin.trim_end_matches('/'),
            base_url.trim_start_matches('/')
        ),
        None => base_url.to_string(),
    }
}

/// `window.location.origin`, when running in a browser.
pub fn page_origin() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()?.location().origin().ok()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

pub fn make_gateway(config: &ApiConfig, store: PlatformStore) -> ConsoleGateway {
    let base_url = resolve_base_url(&config.base_url, page_origin().as_deref());
    tracing::debug!(%base_url, "creating gateway");
    Gateway::new(ConsoleTransport::Http(HttpTransport::new(base_url)), store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_base_joins_origin() {
        assert_eq!(
            resolve_base_url("/api/v1", Some("https://parking.example.com/")),
            "https://parking.example.com/api/v1"
        );
    }

    #[test]
    fn test_absolute_base_is_kept() {
        assert_eq!(
            resolve_base_url("http://localhost:8080/api/v1", Some("https://other.example.com")),
            "http://localhost:8080/api/v1"
        );
    }

    #[test]
    fn test_no_origin_keeps_relative_base() {
        assert_eq!(resolve_base_url("/api/v1", None), "/api/v1");
    }

    #[test]
    fn test_native_gateway_uses_configured_base() {
        let gateway = make_gateway(&ApiConfig::default(), make_store());
        match gateway.transport() {
            ConsoleTransport::Http(http) => assert_eq!(http.base_url(), "/api/v1"),
            other => panic!("unexpected transport {other:?}"),
        }
    }
}
