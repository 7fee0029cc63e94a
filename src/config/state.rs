// Application state module
// Immutable per-process state shared by every connection

use http_body_util::Empty;
use hyper::body::Bytes;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::types::Config;

/// Outbound HTTP/1.1 client used by the proxy route, `http` and `https`
pub type ProxyClient = Client<HttpsConnector<HttpConnector>, Empty<Bytes>>;

/// Build the proxy client: rustls over the ring provider, webpki root store
pub fn build_proxy_client() -> Result<ProxyClient, rustls::Error> {
    let connector = HttpsConnectorBuilder::new()
        .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())?
        .https_or_http()
        .enable_http1()
        .build();

    Ok(Client::builder(TokioExecutor::new()).build(connector))
}

/// Application state
pub struct AppState {
    pub config: Config,
    pub client: ProxyClient,

    // Cached config values for fast access
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, rustls::Error> {
        Ok(Self {
            config: config.clone(),
            client: build_proxy_client()?,
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
        })
    }
}
