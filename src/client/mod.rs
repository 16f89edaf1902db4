//! Clients for the routing backend.
//!
//! The session only sees the [`NodeResolver`] and [`RouteProvider`] traits, so
//! that any transport (or an in-process fake) can stand behind it. [`HttpBackend`]
//! implements both over the backend's JSON endpoints.

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod resolve;
#[doc(hidden)]
pub mod route;
pub mod wire;

#[doc(inline)]
pub use error::{ResolutionError, RoutingError, TransportError};
#[doc(inline)]
pub use resolve::NodeResolver;
#[doc(inline)]
pub use route::RouteProvider;
#[doc(inline)]
pub use wire::NodeId;

use std::time::Duration;

use log::debug;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::BackendConfig;

pub const NEAREST_NODE_PATH: &str = "nodo_mas_cercano";
pub const ROUTE_PATH: &str = "ruta";

/// HTTP client for the nearest-node and route endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpBackend {
    /// Creates the client, every request it sends is bounded by `config.timeout`.
    pub fn new(config: &BackendConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::Http)?;

        Ok(HttpBackend {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|_| TransportError::Endpoint(path.to_string()))
    }

    fn transport(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Http(err)
        }
    }

    /// Posts `body` as JSON and decodes the answer.
    ///
    /// The status code is not checked, the backend reports failures
    /// as JSON bodies on non-2xx statuses.
    async fn post<Req, Res>(&self, path: &str, body: &Req) -> Result<Res, TransportError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!("POST {url}");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| self.transport(err))?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| self.transport(err))?;
        debug!("{path} answered {status} with {} bytes", bytes.len());

        serde_json::from_slice(&bytes).map_err(|source| TransportError::Decode { status, source })
    }
}
