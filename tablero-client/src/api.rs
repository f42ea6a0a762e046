//! API client with authentication support
//!
//! Owns the base URL and the bearer-token slot. Every request goes out
//! with `Authorization: Bearer <token>` when a token is held; any HTTP 401
//! coming back fires the registered expiry handler before the error
//! reaches the caller, so the global reaction runs no matter which call
//! tripped it.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use log::{info, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tablero_model::ErrorBody;
use tokio::sync::RwLock;

use crate::errors::NetworkError;

type ExpiryFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
type ExpiryHandler = Box<dyn Fn() -> ExpiryFuture + Send + Sync>;

/// HTTP client for the backend REST API
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
    on_expired: Arc<OnceLock<ExpiryHandler>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field(
                "has_token",
                &self.token.try_read().map(|t| t.is_some()).unwrap_or(false),
            )
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(base_url: String) -> Self {
        // Normalize the provided base URL so we don't trip over missing
        // schemes: "localhost:4000" is a value users actually configure.
        fn normalize(raw: String) -> String {
            let original = raw.clone();
            let trimmed = raw.trim().trim_end_matches('/').to_string();
            let with_scheme =
                if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
                    trimmed
                } else {
                    format!("http://{}", trimmed)
                };
            if with_scheme != original {
                warn!(
                    "[ApiClient] Normalized base URL from '{}' to '{}'",
                    original, with_scheme
                );
            }
            with_scheme
        }

        let base_url = normalize(base_url);
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        info!("[ApiClient] Created API client for {}", base_url);

        Self {
            client,
            base_url,
            token: Arc::new(RwLock::new(None)),
            on_expired: Arc::new(OnceLock::new()),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set or clear the bearer token attached to outgoing requests
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    /// Get the current bearer token
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Register the handler fired whenever the backend answers 401.
    /// Set once, at wiring time; later calls are ignored.
    pub fn set_expiry_handler<F, Fut>(&self, handler: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let boxed: ExpiryHandler = Box::new(move || Box::pin(handler()) as ExpiryFuture);
        let _ = self.on_expired.set(boxed);
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer token, when one is held, to a request
    pub async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.token.read().await.as_ref() {
            builder.header("Authorization", format!("Bearer {}", token))
        } else {
            builder
        }
    }

    /// `GET` a JSON endpoint
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, NetworkError> {
        let request = self.client.get(self.url(path));
        let request = self.authorize(request).await;
        self.execute(request).await
    }

    /// `POST` a JSON body to a JSON endpoint
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, NetworkError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        let request = self.authorize(request).await;
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, NetworkError> {
        let response = request
            .send()
            .await
            .map_err(|e| NetworkError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| NetworkError::InvalidResponse(e.to_string()));
        }

        let message = Self::backend_message(response).await;
        if status == StatusCode::UNAUTHORIZED {
            warn!("[ApiClient] Backend rejected the held credential (401)");
            self.set_token(None).await;
            if let Some(handler) = self.on_expired.get() {
                handler().await;
            }
            return Err(NetworkError::Unauthorized { message });
        }

        Err(NetworkError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// Pull the `mensaje` field out of an error response, when there is one
    async fn backend_message(response: Response) -> Option<String> {
        let body = response.text().await.ok()?;
        serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|envelope| envelope.message)
    }
}
