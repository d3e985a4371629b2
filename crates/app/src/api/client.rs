//! HTTP client for the storefront API.

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{
    Client, Method, RequestBuilder, Response,
    header::{ACCEPT, HeaderName},
};
use serde::de::DeserializeOwned;
use storefront::{
    cart::Cart,
    checkout::{CreatedOrder, OrderRequest},
    ids::CartItemId,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    api::{AddToCartRequest, ApiError, CartMutation, StorefrontApi, UpdateQuantityRequest},
    auth::load_token,
    storage::DeviceStorage,
};

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// `reqwest`-backed [`StorefrontApi`].
///
/// The bearer token is read from device storage for every call, so signing
/// in or out takes effect without rebuilding the client.
#[derive(Clone)]
pub struct HttpStorefrontApi {
    base_url: String,
    http: Client,
    storage: Arc<dyn DeviceStorage>,
    timeout: Duration,
}

impl fmt::Debug for HttpStorefrontApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpStorefrontApi")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HttpStorefrontApi {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(
        base_url: &str,
        storage: Arc<dyn DeviceStorage>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            storage,
            timeout,
        })
    }

    /// Absolute URL of `path` under the API root.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = Uuid::now_v7();

        debug!(%method, path, %request_id, "sending api request");

        let builder = self
            .http
            .request(method, self.endpoint(path))
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID, request_id.to_string());

        match load_token(self.storage.as_ref()).await {
            Ok(Some(token)) => builder.bearer_auth(token.expose()),
            Ok(None) => builder,
            Err(error) => {
                warn!("sending request without stored bearer token: {error}");

                builder
            }
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|error| {
            if error.is_timeout() {
                ApiError::Timeout(self.timeout)
            } else {
                ApiError::from(error)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_response(status, &body);

        warn!(status = status.as_u16(), "api request failed: {error}");

        Err(error)
    }

    async fn json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.execute(builder).await?;

        Ok(response.json::<T>().await?)
    }

    async fn empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.execute(builder).await?;

        Ok(())
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn fetch_cart(&self) -> Result<Cart, ApiError> {
        self.json(self.request(Method::GET, "cart/").await).await
    }

    async fn add_to_cart(&self, request: AddToCartRequest) -> Result<CartMutation, ApiError> {
        let builder = self.request(Method::POST, "cart/add/").await.json(&request);

        self.json(builder).await
    }

    async fn update_item(
        &self,
        item: CartItemId,
        quantity: u32,
    ) -> Result<CartMutation, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("cart/items/{item}/"))
            .await
            .json(&UpdateQuantityRequest { quantity });

        self.json(builder).await
    }

    async fn remove_item(&self, item: CartItemId) -> Result<(), ApiError> {
        self.empty(
            self.request(Method::DELETE, &format!("cart/items/{item}/"))
                .await,
        )
        .await
    }

    async fn clear_cart(&self) -> Result<(), ApiError> {
        self.empty(self.request(Method::POST, "cart/clear/").await)
            .await
    }

    async fn create_order(&self, order: OrderRequest) -> Result<CreatedOrder, ApiError> {
        let builder = self.request(Method::POST, "orders/").await.json(&order);

        self.json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::{BearerToken, store_token},
        storage::MemoryStorage,
    };

    use super::*;

    fn client(storage: Arc<MemoryStorage>) -> Result<HttpStorefrontApi, ApiError> {
        HttpStorefrontApi::new(
            "https://shop.example.com/api/",
            storage,
            Duration::from_secs(5),
        )
    }

    #[test]
    fn endpoints_join_without_double_slashes() -> TestResult {
        let api = client(Arc::new(MemoryStorage::new()))?;

        assert_eq!(api.endpoint("cart/"), "https://shop.example.com/api/cart/");
        assert_eq!(
            api.endpoint("/cart/items/7/"),
            "https://shop.example.com/api/cart/items/7/"
        );

        Ok(())
    }

    #[tokio::test]
    async fn requests_carry_bearer_token_and_request_id() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        store_token(storage.as_ref(), &BearerToken::parse("sk_test_123")?).await?;

        let api = client(Arc::clone(&storage))?;
        let request = api.request(Method::GET, "cart/").await.build()?;

        assert_eq!(
            request
                .headers()
                .get("authorization")
                .and_then(|value| value.to_str().ok()),
            Some("Bearer sk_test_123")
        );
        assert!(request.headers().contains_key("x-request-id"));
        assert_eq!(request.url().as_str(), "https://shop.example.com/api/cart/");

        Ok(())
    }

    #[tokio::test]
    async fn guests_send_no_authorization_header() -> TestResult {
        let api = client(Arc::new(MemoryStorage::new()))?;
        let request = api.request(Method::POST, "cart/clear/").await.build()?;

        assert!(!request.headers().contains_key("authorization"));
        assert_eq!(request.method(), &Method::POST);

        Ok(())
    }
}
