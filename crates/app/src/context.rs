//! App Context

use std::{sync::Arc, time::Duration};

use storefront::checkout::CheckoutPricing;
use thiserror::Error;
use tracing::debug;

use crate::{
    api::{ApiError, HttpStorefrontApi, StorefrontApi},
    auth::{BearerToken, TokenError, store_token},
    cart::CartStore,
    checkout::{CheckoutWizard, Navigator},
    config::{ClientConfig, ConfigError},
    notify::Notifier,
    storage::{DeviceStorage, FileStorage},
};

/// Errors building an [`AppContext`].
#[derive(Debug, Error)]
pub enum AppInitError {
    /// No API base URL was configured.
    #[error("no API URL configured (set STOREFRONT_API_URL or pass --api-url)")]
    MissingApiUrl,

    /// Settings failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("failed to create API client")]
    Client(#[source] ApiError),

    /// The configured token could not be stored.
    #[error("failed to store API token")]
    Token(#[source] TokenError),
}

/// Everything a storefront view needs, wired from configuration.
#[derive(Clone)]
pub struct AppContext {
    /// Device storage for the token and cart snapshot.
    pub storage: Arc<dyn DeviceStorage>,

    /// Storefront REST client.
    pub api: Arc<dyn StorefrontApi>,

    /// The shared cart.
    pub cart: Arc<CartStore>,

    /// Tax and shipping prices.
    pub pricing: CheckoutPricing,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// A configured API token is written to device storage first so every
    /// request carries it.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is incomplete, the token is
    /// invalid or cannot be stored, or the HTTP client cannot be built.
    pub async fn from_config(
        config: &ClientConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppInitError> {
        let api_url = config
            .api_url
            .as_deref()
            .ok_or(AppInitError::MissingApiUrl)?;
        let timeout = config.request_timeout()?;
        let storage: Arc<dyn DeviceStorage> = Arc::new(FileStorage::new(&config.storage_dir));

        if let Some(raw) = config.api_token.as_deref() {
            let token = BearerToken::parse(raw).map_err(AppInitError::Token)?;

            store_token(storage.as_ref(), &token)
                .await
                .map_err(AppInitError::Token)?;
        }

        let api: Arc<dyn StorefrontApi> = Arc::new(
            HttpStorefrontApi::new(api_url, Arc::clone(&storage), timeout)
                .map_err(AppInitError::Client)?,
        );

        debug!(api_url, storage = %config.storage_dir.display(), "storefront context ready");

        Ok(Self::new(storage, api, notifier, config.pricing(), timeout))
    }

    /// Wire a context from already-built parts.
    pub fn new(
        storage: Arc<dyn DeviceStorage>,
        api: Arc<dyn StorefrontApi>,
        notifier: Arc<dyn Notifier>,
        pricing: CheckoutPricing,
        timeout: Duration,
    ) -> Self {
        let cart = Arc::new(CartStore::new(
            Arc::clone(&api),
            Arc::clone(&storage),
            notifier,
            timeout,
        ));

        Self {
            storage,
            api,
            cart,
            pricing,
            timeout,
        }
    }

    /// Start a new checkout against the shared cart.
    pub fn checkout(&self, navigator: Arc<dyn Navigator>) -> CheckoutWizard {
        CheckoutWizard::new(
            Arc::clone(&self.cart),
            Arc::clone(&self.api),
            navigator,
            self.pricing.clone(),
            self.timeout,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rust_decimal::Decimal;
    use storefront::prices::TaxRate;
    use testresult::TestResult;

    use crate::{
        auth::load_token,
        checkout::MockNavigator,
        notify::TracingNotifier,
        storage::MemoryStorage,
        test::{FakeStorefront, product},
    };

    use super::*;

    fn config(storage_dir: PathBuf) -> ClientConfig {
        ClientConfig {
            api_url: Some("http://localhost:8000/api".to_string()),
            api_token: Some("tok_abc".to_string()),
            storage_dir,
            request_timeout_secs: 5,
            tax_rate: TaxRate::ZERO,
            shipping_rates: Vec::new(),
        }
    }

    #[tokio::test]
    async fn from_config_stores_token() -> TestResult {
        let dir = tempfile::tempdir()?;
        let context = AppContext::from_config(
            &config(dir.path().to_path_buf()),
            Arc::new(TracingNotifier),
        )
        .await?;

        let token = load_token(context.storage.as_ref()).await?;

        assert_eq!(token.as_ref().map(BearerToken::expose), Some("tok_abc"));
        assert_eq!(context.timeout, Duration::from_secs(5));

        Ok(())
    }

    #[tokio::test]
    async fn missing_api_url_is_reported() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut config = config(dir.path().to_path_buf());
        config.api_url = None;

        let result = AppContext::from_config(&config, Arc::new(TracingNotifier)).await;

        assert!(matches!(result, Err(AppInitError::MissingApiUrl)));

        Ok(())
    }

    #[tokio::test]
    async fn checkout_shares_the_cart() -> TestResult {
        let context = AppContext::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(FakeStorefront::new().with_price("p1", 2500)),
            Arc::new(TracingNotifier),
            CheckoutPricing::new(TaxRate::ZERO),
            Duration::from_secs(5),
        );

        context.cart.add_to_cart(&product("p1", "Lamp"), None, 2).await;

        let wizard = context.checkout(Arc::new(MockNavigator::new()));

        assert_eq!(wizard.totals().subtotal, Decimal::new(5000, 2));

        Ok(())
    }
}
