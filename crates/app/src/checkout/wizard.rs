//! Checkout wizard

use std::{fmt, sync::Arc, time::Duration};

use storefront::{
    checkout::{CheckoutPricing, CheckoutSession, CheckoutStep, CheckoutTotals, ShippingMethod},
    ids::OrderId,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    api::{RequestScope, StorefrontApi},
    busy::{BusyFlag, BusyGuard},
    cart::CartStore,
    checkout::{Navigator, PlaceOrderError},
};

const PLACE_ORDER_FAILED: &str = "failed to place order";

/// Drives one checkout attempt from shipping details to a placed order.
///
/// The wizard owns its [`CheckoutSession`]; dropping the wizard discards
/// everything the shopper typed.
pub struct CheckoutWizard {
    session: CheckoutSession,
    cart: Arc<CartStore>,
    api: Arc<dyn StorefrontApi>,
    navigator: Arc<dyn Navigator>,
    pricing: CheckoutPricing,
    scope: RequestScope,
    submitting: Arc<BusyFlag>,
    error: Option<String>,
}

impl fmt::Debug for CheckoutWizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutWizard")
            .field("session", &self.session)
            .field("pricing", &self.pricing)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl CheckoutWizard {
    /// Start a fresh checkout on the shipping step.
    pub fn new(
        cart: Arc<CartStore>,
        api: Arc<dyn StorefrontApi>,
        navigator: Arc<dyn Navigator>,
        pricing: CheckoutPricing,
        timeout: Duration,
    ) -> Self {
        Self {
            session: CheckoutSession::new(),
            cart,
            api,
            navigator,
            pricing,
            scope: RequestScope::new(timeout),
            submitting: Arc::new(BusyFlag::new()),
            error: None,
        }
    }

    /// Form state.
    pub fn session(&self) -> &CheckoutSession {
        &self.session
    }

    /// Form fields, for the view to bind to.
    pub fn session_mut(&mut self) -> &mut CheckoutSession {
        &mut self.session
    }

    /// The current step.
    pub fn step(&self) -> CheckoutStep {
        self.session.step()
    }

    /// The message shown above the form, if the last action failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether an order is being submitted.
    pub fn is_submitting(&self) -> bool {
        self.submitting.is_busy()
    }

    /// Observe the submitting flag.
    pub fn submitting(&self) -> watch::Receiver<bool> {
        self.submitting.subscribe()
    }

    /// Move to the next step. Returns `false`, with [`Self::error`] set,
    /// when the current step is incomplete.
    pub fn next(&mut self) -> bool {
        match self.session.advance() {
            Ok(step) => {
                debug!(%step, "checkout advanced");

                self.error = None;

                true
            }
            Err(error) => {
                debug!(step = %self.session.step(), "checkout blocked: {error}");

                self.error = Some(error.to_string());

                false
            }
        }
    }

    /// Move back one step.
    pub fn previous(&mut self) -> CheckoutStep {
        self.error = None;
        self.session.back()
    }

    /// Change the delivery speed.
    pub fn select_shipping_method(&mut self, method: ShippingMethod) {
        self.session.select_shipping_method(method);
    }

    /// Totals for the cart as it is right now.
    pub fn totals(&self) -> CheckoutTotals {
        let cart = self.cart.snapshot().unwrap_or_default();

        self.session.totals(&cart, &self.pricing)
    }

    /// Validate everything, submit the order and, once the server accepts
    /// it, empty the cart and show the confirmation view.
    ///
    /// # Errors
    ///
    /// - [`PlaceOrderError::Checkout`]: the order is incomplete; no request
    ///   was made.
    /// - [`PlaceOrderError::Api`]: the server did not accept the order. The
    ///   wizard stays on the review step.
    pub async fn place_order(&mut self) -> Result<OrderId, PlaceOrderError> {
        let cart = self.cart.snapshot().unwrap_or_default();

        let order = match self.session.prepare_order(&cart, &self.pricing) {
            Ok(order) => order,
            Err(error) => {
                debug!("order not submitted: {error}");

                self.error = Some(error.to_string());

                return Err(error.into());
            }
        };

        let _submitting = BusyGuard::acquire(&self.submitting);

        self.error = None;

        let created = match self.scope.run(self.api.create_order(order)).await {
            Ok(created) => created,
            Err(error) => {
                if !error.is_cancelled() {
                    warn!("failed to place order: {error}");

                    self.error = Some(
                        error
                            .server_message()
                            .unwrap_or(PLACE_ORDER_FAILED)
                            .to_string(),
                    );
                }

                return Err(error.into());
            }
        };

        info!(order = %created.id, "order placed");

        self.cart.clear_after_order().await;

        self.navigator.navigate(&created.confirmation_path());

        Ok(created.id)
    }

    /// Abandon a submission in flight.
    pub fn cancel(&self) {
        self.scope.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use storefront::{
        cart::Cart,
        checkout::{CheckoutError, CreatedOrder},
        prices::{TaxRate, TaxRateError},
    };
    use testresult::TestResult;

    use crate::{
        api::{ApiError, MockStorefrontApi},
        checkout::MockNavigator,
        notify::{MockNotifier, TracingNotifier},
        storage::MemoryStorage,
        test::{FakeStorefront, address, item, payment},
    };

    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    fn pricing() -> Result<CheckoutPricing, TaxRateError> {
        Ok(CheckoutPricing::new(TaxRate::new(Decimal::new(8, 2))?))
    }

    async fn seeded_store() -> Arc<CartStore> {
        let line = item("1", "p1", None, 2, 5000);
        let store = CartStore::new(
            Arc::new(FakeStorefront::new().with_item(line)),
            Arc::new(MemoryStorage::new()),
            Arc::new(TracingNotifier),
            TIMEOUT,
        );

        store.fetch_cart().await;

        Arc::new(store)
    }

    fn wizard(
        cart: Arc<CartStore>,
        api: MockStorefrontApi,
        navigator: MockNavigator,
    ) -> Result<CheckoutWizard, TaxRateError> {
        Ok(CheckoutWizard::new(
            cart,
            Arc::new(api),
            Arc::new(navigator),
            pricing()?,
            TIMEOUT,
        ))
    }

    fn fill_to_review(wizard: &mut CheckoutWizard) {
        wizard.session_mut().shipping = address();
        assert!(wizard.next());

        wizard.session_mut().payment = payment();
        wizard.session_mut().terms_accepted = true;
        assert!(wizard.next());
    }

    #[tokio::test]
    async fn successful_order_clears_cart_and_redirects() -> TestResult {
        let cart = seeded_store().await;

        let mut api = MockStorefrontApi::new();

        api.expect_create_order()
            .once()
            .withf(|order| order.total_amount == Decimal::new(11399, 2) && order.items.len() == 1)
            .return_once(|_| {
                Ok(CreatedOrder {
                    id: "ord_123".into(),
                    order_number: Some("1001".to_string()),
                    status: None,
                })
            });

        let mut navigator = MockNavigator::new();

        navigator
            .expect_navigate()
            .once()
            .withf(|path| path == "/order-confirmation/ord_123")
            .return_const(());

        let mut wizard = wizard(Arc::clone(&cart), api, navigator)?;

        fill_to_review(&mut wizard);

        let order = wizard.place_order().await?;

        assert_eq!(order.as_str(), "ord_123");
        assert_eq!(cart.snapshot(), None);
        assert_eq!(cart.total_items(), 0);
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.error(), None);

        Ok(())
    }

    #[tokio::test]
    async fn empty_card_number_never_reaches_the_server() -> TestResult {
        let cart = seeded_store().await;

        let mut api = MockStorefrontApi::new();

        api.expect_create_order().never();

        let mut navigator = MockNavigator::new();

        navigator.expect_navigate().never();

        let mut wizard = wizard(Arc::clone(&cart), api, navigator)?;

        fill_to_review(&mut wizard);
        wizard.session_mut().payment.card_number.clear();

        let result = wizard.place_order().await;

        assert!(
            matches!(
                result,
                Err(PlaceOrderError::Checkout(CheckoutError::Validation(_)))
            ),
            "expected a validation failure, got {result:?}"
        );
        assert_eq!(wizard.error(), Some("please fill all required fields"));
        assert_eq!(cart.total_items(), 2, "cart must be kept");

        Ok(())
    }

    #[tokio::test]
    async fn rejected_order_stays_on_review_with_server_message() -> TestResult {
        let cart = seeded_store().await;

        let mut api = MockStorefrontApi::new();

        api.expect_create_order().once().return_once(|_| {
            Err(ApiError::Status {
                status: 402,
                message: "Card declined".to_string(),
            })
        });

        let mut navigator = MockNavigator::new();

        navigator.expect_navigate().never();

        let mut wizard = wizard(Arc::clone(&cart), api, navigator)?;

        fill_to_review(&mut wizard);

        assert!(wizard.place_order().await.is_err());
        assert_eq!(wizard.step(), CheckoutStep::Review);
        assert_eq!(wizard.error(), Some("Card declined"));
        assert_eq!(cart.total_items(), 2);
        assert!(!wizard.is_submitting());

        Ok(())
    }

    #[tokio::test]
    async fn unexplained_failures_use_fallback_message() -> TestResult {
        let cart = seeded_store().await;

        let mut api = MockStorefrontApi::new();

        api.expect_create_order()
            .once()
            .return_once(|_| Err(ApiError::NotFound));

        let mut wizard = wizard(cart, api, MockNavigator::new())?;

        fill_to_review(&mut wizard);

        assert!(wizard.place_order().await.is_err());
        assert_eq!(wizard.error(), Some(PLACE_ORDER_FAILED));

        Ok(())
    }

    #[tokio::test]
    async fn incomplete_step_sets_generic_error() -> TestResult {
        let cart = seeded_store().await;
        let mut wizard = wizard(cart, MockStorefrontApi::new(), MockNavigator::new())?;

        assert!(!wizard.next());
        assert_eq!(wizard.step(), CheckoutStep::Shipping);
        assert_eq!(wizard.error(), Some("please fill all required fields"));

        wizard.session_mut().shipping = address();

        assert!(wizard.next());
        assert_eq!(wizard.error(), None);
        assert_eq!(wizard.previous(), CheckoutStep::Shipping);

        Ok(())
    }

    #[tokio::test]
    async fn totals_track_the_live_cart() -> TestResult {
        let cart = seeded_store().await;
        let mut wizard = wizard(
            Arc::clone(&cart),
            MockStorefrontApi::new(),
            MockNavigator::new(),
        )?;

        assert_eq!(wizard.totals().grand_total, Decimal::new(11399, 2));

        wizard.select_shipping_method(ShippingMethod::Express);
        assert_eq!(wizard.totals().grand_total, Decimal::new(12099, 2));

        cart.update_quantity(&"1".into(), 1).await;
        assert_eq!(wizard.totals().subtotal, Decimal::new(5000, 2));

        cart.discard_local().await;
        assert_eq!(wizard.totals().subtotal, Decimal::ZERO);

        Ok(())
    }

    #[tokio::test]
    async fn order_round_trip_against_backend() -> TestResult {
        let line = item("1", "p1", None, 2, 5000);
        let backend = Arc::new(FakeStorefront::new().with_item(line));
        let cart = Arc::new(CartStore::new(
            Arc::clone(&backend) as Arc<dyn StorefrontApi>,
            Arc::new(MemoryStorage::new()),
            Arc::new(TracingNotifier),
            TIMEOUT,
        ));

        cart.fetch_cart().await;

        let mut navigator = MockNavigator::new();

        navigator
            .expect_navigate()
            .once()
            .withf(|path| path == "/order-confirmation/ord_1")
            .return_const(());

        let mut wizard = CheckoutWizard::new(
            Arc::clone(&cart),
            Arc::clone(&backend) as Arc<dyn StorefrontApi>,
            Arc::new(navigator),
            pricing()?,
            TIMEOUT,
        );

        fill_to_review(&mut wizard);
        wizard.select_shipping_method(ShippingMethod::Overnight);

        let order = wizard.place_order().await?;
        let received = backend.orders();

        assert_eq!(order.as_str(), "ord_1");
        assert_eq!(received.len(), 1);
        assert_eq!(
            received.first().map(|order| order.shipping_cost),
            Some(Decimal::new(2499, 2))
        );
        assert!(
            backend.fetch_cart().await?.is_empty(),
            "server cart should be cleared"
        );
        assert_eq!(cart.snapshot(), None);

        Ok(())
    }

    #[tokio::test]
    async fn failed_cart_clear_after_order_is_not_reported() -> TestResult {
        let mut backend = MockStorefrontApi::new();

        backend
            .expect_fetch_cart()
            .once()
            .return_once(|| Ok(Cart::from_items(None, [item("1", "p1", None, 2, 5000)])));
        backend
            .expect_clear_cart()
            .once()
            .return_once(|| {
                Err(ApiError::Status {
                    status: 503,
                    message: "Cart service unavailable".to_string(),
                })
            });

        let mut notifier = MockNotifier::new();

        notifier.expect_error().never();

        let cart = Arc::new(CartStore::new(
            Arc::new(backend),
            Arc::new(MemoryStorage::new()),
            Arc::new(notifier),
            TIMEOUT,
        ));

        cart.fetch_cart().await;

        let mut api = MockStorefrontApi::new();

        api.expect_create_order().once().return_once(|_| {
            Ok(CreatedOrder {
                id: "ord_9".into(),
                order_number: None,
                status: None,
            })
        });

        let mut navigator = MockNavigator::new();

        navigator
            .expect_navigate()
            .once()
            .withf(|path| path == "/order-confirmation/ord_9")
            .return_const(());

        let mut wizard = wizard(Arc::clone(&cart), api, navigator)?;

        fill_to_review(&mut wizard);

        assert_eq!(wizard.place_order().await?.as_str(), "ord_9");
        assert_eq!(cart.snapshot(), None, "local cart must be dropped");
        assert_eq!(wizard.error(), None);

        Ok(())
    }
}
