//! Cart store.

use std::{fmt, sync::Arc, time::Duration};

use rust_decimal::Decimal;
use storefront::{
    cart::Cart,
    ids::{CartItemId, ProductId, VariantId},
    items::{CartItem, ProductRef, VariantRef, display_name},
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    api::{AddToCartRequest, ApiError, CartMutation, RequestScope, StorefrontApi},
    busy::{BusyFlag, BusyGuard},
    cart::CartSnapshot,
    notify::Notifier,
    storage::{CART_KEY, DeviceStorage},
};

/// Single source of truth for the shopper's cart.
///
/// Every mutation sends one request, waits for the server's answer and only
/// then writes that answer into local state; a failed request leaves the
/// cart exactly as it was. Mutations never return errors: failures are
/// logged, reported through the [`Notifier`] and surface as `false`.
///
/// One store is shared (behind an `Arc`) by everything that shows the cart;
/// [`CartStore::subscribe`] notifies observers of every change.
pub struct CartStore {
    api: Arc<dyn StorefrontApi>,
    storage: Arc<dyn DeviceStorage>,
    notifier: Arc<dyn Notifier>,
    scope: RequestScope,
    cart: watch::Sender<Option<Cart>>,
    loading: Arc<BusyFlag>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &*self.cart.borrow())
            .field("loading", &self.loading.is_busy())
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create an empty store. Call [`CartStore::restore`] to pick up the
    /// cart from a previous session.
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        storage: Arc<dyn DeviceStorage>,
        notifier: Arc<dyn Notifier>,
        timeout: Duration,
    ) -> Self {
        let (cart, _) = watch::channel(None);

        Self {
            api,
            storage,
            notifier,
            scope: RequestScope::new(timeout),
            cart,
            loading: Arc::new(BusyFlag::new()),
        }
    }

    /// Load the cart persisted by a previous session, if any.
    ///
    /// Returns whether a cart was restored. Unreadable snapshots are
    /// discarded.
    pub async fn restore(&self) -> bool {
        let stored = match self.storage.get(CART_KEY).await {
            Ok(stored) => stored,
            Err(error) => {
                warn!("failed to read persisted cart: {error}");

                return false;
            }
        };

        let Some(raw) = stored else {
            return false;
        };

        match serde_json::from_str::<CartSnapshot>(&raw) {
            Ok(snapshot) => {
                debug!(
                    saved_at = %snapshot.saved_at,
                    lines = snapshot.cart.len(),
                    "restored persisted cart"
                );

                self.cart.send_replace(Some(snapshot.cart));

                true
            }
            Err(error) => {
                warn!("discarding unreadable cart snapshot: {error}");

                if let Err(error) = self.storage.remove(CART_KEY).await {
                    warn!("failed to remove cart snapshot: {error}");
                }

                false
            }
        }
    }

    /// Replace local state with the server's cart.
    ///
    /// Any failure (including a guest without a cart) leaves the store with
    /// no cart rather than reporting an error.
    pub async fn fetch_cart(&self) -> bool {
        let _loading = BusyGuard::acquire(&self.loading);

        match self.scope.run(self.api.fetch_cart()).await {
            Ok(cart) => {
                debug!(lines = cart.len(), "fetched cart");

                self.replace(Some(cart)).await;

                true
            }
            Err(ApiError::Cancelled) => {
                debug!("cart fetch abandoned");

                false
            }
            Err(error) => {
                debug!("no cart available: {error}");

                self.replace(None).await;

                false
            }
        }
    }

    /// Add `quantity` units of `product` / `variant`.
    ///
    /// If the cart already has a line for the pair its quantity is raised,
    /// otherwise a new line is created.
    pub async fn add_to_cart(
        &self,
        product: &ProductRef,
        variant: Option<&VariantRef>,
        quantity: u32,
    ) -> bool {
        if quantity == 0 {
            warn!(product = %product.id, "refusing to add zero units");

            return false;
        }

        let _loading = BusyGuard::acquire(&self.loading);

        let variant_id = variant.map(|variant| variant.id.clone());
        let existing = self
            .cart_item(&product.id, variant_id.as_ref())
            .map(|item| (item.id, item.quantity));

        let outcome = match existing {
            Some((item, current)) => {
                self.scope
                    .run(self.api.update_item(item, current.saturating_add(quantity)))
                    .await
            }
            None => {
                self.scope
                    .run(self.api.add_to_cart(AddToCartRequest {
                        product_id: product.id.clone(),
                        variant_id,
                        quantity,
                    }))
                    .await
            }
        };

        match outcome {
            Ok(mutation) => {
                self.apply(mutation).await;

                let name = display_name(product, variant);

                info!(product = %product.id, quantity, "added to cart");
                self.notifier.success(&format!("Added {name} to cart"));

                true
            }
            Err(error) => {
                self.report_failure("add item to cart", &error);

                false
            }
        }
    }

    /// Set the quantity of a line. Zero or less removes the line.
    pub async fn update_quantity(&self, item: &CartItemId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(item).await;
        }

        let Ok(quantity) = u32::try_from(quantity) else {
            warn!(%item, quantity, "quantity out of range");

            return false;
        };

        let _loading = BusyGuard::acquire(&self.loading);

        match self
            .scope
            .run(self.api.update_item(item.clone(), quantity))
            .await
        {
            Ok(mutation) => {
                self.apply(mutation).await;

                info!(%item, quantity, "updated cart line");

                true
            }
            Err(error) => {
                self.report_failure("update quantity", &error);

                false
            }
        }
    }

    /// Remove a line.
    pub async fn remove_item(&self, item: &CartItemId) -> bool {
        let _loading = BusyGuard::acquire(&self.loading);

        match self.scope.run(self.api.remove_item(item.clone())).await {
            Ok(()) => {
                let mut cart = self.snapshot();

                if let Some(cart) = cart.as_mut() {
                    cart.remove_item(item);
                }

                self.replace(cart).await;

                info!(%item, "removed cart line");

                true
            }
            Err(error) => {
                self.report_failure("remove item", &error);

                false
            }
        }
    }

    /// Empty the cart on the server and drop local state.
    pub async fn clear_cart(&self) -> bool {
        let _loading = BusyGuard::acquire(&self.loading);

        match self.scope.run(self.api.clear_cart()).await {
            Ok(()) => {
                self.replace(None).await;

                info!("cleared cart");

                true
            }
            Err(error) => {
                self.report_failure("clear cart", &error);

                false
            }
        }
    }

    /// Empty the cart once an order has been accepted.
    ///
    /// The order already succeeded, so a failed remote clear is only logged
    /// and local state is dropped regardless.
    pub async fn clear_after_order(&self) {
        let _loading = BusyGuard::acquire(&self.loading);

        match self.scope.run(self.api.clear_cart()).await {
            Ok(()) => info!("cleared cart after order"),
            Err(error) => warn!("order placed but remote cart was not cleared: {error}"),
        }

        self.replace(None).await;
    }

    /// Drop local state without contacting the server.
    pub async fn discard_local(&self) {
        self.replace(None).await;
    }

    /// Abandon every request currently in flight.
    pub fn cancel_pending(&self) {
        self.scope.cancel_all();
    }

    /// Sum of quantities in the cart.
    pub fn total_items(&self) -> u64 {
        self.cart.borrow().as_ref().map_or(0, Cart::total_items)
    }

    /// Sum of line totals in the cart.
    pub fn total_amount(&self) -> Decimal {
        self.cart
            .borrow()
            .as_ref()
            .map_or(Decimal::ZERO, Cart::total_amount)
    }

    /// Whether the cart holds `product` / `variant`.
    pub fn is_in_cart(&self, product: &ProductId, variant: Option<&VariantId>) -> bool {
        self.cart
            .borrow()
            .as_ref()
            .is_some_and(|cart| cart.contains(product, variant))
    }

    /// The line holding `product` / `variant`, if any.
    pub fn cart_item(&self, product: &ProductId, variant: Option<&VariantId>) -> Option<CartItem> {
        self.cart
            .borrow()
            .as_ref()
            .and_then(|cart| cart.find(product, variant).cloned())
    }

    /// A copy of the current cart.
    pub fn snapshot(&self) -> Option<Cart> {
        self.cart.borrow().clone()
    }

    /// Observe every change to the cart.
    pub fn subscribe(&self) -> watch::Receiver<Option<Cart>> {
        self.cart.subscribe()
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    /// Observe the loading flag.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    async fn apply(&self, mutation: CartMutation) {
        let cart = match mutation {
            CartMutation::Cart(cart) => cart,
            CartMutation::Item(item) => {
                let mut cart = self.snapshot().unwrap_or_default();

                cart.upsert_item(item);

                cart
            }
        };

        self.replace(Some(cart)).await;
    }

    async fn replace(&self, cart: Option<Cart>) {
        self.persist(cart.as_ref()).await;
        self.cart.send_replace(cart);
    }

    async fn persist(&self, cart: Option<&Cart>) {
        let result = match cart {
            Some(cart) => match serde_json::to_string(&CartSnapshot::now(cart.clone())) {
                Ok(raw) => self.storage.set(CART_KEY, &raw).await,
                Err(error) => {
                    warn!("failed to encode cart snapshot: {error}");

                    return;
                }
            },
            None => self.storage.remove(CART_KEY).await,
        };

        if let Err(error) = result {
            warn!("failed to persist cart: {error}");
        }
    }

    fn report_failure(&self, action: &str, error: &ApiError) {
        if error.is_cancelled() {
            debug!("{action} abandoned");

            return;
        }

        warn!("failed to {action}: {error}");

        let fallback = format!("Failed to {action}");

        self.notifier
            .error(error.server_message().unwrap_or(&fallback));
    }
}
