//! # Sales View Model
//!
//! Single owner of the mutable sales state.
//!
//! ## State Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       SalesViewModel                                    │
//! │                                                                         │
//! │  load_products() ─┐                                                    │
//! │  update_quantity ─┤   send_modify(|s| *s = transition(s))              │
//! │  set_customer_type┤ ─────────────────────────────► watch::Sender       │
//! │  clear_cart ──────┘   (read-modify-write on the                │       │
//! │                        latest snapshot)                        │       │
//! │                                                                ▼       │
//! │                                          subscribe() / state_stream()  │
//! │                                          ui_state() (clone of current) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Loads and Cart Edits
//! `load_products()` writes twice: `loading()` before awaiting the
//! repository and `loaded()`/`failed()` after. Each write is applied to the
//! snapshot current at that moment, so quantity or tier changes made while
//! the repository call is pending survive its completion.
//!
//! A second `load_products()` while one is pending returns immediately
//! without touching state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use habemus_core::validation::validate_catalog;
use habemus_core::{summary, CartCalculator, CustomerType, ProductId, ProductRepository, SalesCalculation};

use crate::ui_state::SalesUiState;

// =============================================================================
// In-Flight Guard
// =============================================================================

/// Clears the in-flight flag when a load ends, however it ends.
///
/// If the load future is dropped before resolving, the snapshot's
/// `is_loading` is reset as well.
struct LoadInFlight<'a> {
    flag: &'a AtomicBool,
    state: &'a watch::Sender<SalesUiState>,
    resolved: bool,
}

impl Drop for LoadInFlight<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            warn!("Catalog load dropped before completion");
            self.state.send_modify(|s| *s = s.load_abandoned());
        }
        self.flag.store(false, Ordering::Release);
    }
}

// =============================================================================
// View Model
// =============================================================================

/// Sales screen view model over a product repository.
///
/// Share it behind an `Arc` to drive it from several tasks.
pub struct SalesViewModel<R> {
    repository: R,
    calculator: CartCalculator,
    state: watch::Sender<SalesUiState>,
    load_in_flight: AtomicBool,
}

impl<R: ProductRepository> SalesViewModel<R> {
    /// Creates a view model with the default tier (Retailer).
    pub fn new(repository: R) -> Self {
        Self::with_customer_type(repository, CustomerType::default())
    }

    /// Creates a view model starting on `customer_type`.
    ///
    /// Nothing is loaded until [`load_products`](Self::load_products).
    pub fn with_customer_type(repository: R, customer_type: CustomerType) -> Self {
        let (state, _) = watch::channel(SalesUiState::new(customer_type));
        SalesViewModel {
            repository,
            calculator: CartCalculator::new(),
            state,
            load_in_flight: AtomicBool::new(false),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Returns a copy of the current snapshot.
    pub fn ui_state(&self) -> SalesUiState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every transition.
    pub fn subscribe(&self) -> watch::Receiver<SalesUiState> {
        self.state.subscribe()
    }

    /// Stream yielding the current snapshot, then each new one.
    ///
    /// Intermediate snapshots may be skipped when the consumer is slower
    /// than the writer; the latest is always delivered.
    pub fn state_stream(&self) -> WatchStream<SalesUiState> {
        WatchStream::new(self.state.subscribe())
    }

    /// Cart calculation over the current snapshot.
    pub fn calculation(&self) -> SalesCalculation {
        let state = self.state.borrow();
        self.calculator
            .calculate_cart(state.cart_items_list(), state.customer_type())
    }

    /// Shareable text for the current cart.
    pub fn order_summary(&self) -> String {
        summary::order_summary(&self.calculation())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Loads the catalog from the repository.
    ///
    /// Never fails: a repository error or an invalid catalog (duplicate ids)
    /// lands in `SalesUiState::error` and the previous catalog stays. A
    /// successful load clears any earlier error.
    pub async fn load_products(&self) {
        if self
            .load_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Catalog load already in flight, ignoring request");
            return;
        }

        let mut guard = LoadInFlight {
            flag: &self.load_in_flight,
            state: &self.state,
            resolved: false,
        };

        self.transition(SalesUiState::loading);
        debug!("Loading catalog");

        let outcome = self
            .repository
            .get_all_products()
            .await
            .map_err(|e| e.to_string())
            .and_then(|products| {
                validate_catalog(&products).map_err(|e| e.to_string())?;
                Ok(products)
            });

        match outcome {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                let products = products.into_iter().map(Arc::new).collect();
                self.transition(|s| s.loaded(products));
            }
            Err(message) => {
                warn!(error = %message, "Catalog load failed");
                self.transition(|s| s.failed(message));
            }
        }

        guard.resolved = true;
    }

    /// Sets the quantity for a product. `quantity <= 0` removes it.
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) {
        debug!(product_id, quantity, "Updating cart quantity");
        self.transition(|s| s.with_quantity(product_id, quantity));
    }

    /// Switches the price tier. The cart is left as is.
    pub fn set_customer_type(&self, customer_type: CustomerType) {
        debug!(%customer_type, "Setting customer type");
        self.transition(|s| s.with_customer_type(customer_type));
    }

    /// Empties the cart.
    pub fn clear_cart(&self) {
        debug!("Clearing cart");
        self.transition(SalesUiState::cleared_cart);
    }

    /// Replaces the snapshot with `f(current)` under the channel lock.
    fn transition(&self, f: impl FnOnce(&SalesUiState) -> SalesUiState) {
        self.state.send_modify(|state| {
            let next = f(state);
            *state = next;
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::time::Duration;

    use habemus_core::catalog::seed_products;
    use habemus_core::{Money, Product};
    use habemus_db::InMemoryProductRepository;
    use tokio::sync::Notify;
    use tokio_stream::StreamExt;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct FakeError(String);

    type Outcome = Result<Vec<Product>, String>;

    /// Repository that replays scripted outcomes, optionally waiting on a
    /// gate before answering.
    struct ScriptedRepository {
        outcomes: Mutex<VecDeque<Outcome>>,
        gate: Option<Arc<Notify>>,
        calls: AtomicUsize,
    }

    impl ScriptedRepository {
        fn new(outcomes: Vec<Outcome>) -> Self {
            ScriptedRepository {
                outcomes: Mutex::new(outcomes.into()),
                gate: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn gated(outcomes: Vec<Outcome>, gate: Arc<Notify>) -> Self {
            ScriptedRepository {
                gate: Some(gate),
                ..Self::new(outcomes)
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ProductRepository for ScriptedRepository {
        type Error = FakeError;

        async fn get_all_products(&self) -> Result<Vec<Product>, FakeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            let next = self.outcomes.lock().unwrap().pop_front();
            match next {
                Some(Ok(products)) => Ok(products),
                Some(Err(message)) => Err(FakeError(message)),
                None => Err(FakeError("no scripted outcome".to_string())),
            }
        }

        async fn get_product_by_id(&self, id: ProductId) -> Result<Option<Product>, FakeError> {
            Ok(seed_products().into_iter().find(|p| p.id() == id))
        }
    }

    fn product(id: ProductId, name: &str) -> Product {
        Product::new(id, name, Money::from_cents(1000), Money::from_cents(800)).unwrap()
    }

    #[tokio::test]
    async fn test_initial_state() {
        let vm = SalesViewModel::new(InMemoryProductRepository::default());
        let state = vm.ui_state();

        assert!(state.products().is_empty());
        assert!(state.cart_items().is_empty());
        assert_eq!(state.customer_type(), CustomerType::Retailer);
        assert!(!state.is_loading());
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn test_end_to_end_retail_order() {
        let vm = SalesViewModel::new(InMemoryProductRepository::default());
        vm.load_products().await;
        assert_eq!(vm.ui_state().products().len(), 13);

        vm.set_customer_type(CustomerType::Retailer);
        vm.update_quantity(1, 2);
        vm.update_quantity(6, 1);

        let state = vm.ui_state();
        assert_eq!(state.total().format_amount(), "5666.98");
        assert_eq!(state.total(), Money::from_cents(176338 * 2 + 214022));
        assert_eq!(state.item_count(), 3);
        assert_eq!(vm.calculation().total(), state.total());

        assert_eq!(
            vm.order_summary(),
            "BLONDE: $1763.38 × 2 = $3526.76\nOLD ALE: $2140.22 × 1 = $2140.22\n\nTotal: $5666.98"
        );
    }

    #[tokio::test]
    async fn test_load_failure_sets_error() {
        let vm = SalesViewModel::new(ScriptedRepository::new(vec![Err("network error".into())]));
        vm.load_products().await;

        let state = vm.ui_state();
        assert_eq!(state.error(), Some("network error"));
        assert!(!state.is_loading());
        assert!(state.products().is_empty());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_catalog() {
        let vm = SalesViewModel::new(ScriptedRepository::new(vec![
            Ok(seed_products()),
            Err("timeout".into()),
        ]));
        vm.load_products().await;
        vm.load_products().await;

        let state = vm.ui_state();
        assert_eq!(state.products().len(), 13);
        assert_eq!(state.error(), Some("timeout"));
    }

    #[tokio::test]
    async fn test_success_clears_stale_error() {
        let vm = SalesViewModel::new(ScriptedRepository::new(vec![
            Err("offline".into()),
            Ok(seed_products()),
        ]));
        vm.load_products().await;
        assert_eq!(vm.ui_state().error(), Some("offline"));

        vm.load_products().await;
        let state = vm.ui_state();
        assert!(state.error().is_none());
        assert_eq!(state.products().len(), 13);
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_rejected() {
        let vm = SalesViewModel::new(ScriptedRepository::new(vec![Ok(vec![
            product(1, "A"),
            product(1, "B"),
        ])]));
        vm.load_products().await;

        let state = vm.ui_state();
        assert_eq!(state.error(), Some("Duplicate product id 1 in catalog"));
        assert!(state.products().is_empty());
    }

    #[tokio::test]
    async fn test_update_quantity_semantics() {
        let vm = SalesViewModel::new(InMemoryProductRepository::default());
        vm.load_products().await;

        vm.update_quantity(4, 3);
        vm.update_quantity(4, 5);
        assert_eq!(vm.ui_state().quantity_of(4), 5);

        vm.update_quantity(4, 0);
        vm.update_quantity(4, 0);
        assert!(vm.ui_state().cart_items().is_empty());

        // Unknown ids are stored but priced as nothing.
        vm.update_quantity(404, 2);
        assert_eq!(vm.ui_state().quantity_of(404), 2);
        assert_eq!(vm.ui_state().item_count(), 0);
    }

    #[tokio::test]
    async fn test_huge_quantity_keeps_summary_readable() {
        let vm = SalesViewModel::new(InMemoryProductRepository::default());
        vm.load_products().await;

        vm.update_quantity(13, i64::MAX);
        let state = vm.ui_state();
        assert_eq!(state.item_count(), i64::MAX);
        assert_eq!(state.total(), Money::from_cents(i64::MAX));
        assert!(vm
            .order_summary()
            .ends_with("Total: $92233720368547758.07"));
    }

    #[tokio::test]
    async fn test_clear_cart_keeps_catalog_and_tier() {
        let vm = SalesViewModel::with_customer_type(
            InMemoryProductRepository::default(),
            CustomerType::ConsumerFinal,
        );
        vm.load_products().await;
        vm.update_quantity(2, 1);
        vm.update_quantity(3, 4);

        vm.clear_cart();

        let state = vm.ui_state();
        assert!(state.cart_items().is_empty());
        assert_eq!(state.products().len(), 13);
        assert_eq!(state.customer_type(), CustomerType::ConsumerFinal);
        assert_eq!(vm.order_summary(), "Carrito vacío");
    }

    #[tokio::test]
    async fn test_cart_edits_survive_in_flight_load() {
        let gate = Arc::new(Notify::new());
        let vm = Arc::new(SalesViewModel::new(ScriptedRepository::gated(
            vec![Ok(seed_products())],
            gate.clone(),
        )));

        let mut rx = vm.subscribe();
        let loader = tokio::spawn({
            let vm = vm.clone();
            async move { vm.load_products().await }
        });
        rx.wait_for(|s| s.is_loading()).await.unwrap();

        vm.update_quantity(1, 2);
        vm.set_customer_type(CustomerType::ConsumerFinal);

        gate.notify_one();
        loader.await.unwrap();

        let state = vm.ui_state();
        assert!(!state.is_loading());
        assert_eq!(state.products().len(), 13);
        assert_eq!(state.quantity_of(1), 2);
        assert_eq!(state.customer_type(), CustomerType::ConsumerFinal);
        assert_eq!(state.total().format_amount(), "5290.14");
    }

    #[tokio::test]
    async fn test_overlapping_load_is_ignored() {
        let gate = Arc::new(Notify::new());
        let vm = Arc::new(SalesViewModel::new(ScriptedRepository::gated(
            vec![Ok(seed_products()), Ok(vec![product(50, "EXTRA")])],
            gate.clone(),
        )));

        let mut rx = vm.subscribe();
        let loader = tokio::spawn({
            let vm = vm.clone();
            async move { vm.load_products().await }
        });
        rx.wait_for(|s| s.is_loading()).await.unwrap();

        // Returns at once and does not reach the repository.
        vm.load_products().await;
        assert_eq!(vm.repository().calls(), 1);
        assert!(vm.ui_state().is_loading());

        gate.notify_one();
        loader.await.unwrap();
        assert_eq!(vm.ui_state().products().len(), 13);

        // The next load after completion runs normally.
        gate.notify_one();
        vm.load_products().await;
        assert_eq!(vm.repository().calls(), 2);
        assert_eq!(vm.ui_state().products().len(), 1);
    }

    #[tokio::test]
    async fn test_dropped_load_resets_flag() {
        let gate = Arc::new(Notify::new());
        let vm = SalesViewModel::new(ScriptedRepository::gated(
            vec![Ok(seed_products())],
            gate.clone(),
        ));

        let timed_out = tokio::time::timeout(Duration::from_millis(20), vm.load_products()).await;
        assert!(timed_out.is_err());
        assert!(!vm.ui_state().is_loading());

        gate.notify_one();
        vm.load_products().await;
        assert_eq!(vm.ui_state().products().len(), 13);
    }

    #[tokio::test]
    async fn test_loading_flag_transitions() {
        let vm = SalesViewModel::new(InMemoryProductRepository::default());
        let mut rx = vm.subscribe();

        vm.load_products().await;

        // Both writes of the load have happened; the receiver sees the last.
        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert!(!seen.is_loading());
        assert_eq!(seen.products().len(), 13);

        // Cart edits never set the flag.
        vm.update_quantity(1, 1);
        assert!(!rx.borrow_and_update().is_loading());
    }

    #[tokio::test]
    async fn test_state_stream() {
        let vm = SalesViewModel::new(InMemoryProductRepository::default());
        let mut stream = vm.state_stream();

        let first = stream.next().await.unwrap();
        assert!(first.cart_items().is_empty());

        vm.update_quantity(13, 2);
        let next = stream.next().await.unwrap();
        assert_eq!(next.quantity_of(13), 2);
    }
}
