use std::sync::atomic::{AtomicBool, Ordering};

use cementlife_core::{
    BankTransferDetails, Catalog, Category, CheckoutForm, ConfiguredItem, CoreError,
    LookupTicket, OrderStore, RegionId, RegionLevel, RegionLookup, StorefrontState,
    StorefrontView, SubmitRejection,
};
use tokio::sync::{watch, Mutex};

/// How a checkout submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent to the store.
    Rejected(SubmitRejection),
    /// The store refused the order; the message is shown verbatim.
    Failed(String),
    Placed { order_id: Option<i64> },
}

/// One customer session.
///
/// The state lock is only held for synchronous actions, never across a
/// lookup or insert, so a slow district fetch cannot block the wizard. Lookup
/// completions carry the ticket issued at dispatch and are dropped if a later
/// selection superseded them.
///
/// Dropping a [`Storefront::submit`] future while the insert is pending
/// releases the busy dialog, so a caller timeout cannot leave the checkout
/// stuck.
pub struct Storefront<L, S> {
    state: Mutex<StorefrontState>,
    /// Set when an abandoned submission could not take the lock; the next
    /// action clears the busy dialog.
    abandoned: AtomicBool,
    bank: Option<BankTransferDetails>,
    lookup: L,
    store: S,
    views: watch::Sender<StorefrontView>,
}

impl<L, S> Storefront<L, S>
where
    L: RegionLookup + Sync,
    S: OrderStore + Sync,
{
    pub fn new(catalog: Catalog, lookup: L, store: S, bank: Option<BankTransferDetails>) -> Self {
        Self::from_state(StorefrontState::new(catalog), lookup, store, bank)
    }

    /// Resume a session from a saved state.
    pub fn from_state(
        state: StorefrontState,
        lookup: L,
        store: S,
        bank: Option<BankTransferDetails>,
    ) -> Self {
        let (views, _) = watch::channel(StorefrontView::build(&state, bank.as_ref()));
        Self {
            state: Mutex::new(state),
            abandoned: AtomicBool::new(false),
            bank,
            lookup,
            store,
            views,
        }
    }

    /// Receiver that sees every published view.
    pub fn subscribe(&self) -> watch::Receiver<StorefrontView> {
        self.views.subscribe()
    }

    /// The most recently published view.
    pub fn view(&self) -> StorefrontView {
        self.views.borrow().clone()
    }

    pub async fn snapshot(&self) -> StorefrontState {
        self.state.lock().await.clone()
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // -- wizard -------------------------------------------------------------

    pub async fn start(&self) {
        self.apply(StorefrontState::start).await;
    }

    pub async fn next_step(&self) {
        self.apply(StorefrontState::next_step).await;
    }

    pub async fn previous_step(&self) {
        self.apply(StorefrontState::previous_step).await;
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownOption`] if `id` is not in the catalog; the
    /// selection is left unchanged.
    pub async fn select_option(&self, category: Category, id: &str) -> Result<(), CoreError> {
        self.apply(|state| state.select_option(category, id)).await
    }

    pub async fn set_creation_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.apply(|state| state.set_creation_name(name)).await;
    }

    // -- cart ---------------------------------------------------------------

    /// Returns the new cart size, or `None` when not on the final step.
    pub async fn add_to_cart(&self, creation_name: Option<String>) -> Option<usize> {
        let added = self
            .apply(|state| state.add_current_selection(creation_name))
            .await;
        if let Some(count) = added {
            tracing::debug!(cart_items = count, "configuration added to cart");
        }
        added
    }

    pub async fn remove_from_cart(&self, index: usize) -> Option<ConfiguredItem> {
        self.apply(|state| state.remove_from_cart(index)).await
    }

    pub async fn open_cart(&self) {
        self.apply(StorefrontState::open_cart).await;
    }

    pub async fn close_cart(&self) {
        self.apply(StorefrontState::close_cart).await;
    }

    // -- checkout -----------------------------------------------------------

    /// Open the checkout dialog and load provinces if they are not loaded.
    /// Returns `false` when the dialog cannot open.
    pub async fn open_checkout(&self) -> bool {
        let (opened, ticket) = self
            .apply(|state| {
                let opened = state.open_checkout();
                let ticket = if opened {
                    state.request_provinces()
                } else {
                    None
                };
                (opened, ticket)
            })
            .await;

        if let Some(ticket) = ticket {
            self.run_lookup(ticket).await;
        }
        opened
    }

    /// Fetch provinces again, e.g. after both endpoints were unreachable.
    pub async fn reload_provinces(&self) {
        let ticket = self.apply(StorefrontState::reload_provinces).await;
        self.run_lookup(ticket).await;
    }

    pub async fn cancel_checkout(&self) -> bool {
        self.apply(StorefrontState::cancel_checkout).await
    }

    pub async fn update_form(&self, edit: impl FnOnce(&mut CheckoutForm)) -> bool {
        self.apply(|state| state.update_form(edit)).await
    }

    /// Pick a province. District and ward are cleared and published before the
    /// district lookup starts.
    pub async fn select_province(&self, id: Option<RegionId>) {
        if let Some(ticket) = self.apply(|state| state.select_province(id)).await {
            self.run_lookup(ticket).await;
        }
    }

    /// Pick a district. The ward is cleared and published before the ward
    /// lookup starts.
    pub async fn select_district(&self, id: Option<RegionId>) {
        if let Some(ticket) = self.apply(|state| state.select_district(id)).await {
            self.run_lookup(ticket).await;
        }
    }

    pub async fn select_ward(&self, id: Option<RegionId>) {
        self.apply(|state| state.select_ward(id)).await;
    }

    /// Validate, insert, and report. The dialog stays busy for the duration of
    /// the insert so a second submit is refused.
    pub async fn submit(&self) -> SubmitOutcome {
        let order = match self.apply(StorefrontState::begin_submission).await {
            Ok(order) => order,
            Err(rejection) => {
                tracing::debug!(reason = %rejection, "submission rejected");
                return SubmitOutcome::Rejected(rejection);
            }
        };

        let in_flight = InFlight {
            storefront: self,
            armed: true,
        };

        let result = self
            .store
            .insert_order(&order)
            .await
            .map_err(|e| e.to_string());

        let outcome = match &result {
            Ok(receipt) => {
                tracing::info!(
                    order_id = ?receipt.order_id,
                    total_amount = order.total_amount,
                    "order placed"
                );
                SubmitOutcome::Placed {
                    order_id: receipt.order_id,
                }
            }
            Err(message) => {
                tracing::warn!(error = %message, "order insert failed");
                SubmitOutcome::Failed(message.clone())
            }
        };

        self.apply(|state| state.finish_submission(result)).await;
        in_flight.disarm();
        outcome
    }

    pub async fn dismiss_notice(&self) {
        self.apply(StorefrontState::dismiss_notice).await;
    }

    // -- internals ----------------------------------------------------------

    async fn run_lookup(&self, ticket: LookupTicket) {
        let list = match (ticket.level, ticket.parent.as_ref()) {
            (RegionLevel::Province, _) => self.lookup.provinces().await,
            (RegionLevel::District, Some(province)) => {
                self.lookup.districts(province, ticket.family).await
            }
            (RegionLevel::Ward, Some(district)) => self.lookup.wards(district, ticket.family).await,
            (level, None) => {
                tracing::debug!(%level, "lookup ticket without parent ignored");
                return;
            }
        };

        let count = list.entries.len();
        let applied = self
            .apply(|state| state.complete_lookup(&ticket, list))
            .await;
        if applied {
            tracing::debug!(level = %ticket.level, entries = count, "region options loaded");
        } else {
            tracing::debug!(
                level = %ticket.level,
                parent = ?ticket.parent,
                "discarding stale region lookup result"
            );
        }
    }

    /// Run one action under the lock, then publish the resulting view.
    async fn apply<R>(&self, action: impl FnOnce(&mut StorefrontState) -> R) -> R {
        let mut state = self.state.lock().await;
        if self.abandoned.swap(false, Ordering::SeqCst) {
            state.abandon_submission();
        }
        let result = action(&mut state);
        self.publish(&state);
        result
    }
}

impl<L, S> Storefront<L, S> {
    fn publish(&self, state: &StorefrontState) {
        self.views
            .send_replace(StorefrontView::build(state, self.bank.as_ref()));
    }

    /// Called from `Drop`, so it cannot wait for the lock. When the lock is
    /// taken the release is deferred to the next action.
    fn abandon_submission(&self) {
        tracing::warn!("order submission dropped before the store answered");
        match self.state.try_lock() {
            Ok(mut state) => {
                state.abandon_submission();
                self.publish(&state);
            }
            Err(_) => self.abandoned.store(true, Ordering::SeqCst),
        }
    }
}

/// Armed between marking the dialog busy and applying the store's answer.
struct InFlight<'a, L, S> {
    storefront: &'a Storefront<L, S>,
    armed: bool,
}

impl<L, S> InFlight<'_, L, S> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<L, S> Drop for InFlight<'_, L, S> {
    fn drop(&mut self) {
        if self.armed {
            self.storefront.abandon_submission();
        }
    }
}

#[cfg(test)]
mod tests {
    use cementlife_core::{RegionList, Stage};

    use super::*;
    use crate::MemoryOrderStore;

    struct NoRegions;

    impl RegionLookup for NoRegions {
        async fn provinces(&self) -> RegionList {
            RegionList::default()
        }

        async fn districts(
            &self,
            _province: &RegionId,
            _family: Option<cementlife_core::RegionSource>,
        ) -> RegionList {
            RegionList::default()
        }

        async fn wards(
            &self,
            _district: &RegionId,
            _family: Option<cementlife_core::RegionSource>,
        ) -> RegionList {
            RegionList::default()
        }
    }

    #[tokio::test]
    async fn every_action_publishes_a_view() {
        let storefront = Storefront::new(
            Catalog::builtin(),
            NoRegions,
            MemoryOrderStore::default(),
            None,
        );
        let mut views = storefront.subscribe();
        assert_eq!(views.borrow_and_update().stage, Stage::Landing);

        storefront.start().await;

        assert!(views.has_changed().unwrap());
        assert_eq!(views.borrow_and_update().steps[0].number, 1);
        assert_eq!(storefront.view().active_category, Some(Category::Container));
    }

    #[tokio::test]
    async fn published_view_serializes_for_rendering() {
        let storefront = Storefront::new(
            Catalog::builtin(),
            NoRegions,
            MemoryOrderStore::default(),
            None,
        );
        storefront.start().await;

        let json = serde_json::to_value(storefront.view()).unwrap();

        assert_eq!(json["stage"]["stage"], "step");
        assert_eq!(json["price_label"], "57.000₫");
        assert_eq!(json["options"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn unknown_option_leaves_selection_alone() {
        let storefront = Storefront::new(
            Catalog::builtin(),
            NoRegions,
            MemoryOrderStore::default(),
            None,
        );
        storefront.start().await;

        let err = storefront
            .select_option(Category::Container, "sphere")
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::UnknownOption { .. }));
        assert_eq!(
            storefront.snapshot().await.configurator().selection().container.id,
            "cube"
        );
    }
}
