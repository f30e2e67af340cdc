//! The single serializable state object behind the storefront. Every mutation
//! goes through one of the named actions below; async work (region lookups,
//! order inserts) is split into a synchronous dispatch half that returns what
//! to fetch and a completion half that applies the result.

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, ConfiguredItem};
use crate::catalog::{Catalog, Category};
use crate::checkout::{validate_checkout, CheckoutDialog, CheckoutForm, ValidationError};
use crate::configurator::{Configurator, Stage, Step};
use crate::order::{NewOrder, OrderLine, OrderReceipt};
use crate::region::{AddressBook, LookupTicket, RegionId, RegionList};
use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// User-facing message shown until dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Why a submission did not start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejection {
    #[error("checkout is not open")]
    NotOpen,
    #[error("an order is already being submitted")]
    Busy,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontState {
    catalog: Catalog,
    configurator: Configurator,
    cart: Cart,
    cart_open: bool,
    address: AddressBook,
    checkout: CheckoutDialog,
    notice: Option<Notice>,
}

impl StorefrontState {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        let configurator = Configurator::new(&catalog);
        Self {
            catalog,
            configurator,
            cart: Cart::default(),
            cart_open: false,
            address: AddressBook::default(),
            checkout: CheckoutDialog::default(),
            notice: None,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn configurator(&self) -> &Configurator {
        &self.configurator
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn cart_open(&self) -> bool {
        self.cart_open
    }

    #[must_use]
    pub fn address(&self) -> &AddressBook {
        &self.address
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutDialog {
        &self.checkout
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    // -- wizard -------------------------------------------------------------

    pub fn start(&mut self) {
        self.configurator.start();
    }

    pub fn next_step(&mut self) {
        self.configurator.next();
    }

    pub fn previous_step(&mut self) {
        self.configurator.back();
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownOption`] if `id` is not in the catalog.
    pub fn select_option(&mut self, category: Category, id: &str) -> Result<(), CoreError> {
        self.configurator.select(&self.catalog, category, id)
    }

    pub fn set_creation_name(&mut self, name: impl Into<String>) {
        self.configurator.set_creation_name(name);
    }

    // -- cart ---------------------------------------------------------------

    /// Snapshot the current selection into the cart, then reset the wizard to
    /// step 1 with default options. Only valid on step 4; elsewhere nothing
    /// happens and `None` is returned. `creation_name` overrides the name typed
    /// on step 4.
    pub fn add_current_selection(&mut self, creation_name: Option<String>) -> Option<usize> {
        if self.configurator.step() != Some(Step::LAST) {
            return None;
        }

        let name = creation_name.unwrap_or_else(|| self.configurator.creation_name().to_string());
        let item = ConfiguredItem::from_selection(
            self.configurator.selection(),
            self.configurator.preview_image(),
            Some(name),
        );
        self.cart.push(item);
        self.configurator.reset(&self.catalog);
        Some(self.cart.len())
    }

    pub fn remove_from_cart(&mut self, index: usize) -> Option<ConfiguredItem> {
        self.cart.remove(index)
    }

    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    // -- checkout -----------------------------------------------------------

    /// Open the checkout dialog. Refused on the landing screen.
    pub fn open_checkout(&mut self) -> bool {
        if self.configurator.stage() == Stage::Landing {
            return false;
        }
        self.cart_open = false;
        self.checkout.open = true;
        true
    }

    /// Close the dialog unless a submission is in flight.
    pub fn cancel_checkout(&mut self) -> bool {
        if self.checkout.busy {
            return false;
        }
        self.checkout.open = false;
        true
    }

    /// Edit the form. Ignored while a submission is in flight.
    pub fn update_form(&mut self, edit: impl FnOnce(&mut CheckoutForm)) -> bool {
        if self.checkout.busy {
            return false;
        }
        edit(&mut self.checkout.form);
        true
    }

    /// Ticket for loading provinces, if they are not loaded yet.
    pub fn request_provinces(&mut self) -> Option<LookupTicket> {
        let loaded = self.address.provinces().source.is_some();
        (!loaded).then(|| self.address.request_provinces())
    }

    pub fn reload_provinces(&mut self) -> LookupTicket {
        self.address.request_provinces()
    }

    pub fn select_province(&mut self, id: Option<RegionId>) -> Option<LookupTicket> {
        self.address.select_province(id)
    }

    pub fn select_district(&mut self, id: Option<RegionId>) -> Option<LookupTicket> {
        self.address.select_district(id)
    }

    pub fn select_ward(&mut self, id: Option<RegionId>) {
        self.address.select_ward(id);
    }

    /// Apply a lookup result; stale results are dropped and `false` returned.
    pub fn complete_lookup(&mut self, ticket: &LookupTicket, list: RegionList) -> bool {
        self.address.complete(ticket, list)
    }

    /// Lines an order would contain: the cart, or the in-progress
    /// configuration when the cart is empty.
    #[must_use]
    pub fn order_lines(&self) -> Vec<OrderLine> {
        if self.cart.is_empty() {
            let name = self.configurator.creation_name().to_string();
            let item = ConfiguredItem::from_selection(
                self.configurator.selection(),
                self.configurator.preview_image(),
                Some(name),
            );
            vec![OrderLine::from(&item)]
        } else {
            self.cart.items().iter().map(OrderLine::from).collect()
        }
    }

    /// Validate the form and mark the dialog busy. The returned order is what
    /// should be handed to the store; report the outcome with
    /// [`StorefrontState::finish_submission`].
    ///
    /// # Errors
    ///
    /// Returns [`SubmitRejection`] when the dialog is closed, a submission is
    /// already running, or a required field is missing. A validation failure
    /// is also posted as an error notice.
    pub fn begin_submission(&mut self) -> Result<NewOrder, SubmitRejection> {
        if !self.checkout.open {
            return Err(SubmitRejection::NotOpen);
        }
        if self.checkout.busy {
            return Err(SubmitRejection::Busy);
        }

        let resolved = match validate_checkout(&self.checkout.form, &self.address) {
            Ok(resolved) => resolved,
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
                return Err(err.into());
            }
        };

        let creation_name = Some(self.configurator.creation_name().trim().to_string())
            .filter(|name| !name.is_empty());
        let order = NewOrder::assemble(
            &self.checkout.form,
            &resolved,
            self.order_lines(),
            self.configurator.preview_image(),
            creation_name,
        );

        self.checkout.busy = true;
        self.notice = None;
        Ok(order)
    }

    /// Apply the store's answer. On failure the message is shown verbatim and
    /// the form stays open and filled in. On success the dialog closes and the
    /// wizard restarts at step 1; the cart is left alone.
    pub fn finish_submission(&mut self, result: Result<OrderReceipt, String>) {
        self.checkout.busy = false;
        match result {
            Ok(receipt) => {
                let message = match receipt.order_id {
                    Some(id) => format!("Order placed! Your order number is #{id}."),
                    None => "Order placed successfully.".to_string(),
                };
                self.notice = Some(Notice::success(message));
                self.checkout.open = false;
                self.configurator.reset(&self.catalog);
            }
            Err(message) => {
                self.notice = Some(Notice::error(message));
            }
        }
    }

    /// Clear a submission whose outcome will never arrive, e.g. because the
    /// caller stopped waiting on the insert. No-op when nothing is in flight.
    pub fn abandon_submission(&mut self) {
        if !self.checkout.busy {
            return;
        }
        self.checkout.busy = false;
        self.notice = Some(Notice::error(
            "Order submission was interrupted. Please try again.",
        ));
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
