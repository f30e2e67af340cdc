//! Read-only snapshot of everything a storefront surface renders. Views are
//! rebuilt from [`StorefrontState`] after every action and carry no rules of
//! their own.

use serde::Serialize;

use crate::catalog::Category;
use crate::checkout::{BankTransferDetails, CheckoutForm, PaymentMethod};
use crate::configurator::{Stage, Step};
use crate::currency::format_vnd;
use crate::region::{RegionEntry, RegionId};
use crate::state::{Notice, StorefrontState};

pub const GIFT_NOTE: &str =
    "Quà tặng kèm (Free): 1 Bịch đất (300g) + 1 Xẻng mini + 1 Bình tưới nhỏ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Done,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    pub number: u8,
    pub label: &'static str,
    pub state: StepState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionCard {
    pub id: String,
    pub name: String,
    pub price_label: String,
    /// Only toppings show their description on the card.
    pub description: Option<String>,
    pub image: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub index: usize,
    pub title: String,
    pub description: String,
    pub preview_image: String,
    pub price_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartOverlay {
    pub lines: Vec<CartLine>,
    pub subtotal_label: String,
    pub can_proceed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSelect {
    pub options: Vec<RegionEntry>,
    pub selected: Option<RegionId>,
    /// Nothing to pick from: lookups failed or the parent is unset.
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutOverlay {
    pub form: CheckoutForm,
    pub provinces: RegionSelect,
    pub districts: RegionSelect,
    pub wards: RegionSelect,
    pub payment_methods: Vec<(PaymentMethod, &'static str)>,
    /// Shown only when bank transfer is chosen.
    pub bank_transfer: Option<BankTransferDetails>,
    pub total_label: String,
    pub busy: bool,
    pub can_dismiss: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorefrontView {
    pub stage: Stage,
    pub steps: Vec<StepIndicator>,
    pub active_category: Option<Category>,
    pub options: Vec<OptionCard>,
    pub preview_image: String,
    pub preview_alt: String,
    pub price_label: String,
    pub gift_note: &'static str,
    pub summary: Vec<SummaryLine>,
    /// `Some` on step 4, where the creation is named.
    pub creation_name: Option<String>,
    pub can_go_back: bool,
    pub can_go_next: bool,
    pub can_add_to_cart: bool,
    pub cart_count: usize,
    pub cart: Option<CartOverlay>,
    pub checkout: Option<CheckoutOverlay>,
    pub notice: Option<Notice>,
}

impl StorefrontView {
    #[must_use]
    pub fn build(state: &StorefrontState, bank: Option<&BankTransferDetails>) -> Self {
        let configurator = state.configurator();
        let step = configurator.step();
        let selection = configurator.selection();
        let active_category = configurator.active_category();

        let steps = Step::all()
            .map(|s| StepIndicator {
                number: s.number(),
                label: s.label(),
                state: match step {
                    Some(current) if s == current => StepState::Current,
                    Some(current) if s < current => StepState::Done,
                    _ => StepState::Upcoming,
                },
            })
            .collect();

        let options = active_category
            .map(|category| {
                state
                    .catalog()
                    .options(category)
                    .iter()
                    .map(|option| OptionCard {
                        id: option.id.clone(),
                        name: option.name.clone(),
                        price_label: format!("+ {}", format_vnd(option.price)),
                        description: (category == Category::Topping)
                            .then(|| option.description.clone()),
                        image: option.image.clone(),
                        selected: selection.get(category).id == option.id,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let summary = Category::ALL
            .iter()
            .map(|&category| SummaryLine {
                label: category.label(),
                value: selection.get(category).name.clone(),
            })
            .collect();

        let cart = state.cart_open().then(|| CartOverlay {
            lines: state
                .cart()
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| CartLine {
                    index,
                    title: item
                        .creation_name
                        .clone()
                        .unwrap_or_else(|| format!("{} + {}", item.container.name, item.plant.name)),
                    description: format!(
                        "{} / {} / {}",
                        item.container.name, item.plant.name, item.topping.name
                    ),
                    preview_image: item.preview_image.clone(),
                    price_label: format_vnd(item.total),
                })
                .collect(),
            subtotal_label: format_vnd(state.cart().total()),
            can_proceed: !state.cart().is_empty(),
        });

        let checkout = state.checkout().open.then(|| {
            let dialog = state.checkout();
            let address = state.address();
            let order_total = if state.cart().is_empty() {
                configurator.total()
            } else {
                state.cart().total()
            };
            CheckoutOverlay {
                form: dialog.form.clone(),
                provinces: RegionSelect {
                    options: address.provinces().entries.clone(),
                    selected: address.province().cloned(),
                    disabled: address.provinces().is_empty(),
                },
                districts: RegionSelect {
                    options: address.districts().entries.clone(),
                    selected: address.district().cloned(),
                    disabled: address.province().is_none() || address.districts().is_empty(),
                },
                wards: RegionSelect {
                    options: address.wards().entries.clone(),
                    selected: address.ward().cloned(),
                    disabled: address.district().is_none() || address.wards().is_empty(),
                },
                payment_methods: [PaymentMethod::Cod, PaymentMethod::BankTransfer]
                    .into_iter()
                    .map(|method| (method, method.label()))
                    .collect(),
                bank_transfer: (dialog.form.payment_method == PaymentMethod::BankTransfer)
                    .then(|| bank.cloned())
                    .flatten(),
                total_label: format_vnd(order_total),
                busy: dialog.busy,
                can_dismiss: !dialog.busy,
            }
        });

        Self {
            stage: configurator.stage(),
            steps,
            active_category,
            options,
            preview_image: configurator.preview_image(),
            preview_alt: configurator.preview_alt(),
            price_label: format_vnd(configurator.total()),
            gift_note: GIFT_NOTE,
            summary,
            creation_name: (step == Some(Step::LAST))
                .then(|| configurator.creation_name().to_string()),
            can_go_back: step.is_some_and(|s| s > Step::FIRST),
            can_go_next: step.is_some_and(|s| s < Step::LAST),
            can_add_to_cart: step == Some(Step::LAST),
            cart_count: state.cart().len(),
            cart,
            checkout,
            notice: state.notice().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn bank() -> BankTransferDetails {
        BankTransferDetails {
            bank_name: "Vietcombank".to_string(),
            account_number: "0123456789".to_string(),
            account_holder: "CEMENT LIFE".to_string(),
        }
    }

    #[test]
    fn landing_view_has_no_options() {
        let state = StorefrontState::new(Catalog::builtin());
        let view = StorefrontView::build(&state, None);

        assert_eq!(view.stage, Stage::Landing);
        assert!(view.options.is_empty());
        assert!(view
            .steps
            .iter()
            .all(|s| s.state == StepState::Upcoming));
        assert_eq!(view.price_label, "57.000₫");
        assert!(!view.can_go_next);
    }

    #[test]
    fn step_two_shows_plant_grid_and_indicator() {
        let mut state = StorefrontState::new(Catalog::builtin());
        state.start();
        state.next_step();
        let view = StorefrontView::build(&state, None);

        assert_eq!(view.active_category, Some(Category::Plant));
        assert_eq!(view.options.len(), 3);
        assert!(view.options[0].selected);
        assert!(view.options.iter().all(|o| o.description.is_none()));
        let states: Vec<StepState> = view.steps.iter().map(|s| s.state).collect();
        assert_eq!(
            states,
            [
                StepState::Done,
                StepState::Current,
                StepState::Upcoming,
                StepState::Upcoming
            ]
        );
        assert_eq!(view.preview_image, "/cube-mongrong.jpg");
        assert!(view.can_go_back && view.can_go_next);
    }

    #[test]
    fn topping_cards_show_descriptions() {
        let mut state = StorefrontState::new(Catalog::builtin());
        state.start();
        state.next_step();
        state.next_step();
        let view = StorefrontView::build(&state, None);
        assert!(view.options.iter().all(|o| o.description.is_some()));
    }

    #[test]
    fn final_step_exposes_creation_name() {
        let mut state = StorefrontState::new(Catalog::builtin());
        state.start();
        for _ in 0..3 {
            state.next_step();
        }
        state.set_creation_name("Bonsai nhỏ");
        let view = StorefrontView::build(&state, None);
        assert_eq!(view.creation_name.as_deref(), Some("Bonsai nhỏ"));
        assert!(view.can_add_to_cart);
        assert!(view.options.is_empty());
    }

    #[test]
    fn bank_details_only_for_bank_transfer() {
        let mut state = StorefrontState::new(Catalog::builtin());
        state.start();
        state.open_checkout();
        let details = bank();

        let view = StorefrontView::build(&state, Some(&details));
        let overlay = view.checkout.expect("checkout open");
        assert!(overlay.bank_transfer.is_none());
        assert!(overlay.districts.disabled);

        state.update_form(|form| form.payment_method = PaymentMethod::BankTransfer);
        let view = StorefrontView::build(&state, Some(&details));
        assert_eq!(view.checkout.unwrap().bank_transfer, Some(details));
    }

    #[test]
    fn cart_overlay_lists_items_with_subtotal() {
        let mut state = StorefrontState::new(Catalog::builtin());
        state.start();
        for _ in 0..3 {
            state.next_step();
        }
        state.add_current_selection(Some("Quà sinh nhật".to_string()));
        state.open_cart();

        let view = StorefrontView::build(&state, None);
        let cart = view.cart.expect("cart open");
        assert_eq!(view.cart_count, 1);
        assert_eq!(cart.lines[0].title, "Quà sinh nhật");
        assert_eq!(cart.lines[0].price_label, "57.000₫");
        assert_eq!(cart.subtotal_label, "57.000₫");
        assert!(cart.can_proceed);
    }
}
