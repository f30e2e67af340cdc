use serde::{Deserialize, Serialize};

use crate::cart::ConfiguredItem;
use crate::catalog::CatalogOption;
use crate::checkout::{CheckoutForm, PaymentMethod, ResolvedAddress};
use crate::CoreError;

/// Lifecycle of a stored order. Orders are created `Pending`; the other
/// states are set later by whoever fulfils them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Canceled,
}

impl OrderStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELED" | "CANCELLED" => Ok(OrderStatus::Canceled),
            _ => Err(CoreError::InvalidOrderStatus(s.to_string())),
        }
    }
}

/// The part of a catalog option worth keeping in an order snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRef {
    pub id: String,
    pub name: String,
    pub price: i64,
}

impl From<&CatalogOption> for OptionRef {
    fn from(option: &CatalogOption) -> Self {
        Self {
            id: option.id.clone(),
            name: option.name.clone(),
            price: option.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub container: OptionRef,
    pub plant: OptionRef,
    pub topping: OptionRef,
    pub total: i64,
    pub preview_image: String,
    pub creation_name: Option<String>,
}

impl From<&ConfiguredItem> for OrderLine {
    fn from(item: &ConfiguredItem) -> Self {
        Self {
            container: OptionRef::from(&item.container),
            plant: OptionRef::from(&item.plant),
            topping: OptionRef::from(&item.topping),
            total: item.total,
            preview_image: item.preview_image.clone(),
            creation_name: item.creation_name.clone(),
        }
    }
}

/// Snapshot stored alongside the order so it stays readable after catalog
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub lines: Vec<OrderLine>,
    pub payment_method: PaymentMethod,
    pub creation_name: Option<String>,
    pub preview_image: String,
}

/// An order ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub total_amount: i64,
    pub detail: OrderDetail,
    pub status: OrderStatus,
}

impl NewOrder {
    /// Assemble a pending order. `lines` must not be empty; the total is the
    /// sum of the line totals.
    #[must_use]
    pub fn assemble(
        form: &CheckoutForm,
        address: &ResolvedAddress,
        lines: Vec<OrderLine>,
        preview_image: String,
        creation_name: Option<String>,
    ) -> Self {
        let total_amount = lines
            .iter()
            .fold(0, |total: i64, line| total.saturating_add(line.total));
        Self {
            customer_name: form.customer_name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            address: address.compose(),
            total_amount,
            detail: OrderDetail {
                lines,
                payment_method: form.payment_method,
                creation_name,
                preview_image,
            },
            status: OrderStatus::Pending,
        }
    }
}

/// What the persistence collaborator hands back for a created order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: Option<i64>,
}
