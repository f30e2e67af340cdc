//! Checkout form, its validation, and the shipping address composed from it.

use serde::{Deserialize, Serialize};

use crate::region::AddressBook;
use crate::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cod,
    BankTransfer,
}

impl PaymentMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cod => "Thanh toán khi nhận hàng (COD)",
            PaymentMethod::BankTransfer => "Chuyển khoản ngân hàng",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "cod" => Ok(PaymentMethod::Cod),
            "bank_transfer" | "bank" => Ok(PaymentMethod::BankTransfer),
            _ => Err(CoreError::InvalidPaymentMethod(s.to_string())),
        }
    }
}

/// Account the customer pays into when choosing bank transfer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankTransferDetails {
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
}

impl std::fmt::Debug for BankTransferDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankTransferDetails")
            .field("bank_name", &self.bank_name)
            .field("account_number", &"[redacted]")
            .field("account_holder", &self.account_holder)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    /// House number and street; region names are appended on submit.
    pub address_line: String,
    pub payment_method: PaymentMethod,
}

/// Checkout overlay state. While `busy`, the dialog cannot be dismissed and
/// no second submission starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutDialog {
    pub open: bool,
    pub busy: bool,
    pub form: CheckoutForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    CustomerName,
    Phone,
    Email,
    AddressLine,
    Province,
    District,
    Ward,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MissingField::CustomerName => "name",
            MissingField::Phone => "phone",
            MissingField::Email => "email",
            MissingField::AddressLine => "address",
            MissingField::Province => "province",
            MissingField::District => "district",
            MissingField::Ward => "ward",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("please fill in all required fields: {}", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<MissingField>,
}

fn join_fields(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shipping address with every region resolved to its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub line: String,
    pub ward: String,
    pub district: String,
    pub province: String,
}

impl ResolvedAddress {
    #[must_use]
    pub fn compose(&self) -> String {
        compose_address(&self.line, &self.ward, &self.district, &self.province)
    }
}

/// `line, ward, district, province`.
#[must_use]
pub fn compose_address(line: &str, ward: &str, district: &str, province: &str) -> String {
    format!("{line}, {ward}, {district}, {province}")
}

/// Check every required field and resolve the selected region ids against
/// the loaded option lists.
///
/// # Errors
///
/// Returns [`ValidationError`] listing every missing field, in form order.
pub fn validate_checkout(
    form: &CheckoutForm,
    address: &AddressBook,
) -> Result<ResolvedAddress, ValidationError> {
    fn present(value: &str) -> Option<String> {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    let name = present(&form.customer_name);
    let phone = present(&form.phone);
    let email = present(&form.email);
    let line = present(&form.address_line);
    let province = address.province_name().and_then(present);
    let district = address.district_name().and_then(present);
    let ward = address.ward_name().and_then(present);

    let checks = [
        (MissingField::CustomerName, name.is_some()),
        (MissingField::Phone, phone.is_some()),
        (MissingField::Email, email.is_some()),
        (MissingField::AddressLine, line.is_some()),
        (MissingField::Province, province.is_some()),
        (MissingField::District, district.is_some()),
        (MissingField::Ward, ward.is_some()),
    ];
    let missing: Vec<MissingField> = checks
        .into_iter()
        .filter_map(|(field, ok)| (!ok).then_some(field))
        .collect();

    match (line, ward, district, province) {
        (Some(line), Some(ward), Some(district), Some(province)) if missing.is_empty() => {
            Ok(ResolvedAddress {
                line,
                ward,
                district,
                province,
            })
        }
        _ => Err(ValidationError { missing }),
    }
}
