pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod configurator;
pub mod currency;
pub mod order;
pub mod region;
pub mod services;
pub mod state;
pub mod view;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, RegionEndpointsConfig};
pub use cart::{Cart, ConfiguredItem};
pub use catalog::{load_catalog, Catalog, CatalogOption, Category, MAX_OPTION_PRICE};
pub use checkout::{
    compose_address, validate_checkout, BankTransferDetails, CheckoutDialog, CheckoutForm,
    MissingField, PaymentMethod, ResolvedAddress, ValidationError,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use configurator::{Configurator, Selection, Stage, Step};
pub use currency::format_vnd;
pub use order::{NewOrder, OptionRef, OrderDetail, OrderLine, OrderReceipt, OrderStatus};
pub use region::{
    AddressBook, LookupTicket, RegionEntry, RegionId, RegionLevel, RegionList, RegionSource,
};
pub use services::{OrderStore, RegionLookup};
pub use state::{Notice, NoticeKind, StorefrontState, SubmitRejection};
pub use view::StorefrontView;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    CatalogValidation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown {category} option: {id}")]
    UnknownOption { category: Category, id: String },

    #[error("invalid order status: {0}")]
    InvalidOrderStatus(String),

    #[error("invalid payment method: {0}")]
    InvalidPaymentMethod(String),
}
