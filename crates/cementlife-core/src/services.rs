//! Collaborator seams the storefront talks to. Implementations live in the
//! `cementlife-regions` and `cementlife-db` crates; tests use in-memory fakes.

use std::future::Future;

use crate::order::{NewOrder, OrderReceipt, OrderStatus};
use crate::region::{RegionId, RegionList, RegionSource};

/// Read-only region lookup. Lookups never fail: an unreachable provider
/// yields an empty list.
///
/// `family` is the endpoint family the parent id came from. When it is known
/// only that family is asked, since ids are not portable between providers.
pub trait RegionLookup {
    fn provinces(&self) -> impl Future<Output = RegionList> + Send;

    fn districts(
        &self,
        province: &RegionId,
        family: Option<RegionSource>,
    ) -> impl Future<Output = RegionList> + Send;

    fn wards(
        &self,
        district: &RegionId,
        family: Option<RegionSource>,
    ) -> impl Future<Output = RegionList> + Send;
}

/// Order persistence. `Error`'s `Display` is shown to the customer verbatim.
pub trait OrderStore {
    type Error: std::fmt::Display + Send;

    fn insert_order(
        &self,
        order: &NewOrder,
    ) -> impl Future<Output = Result<OrderReceipt, Self::Error>> + Send;

    fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
