pub mod client;
pub mod endpoints;
pub mod error;
pub mod normalize;

pub use client::RegionClient;
pub use endpoints::EndpointFamily;
pub use error::RegionError;
pub use normalize::normalize_regions;
