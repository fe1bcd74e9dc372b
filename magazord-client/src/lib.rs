//! Typed client for the Magazord ERP API
//!
//! Wraps the catalog, inventory and pricing endpoints consumed by the
//! operations panel:
//!
//! - **Request construction** (`client`): base URL + Basic credential on
//!   every call, clamped paging parameters
//! - **Normalization** (`catalog`): tolerant multi-key field mapping of the
//!   heterogeneous upstream records into canonical rows
//! - **Typed failures** (`error`): configuration, validation and upstream
//!   errors carrying the truncated response body

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::build_image_url;
pub use client::{LIMIT_MAX, MagazordClient, clamp_limit, clamp_page};
pub use config::MagazordConfig;
pub use error::{GatewayError, GatewayResult};
pub use types::{CatalogPage, CatalogoRow, EstoqueRow, Movimento};
