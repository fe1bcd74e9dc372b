//! Painel Catalogozord - internal operations panel for the Magazord catalog
//!
//! # Overview
//!
//! Bridges the Magazord ERP (catalog, inventory, pricing) with a locally
//! owned SQLite store of supplementary metadata (suppliers, supplier codes,
//! discontinued flags, notes), behind one HTTP API:
//!
//! - **Sync** (`sync`): mirrors the full upstream derivation listing into the
//!   local `catalogo` table with an idempotent upsert keyed by SKU
//! - **Enrichment** (`enrich`): a bounded worker pool overlays live
//!   stock/cost/price figures onto the rows an operator is viewing
//! - **Store** (`db`): repositories over the mirror, supplier extras and the
//!   supplier table
//! - **API** (`api`): axum routes consumed by the panel front-end
//! - **Auth** (`auth`): verification of externally-issued bearer tokens
//!
//! # Module structure
//!
//! ```text
//! painel-server/src/
//! ├── core/      # config, state, server, background tasks
//! ├── auth/      # JWT verification, CurrentUser extractor
//! ├── api/       # HTTP routes and handlers
//! ├── db/        # SQLite pool, models, repositories
//! ├── sync/      # catalog mirror job
//! ├── enrich/    # live enrichment worker pool
//! └── utils/     # errors, response envelope, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod enrich;
pub mod sync;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::{AppError, AppResponse, AppResult};
