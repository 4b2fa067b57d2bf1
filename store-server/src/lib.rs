//! XTech Components store server
//!
//! Order lifecycle backend for the storefront. The presentational surfaces
//! live elsewhere; this server owns the path from checkout to delivery:
//!
//! - **orders**: order service, redb-backed repository, reference generator
//! - **invoice**: deterministic printable invoice rendering
//! - **notify**: best-effort transactional email
//! - **api**: HTTP routes and handlers
//! - **core**: configuration, state, server assembly
//!
//! # Module structure
//!
//! ```text
//! store-server/src/
//! ├── core/          # config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── orders/        # order service + storage + references
//! ├── invoice/       # invoice document rendering
//! ├── notify/        # outbound email
//! └── utils/         # logger, validation, rate limiting
//! ```

pub mod api;
pub mod core;
pub mod invoice;
pub mod notify;
pub mod orders;
pub mod utils;

// Re-export common types
pub use core::{Config, Server, ServerState};
pub use notify::{Notifier, SendOutcome};
pub use orders::{OrderService, OrderStore};
pub use utils::logger::init_logger;
