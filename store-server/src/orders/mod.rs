//! Order lifecycle module
//!
//! The order path from checkout to delivery:
//!
//! - **reference**: public order/quote reference generation
//! - **storage**: redb-backed repository with dual-key addressing
//! - **service**: orchestration of creation, status progression and retrieval
//!
//! # Data flow
//!
//! ```text
//! Checkout payload → OrderService.create → OrderStore.put (authoritative)
//!                                        → invoice render   (best-effort)
//!                                        → notifications    (best-effort)
//! Staff update     → OrderService.update_status → OrderStore.update (merge-patch)
//! Lookup           → OrderService.find_by_ref / list_by_user → OrderStore queries
//! ```

pub mod reference;
pub mod service;
pub mod storage;

pub use service::{OrderService, ServiceError, ServiceResult};
pub use storage::{OrderStore, StorageError, StorageResult};
