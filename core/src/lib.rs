//! Synchronous API client core for the Productos AMMA manager.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `ProductClient` is stateless — it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `ProductScreen` layers the single-screen manager on top: it turns user
//!   actions into `PendingRequest` values and folds the outcomes back in,
//!   so every UI rule (draft lifecycle, wholesale reloads, modal alerts) is
//!   testable without a terminal or a server.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod screen;
pub mod types;

pub use client::ProductClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use screen::{Alert, Draft, Operation, PendingRequest, ProductScreen};
pub use types::{coerce_price, format_price, Product, ProductInput};
