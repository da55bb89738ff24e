//! Domain primitives and the invoice store.
//!
//! Purpose: define the strongly typed entities used by the HTTP adapter and
//! the in-memory store that enforces the behavioural contracts. Types are
//! immutable once constructed; invariants and serialisation contracts are
//! documented on each type.
//!
//! Public surface:
//! - [`Company`] / [`CompanyId`] — registered parties.
//! - [`Invoice`] / [`InvoiceId`] / [`InvoiceFilter`] — append-only invoice
//!   records and query predicates.
//! - [`ports::InvoiceService`] — the driving port for handlers.
//! - [`InMemoryInvoiceStore`] — the volatile store implementation.
//! - [`Error`] / [`ErrorCode`] — transport-agnostic failure payloads.

pub mod company;
pub mod error;
pub mod invoice;
pub mod ports;
pub mod store;

pub use self::company::{Company, CompanyId, CompanyIdError};
pub use self::error::{Error, ErrorCode};
pub use self::invoice::{Invoice, InvoiceAmounts, InvoiceFilter, InvoiceId, InvoiceIdError};
pub use self::store::InMemoryInvoiceStore;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("missing bearer token"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
