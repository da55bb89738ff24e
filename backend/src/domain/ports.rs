//! Driving port for invoice commands and queries.
//!
//! Inbound adapters (HTTP handlers) use this port so they stay testable
//! without knowing how the store is held in memory. Production wires the
//! [`InMemoryInvoiceStore`](super::InMemoryInvoiceStore); tests may supply
//! any deterministic implementation.

use async_trait::async_trait;

use super::{Company, CompanyId, Error, Invoice, InvoiceFilter};

/// Domain use-case port for creating and querying invoices.
#[async_trait]
pub trait InvoiceService: Send + Sync {
    /// Append a fully-populated invoice.
    ///
    /// # Errors
    /// Returns a [`Conflict`](super::ErrorCode::Conflict) error when an
    /// invoice with the same identifier already exists; the store is left
    /// unchanged in that case.
    async fn create_invoice(&self, invoice: Invoice) -> Result<Invoice, Error>;

    /// Invoices issued by `company`, narrowed by `filter`, in insertion
    /// order. An empty result is not an error.
    async fn sent_invoices(
        &self,
        company: &CompanyId,
        filter: InvoiceFilter,
    ) -> Result<Vec<Invoice>, Error>;

    /// Invoices received by `company`, narrowed by `filter`, in insertion
    /// order. The filter's counterparty constraint matches the *issuer*
    /// field here.
    async fn received_invoices(
        &self,
        company: &CompanyId,
        filter: InvoiceFilter,
    ) -> Result<Vec<Invoice>, Error>;

    /// Register a company. Used during startup seeding.
    ///
    /// # Errors
    /// Returns a [`Conflict`](super::ErrorCode::Conflict) error when a
    /// company with the same identifier is already registered.
    async fn register_company(&self, company: Company) -> Result<(), Error>;
}
