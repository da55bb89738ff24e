//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend
//! only on the domain port and remain testable without process wiring. The
//! store is a single explicitly-owned instance injected here; nothing in
//! the adapter relies on ambient or global state.

use std::sync::Arc;

use crate::domain::ports::InvoiceService;

use super::auth::TokenMap;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Invoice command/query port.
    pub invoices: Arc<dyn InvoiceService>,
    /// Bearer-token resolution table.
    pub tokens: Arc<TokenMap>,
}

impl HttpState {
    /// Bundle the invoice port and token table for injection.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::InMemoryInvoiceStore;
    /// use backend::inbound::http::auth::TokenMap;
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(InMemoryInvoiceStore::default()),
    ///     Arc::new(TokenMap::new()),
    /// );
    /// let _clone = state.clone();
    /// ```
    pub fn new(invoices: Arc<dyn InvoiceService>, tokens: Arc<TokenMap>) -> Self {
        Self { invoices, tokens }
    }
}
