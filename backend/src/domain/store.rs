//! In-memory invoice store.
//!
//! Holds companies and invoices for the lifetime of the process. Both
//! collections are guarded by a single mutex so the duplicate check and the
//! append happen atomically; concurrent creates cannot both pass the check,
//! and queries always observe a consistent snapshot.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use super::ports::InvoiceService;
use super::{Company, CompanyId, Error, Invoice, InvoiceAmounts, InvoiceFilter, InvoiceId};

#[derive(Debug, Default)]
struct StoreInner {
    companies: Vec<Company>,
    invoices: Vec<Invoice>,
}

/// Volatile store backing the [`InvoiceService`] port.
///
/// Storage does not survive a restart; the process re-seeds at startup.
///
/// # Examples
/// ```
/// use backend::domain::{CompanyId, InMemoryInvoiceStore, InvoiceFilter};
/// use backend::domain::ports::InvoiceService;
///
/// # actix_web::rt::System::new().block_on(async {
/// let store = InMemoryInvoiceStore::default();
/// store.seed().expect("seed store");
/// let issuer = CompanyId::new("compA").expect("valid id");
/// let sent = store
///     .sent_invoices(&issuer, InvoiceFilter::none())
///     .await
///     .expect("query sent invoices");
/// assert_eq!(sent.len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryInvoiceStore {
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // A poisoned lock still holds consistent data: every mutation is a
        // single push performed after all fallible checks.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of invoices currently held.
    pub fn invoice_count(&self) -> usize {
        self.lock().invoices.len()
    }

    /// Look up a registered company by identifier.
    pub fn company_by_id(&self, id: &CompanyId) -> Option<Company> {
        self.lock()
            .companies
            .iter()
            .find(|company| company.id() == id)
            .cloned()
    }

    /// Populate the store with the canonical demo data: companies `compA`
    /// and `compB`, invoice `inv1` from compA to compB, and invoice `inv2`
    /// from compB to compA.
    ///
    /// Idempotent: an already-populated store is left untouched.
    ///
    /// # Errors
    /// Returns an internal error when the built-in records fail validation,
    /// which indicates a defect rather than a runtime condition.
    pub fn seed(&self) -> Result<(), Error> {
        let mut inner = self.lock();
        if !inner.companies.is_empty() || !inner.invoices.is_empty() {
            info!("seeding skipped; store already populated");
            return Ok(());
        }

        let (companies, invoices) = seed_records()?;
        info!(
            companies = companies.len(),
            invoices = invoices.len(),
            "seed data applied"
        );
        inner.companies = companies;
        inner.invoices = invoices;
        Ok(())
    }
}

#[async_trait]
impl InvoiceService for InMemoryInvoiceStore {
    async fn create_invoice(&self, invoice: Invoice) -> Result<Invoice, Error> {
        let mut inner = self.lock();
        if inner
            .invoices
            .iter()
            .any(|existing| existing.invoice_id() == invoice.invoice_id())
        {
            return Err(duplicate_invoice_error(invoice.invoice_id()));
        }
        inner.invoices.push(invoice.clone());
        Ok(invoice)
    }

    async fn sent_invoices(
        &self,
        company: &CompanyId,
        filter: InvoiceFilter,
    ) -> Result<Vec<Invoice>, Error> {
        let inner = self.lock();
        Ok(inner
            .invoices
            .iter()
            .filter(|invoice| invoice.company_id() == company)
            .filter(|invoice| matches(invoice, invoice.counter_party_company_id(), &filter))
            .cloned()
            .collect())
    }

    async fn received_invoices(
        &self,
        company: &CompanyId,
        filter: InvoiceFilter,
    ) -> Result<Vec<Invoice>, Error> {
        let inner = self.lock();
        Ok(inner
            .invoices
            .iter()
            .filter(|invoice| invoice.counter_party_company_id() == company)
            // From the receiver's perspective the counterparty is the
            // sender, so the counterparty constraint matches the issuer.
            .filter(|invoice| matches(invoice, invoice.company_id(), &filter))
            .cloned()
            .collect())
    }

    async fn register_company(&self, company: Company) -> Result<(), Error> {
        let mut inner = self.lock();
        if inner
            .companies
            .iter()
            .any(|existing| existing.id() == company.id())
        {
            return Err(Error::conflict(format!(
                "company with id '{}' is already registered",
                company.id()
            ))
            .with_details(json!({ "companyId": company.id().as_ref() })));
        }
        inner.companies.push(company);
        Ok(())
    }
}

fn duplicate_invoice_error(id: &InvoiceId) -> Error {
    Error::conflict(format!("invoice with id '{id}' already exists"))
        .with_details(json!({ "invoiceId": id.as_ref() }))
}

/// Apply the optional exact-match constraints of `filter` to `invoice`.
///
/// `counterparty_field` is the invoice field the counterparty constraint
/// compares against; it differs between sent and received queries.
fn matches(invoice: &Invoice, counterparty_field: &CompanyId, filter: &InvoiceFilter) -> bool {
    filter
        .counter_party()
        .map_or(true, |value| value == counterparty_field.as_ref())
        && filter
            .date_issued()
            .map_or(true, |value| value == invoice.date_issued())
        && filter
            .invoice_id()
            .map_or(true, |value| value == invoice.invoice_id().as_ref())
}

fn seed_records() -> Result<(Vec<Company>, Vec<Invoice>), Error> {
    let comp_a = seed_company_id("compA")?;
    let comp_b = seed_company_id("compB")?;

    let companies = vec![
        Company::new(comp_a.clone(), "Company A", vec!["user1".to_owned()]),
        Company::new(comp_b.clone(), "Company B", vec!["user2".to_owned()]),
    ];

    let invoices = vec![
        Invoice::new(
            seed_invoice_id("inv1")?,
            comp_a.clone(),
            comp_b.clone(),
            "2025-08-21T00:00:00Z",
            InvoiceAmounts {
                net: Decimal::from(100),
                vat: Decimal::from(20),
                total: Decimal::from(120),
            },
            "Service",
        ),
        Invoice::new(
            seed_invoice_id("inv2")?,
            comp_b,
            comp_a,
            "2025-08-22T00:00:00Z",
            InvoiceAmounts {
                net: Decimal::from(200),
                vat: Decimal::from(40),
                total: Decimal::from(240),
            },
            "Service from compB",
        ),
    ];

    Ok((companies, invoices))
}

// The seed values are compile-time constants; surface invalid data as an
// internal error so automated checks catch accidental regressions.
fn seed_company_id(raw: &str) -> Result<CompanyId, Error> {
    CompanyId::new(raw).map_err(|err| Error::internal(format!("invalid seed company id: {err}")))
}

fn seed_invoice_id(raw: &str) -> Result<InvoiceId, Error> {
    InvoiceId::new(raw).map_err(|err| Error::internal(format!("invalid seed invoice id: {err}")))
}
