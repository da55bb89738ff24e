//! Invoice data model and query filters.
//!
//! Invoices are append-only records of a billing transaction between an
//! issuing company and a counterparty company. Once created they are never
//! mutated or deleted.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use utoipa::ToSchema;

use super::CompanyId;

/// Validation errors returned by [`InvoiceId::new`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum InvoiceIdError {
    /// The identifier was empty.
    #[error("invoice id must not be empty")]
    Empty,
    /// The identifier carried surrounding whitespace.
    #[error("invoice id must not contain surrounding whitespace")]
    Untrimmed,
}

/// Invoice identifier, unique across the whole store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct InvoiceId(String);

impl InvoiceId {
    /// Validate and construct an [`InvoiceId`].
    ///
    /// # Examples
    /// ```
    /// use backend::domain::InvoiceId;
    ///
    /// let id = InvoiceId::new("inv1").expect("valid id");
    /// assert_eq!(id.as_ref(), "inv1");
    /// assert!(InvoiceId::new("").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, InvoiceIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(InvoiceIdError::Empty);
        }
        if id.trim() != id {
            return Err(InvoiceIdError::Untrimmed);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for InvoiceId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<InvoiceId> for String {
    fn from(value: InvoiceId) -> Self {
        value.0
    }
}

impl TryFrom<String> for InvoiceId {
    type Error = InvoiceIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Monetary amounts of an invoice.
///
/// Groups the constructor parameters; serialisation flattens the amounts
/// into the invoice record itself. No net + VAT = total relation is
/// enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceAmounts {
    /// Net amount before tax.
    pub net: Decimal,
    /// Value-added tax amount.
    pub vat: Decimal,
    /// Total amount including tax.
    pub total: Decimal,
}

/// An append-only invoice record.
///
/// `date_issued` is an opaque token compared for exact equality only; it is
/// never parsed as a calendar date. The issuer and counterparty fields are
/// opaque identifiers with no referential check against registered
/// companies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[schema(example = "inv1")]
    invoice_id: InvoiceId,
    /// Opaque issue-date token, e.g. an RFC 3339 timestamp string.
    #[schema(example = "2025-08-21T00:00:00Z")]
    date_issued: String,
    #[schema(value_type = String, example = "100")]
    net_amount: Decimal,
    #[schema(value_type = String, example = "20")]
    vat_amount: Decimal,
    #[schema(value_type = String, example = "120")]
    total_amount: Decimal,
    /// Free-text description.
    #[schema(example = "Service")]
    description: String,
    /// Issuing company.
    #[schema(example = "compA")]
    company_id: CompanyId,
    /// Counterparty company.
    #[schema(example = "compB")]
    counter_party_company_id: CompanyId,
}

impl Invoice {
    /// Construct a fully-populated invoice record.
    pub fn new(
        invoice_id: InvoiceId,
        company_id: CompanyId,
        counter_party_company_id: CompanyId,
        date_issued: impl Into<String>,
        amounts: InvoiceAmounts,
        description: impl Into<String>,
    ) -> Self {
        Self {
            invoice_id,
            date_issued: date_issued.into(),
            net_amount: amounts.net,
            vat_amount: amounts.vat,
            total_amount: amounts.total,
            description: description.into(),
            company_id,
            counter_party_company_id,
        }
    }

    /// Globally unique invoice identifier.
    pub fn invoice_id(&self) -> &InvoiceId {
        &self.invoice_id
    }

    /// Opaque issue-date token.
    pub fn date_issued(&self) -> &str {
        self.date_issued.as_str()
    }

    /// Net amount before tax.
    pub fn net_amount(&self) -> Decimal {
        self.net_amount
    }

    /// Value-added tax amount.
    pub fn vat_amount(&self) -> Decimal {
        self.vat_amount
    }

    /// Total amount including tax.
    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Issuing company identifier.
    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    /// Counterparty company identifier.
    pub fn counter_party_company_id(&self) -> &CompanyId {
        &self.counter_party_company_id
    }
}

/// Optional exact-match predicates narrowing a sent/received query.
///
/// Each present field narrows the base result by equality on the
/// corresponding invoice field; filters compose with logical AND. An unset
/// or empty field means "no constraint", never "match the empty string".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFilter {
    counter_party: Option<String>,
    date_issued: Option<String>,
    invoice_id: Option<String>,
}

impl InvoiceFilter {
    /// Build a filter, treating empty strings as unset.
    pub fn new(
        counter_party: Option<String>,
        date_issued: Option<String>,
        invoice_id: Option<String>,
    ) -> Self {
        Self {
            counter_party: normalise(counter_party),
            date_issued: normalise(date_issued),
            invoice_id: normalise(invoice_id),
        }
    }

    /// A filter with no constraints.
    pub fn none() -> Self {
        Self::default()
    }

    /// Constrain the counterparty field.
    ///
    /// On a sent query this matches the invoice's counterparty; on a
    /// received query it matches the issuer, because from the receiver's
    /// perspective the counterparty is the sender.
    pub fn with_counter_party(mut self, value: impl Into<String>) -> Self {
        self.counter_party = normalise(Some(value.into()));
        self
    }

    /// Constrain the issue-date token.
    pub fn with_date_issued(mut self, value: impl Into<String>) -> Self {
        self.date_issued = normalise(Some(value.into()));
        self
    }

    /// Constrain the invoice identifier.
    pub fn with_invoice_id(mut self, value: impl Into<String>) -> Self {
        self.invoice_id = normalise(Some(value.into()));
        self
    }

    /// Counterparty constraint, if present.
    pub fn counter_party(&self) -> Option<&str> {
        self.counter_party.as_deref()
    }

    /// Issue-date constraint, if present.
    pub fn date_issued(&self) -> Option<&str> {
        self.date_issued.as_deref()
    }

    /// Invoice-identifier constraint, if present.
    pub fn invoice_id(&self) -> Option<&str> {
        self.invoice_id.as_deref()
    }
}

fn normalise(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", InvoiceIdError::Empty)]
    #[case(" inv1", InvoiceIdError::Untrimmed)]
    #[case("inv1\n", InvoiceIdError::Untrimmed)]
    fn rejects_invalid_invoice_ids(#[case] raw: &str, #[case] expected: InvoiceIdError) {
        assert_eq!(InvoiceId::new(raw), Err(expected));
    }

    #[rstest]
    fn empty_filter_values_mean_no_constraint() {
        let filter = InvoiceFilter::new(Some(String::new()), Some(String::new()), None);
        assert_eq!(filter, InvoiceFilter::none());
        assert!(filter.counter_party().is_none());
        assert!(filter.date_issued().is_none());
        assert!(filter.invoice_id().is_none());
    }

    #[rstest]
    fn builder_sets_constraints() {
        let filter = InvoiceFilter::none()
            .with_counter_party("compB")
            .with_date_issued("2025-08-21T00:00:00Z")
            .with_invoice_id("inv1");
        assert_eq!(filter.counter_party(), Some("compB"));
        assert_eq!(filter.date_issued(), Some("2025-08-21T00:00:00Z"));
        assert_eq!(filter.invoice_id(), Some("inv1"));
    }

    #[rstest]
    fn invoice_serialises_camel_case() {
        let invoice = Invoice::new(
            InvoiceId::new("inv1").expect("valid id"),
            CompanyId::new("compA").expect("valid id"),
            CompanyId::new("compB").expect("valid id"),
            "2025-08-21T00:00:00Z",
            InvoiceAmounts {
                net: Decimal::from(100),
                vat: Decimal::from(20),
                total: Decimal::from(120),
            },
            "Service",
        );
        let value = serde_json::to_value(&invoice).expect("serialise invoice");
        assert_eq!(value["invoiceId"], "inv1");
        assert_eq!(value["companyId"], "compA");
        assert_eq!(value["counterPartyCompanyId"], "compB");
        assert_eq!(value["dateIssued"], "2025-08-21T00:00:00Z");

        let parsed: Invoice = serde_json::from_value(value).expect("deserialise invoice");
        assert_eq!(parsed, invoice);
    }
}
