//! Invoice API handlers.
//!
//! ```text
//! POST /api/v1/invoices            {"invoiceId":"inv9","companyId":"compA",...}
//! GET  /api/v1/invoices/sent?counter_party_company=compB&date_issued=...&invoice_id=...
//! GET  /api/v1/invoices/received
//! ```
//!
//! All three endpoints require a resolved company identity. Query results
//! are scoped to that identity: `sent` covers invoices it issued,
//! `received` covers invoices addressed to it.

use actix_web::{get, http::header, post, web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    ApiResult, CompanyId, Error, Invoice, InvoiceAmounts, InvoiceFilter, InvoiceId,
};

use super::auth::AuthenticatedCompany;
use super::state::HttpState;

/// Create request body for `POST /api/v1/invoices`.
///
/// Identifier fields arrive as raw strings and are validated in the
/// [`TryFrom`] conversion so rejections share the common error schema with
/// field-level details.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    /// Globally unique invoice identifier.
    #[schema(example = "inv9")]
    pub invoice_id: String,
    /// Opaque issue-date token.
    #[serde(default)]
    #[schema(example = "2025-08-21T00:00:00Z")]
    pub date_issued: String,
    /// Net amount before tax.
    #[schema(value_type = String, example = "100")]
    pub net_amount: Decimal,
    /// Value-added tax amount.
    #[schema(value_type = String, example = "20")]
    pub vat_amount: Decimal,
    /// Total amount including tax.
    #[schema(value_type = String, example = "120")]
    pub total_amount: Decimal,
    /// Free-text description.
    #[serde(default)]
    #[schema(example = "Service")]
    pub description: String,
    /// Issuing company; must match the authenticated identity.
    #[schema(example = "compA")]
    pub company_id: String,
    /// Counterparty company.
    #[schema(example = "compB")]
    pub counter_party_company_id: String,
}

impl TryFrom<CreateInvoiceRequest> for Invoice {
    type Error = Error;

    fn try_from(value: CreateInvoiceRequest) -> Result<Self, Self::Error> {
        let invoice_id =
            InvoiceId::new(value.invoice_id).map_err(|err| field_error("invoiceId", &err))?;
        let company_id =
            CompanyId::new(value.company_id).map_err(|err| field_error("companyId", &err))?;
        let counter_party = CompanyId::new(value.counter_party_company_id)
            .map_err(|err| field_error("counterPartyCompanyId", &err))?;
        Ok(Self::new(
            invoice_id,
            company_id,
            counter_party,
            value.date_issued,
            InvoiceAmounts {
                net: value.net_amount,
                vat: value.vat_amount,
                total: value.total_amount,
            },
            value.description,
        ))
    }
}

fn field_error(field: &'static str, err: &dyn std::fmt::Display) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Optional exact-match filters accepted by the sent/received queries.
///
/// Absent or empty parameters impose no constraint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvoiceQuery {
    /// Counterparty constraint. On `sent` this matches the invoice's
    /// counterparty; on `received` it matches the issuer.
    pub counter_party_company: Option<String>,
    /// Issue-date token constraint, compared for exact equality.
    pub date_issued: Option<String>,
    /// Invoice identifier constraint.
    pub invoice_id: Option<String>,
}

impl From<InvoiceQuery> for InvoiceFilter {
    fn from(value: InvoiceQuery) -> Self {
        Self::new(
            value.counter_party_company,
            value.date_issued,
            value.invoice_id,
        )
    }
}

/// Create a new invoice issued by the authenticated company.
#[utoipa::path(
    post,
    path = "/api/v1/invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice created", body = Invoice,
            headers(("Location" = String, description = "URL of the created invoice"))),
        (status = 400, description = "Invalid invoice data", body = Error),
        (status = 401, description = "Missing or unknown bearer token", body = Error),
        (status = 409, description = "Duplicate invoice identifier", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["invoices"],
    operation_id = "createInvoice"
)]
#[post("/invoices")]
pub async fn create_invoice(
    issuer: AuthenticatedCompany,
    state: web::Data<HttpState>,
    payload: web::Json<CreateInvoiceRequest>,
) -> ApiResult<HttpResponse> {
    let invoice = Invoice::try_from(payload.into_inner())?;
    if invoice.company_id() != issuer.company() {
        return Err(Error::invalid_request(
            "declared company does not match the authenticated company",
        )
        .with_details(json!({ "field": "companyId" })));
    }

    let created = state.invoices.create_invoice(invoice).await?;
    let location = format!("/api/v1/invoices/{}", created.invoice_id());
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(created))
}

/// List invoices issued by the authenticated company, in insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/invoices/sent",
    params(InvoiceQuery),
    responses(
        (status = 200, description = "Matching invoices", body = [Invoice]),
        (status = 401, description = "Missing or unknown bearer token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["invoices"],
    operation_id = "sentInvoices"
)]
#[get("/invoices/sent")]
pub async fn sent_invoices(
    issuer: AuthenticatedCompany,
    state: web::Data<HttpState>,
    query: web::Query<InvoiceQuery>,
) -> ApiResult<web::Json<Vec<Invoice>>> {
    let filter = InvoiceFilter::from(query.into_inner());
    let invoices = state.invoices.sent_invoices(issuer.company(), filter).await?;
    Ok(web::Json(invoices))
}

/// List invoices received by the authenticated company, in insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/invoices/received",
    params(InvoiceQuery),
    responses(
        (status = 200, description = "Matching invoices", body = [Invoice]),
        (status = 401, description = "Missing or unknown bearer token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["invoices"],
    operation_id = "receivedInvoices"
)]
#[get("/invoices/received")]
pub async fn received_invoices(
    recipient: AuthenticatedCompany,
    state: web::Data<HttpState>,
    query: web::Query<InvoiceQuery>,
) -> ApiResult<web::Json<Vec<Invoice>>> {
    let filter = InvoiceFilter::from(query.into_inner());
    let invoices = state
        .invoices
        .received_invoices(recipient.company(), filter)
        .await?;
    Ok(web::Json(invoices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn request(invoice_id: &str, company_id: &str) -> CreateInvoiceRequest {
        CreateInvoiceRequest {
            invoice_id: invoice_id.to_owned(),
            date_issued: "2025-08-21T00:00:00Z".to_owned(),
            net_amount: Decimal::from(100),
            vat_amount: Decimal::from(20),
            total_amount: Decimal::from(120),
            description: "Service".to_owned(),
            company_id: company_id.to_owned(),
            counter_party_company_id: "compB".to_owned(),
        }
    }

    #[rstest]
    fn conversion_accepts_populated_request() {
        let invoice = Invoice::try_from(request("inv9", "compA")).expect("valid request");
        assert_eq!(invoice.invoice_id().as_ref(), "inv9");
        assert_eq!(invoice.company_id().as_ref(), "compA");
        assert_eq!(invoice.counter_party_company_id().as_ref(), "compB");
        assert_eq!(invoice.net_amount(), Decimal::from(100));
    }

    #[rstest]
    #[case("", "compA", "invoiceId")]
    #[case("inv9", "", "companyId")]
    fn conversion_reports_the_offending_field(
        #[case] invoice_id: &str,
        #[case] company_id: &str,
        #[case] expected_field: &str,
    ) {
        let err = Invoice::try_from(request(invoice_id, company_id))
            .expect_err("empty identifier is rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("field details");
        assert_eq!(details["field"], expected_field);
    }

    #[rstest]
    fn query_parameters_become_filters() {
        let query = InvoiceQuery {
            counter_party_company: Some("compB".to_owned()),
            date_issued: Some(String::new()),
            invoice_id: None,
        };
        let filter = InvoiceFilter::from(query);
        assert_eq!(filter.counter_party(), Some("compB"));
        assert!(filter.date_issued().is_none());
        assert!(filter.invoice_id().is_none());
    }
}
