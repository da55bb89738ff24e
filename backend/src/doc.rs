//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the invoice endpoints and health probes
//! - **Schemas**: the invoice and error payloads
//! - **Security**: the demo bearer-token scheme
//!
//! The generated specification backs the Swagger UI served at `/docs` in
//! debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Company, Error, ErrorCode, Invoice};
use crate::inbound::http::invoices::CreateInvoiceRequest;

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some(
                        "Demo bearer token resolving to a company identity.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Invoicing backend API",
        description = "HTTP interface for company-scoped invoice records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::invoices::create_invoice,
        crate::inbound::http::invoices::sent_invoices,
        crate::inbound::http::invoices::received_invoices,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Invoice, CreateInvoiceRequest, Company, Error, ErrorCode)),
    tags(
        (name = "invoices", description = "Company-scoped invoice records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;

    const INVOICE_SCHEMA_NAME: &str = "Invoice";
    const ERROR_SCHEMA_NAME: &str = "Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn invoice_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let invoice = schemas.get(INVOICE_SCHEMA_NAME).expect("Invoice schema");

        for field in [
            "invoiceId",
            "dateIssued",
            "netAmount",
            "vatAmount",
            "totalAmount",
            "description",
            "companyId",
            "counterPartyCompanyId",
        ] {
            assert_object_schema_has_field(invoice, field);
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error, "code");
        assert_object_schema_has_field(error, "message");
    }

    #[test]
    fn document_references_all_invoice_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/invoices",
            "/api/v1/invoices/sent",
            "/api/v1/invoices/received",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "document should describe {path}"
            );
        }
    }
}
