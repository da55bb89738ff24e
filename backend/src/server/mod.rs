//! Server construction and route wiring.

mod config;

pub use config::ServerSettings;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{CompanyId, InMemoryInvoiceStore};
use crate::inbound::http::auth::TokenMap;
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::invoices::{create_invoice, received_invoices, sent_invoices};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;

/// Register the REST endpoints and shared state on an application.
///
/// Shared by the production server factory and test harnesses so both run
/// through identical wiring.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{web, App};
/// use backend::domain::InMemoryInvoiceStore;
/// use backend::inbound::http::auth::TokenMap;
/// use backend::inbound::http::health::HealthState;
/// use backend::inbound::http::state::HttpState;
/// use backend::server::configure;
///
/// let state = HttpState::new(
///     Arc::new(InMemoryInvoiceStore::default()),
///     Arc::new(TokenMap::new()),
/// );
/// let health = web::Data::new(HealthState::new());
/// let app = App::new().configure(|cfg| configure(cfg, state, health));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, state: HttpState, health: web::Data<HealthState>) {
    let api = web::scope("/api/v1")
        .service(create_invoice)
        .service(sent_invoices)
        .service(received_invoices);

    cfg.app_data(web::Data::new(state))
        .app_data(health)
        .service(api)
        .service(ready)
        .service(live);
}

/// Build the application state from settings: a freshly seeded store and
/// the demo token table.
///
/// # Errors
/// Returns [`std::io::Error`] when seeding fails or the configured demo
/// company id is invalid.
pub fn build_state(settings: &ServerSettings) -> std::io::Result<HttpState> {
    let store = Arc::new(InMemoryInvoiceStore::default());
    if settings.seed {
        store
            .seed()
            .map_err(|err| std::io::Error::other(format!("seeding failed: {err}")))?;
    }

    let demo_company = CompanyId::new(settings.demo_company())
        .map_err(|err| std::io::Error::other(format!("invalid demo company id: {err}")))?;
    let tokens = TokenMap::new().with_token(settings.demo_token(), demo_company);

    Ok(HttpState::new(store, Arc::new(tokens)))
}

/// Bind and run the HTTP server until shutdown.
///
/// # Errors
/// Returns [`std::io::Error`] when state construction or binding fails.
pub async fn run(settings: ServerSettings) -> std::io::Result<()> {
    let state = build_state(&settings)?;
    let health = web::Data::new(HealthState::new());

    let server_health = health.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .wrap(Trace)
            .configure(|cfg| configure(cfg, state.clone(), server_health.clone()));

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(settings.bind_addr())?;

    health.mark_ready();
    server.run().await
}
