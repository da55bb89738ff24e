//! Bearer-token access resolution for HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by
//! concentrating credential checks and company identity derivation here.
//! Resolution is a pure lookup: a bearer token either maps to a company
//! identifier or the request has no identity. The demo token is a
//! placeholder credential wired in from configuration, never a real
//! authentication scheme.

use std::collections::HashMap;
use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};

use crate::domain::{CompanyId, Error};

use super::state::HttpState;

/// Mapping from bearer-token values to company identities.
#[derive(Debug, Default, Clone)]
pub struct TokenMap(HashMap<String, CompanyId>);

impl TokenMap {
    /// An empty map; every request resolves to "no identity".
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a token value with a company identity.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::CompanyId;
    /// use backend::inbound::http::auth::TokenMap;
    ///
    /// let company = CompanyId::new("compA").expect("valid id");
    /// let tokens = TokenMap::new().with_token("demo-token-compA", company.clone());
    /// assert_eq!(tokens.resolve(Some("Bearer demo-token-compA")), Some(company));
    /// assert_eq!(tokens.resolve(Some("Bearer other")), None);
    /// assert_eq!(tokens.resolve(None), None);
    /// ```
    pub fn with_token(mut self, token: impl Into<String>, company: CompanyId) -> Self {
        self.0.insert(token.into(), company);
        self
    }

    /// Resolve an `Authorization` header value to a company identity.
    ///
    /// Returns `None` when the header is absent, is not a bearer
    /// credential, or carries an unknown token.
    pub fn resolve(&self, authorization: Option<&str>) -> Option<CompanyId> {
        let token = authorization?.strip_prefix("Bearer ")?;
        self.0.get(token).cloned()
    }
}

/// Extractor yielding the company identity resolved from the request's
/// bearer token.
///
/// Rejects the request with `401 Unauthorized` before the handler runs
/// when no identity resolves, so handlers only ever see authenticated
/// callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedCompany(CompanyId);

impl AuthenticatedCompany {
    /// The resolved company identity.
    pub fn company(&self) -> &CompanyId {
        &self.0
    }

    /// Consume the extractor, yielding the identity.
    pub fn into_company(self) -> CompanyId {
        self.0
    }
}

impl FromRequest for AuthenticatedCompany {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let resolved = match req.app_data::<web::Data<HttpState>>() {
            Some(state) => {
                let authorization = req
                    .headers()
                    .get(header::AUTHORIZATION)
                    .and_then(|value| value.to_str().ok());
                state
                    .tokens
                    .resolve(authorization)
                    .map(AuthenticatedCompany)
                    .ok_or_else(|| Error::unauthorized("missing or unknown bearer token"))
            }
            None => Err(Error::internal("HTTP state is not configured")),
        };
        ready(resolved)
    }
}
