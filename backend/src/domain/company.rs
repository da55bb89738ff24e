//! Company data model.
//!
//! Companies participate in invoices as issuer or counterparty. They are
//! registered once (during seeding) and never mutated or deleted.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use utoipa::ToSchema;

/// Validation errors returned by [`CompanyId::new`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum CompanyIdError {
    /// The identifier was empty.
    #[error("company id must not be empty")]
    Empty,
    /// The identifier carried surrounding whitespace.
    #[error("company id must not contain surrounding whitespace")]
    Untrimmed,
}

/// Unique company identifier.
///
/// The identifier is an opaque non-empty string; the store never checks
/// that an invoice's company fields refer to a registered company.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct CompanyId(String);

impl CompanyId {
    /// Validate and construct a [`CompanyId`].
    ///
    /// # Examples
    /// ```
    /// use backend::domain::CompanyId;
    ///
    /// let id = CompanyId::new("compA").expect("valid id");
    /// assert_eq!(id.as_ref(), "compA");
    /// assert!(CompanyId::new("").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, CompanyIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CompanyIdError::Empty);
        }
        if id.trim() != id {
            return Err(CompanyIdError::Untrimmed);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for CompanyId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CompanyId> for String {
    fn from(value: CompanyId) -> Self {
        value.0
    }
}

impl TryFrom<String> for CompanyId {
    type Error = CompanyIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A registered company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[schema(example = "compA")]
    id: CompanyId,
    /// Display name shown to clients.
    #[schema(example = "Company A")]
    name: String,
    /// Identifiers of users associated with the company; order is
    /// irrelevant.
    users: Vec<String>,
}

impl Company {
    /// Construct a company record.
    pub fn new(id: CompanyId, name: impl Into<String>, users: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            users,
        }
    }

    /// Unique company identifier.
    pub fn id(&self) -> &CompanyId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Associated user identifiers.
    pub fn users(&self) -> &[String] {
        &self.users
    }
}
