//! Authoritative lookup backed by a fixed `code -> URI` mapping.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use doclink_core::code::{ErrorCode, InvocationContext};
use doclink_core::error::ServiceError;
use doclink_core::location::ErrorDescriptionLocation;
use doclink_core::repository::DescriptionLookup;

/// Answers lookups from a table of known codes.
#[derive(Debug, Clone, Default)]
pub struct MappedDescriptionLookup {
    entries: HashMap<ErrorCode, Url>,
}

impl MappedDescriptionLookup {
    /// Builds a lookup from `(code, uri)` pairs.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (ErrorCode, Url)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parses a JSON object mapping codes to URIs, e.g.
    /// `{ "1jwqa": "https://docs.example.com/errors/1jwqa" }`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Configuration` if the document is not such an
    /// object, a code is blank, or a URI does not parse.
    pub fn from_json_str(json: &str) -> Result<Self, ServiceError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json).map_err(|e| {
            ServiceError::Configuration(format!("invalid error code mapping: {e}"))
        })?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (code, uri) in raw {
            let code = ErrorCode::parse(&code)
                .map_err(|e| ServiceError::Configuration(e.to_string()))?;
            let uri = Url::parse(&uri).map_err(|e| {
                ServiceError::Configuration(format!("invalid URI for error code {code}: {e}"))
            })?;
            entries.insert(code, uri);
        }
        Ok(Self { entries })
    }

    /// Number of known codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no codes are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl DescriptionLookup for MappedDescriptionLookup {
    async fn lookup(
        &self,
        code: &ErrorCode,
        context: &InvocationContext,
    ) -> Result<Option<ErrorDescriptionLocation>, ServiceError> {
        let found = self
            .entries
            .get(code)
            .map(|uri| ErrorDescriptionLocation::external(uri.clone(), code.clone()));
        debug!(
            error_code = %code,
            correlation_id = %context.correlation_id,
            found = found.is_some(),
            "mapped lookup"
        );
        Ok(found)
    }
}
