//! Description locations.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::code::ErrorCode;

/// Pointer to human-readable material describing an error code.
///
/// Absence of a location is expressed as `Option::None` by every API that
/// returns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorDescriptionLocation {
    /// An externally hosted document.
    External {
        /// Where the document lives.
        uri: Url,
        /// The code the document describes.
        code: ErrorCode,
    },
}

impl ErrorDescriptionLocation {
    /// Creates an external location.
    #[must_use]
    pub fn external(uri: Url, code: ErrorCode) -> Self {
        Self::External { uri, code }
    }

    /// Returns the URI of the described document.
    #[must_use]
    pub fn uri(&self) -> &Url {
        match self {
            Self::External { uri, .. } => uri,
        }
    }

    /// Returns the code this location describes.
    #[must_use]
    pub fn code(&self) -> &ErrorCode {
        match self {
            Self::External { code, .. } => code,
        }
    }
}
