//! Doclink Reporting — locale-aware error message rendering.
//!
//! An `ErrorReporter` is built explicitly and handed to whoever needs it;
//! there is no process-wide reporter to forget to initialise.

pub mod catalog;
pub mod error;
pub mod locale;
pub mod reporter;

pub use catalog::MessageCatalog;
pub use error::ReportingError;
pub use locale::Locale;
pub use reporter::{
    ContextUrlProvider, DocsUrlProvider, ErrorReporter, MessageArg, ReportableError,
};
