//! Error reporter.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::error;

use crate::catalog::MessageCatalog;
use crate::locale::Locale;

/// A value substituted into a message template.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageArg {
    /// Inserted verbatim.
    Text(String),
    /// Inserted in decimal.
    Number(i64),
    /// Inserted in long form, e.g. `January 15, 2026`.
    Date(NaiveDate),
}

impl From<&str> for MessageArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for MessageArg {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<NaiveDate> for MessageArg {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl MessageArg {
    fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
            Self::Date(date) => date.format("%B %-d, %Y").to_string(),
        }
    }
}

/// An error that can be rendered through an `ErrorReporter`.
pub trait ReportableError {
    /// Groups related codes, e.g. `database`.
    fn namespace(&self) -> &str;

    /// The code within the namespace.
    fn code(&self) -> &str;

    /// Positional template parameters.
    fn parameters(&self) -> Vec<MessageArg> {
        Vec::new()
    }
}

/// Supplies the documentation URL shown alongside a rendered message.
pub trait ContextUrlProvider: Send + Sync {
    /// The URL for readers in `locale`.
    fn url_for(&self, locale: &Locale) -> String;
}

/// Appends the locale tag to a fixed base URL.
#[derive(Debug, Clone)]
pub struct DocsUrlProvider {
    base: String,
}

impl DocsUrlProvider {
    /// Creates a provider rooted at `base`.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl ContextUrlProvider for DocsUrlProvider {
    fn url_for(&self, locale: &Locale) -> String {
        format!("{}/{locale}", self.base.trim_end_matches('/'))
    }
}

/// Renders errors in a configured locale.
#[derive(Clone)]
pub struct ErrorReporter {
    locale: Locale,
    url_provider: Arc<dyn ContextUrlProvider>,
    catalog: MessageCatalog,
}

impl ErrorReporter {
    /// Creates a reporter for `locale`.
    #[must_use]
    pub fn new(
        locale: Locale,
        url_provider: Arc<dyn ContextUrlProvider>,
        catalog: MessageCatalog,
    ) -> Self {
        Self {
            locale,
            url_provider,
            catalog,
        }
    }

    /// The reporter's default locale.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Renders `err` in the reporter's locale.
    #[must_use]
    pub fn render(&self, err: &dyn ReportableError) -> String {
        self.render_in(err, &self.locale)
    }

    /// Renders `err` in `locale`.
    #[must_use]
    pub fn render_in(&self, err: &dyn ReportableError, locale: &Locale) -> String {
        let key = format!("{}-{}", err.namespace(), err.code());
        let message = match self.catalog.template(&key, locale) {
            Some(template) => fill(template, &err.parameters()),
            None => format!("Unrecognised error {key}"),
        };
        format!(
            "{message} [Code: {key}, URL: {}]",
            self.url_provider.url_for(locale)
        )
    }

    /// Logs `err` at error level in the reporter's locale.
    pub fn report(&self, err: &dyn ReportableError) {
        let line = self.render(err);
        error!(
            namespace = err.namespace(),
            code = err.code(),
            "{line}"
        );
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

/// Replaces `{n}` placeholders with the matching argument. Placeholders with
/// no matching argument are kept as written.
fn fill(template: &str, args: &[MessageArg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg.render(), close))
        });
        match substituted {
            Some((value, close)) => {
                out.push_str(&value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
