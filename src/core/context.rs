//! Per-request context handed to link producers

use crate::core::verbosity::Verbosity;

/// Default name of the header a client uses to ask for a verbosity level
pub const HATEOAS_OPTIONS_HEADER: &str = "X-HATEOAS-Options";

/// Request data a link producer may need: the base URI of the API and the
/// verbosity the client asked for, if any.
///
/// The resource layer builds one per inbound request and passes it to its
/// producers explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    base_uri: String,
    requested_verbosity: Option<Verbosity>,
}

impl RequestContext {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            requested_verbosity: None,
        }
    }

    /// Build a context from the base URI and the raw options header value.
    ///
    /// An unrecognised header value is ignored so the configured default
    /// applies.
    pub fn from_header(base_uri: impl Into<String>, options_header: Option<&str>) -> Self {
        let base_uri = base_uri.into();
        tracing::debug!(base_uri = %base_uri, options = ?options_header, "building request context");

        let requested_verbosity = options_header.and_then(|raw| match raw.parse::<Verbosity>() {
            Ok(verbosity) => Some(verbosity),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring options header");
                None
            }
        });

        Self {
            base_uri,
            requested_verbosity,
        }
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.requested_verbosity = Some(verbosity);
        self
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn requested_verbosity(&self) -> Option<Verbosity> {
        self.requested_verbosity
    }

    /// The client's requested verbosity, or `default` when it asked for none
    pub fn verbosity_or(&self, default: Verbosity) -> Verbosity {
        self.requested_verbosity.unwrap_or(default)
    }

    /// Join a path onto the base URI with exactly one separating slash
    pub fn resolve(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_uri.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
