//! Verbosity levels controlling how much of a link is exposed

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One projectable piece of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkOption {
    Id,
    Rel,
    Href,
    Method,
    Consumes,
    Produces,
    Label,
    Description,
    /// The link's free-form extra attributes, flattened into the projection
    Extra,
}

impl LinkOption {
    /// Attribute key used in the projected mapping
    pub fn key(&self) -> &'static str {
        match self {
            LinkOption::Id => "id",
            LinkOption::Rel => "rel",
            LinkOption::Href => "href",
            LinkOption::Method => "method",
            LinkOption::Consumes => "consumes",
            LinkOption::Produces => "produces",
            LinkOption::Label => "label",
            LinkOption::Description => "description",
            LinkOption::Extra => "extra",
        }
    }
}

/// How much detail a link exposes when serialized
///
/// The set is closed: both the link model and the assembler understand
/// exactly these four levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verbosity {
    /// rel, href, method
    #[default]
    Minimum,
    /// Minimum plus consumes and produces
    Basic,
    /// Basic plus label and description
    Generic,
    /// Everything, including id and extra attributes
    Full,
}

const MINIMUM: &[LinkOption] = &[LinkOption::Rel, LinkOption::Href, LinkOption::Method];

const BASIC: &[LinkOption] = &[
    LinkOption::Rel,
    LinkOption::Href,
    LinkOption::Method,
    LinkOption::Consumes,
    LinkOption::Produces,
];

const GENERIC: &[LinkOption] = &[
    LinkOption::Rel,
    LinkOption::Href,
    LinkOption::Method,
    LinkOption::Consumes,
    LinkOption::Produces,
    LinkOption::Label,
    LinkOption::Description,
];

const FULL: &[LinkOption] = &[
    LinkOption::Id,
    LinkOption::Rel,
    LinkOption::Href,
    LinkOption::Method,
    LinkOption::Consumes,
    LinkOption::Produces,
    LinkOption::Label,
    LinkOption::Description,
    LinkOption::Extra,
];

impl Verbosity {
    /// All levels, from least to most detailed
    pub const ALL: [Verbosity; 4] = [
        Verbosity::Minimum,
        Verbosity::Basic,
        Verbosity::Generic,
        Verbosity::Full,
    ];

    /// Options included at this level, in projection order
    pub fn options(&self) -> &'static [LinkOption] {
        match self {
            Verbosity::Minimum => MINIMUM,
            Verbosity::Basic => BASIC,
            Verbosity::Generic => GENERIC,
            Verbosity::Full => FULL,
        }
    }

    pub fn includes(&self, option: LinkOption) -> bool {
        self.options().contains(&option)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Minimum => "MINIMUM",
            Verbosity::Basic => "BASIC",
            Verbosity::Generic => "GENERIC",
            Verbosity::Full => "FULL",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known verbosity level
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown verbosity '{0}' (expected MINIMUM, BASIC, GENERIC or FULL)")]
pub struct UnknownVerbosity(pub String);

impl FromStr for Verbosity {
    type Err = UnknownVerbosity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Verbosity::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVerbosity(trimmed.to_string()))
    }
}
