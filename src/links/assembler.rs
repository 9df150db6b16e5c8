//! Turns produced links into the payload attached to an augmented entity

use crate::core::error::AugmentError;
use crate::core::link::{Attributes, ToAttributes};
use crate::core::verbosity::Verbosity;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// How links are stored on an augmented entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// An ordered list of attribute mappings
    #[default]
    List,
    /// A mapping keyed by relation, `rel` removed from each value
    Map,
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageMode::List => f.write_str("list"),
            StorageMode::Map => f.write_str("map"),
        }
    }
}

/// The links attachment of an augmented entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LinksPayload {
    List(Vec<Attributes>),
    Map(IndexMap<String, Attributes>),
}

impl LinksPayload {
    pub fn mode(&self) -> StorageMode {
        match self {
            LinksPayload::List(_) => StorageMode::List,
            LinksPayload::Map(_) => StorageMode::Map,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LinksPayload::List(list) => list.len(),
            LinksPayload::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_list(&self) -> Option<&[Attributes]> {
        match self {
            LinksPayload::List(list) => Some(list),
            LinksPayload::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Attributes>> {
        match self {
            LinksPayload::Map(map) => Some(map),
            LinksPayload::List(_) => None,
        }
    }
}

/// Builds a [`LinksPayload`] from a sequence of links
pub struct LinkAssembler;

impl LinkAssembler {
    /// Assemble `links` for the given verbosity and storage mode.
    ///
    /// In map mode a link with an empty projection is skipped, a non-empty
    /// projection without `rel` aborts the whole assembly, and a repeated
    /// relation replaces the earlier entry.
    pub fn assemble<L: ToAttributes>(
        links: &[L],
        verbosity: Verbosity,
        mode: StorageMode,
    ) -> Result<LinksPayload, AugmentError> {
        match mode {
            StorageMode::List => Ok(LinksPayload::List(Self::assemble_list(links, verbosity))),
            StorageMode::Map => Self::assemble_map(links, verbosity).map(LinksPayload::Map),
        }
    }

    pub fn assemble_list<L: ToAttributes>(links: &[L], verbosity: Verbosity) -> Vec<Attributes> {
        links
            .iter()
            .map(|link| link.to_attributes(verbosity))
            .collect()
    }

    pub fn assemble_map<L: ToAttributes>(
        links: &[L],
        verbosity: Verbosity,
    ) -> Result<IndexMap<String, Attributes>, AugmentError> {
        let mut map = IndexMap::with_capacity(links.len());

        for link in links {
            let mut attributes = link.to_attributes(verbosity);
            if attributes.is_empty() {
                continue;
            }

            let Some(rel) = attributes.shift_remove("rel") else {
                return Err(AugmentError::MissingRelation { attributes });
            };

            let rel = match rel {
                Value::String(s) => s,
                other => other.to_string(),
            };

            if map.insert(rel.clone(), attributes).is_some() {
                tracing::trace!(rel = %rel, "relation repeated, keeping the later link");
            }
        }

        Ok(map)
    }
}
