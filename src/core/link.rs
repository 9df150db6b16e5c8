//! Hypermedia link model

use crate::core::error::LinkError;
use crate::core::verbosity::{LinkOption, Verbosity};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered attribute mapping produced by projecting a link
pub type Attributes = IndexMap<String, Value>;

/// Anything that can be projected into link attributes
///
/// Implementations must be deterministic and free of side effects. A
/// non-empty projection meant for map storage must carry a `rel` entry.
pub trait ToAttributes {
    fn to_attributes(&self, verbosity: Verbosity) -> Attributes;
}

impl<L: ToAttributes + ?Sized> ToAttributes for &L {
    fn to_attributes(&self, verbosity: Verbosity) -> Attributes {
        (**self).to_attributes(verbosity)
    }
}

impl<L: ToAttributes + ?Sized> ToAttributes for Box<L> {
    fn to_attributes(&self, verbosity: Verbosity) -> Attributes {
        (**self).to_attributes(verbosity)
    }
}

impl<L: ToAttributes + ?Sized> ToAttributes for std::sync::Arc<L> {
    fn to_attributes(&self, verbosity: Verbosity) -> Attributes {
        (**self).to_attributes(verbosity)
    }
}

/// Where a link points and how to follow it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkTarget {
    /// Target URI
    pub href: String,

    /// HTTP method used to follow the link
    #[serde(default = "default_method")]
    pub method: String,

    /// Media types accepted by the target
    #[serde(default)]
    pub consumes: Vec<String>,

    /// Media types returned by the target
    #[serde(default)]
    pub produces: Vec<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl LinkTarget {
    /// A GET target with no declared media types
    pub fn get(href: impl Into<String>) -> Self {
        Self::new(href, default_method())
    }

    pub fn new(href: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            method: method.into(),
            consumes: Vec::new(),
            produces: Vec::new(),
        }
    }
}

/// A single hypermedia link
///
/// Immutable once built. Use [`HateoasLink::new`] for the common case and the
/// `with_*` methods to add detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHateoasLink")]
pub struct HateoasLink {
    rel: String,
    target: LinkTarget,
    id: Option<String>,
    label: Option<String>,
    description: Option<String>,
    #[serde(default)]
    extra: IndexMap<String, Value>,
}

/// Wire form of a [`HateoasLink`], validated through [`HateoasLink::new`]
#[derive(Deserialize)]
struct RawHateoasLink {
    rel: String,
    target: LinkTarget,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    extra: IndexMap<String, Value>,
}

impl TryFrom<RawHateoasLink> for HateoasLink {
    type Error = LinkError;

    fn try_from(raw: RawHateoasLink) -> Result<Self, Self::Error> {
        let mut link = HateoasLink::new(raw.rel, raw.target)?;
        link.id = raw.id;
        link.label = raw.label;
        link.description = raw.description;
        link.extra = raw.extra;
        Ok(link)
    }
}

impl HateoasLink {
    /// Create a link, rejecting an empty relation
    pub fn new(rel: impl Into<String>, target: LinkTarget) -> Result<Self, LinkError> {
        let rel = rel.into();
        if rel.trim().is_empty() {
            return Err(LinkError::EmptyRelation { href: target.href });
        }
        Ok(Self {
            rel,
            target,
            id: None,
            label: None,
            description: None,
            extra: IndexMap::new(),
        })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn consumes(mut self, media_type: impl Into<String>) -> Self {
        self.target.consumes.push(media_type.into());
        self
    }

    pub fn produces(mut self, media_type: impl Into<String>) -> Self {
        self.target.produces.push(media_type.into());
        self
    }

    /// Attach a free-form attribute, exposed only at [`Verbosity::Full`]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    pub fn target(&self) -> &LinkTarget {
        &self.target
    }

    pub fn href(&self) -> &str {
        &self.target.href
    }

    pub fn method(&self) -> &str {
        &self.target.method
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn extra(&self) -> &IndexMap<String, Value> {
        &self.extra
    }
}

impl ToAttributes for HateoasLink {
    fn to_attributes(&self, verbosity: Verbosity) -> Attributes {
        let mut attrs = Attributes::new();

        for option in verbosity.options() {
            match option {
                LinkOption::Id => insert_opt(&mut attrs, option, self.id.as_deref()),
                LinkOption::Rel => {
                    attrs.insert(option.key().to_string(), Value::from(self.rel.as_str()));
                }
                LinkOption::Href => {
                    attrs.insert(option.key().to_string(), Value::from(self.href()));
                }
                LinkOption::Method => {
                    attrs.insert(option.key().to_string(), Value::from(self.method()));
                }
                LinkOption::Consumes => insert_list(&mut attrs, option, &self.target.consumes),
                LinkOption::Produces => insert_list(&mut attrs, option, &self.target.produces),
                LinkOption::Label => insert_opt(&mut attrs, option, self.label.as_deref()),
                LinkOption::Description => {
                    insert_opt(&mut attrs, option, self.description.as_deref())
                }
                LinkOption::Extra => {
                    // Extra attributes never shadow the structured ones.
                    for (key, value) in &self.extra {
                        if !attrs.contains_key(key) {
                            attrs.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
        }

        attrs
    }
}

fn insert_opt(attrs: &mut Attributes, option: &LinkOption, value: Option<&str>) {
    if let Some(value) = value {
        attrs.insert(option.key().to_string(), Value::from(value));
    }
}

fn insert_list(attrs: &mut Attributes, option: &LinkOption, values: &[String]) {
    if !values.is_empty() {
        attrs.insert(option.key().to_string(), Value::from(values.to_vec()));
    }
}
