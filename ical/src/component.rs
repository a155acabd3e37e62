// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Generic document model of an iCalendar file.
//!
//! A [`Component`] keeps its properties and its child components in two
//! separate maps keyed by name. Names are case-insensitive in RFC 5545 and
//! are stored upper-cased; values are kept verbatim.

use std::collections::BTreeMap;

use crate::keyword::{KW_VCALENDAR, MULTI_VALUED_PROPERTIES};

/// Parameters of a property: parameter name to its list of values.
pub type Parameters = BTreeMap<String, Vec<String>>;

/// One declaration of a property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Property {
    /// Parameters, e.g. `TZID` or `VALUE`.
    pub params: Parameters,

    /// The raw value, everything after the first unquoted colon.
    pub value: String,
}

impl Property {
    /// Create a property without parameters.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            params: Parameters::new(),
            value: value.into(),
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn with_param<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.insert(
            name.to_ascii_uppercase(),
            values.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Values of the named parameter, if present.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&[String]> {
        self.params
            .get(&name.to_ascii_uppercase())
            .map(Vec::as_slice)
    }

    /// The value split on COMMAs that are not escaped with a BACKSLASH.
    ///
    /// Only meaningful for multi-valued properties such as `EXDATE` or
    /// `CATEGORIES`; see [`MULTI_VALUED_PROPERTIES`].
    #[must_use]
    #[expect(clippy::indexing_slicing)]
    pub fn values(&self) -> Vec<&str> {
        let mut values = Vec::new();
        let mut start = 0;
        let mut escaped = false;
        for (i, c) in self.value.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                ',' => {
                    values.push(&self.value[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
        values.push(&self.value[start..]);
        values
    }
}

/// Whether values of the named property are COMMA-separated lists.
#[must_use]
pub fn is_multi_valued(name: &str) -> bool {
    MULTI_VALUED_PROPERTIES
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(name))
}

/// What a name refers to within a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    /// All declarations of a property, in source order.
    Properties(&'a [Property]),

    /// All child components of that name, in source order.
    Components(&'a [Component]),
}

/// A named node of the document, e.g. `VCALENDAR` or `VEVENT`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Component {
    name: String,
    properties: BTreeMap<String, Vec<Property>>,
    children: BTreeMap<String, Vec<Component>>,
}

impl Component {
    /// Create an empty component.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_ascii_uppercase(),
            properties: BTreeMap::new(),
            children: BTreeMap::new(),
        }
    }

    /// The upper-cased component name; empty for a document root.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a property declaration.
    pub fn push_property(&mut self, name: &str, property: Property) {
        self.properties
            .entry(name.to_ascii_uppercase())
            .or_default()
            .push(property);
    }

    /// Append a child component under its own name.
    pub fn push_child(&mut self, child: Component) {
        self.children
            .entry(child.name.clone())
            .or_default()
            .push(child);
    }

    /// Builder form of [`Component::push_property`].
    #[must_use]
    pub fn with_property(mut self, name: &str, property: Property) -> Self {
        self.push_property(name, property);
        self
    }

    /// Builder form of [`Component::push_child`].
    #[must_use]
    pub fn with_child(mut self, child: Component) -> Self {
        self.push_child(child);
        self
    }

    /// All declarations of the named property, empty if absent.
    #[must_use]
    pub fn properties(&self, name: &str) -> &[Property] {
        self.properties
            .get(&name.to_ascii_uppercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The first declaration of the named property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties(name).first()
    }

    /// The value of the first declaration of the named property.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.property(name).map(|p| p.value.as_str())
    }

    /// All child components of the given name, empty if absent.
    #[must_use]
    pub fn children(&self, name: &str) -> &[Component] {
        self.children
            .get(&name.to_ascii_uppercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Look a name up among both child components and properties.
    ///
    /// Component names take precedence should a property share the name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Entry<'_>> {
        let key = name.to_ascii_uppercase();
        if let Some(children) = self.children.get(&key) {
            return Some(Entry::Components(children.as_slice()));
        }
        self.properties
            .get(&key)
            .map(|props| Entry::Properties(props.as_slice()))
    }

    /// Iterate over property names and their declarations, sorted by name.
    pub fn iter_properties(&self) -> impl Iterator<Item = (&str, &[Property])> {
        self.properties
            .iter()
            .map(|(name, props)| (name.as_str(), props.as_slice()))
    }

    /// Iterate over child component names and the children, sorted by name.
    pub fn iter_children(&self) -> impl Iterator<Item = (&str, &[Component])> {
        self.children
            .iter()
            .map(|(name, children)| (name.as_str(), children.as_slice()))
    }

    /// Maximum nesting depth below this component, 0 for a leaf.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children
            .values()
            .flatten()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// A parsed iCalendar file.
///
/// The root component has an empty name; its children are the top-level
/// blocks of the file, normally one `VCALENDAR`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Document {
    root: Component,
}

impl Document {
    /// Wrap a root component.
    #[must_use]
    pub const fn new(root: Component) -> Self {
        Self { root }
    }

    /// The root component.
    #[must_use]
    pub const fn root(&self) -> &Component {
        &self.root
    }

    /// Consume the document, returning its root component.
    #[must_use]
    pub fn into_root(self) -> Component {
        self.root
    }

    /// The top-level `VCALENDAR` blocks.
    #[must_use]
    pub fn calendars(&self) -> &[Component] {
        self.root.children(KW_VCALENDAR)
    }
}
