//! Schema declarations
//!
//! A [`Schema`] describes every attribute of a resource, data source or the
//! provider block itself. Besides being reported to the host, it drives
//! configuration validation and plan computation (see [`crate::plan`]).

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::value::is_unknown_json;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;

static NULL: Json = Json::Null;

/// Attribute type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeKind {
    String,
    Int64,
    Bool,
    List { element: Box<AttributeKind> },
    ListNested { nested: Schema },
    SingleNested { nested: Schema },
}

impl AttributeKind {
    fn nested(&self) -> Option<&Schema> {
        match self {
            AttributeKind::ListNested { nested } | AttributeKind::SingleNested { nested } => {
                Some(nested)
            }
            _ => None,
        }
    }

    fn accepts(&self, value: &Json) -> bool {
        if value.is_null() || is_unknown_json(value) {
            return true;
        }
        match self {
            AttributeKind::String => value.is_string(),
            AttributeKind::Int64 => value.is_i64(),
            AttributeKind::Bool => value.is_boolean(),
            AttributeKind::List { element } => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| element.accepts(item))),
            AttributeKind::ListNested { .. } => value.is_array(),
            AttributeKind::SingleNested { .. } => value.is_object(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AttributeKind::String => "string",
            AttributeKind::Int64 => "number",
            AttributeKind::Bool => "bool",
            AttributeKind::List { .. } => "list",
            AttributeKind::ListNested { .. } => "list of objects",
            AttributeKind::SingleNested { .. } => "object",
        }
    }
}

/// Config-time validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Validator {
    /// The string value must be one of `values`
    OneOf { values: Vec<String> },
}

impl Validator {
    fn check(&self, value: &Json) -> Option<String> {
        match (self, value) {
            (Validator::OneOf { values }, Json::String(s)) if !is_unknown_json(value) => {
                if values.iter().any(|v| v == s) {
                    None
                } else {
                    Some(format!(
                        "Attribute value must be one of: {}, got: {:?}",
                        values
                            .iter()
                            .map(|v| format!("{v:?}"))
                            .collect::<Vec<_>>()
                            .join(", "),
                        s
                    ))
                }
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(flatten)]
    pub kind: AttributeKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Json>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
    #[serde(default)]
    pub use_state_for_unknown: bool,
}

impl Attribute {
    fn of(kind: AttributeKind) -> Self {
        Self {
            kind,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            description: String::new(),
            deprecation_message: None,
            default: None,
            validators: Vec::new(),
            use_state_for_unknown: false,
        }
    }

    pub fn string() -> Self {
        Self::of(AttributeKind::String)
    }

    pub fn int64() -> Self {
        Self::of(AttributeKind::Int64)
    }

    pub fn bool() -> Self {
        Self::of(AttributeKind::Bool)
    }

    pub fn list(element: AttributeKind) -> Self {
        Self::of(AttributeKind::List {
            element: Box::new(element),
        })
    }

    pub fn list_nested(nested: Schema) -> Self {
        Self::of(AttributeKind::ListNested { nested })
    }

    pub fn single_nested(nested: Schema) -> Self {
        Self::of(AttributeKind::SingleNested { nested })
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecation_message = Some(message.into());
        self
    }

    pub fn default_value(mut self, value: Json) -> Self {
        self.default = Some(value);
        self
    }

    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validators.push(Validator::OneOf {
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Keep the prior state value instead of planning unknown
    pub fn use_state_for_unknown(mut self) -> Self {
        self.use_state_for_unknown = true;
        self
    }

    /// Computed and not settable from configuration
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub version: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            version: 0,
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Schema for a nested object
    pub fn nested() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Read-only variant keyed by `key`: the key becomes required and
    /// everything else is computed.
    pub fn as_data_source(&self, key: &str) -> Schema {
        let mut schema = self.read_only();
        if let Some(attr) = schema.attributes.get_mut(key) {
            attr.required = true;
            attr.computed = false;
        }
        schema
    }

    /// Every attribute computed and nothing settable, recursively
    pub fn read_only(&self) -> Schema {
        let attributes = self
            .attributes
            .iter()
            .map(|(name, attr)| {
                let kind = match &attr.kind {
                    AttributeKind::ListNested { nested } => AttributeKind::ListNested {
                        nested: nested.read_only(),
                    },
                    AttributeKind::SingleNested { nested } => AttributeKind::SingleNested {
                        nested: nested.read_only(),
                    },
                    other => other.clone(),
                };
                let read_only = Attribute {
                    sensitive: attr.sensitive,
                    description: attr.description.clone(),
                    ..Attribute::of(kind)
                }
                .computed();
                (name.clone(), read_only)
            })
            .collect();
        Schema {
            version: self.version,
            description: self.description.clone(),
            attributes,
        }
    }

    /// Checks a configuration object against the schema
    pub fn validate_config(&self, config: &Json) -> Diagnostics {
        let mut diags = Diagnostics::new();
        self.validate_object(config, "", &mut diags);
        diags
    }

    fn validate_object(&self, config: &Json, prefix: &str, diags: &mut Diagnostics) {
        if is_unknown_json(config) {
            return;
        }
        let empty = serde_json::Map::new();
        let map = match config {
            Json::Object(map) => map,
            Json::Null => &empty,
            _ => {
                diags.push(
                    Diagnostic::error("Invalid Configuration", "expected an object")
                        .at(prefix.trim_end_matches('.')),
                );
                return;
            }
        };

        for key in map.keys() {
            if !self.attributes.contains_key(key) {
                diags.push(
                    Diagnostic::error(
                        "Unsupported Argument",
                        format!("An argument named {key:?} is not expected here."),
                    )
                    .at(format!("{prefix}{key}")),
                );
            }
        }

        for (name, attr) in &self.attributes {
            let path = format!("{prefix}{name}");
            let value = map.get(name).unwrap_or(&NULL);

            if value.is_null() {
                if attr.required {
                    diags.push(
                        Diagnostic::error(
                            "Missing Required Argument",
                            format!("The argument {name:?} is required, but no definition was found."),
                        )
                        .at(&path),
                    );
                }
                continue;
            }

            if attr.is_read_only() {
                diags.push(
                    Diagnostic::error(
                        "Invalid Configuration for Read-Only Attribute",
                        format!("Cannot set value for attribute {name:?}; it is computed by the service."),
                    )
                    .at(&path),
                );
                continue;
            }

            if !attr.kind.accepts(value) {
                diags.push(
                    Diagnostic::error(
                        "Incorrect Attribute Value Type",
                        format!("Attribute {name:?} expects a {}.", attr.kind.label()),
                    )
                    .at(&path),
                );
                continue;
            }

            if let Some(message) = &attr.deprecation_message {
                diags.push(Diagnostic::warning("Attribute Deprecated", message.clone()).at(&path));
            }

            for validator in &attr.validators {
                if let Some(detail) = validator.check(value) {
                    diags.push(Diagnostic::error("Invalid Attribute Value", detail).at(&path));
                }
            }

            match (&attr.kind, value) {
                (AttributeKind::SingleNested { nested }, _) => {
                    nested.validate_object(value, &format!("{path}."), diags);
                }
                (AttributeKind::ListNested { nested }, Json::Array(items)) => {
                    for (i, item) in items.iter().enumerate() {
                        nested.validate_object(item, &format!("{path}[{i}]."), diags);
                    }
                }
                (AttributeKind::List { .. }, Json::Array(items)) => {
                    for (i, item) in items.iter().enumerate() {
                        for validator in &attr.validators {
                            if let Some(detail) = validator.check(item) {
                                diags.push(
                                    Diagnostic::error("Invalid Attribute Value", detail)
                                        .at(format!("{path}[{i}]")),
                                );
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    pub(crate) fn nested_of(&self, name: &str) -> Option<&Schema> {
        self.attributes.get(name).and_then(|a| a.kind.nested())
    }
}

/// Everything the provider reports from `get_schema`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSchema {
    pub provider: Schema,
    pub resources: BTreeMap<String, Schema>,
    pub data_sources: BTreeMap<String, Schema>,
}
