//! Locale catalog: per-language message tables built once at startup.
//!
//! Message files are JSON objects. Each value is one of:
//! - a string template: `"hello": "Hello"`
//! - a message object, recognized by any reserved key (`id`, `description`,
//!   `hash`, delimiters, plural categories) holding a string. Its `other`
//!   entry is the template:
//!   `"hello": {"description": "greeting", "other": "Hello"}`
//! - a nested object whose keys are joined with `.`:
//!   `"app": {"ui": {"search": "Search"}}` defines `app.ui.search`
//!
//! Empty templates, and message objects without an `other` template, are not
//! stored: looking them up is a miss.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{I18nError, I18nResult, LoadError};
use crate::resources::ResourceProvider;
use crate::tag::LocaleIdentifier;

/// File extension of message files.
pub const MESSAGE_FILE_EXTENSION: &str = "json";

/// Keys that mark an object as a single message rather than a namespace.
const MESSAGE_OBJECT_KEYS: &[&str] = &[
    "id",
    "description",
    "hash",
    "leftdelim",
    "rightdelim",
    "zero",
    "one",
    "two",
    "few",
    "many",
    "other",
];

/// Message key -> template for one language. Immutable once loaded.
///
/// Never holds an empty template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    messages: BTreeMap<String, String>,
}

impl MessageTable {
    /// Parse a JSON message file.
    ///
    /// `resource` names the source in error messages.
    pub fn from_json(resource: &str, bytes: &[u8]) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_slice(bytes).map_err(|source| LoadError::Parse {
            resource: resource.to_string(),
            source,
        })?;

        let Value::Object(root) = value else {
            return Err(LoadError::InvalidMessage {
                resource: resource.to_string(),
                key: String::new(),
                message: "expected a JSON object at the top level".to_string(),
            });
        };

        let mut table = Self::default();
        table.flatten(resource, "", &root)?;
        Ok(table)
    }

    fn flatten(&mut self, resource: &str, prefix: &str, object: &Map<String, Value>) -> Result<(), LoadError> {
        for (name, value) in object {
            let key = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };

            match value {
                Value::String(template) => self.insert(key, template),
                Value::Object(inner) if is_message_object(inner) => {
                    if let Some(template) = message_object_template(resource, &key, inner)? {
                        self.insert(key, template);
                    }
                }
                Value::Object(inner) => self.flatten(resource, &key, inner)?,
                other => {
                    return Err(LoadError::InvalidMessage {
                        resource: resource.to_string(),
                        key,
                        message: format!("expected a string or an object, found {}", json_kind(other)),
                    });
                }
            }
        }
        Ok(())
    }

    fn insert(&mut self, key: String, template: &str) {
        if template.is_empty() {
            tracing::debug!(key = %key, "skipping empty template");
            return;
        }
        self.messages.insert(key, template.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Message keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(_, v): &(String, String)| !v.is_empty())
                .collect(),
        }
    }
}

fn is_reserved_key(name: &str) -> bool {
    MESSAGE_OBJECT_KEYS.contains(&name.to_ascii_lowercase().as_str())
}

/// An object is one message when any reserved key holds a string.
fn is_message_object(object: &Map<String, Value>) -> bool {
    object
        .iter()
        .any(|(name, value)| value.is_string() && is_reserved_key(name))
}

fn message_object_template<'v>(
    resource: &str,
    key: &str,
    object: &'v Map<String, Value>,
) -> Result<Option<&'v str>, LoadError> {
    let other = object
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("other"))
        .map(|(_, value)| value);
    match other {
        None => Ok(None),
        Some(Value::String(template)) => Ok(Some(template.as_str())),
        Some(value) => Err(LoadError::InvalidMessage {
            resource: resource.to_string(),
            key: key.to_string(),
            message: format!("'other' must be a string, found {}", json_kind(value)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// All loaded message tables plus the ordered list of available languages.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<LocaleIdentifier, MessageTable>,
    available: Vec<LocaleIdentifier>,
}

impl Catalog {
    /// Load every message file the provider lists.
    ///
    /// Fail-fast: the first listing, read or parse error aborts the load.
    /// Two resources normalizing to the same identifier are rejected.
    pub fn load(provider: &dyn ResourceProvider) -> I18nResult<Self> {
        let names = provider.list().map_err(|source| LoadError::List { source })?;

        let mut catalog = Self::default();
        let mut origins: HashMap<LocaleIdentifier, String> = HashMap::new();

        for name in names {
            let Some(stem) = message_file_stem(&name) else {
                tracing::debug!(resource = %name, "skipping non-message resource");
                continue;
            };

            let identifier = LocaleIdentifier::parse(stem).map_err(|source| LoadError::InvalidIdentifier {
                resource: name.clone(),
                source: Box::new(source),
            })?;

            if let Some(first) = origins.get(&identifier) {
                return Err(LoadError::DuplicateLocale {
                    identifier: identifier.to_string(),
                    first: first.clone(),
                    second: name,
                }
                .into());
            }

            let bytes = provider.read(&name).map_err(|source| LoadError::Read {
                resource: name.clone(),
                source,
            })?;
            let table = MessageTable::from_json(&name, &bytes)?;

            tracing::debug!(
                resource = %name,
                locale = %identifier,
                messages = table.len(),
                "loaded message file"
            );

            origins.insert(identifier.clone(), name);
            catalog.insert(identifier, table);
        }

        Ok(catalog)
    }

    /// Build a catalog from tables already in memory, in the given order.
    pub fn from_tables<I>(tables: I) -> I18nResult<Self>
    where
        I: IntoIterator<Item = (LocaleIdentifier, MessageTable)>,
    {
        let mut catalog = Self::default();
        for (identifier, table) in tables {
            if catalog.contains(&identifier) {
                return Err(I18nError::CatalogLoad(LoadError::DuplicateLocale {
                    identifier: identifier.to_string(),
                    first: "in-memory table".to_string(),
                    second: "in-memory table".to_string(),
                }));
            }
            catalog.insert(identifier, table);
        }
        Ok(catalog)
    }

    fn insert(&mut self, identifier: LocaleIdentifier, table: MessageTable) {
        self.available.push(identifier.clone());
        self.tables.insert(identifier, table);
    }

    /// Available languages in load order.
    pub fn available(&self) -> &[LocaleIdentifier] {
        &self.available
    }

    pub fn table(&self, identifier: &LocaleIdentifier) -> Option<&MessageTable> {
        self.tables.get(identifier)
    }

    pub fn contains(&self, identifier: &LocaleIdentifier) -> bool {
        self.tables.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }
}

/// Stem of a message file name (`fr-CA.json` -> `fr-CA`), if it is one.
fn message_file_stem(name: &str) -> Option<&str> {
    let path = Path::new(name);
    let is_message_file = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(MESSAGE_FILE_EXTENSION));
    if !is_message_file {
        return None;
    }
    path.file_stem().and_then(|s| s.to_str())
}
