use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Backend-assigned recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recipe as stored by the backend.
///
/// Fields the client does not model (for example `user_id`) are kept in
/// `extra` so an update sends them back untouched. The list endpoint only
/// fills the summary columns and sends `null` for the rest, so the content
/// fields read `null` as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: Instructions,
    #[serde(rename = "yield", default, skip_serializing_if = "Option::is_none")]
    pub recipe_yield: Option<RecipeYield>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub times: BTreeMap<String, u64>,
    #[serde(
        rename = "categories",
        alias = "category",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Recipe {
    /// Minimal recipe with a single empty step list.
    pub fn new(id: RecipeId, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            name: name.into(),
            description: None,
            image_url: None,
            ingredients: Vec::new(),
            instructions: Instructions::default(),
            recipe_yield: None,
            times: BTreeMap::new(),
            category: None,
            keywords: None,
            authors: None,
            created: None,
            updated: None,
            extra: BTreeMap::new(),
        }
    }

    /// Host part of the source URL, or `None` when the URL does not parse.
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_owned))
    }

    /// Host without a leading `www.`, used when displaying where a recipe came from.
    pub fn domain(&self) -> Option<String> {
        self.host()
            .map(|host| host.strip_prefix("www.").map(str::to_owned).unwrap_or(host))
    }
}

/// Cooking instructions in one of the three shapes the backend produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instructions {
    OneStep { step: String },
    Steps { steps: Vec<String> },
    Sections { sections: Vec<InstructionSection> },
}

impl Default for Instructions {
    fn default() -> Self {
        Instructions::Steps { steps: Vec::new() }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionSection {
    pub name: String,
    pub steps: Vec<String>,
}

/// Recipe yield; sites publish a count, a phrase, or several phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeYield {
    Count(u64),
    Text(String),
    Lines(Vec<String>),
}

impl fmt::Display for RecipeYield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeYield::Count(count) => write!(f, "{count}"),
            RecipeYield::Text(text) => write!(f, "{text}"),
            RecipeYield::Lines(lines) => write!(f, "{}", lines.join(", ")),
        }
    }
}
