//! Type definitions for the recipe backend.
//!
//! ## Key Types
//!
//! - [`Recipe`] and [`Ingredient`] - the two entity kinds, both implementing [`Entity`]
//! - [`EntityId`] - opaque identifier (with a custom deserializer accepting numbers or strings)
//! - [`LoginReply`] - the `"<token> <isAdmin>"` text returned by `POST /login`
//! - [`Page`] / [`PageOptions`] - paged listing responses and their query options
//!
//! ## API Compatibility
//!
//! - The backend numbers its records, but ids are treated as opaque strings on this side
//! - Recipes may come back with `null` instructions, which decode as an empty string
//! - Extra fields such as `author` or `ingredients` are ignored

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::client::error::ClientError;

/// Opaque entity identifier.
///
/// Serialized as a string; deserialized from either a JSON string or a JSON
/// integer, since the backend sends numeric ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct EntityIdVisitor;

        impl<'de> Visitor<'de> for EntityIdVisitor {
            type Value = EntityId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer or string id")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(EntityId(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(EntityId(value.to_string()))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(EntityId(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
                Ok(EntityId(value))
            }
        }

        deserializer.deserialize_any(EntityIdVisitor)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A record the backend stores and lists.
///
/// Besides its id, every entity has a human-readable name. Forms only ask for
/// the name, so pages resolve ids by matching names case-insensitively.
pub trait Entity: serde::de::DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path on the backend, e.g. `/recipes`.
    const COLLECTION: &'static str;
    /// Query parameter the backend filters by on list calls.
    const SEARCH_PARAM: &'static str;
    /// Lower-case noun used in messages.
    const KIND: &'static str;

    fn id(&self) -> &EntityId;
    fn name(&self) -> &str;
    /// Text shown for this entity in a list display.
    fn display_row(&self) -> String;

    fn matches_name(&self, name: &str) -> bool {
        self.name().to_lowercase() == name.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: EntityId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub instructions: String,
}

impl Entity for Recipe {
    const COLLECTION: &'static str = "/recipes";
    const SEARCH_PARAM: &'static str = "name";
    const KIND: &'static str = "recipe";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn display_row(&self) -> String {
        format!("{}: {}", self.name, self.instructions)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: EntityId,
    pub name: String,
}

impl Entity for Ingredient {
    const COLLECTION: &'static str = "/ingredients";
    const SEARCH_PARAM: &'static str = "term";
    const KIND: &'static str = "ingredient";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn display_row(&self) -> String {
        self.name.clone()
    }
}

// Request bodies

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub instructions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateRecipeRequest {
    pub instructions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateIngredientRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateIngredientRequest {
    pub id: EntityId,
    pub name: String,
}

/// Body of a successful `POST /login`.
///
/// The backend answers with plain text, a token and an admin flag separated
/// by whitespace: `"abc123 true"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginReply {
    pub token: String,
    pub is_admin: bool,
}

impl std::str::FromStr for LoginReply {
    type Err = ClientError;

    fn from_str(body: &str) -> Result<Self, Self::Err> {
        let mut parts = body.split_whitespace();
        let token = parts
            .next()
            .ok_or_else(|| ClientError::Decode("login response did not contain a token".into()))?;
        let is_admin = parts
            .next()
            .map(|flag| flag.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            token: token.to_string(),
            is_admin,
        })
    }
}

/// One page of a paged listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// 1-based page number
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_elements: u32,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Query options for a paged listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub page: u32,
    pub page_size: u32,
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

impl PageOptions {
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            sort_by: "id".to_string(),
            sort_direction: SortDirection::Asc,
        }
    }
}
