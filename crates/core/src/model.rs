//! Base model shared by persisted records.
//!
//! A `BaseModel` carries the identity and audit fields every stored record
//! has, plus an open map of extra fields for whatever else the storage layer
//! hands back. It is built one of two ways:
//!
//! - **fresh** ([`BaseModel::new`]): new UUIDv4 id, both timestamps set to now;
//! - **rehydrated** ([`BaseModel::from_fields`]): every supplied field is
//!   assigned onto the model, timestamp fields parsed from
//!   `YYYY-MM-DD HH:MM:SS`.
//!
//! [`BaseModel::to_representation`] goes the other way, producing the flat
//! map the storage layer writes.
//!
//! `id` never changes once a model exists. `updated_at` is never refreshed
//! automatically; callers that mutate a model assign it themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::entity::{Entity, Model};
use crate::error::{ModelError, ModelResult};
use crate::id::EntityId;
use crate::timestamp;

/// Flat field-name to value mapping, as read from and written to storage.
pub type Representation = Map<String, Value>;

pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// Fields parsed as timestamps on assignment. Matched by exact name.
pub const TIMESTAMP_FIELDS: [&str; 2] = [CREATED_AT_FIELD, UPDATED_AT_FIELD];

/// Fields backed by typed struct members rather than the open field map.
pub const RESERVED_FIELDS: [&str; 3] = [ID_FIELD, CREATED_AT_FIELD, UPDATED_AT_FIELD];

pub fn is_timestamp_field(name: &str) -> bool {
    TIMESTAMP_FIELDS.contains(&name)
}

pub fn is_reserved_field(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}

/// Identity + audit fields common to every persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseModel {
    id: EntityId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    fields: Representation,
}

/// A single field assignment after its value has been checked.
enum Assignment {
    Id(EntityId),
    CreatedAt(DateTime<Utc>),
    UpdatedAt(DateTime<Utc>),
    Extra(String, Value),
}

impl Assignment {
    fn resolve(name: String, value: Value) -> ModelResult<Self> {
        match name.as_str() {
            ID_FIELD => match value {
                Value::String(id) => Ok(Self::Id(EntityId::from(id))),
                _ => Err(ModelError::field_type(ID_FIELD, "string")),
            },
            CREATED_AT_FIELD => parse_timestamp(CREATED_AT_FIELD, &value).map(Self::CreatedAt),
            UPDATED_AT_FIELD => parse_timestamp(UPDATED_AT_FIELD, &value).map(Self::UpdatedAt),
            _ => Ok(Self::Extra(name, value)),
        }
    }
}

fn parse_timestamp(field: &'static str, value: &Value) -> ModelResult<DateTime<Utc>> {
    match value {
        Value::String(text) => timestamp::parse(field, text),
        _ => Err(ModelError::field_type(field, "string")),
    }
}

impl BaseModel {
    /// Fresh construction: generated id, both timestamps at the current second.
    pub fn new() -> Self {
        let now = timestamp::now();
        Self {
            id: EntityId::generate(),
            created_at: now,
            updated_at: now,
            fields: Representation::new(),
        }
    }

    /// Rehydrate a model from previously stored field values.
    ///
    /// `id`, `created_at` and `updated_at` must all be present. Any other
    /// field is kept verbatim. Fails without producing a model if a timestamp
    /// does not parse or a required field is missing.
    pub fn from_fields<I, K>(fields: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut id = None;
        let mut created_at = None;
        let mut updated_at = None;
        let mut extra = Representation::new();

        for (name, value) in fields {
            match Assignment::resolve(name.into(), value)? {
                Assignment::Id(v) => id = Some(v),
                Assignment::CreatedAt(v) => created_at = Some(v),
                Assignment::UpdatedAt(v) => updated_at = Some(v),
                Assignment::Extra(name, value) => {
                    extra.insert(name, value);
                }
            }
        }

        let model = Self {
            id: id.ok_or(ModelError::missing(ID_FIELD))?,
            created_at: created_at.ok_or(ModelError::missing(CREATED_AT_FIELD))?,
            updated_at: updated_at.ok_or(ModelError::missing(UPDATED_AT_FIELD))?,
            fields: extra,
        };

        tracing::debug!(
            id = %model.id,
            extra_fields = model.fields.len(),
            "rehydrated model"
        );
        Ok(model)
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sub-seconds are dropped; timestamps that cannot be stored are rejected.
    pub fn set_created_at(&mut self, ts: DateTime<Utc>) -> ModelResult<()> {
        self.created_at = timestamp::normalize(CREATED_AT_FIELD, ts)?;
        Ok(())
    }

    /// Sub-seconds are dropped; timestamps that cannot be stored are rejected.
    pub fn set_updated_at(&mut self, ts: DateTime<Utc>) -> ModelResult<()> {
        self.updated_at = timestamp::normalize(UPDATED_AT_FIELD, ts)?;
        Ok(())
    }

    /// Assign a single field by name, with the same rules as rehydration,
    /// except that `id` is fixed once the model exists.
    ///
    /// On error the model is left unchanged.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> ModelResult<()> {
        match Assignment::resolve(name.into(), value)? {
            Assignment::Id(_) => return Err(ModelError::reserved(ID_FIELD)),
            Assignment::CreatedAt(v) => self.created_at = v,
            Assignment::UpdatedAt(v) => self.updated_at = v,
            Assignment::Extra(name, value) => {
                self.fields.insert(name, value);
            }
        }
        Ok(())
    }

    /// Extra field by name. Reserved fields live outside the extra map, so
    /// `id`, `created_at` and `updated_at` always yield `None` here.
    pub fn get_extra(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Remove an extra field. Reserved fields cannot be removed.
    pub fn remove(&mut self, name: &str) -> ModelResult<Option<Value>> {
        if is_reserved_field(name) {
            return Err(ModelError::reserved(name));
        }
        Ok(self.fields.remove(name))
    }

    /// Extra fields only; reserved fields have their own accessors.
    pub fn fields(&self) -> &Representation {
        &self.fields
    }

    /// Flat snapshot of every field, timestamps rendered as
    /// `YYYY-MM-DD HH:MM:SS`.
    pub fn to_representation(&self) -> Representation {
        let mut out = self.fields.clone();
        out.insert(ID_FIELD.to_owned(), Value::String(self.id.to_string()));
        out.insert(
            CREATED_AT_FIELD.to_owned(),
            Value::String(timestamp::format(&self.created_at)),
        );
        out.insert(
            UPDATED_AT_FIELD.to_owned(),
            Value::String(timestamp::format(&self.updated_at)),
        );
        out
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for BaseModel {
    type Id = EntityId;

    fn id(&self) -> &Self::Id {
        BaseModel::id(self)
    }
}

impl Model for BaseModel {
    fn base(&self) -> &BaseModel {
        self
    }
}

impl Serialize for BaseModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_representation().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BaseModel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Representation::deserialize(deserializer)?;
        Self::from_fields(fields).map_err(serde::de::Error::custom)
    }
}
