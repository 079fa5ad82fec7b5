//! `modelbase-core` — base model shared by persisted records.
//!
//! Identity and audit timestamps, rehydration from stored field maps, and
//! flat serialization back to them. No storage concerns live here.

pub mod entity;
pub mod error;
pub mod id;
pub mod model;
pub mod timestamp;

pub use entity::{Entity, Model};
pub use error::{ModelError, ModelResult};
pub use id::EntityId;
pub use model::{BaseModel, Representation};
