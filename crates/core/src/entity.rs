//! Entity traits: identity plus the table a model is persisted in.

use crate::model::{BaseModel, Representation};

/// Entity marker + minimal interface.
pub trait Entity {
    /// Identifier type.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// A persisted record built on top of [`BaseModel`].
///
/// Concrete models embed a `BaseModel` and name their table; serialization
/// goes through the embedded base unless the model adds fields of its own.
pub trait Model {
    /// Storage table for this model. Empty for the bare base model.
    const TABLE_NAME: &'static str = "";

    /// Returns the embedded identity + audit fields.
    fn base(&self) -> &BaseModel;

    /// Flat field map written to storage.
    fn to_representation(&self) -> Representation {
        self.base().to_representation()
    }
}
