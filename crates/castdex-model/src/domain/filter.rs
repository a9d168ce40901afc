use time::Date;

use crate::{CharacterGender, CharacterStatus, CreatedRange};

/// Query predicates applied to the remote catalog.
///
/// Absent fields mean "no constraint"; an empty string is equivalent to
/// absent. Equality is structural and is what the engine uses to suppress
/// spurious re-queries, so callers should pass filters through
/// [`CatalogFilter::normalized`] (the engine does this on every update).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Substring match on the character name.
    pub name: Option<String>,
    pub status: Option<CharacterStatus>,
    pub species: Option<String>,
    pub gender: Option<CharacterGender>,
    /// Client-side-only bound; the remote endpoint cannot express it.
    pub created_start: Option<Date>,
    /// Client-side-only bound; the remote endpoint cannot express it.
    pub created_end: Option<Date>,
}

impl CatalogFilter {
    /// The canonical empty filter: no constraint on any field.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` when no field constrains the result set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Collapse empty-string fields into `None` so that structural equality
    /// treats them the same as absent fields.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.filter(|s| !s.is_empty());
        self.species = self.species.filter(|s| !s.is_empty());
        self
    }

    /// The client-side created-date bounds of this filter.
    pub fn created_range(&self) -> CreatedRange {
        CreatedRange::new(self.created_start, self.created_end)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into()).filter(|s: &String| !s.is_empty());
        self
    }

    pub fn with_status(mut self, status: CharacterStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into()).filter(|s: &String| !s.is_empty());
        self
    }

    pub fn with_gender(mut self, gender: CharacterGender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_created_range(mut self, start: Option<Date>, end: Option<Date>) -> Self {
        self.created_start = start;
        self.created_end = end;
        self
    }
}
