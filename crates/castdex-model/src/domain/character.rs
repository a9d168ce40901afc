use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Life status of a catalog character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterStatus {
    /// Remote catalogs are inconsistent about casing, so accept both.
    #[serde(alias = "Alive")]
    Alive,
    #[serde(alias = "Dead")]
    Dead,
    #[serde(alias = "Unknown")]
    Unknown,
}

impl CharacterStatus {
    /// Lowercase token used in remote query parameters and persisted state.
    pub fn as_token(&self) -> &'static str {
        match self {
            CharacterStatus::Alive => "alive",
            CharacterStatus::Dead => "dead",
            CharacterStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CharacterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for CharacterStatus {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "alive" => Ok(CharacterStatus::Alive),
            "dead" => Ok(CharacterStatus::Dead),
            "unknown" => Ok(CharacterStatus::Unknown),
            _ => Err(UnknownToken(s.to_string())),
        }
    }
}

/// Gender of a catalog character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterGender {
    #[serde(alias = "Female")]
    Female,
    #[serde(alias = "Male")]
    Male,
    #[serde(alias = "Genderless")]
    Genderless,
    #[serde(alias = "Unknown")]
    Unknown,
}

impl CharacterGender {
    /// Lowercase token used in remote query parameters and persisted state.
    pub fn as_token(&self) -> &'static str {
        match self {
            CharacterGender::Female => "female",
            CharacterGender::Male => "male",
            CharacterGender::Genderless => "genderless",
            CharacterGender::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CharacterGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for CharacterGender {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "female" => Ok(CharacterGender::Female),
            "male" => Ok(CharacterGender::Male),
            "genderless" => Ok(CharacterGender::Genderless),
            "unknown" => Ok(CharacterGender::Unknown),
            _ => Err(UnknownToken(s.to_string())),
        }
    }
}

/// A token that maps to no known enum value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token: {0}")]
pub struct UnknownToken(pub String);

/// Named reference to a place in the catalog (origin or last known location).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
    /// Resource URL; empty when the place is unknown to the catalog.
    #[serde(default)]
    pub url: String,
}

/// A single catalog entry.
///
/// Immutable once fetched; `id` is the stable identity across pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub status: CharacterStatus,
    pub species: String,
    pub gender: CharacterGender,
    pub origin: LocationRef,
    pub location: LocationRef,
    #[serde(default)]
    pub image: String,
    /// Creation timestamp as reported by the catalog, RFC 3339.
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
}
