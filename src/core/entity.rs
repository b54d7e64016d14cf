//! # Entities
//!
//! The records exchanged with the zoo backend. They are owned by the backend;
//! the client only holds value copies (snapshots) of them.
//!
//! ```text
//! Animal ──habitat_id──▶ Habitat
//!   │
//!   └────keeper_id───▶ Keeper
//! ```
//!
//! All payloads are camelCase JSON. Date-times travel as ISO-8601 without a
//! zone; see [`iso_datetime`] for the precision rules.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three resource types the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Animal,
    Habitat,
    Keeper,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Animal, EntityKind::Habitat, EntityKind::Keeper];

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Animal => "animal",
            EntityKind::Habitat => "habitat",
            EntityKind::Keeper => "keeper",
        }
    }

    /// Capitalised label for the start of a sentence.
    pub fn title(self) -> &'static str {
        match self {
            EntityKind::Animal => "Animal",
            EntityKind::Habitat => "Habitat",
            EntityKind::Keeper => "Keeper",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: i64,
    pub name: String,
    /// Kilograms.
    pub weight: f64,
    #[serde(with = "iso_datetime")]
    pub birth_date_time: NaiveDateTime,
    pub is_wild: bool,
    #[serde(default)]
    pub habitat_id: Option<i64>,
    #[serde(default)]
    pub keeper_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habitat {
    pub id: i64,
    pub name: String,
    /// Square meters.
    pub area: f64,
    #[serde(with = "iso_datetime")]
    pub established_date: NaiveDateTime,
    #[serde(default)]
    pub is_visitor_accessible: bool,
    pub is_covered: bool,
    /// Only present in `with-animals` responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animals: Option<Vec<Animal>>,
}

impl Habitat {
    pub fn animal_count(&self) -> usize {
        self.animals.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keeper {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hire_date: NaiveDate,
    pub specialization: String,
    pub is_active: bool,
    pub years_of_experience: u32,
}

impl Keeper {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalWithKeeper {
    pub animal: Animal,
    #[serde(default)]
    pub keeper: Option<Keeper>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignKeeperRequest {
    pub keeper_id: i64,
}

/// A value copy of one entity, captured when a lookup succeeds.
#[derive(Debug, Clone, PartialEq)]
pub enum EntitySnapshot {
    Animal(Animal),
    Habitat(Habitat),
    Keeper(Keeper),
}

impl EntitySnapshot {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntitySnapshot::Animal(_) => EntityKind::Animal,
            EntitySnapshot::Habitat(_) => EntityKind::Habitat,
            EntitySnapshot::Keeper(_) => EntityKind::Keeper,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            EntitySnapshot::Animal(a) => a.id,
            EntitySnapshot::Habitat(h) => h.id,
            EntitySnapshot::Keeper(k) => k.id,
        }
    }

    /// Human-readable name used in status messages.
    pub fn display_name(&self) -> String {
        match self {
            EntitySnapshot::Animal(a) => a.name.clone(),
            EntitySnapshot::Habitat(h) => h.name.clone(),
            EntitySnapshot::Keeper(k) => k.full_name(),
        }
    }
}

impl From<Animal> for EntitySnapshot {
    fn from(animal: Animal) -> Self {
        EntitySnapshot::Animal(animal)
    }
}

impl From<Habitat> for EntitySnapshot {
    fn from(habitat: Habitat) -> Self {
        EntitySnapshot::Habitat(habitat)
    }
}

impl From<Keeper> for EntitySnapshot {
    fn from(keeper: Keeper) -> Self {
        EntitySnapshot::Keeper(keeper)
    }
}

/// Serde adapter for zone-less ISO-8601 date-times.
///
/// Accepts minute precision (`2019-03-15T10:30`), second precision and
/// fractional seconds. Writes second precision, plus the fraction when it
/// is non-zero.
pub mod iso_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
    const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

    pub fn parse(input: &str) -> Option<NaiveDateTime> {
        let input = input.trim();
        // `datetime-local` style inputs may use a space separator
        let normalized = input.replacen(' ', "T", 1);
        NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(&normalized, MINUTE_FORMAT))
            .ok()
    }

    pub fn format(value: &NaiveDateTime) -> String {
        value.format(FORMAT).to_string()
    }

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date-time: {raw}")))
    }
}
