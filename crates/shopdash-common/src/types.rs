//! Tagged value types shared by the loader and the aggregation pipeline.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;

/// Display/serialization format for timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A timestamp cell after permissive coercion.
///
/// Source tables carry partially malformed or empty timestamp cells. Instead of
/// failing the load, such cells become [`Timestamp::Missing`] and every
/// aggregate decides explicitly whether a missing value participates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Timestamp {
    /// No usable value (empty or unparsable cell)
    #[default]
    Missing,
    /// A valid wall-clock timestamp
    At(NaiveDateTime),
}

impl Timestamp {
    /// Coerce a raw cell.
    ///
    /// Empty cells are `Missing`; text that matches no accepted layout is
    /// reported as [`MalformedValue`] so the caller can record a warning.
    pub fn parse_cell(raw: &str) -> std::result::Result<Self, MalformedValue> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::Missing);
        }
        crate::utils::parse_timestamp(trimmed)
            .map(Self::At)
            .ok_or_else(|| MalformedValue(trimmed.to_string()))
    }

    /// The contained timestamp, if present
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::At(dt) => Some(*dt),
            Self::Missing => None,
        }
    }

    /// Calendar date of the contained timestamp
    pub fn date(&self) -> Option<NaiveDate> {
        self.datetime().map(|dt| dt.date())
    }

    /// Whether the value is missing
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self::At(dt)
    }
}

impl From<Option<NaiveDateTime>> for Timestamp {
    fn from(dt: Option<NaiveDateTime>) -> Self {
        dt.map_or(Self::Missing, Self::At)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(dt) => write!(f, "{}", dt.format(TIMESTAMP_FORMAT)),
            Self::Missing => f.write_str("NaT"),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::At(dt) => serializer.collect_str(&dt.format(TIMESTAMP_FORMAT)),
            Self::Missing => serializer.serialize_none(),
        }
    }
}

/// A non-empty cell that could not be coerced to its column type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised value {0:?}")]
pub struct MalformedValue(pub String);

/// Non-fatal load diagnostic: the cell was coerced to a missing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// 1-based line in the source (header is line 1)
    pub line: u64,
    /// Column name
    pub column: String,
    /// Offending raw text
    pub value: String,
}

impl ParseWarning {
    /// Create a warning for a malformed cell
    pub fn new(line: u64, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            line,
            column: column.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: column '{}' has unparsable value {:?}",
            self.line, self.column, self.value
        )
    }
}
