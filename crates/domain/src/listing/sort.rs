//! Sort keys and direction for listing tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Direction of the active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Applies the direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sortable column of an entity table.
pub trait SortColumn: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every column, in table order.
    fn all() -> &'static [Self];

    /// Key used on the command line and in the wire format.
    fn key(&self) -> &'static str;

    /// Column header.
    fn label(&self) -> &'static str;

    /// Looks a column up by key or label, case-insensitively.
    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::all().iter().copied().find(|column| {
            column.key().eq_ignore_ascii_case(value) || column.label().eq_ignore_ascii_case(value)
        })
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// Value extracted from a record for comparison.
///
/// Text is compared lower-cased; numbers, timestamps and flags by value.
/// Missing timestamps sort before present ones.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Timestamp(Option<DateTime<Utc>>),
    Flag(bool),
}

impl SortKey {
    /// Builds a text key, lower-casing the value.
    pub fn text(value: &str) -> Self {
        SortKey::Text(value.to_lowercase())
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Flag(_) => 0,
            SortKey::Integer(_) => 1,
            SortKey::Decimal(_) => 2,
            SortKey::Timestamp(_) => 3,
            SortKey::Text(_) => 4,
        }
    }

    /// Total order over keys. Keys of different kinds never meet within one
    /// column, but still order deterministically by kind.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            (SortKey::Decimal(a), SortKey::Decimal(b)) => a.total_cmp(b),
            (SortKey::Timestamp(a), SortKey::Timestamp(b)) => a.cmp(b),
            (SortKey::Flag(a), SortKey::Flag(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sort_direction_toggle() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    }

    #[test]
    fn test_sort_direction_apply() {
        assert_eq!(SortDirection::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn test_sort_direction_from_str() {
        assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!(
            "descending".parse::<SortDirection>().unwrap(),
            SortDirection::Desc
        );
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_text_key_is_case_insensitive() {
        assert_eq!(
            SortKey::text("Alpha").compare(&SortKey::text("alpha")),
            Ordering::Equal
        );
        assert_eq!(
            SortKey::text("beta").compare(&SortKey::text("Alpha")),
            Ordering::Greater
        );
    }

    #[test]
    fn test_decimal_key_total_order() {
        assert_eq!(
            SortKey::Decimal(1.5).compare(&SortKey::Decimal(10.0)),
            Ordering::Less
        );
        assert_eq!(
            SortKey::Decimal(f64::NAN).compare(&SortKey::Decimal(f64::NAN)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_missing_timestamp_sorts_first() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(
            SortKey::Timestamp(None).compare(&SortKey::Timestamp(Some(ts))),
            Ordering::Less
        );
    }

    #[test]
    fn test_integer_keys_compare_numerically() {
        assert_eq!(
            SortKey::Integer(9).compare(&SortKey::Integer(10)),
            Ordering::Less
        );
    }
}
