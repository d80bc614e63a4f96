//! Area, measure and year filters shared by every parser.
//!
//! Filters are plain values passed explicitly to each ingestion call. An empty filter
//! restricts nothing.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};

use crate::types::Area;

/// Matches areas whose code or any name contains one of the filter tokens.
///
/// Tokens are case-insensitive regular expressions searched anywhere in the string, so a
/// plain word behaves as a substring match. A token that is not a valid expression is
/// matched literally.
#[derive(Debug, Clone, Default)]
pub struct AreaFilter {
    tokens: Vec<Token>,
}

#[derive(Debug, Clone)]
enum Token {
    Pattern(Regex),
    /// Lowercased literal, used when the token does not compile as a pattern.
    Literal(String),
}

impl Token {
    fn parse(token: &str) -> Self {
        match RegexBuilder::new(token).case_insensitive(true).build() {
            Ok(re) => Self::Pattern(re),
            Err(_) => Self::Literal(token.to_lowercase()),
        }
    }

    fn is_match(&self, haystack: &str) -> bool {
        match self {
            Self::Pattern(re) => re.is_match(haystack),
            Self::Literal(lit) => haystack.to_lowercase().contains(lit.as_str()),
        }
    }
}

impl AreaFilter {
    /// Build a filter from tokens such as `W06000011` or `swansea`.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens.into_iter().map(|t| Token::parse(t.as_ref())).collect();
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True when the filter is empty, or when any token matches the area's code or one of
    /// its names.
    pub fn matches(&self, area: &Area) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        self.tokens.iter().any(|token| {
            token.is_match(area.code()) || area.names().any(|(_, name)| token.is_match(name))
        })
    }
}

/// Matches measure codenames exactly, ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasureFilter {
    codes: BTreeSet<String>,
}

impl MeasureFilter {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            codes: codes.into_iter().map(|c| c.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// True when the filter is empty or contains `codename` (any case).
    pub fn matches(&self, codename: &str) -> bool {
        self.codes.is_empty() || self.codes.contains(&codename.to_lowercase())
    }
}

/// Inclusive year range. A bound of `0` means "unbounded" on that side, so the default
/// `(0, 0)` accepts every year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearFilter {
    start: u32,
    end: u32,
}

impl YearFilter {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A filter accepting every year.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_all(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.start, self.end)
    }

    pub fn contains(&self, year: u32) -> bool {
        (self.start == 0 || year >= self.start) && (self.end == 0 || year <= self.end)
    }
}

impl From<(u32, u32)> for YearFilter {
    fn from((start, end): (u32, u32)) -> Self {
        Self::new(start, end)
    }
}

/// The three filters threaded through every ingestion call.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub areas: AreaFilter,
    pub measures: MeasureFilter,
    pub years: YearFilter,
}

impl Filters {
    /// Filters that let everything through.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_areas(mut self, areas: AreaFilter) -> Self {
        self.areas = areas;
        self
    }

    pub fn with_measures(mut self, measures: MeasureFilter) -> Self {
        self.measures = measures;
        self
    }

    pub fn with_years(mut self, years: YearFilter) -> Self {
        self.years = years;
        self
    }
}
