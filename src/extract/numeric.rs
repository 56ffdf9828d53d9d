use once_cell::sync::Lazy;
use regex::Regex;

// A range is two digit runs joined by a hyphen or en-dash. Whatever trails
// the second run (%, "₪ לחודש", …) is not part of the number.
static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*[\-–]\s*(\d+(?:\.\d+)?)").expect("range pattern should be valid")
});

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern should be valid"));

/// A number recognized inside one table cell: either a scalar or a
/// low–high range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericCell {
    Scalar(f64),
    Range(f64, f64),
}

impl NumericCell {
    /// Scan a cell for a number. Currency signs and thousands commas are
    /// stripped first; the first digit-flanked dash wins as a range, otherwise
    /// the first digit run is taken as a scalar. No digits → `None`.
    pub fn parse(cell: &str) -> Option<Self> {
        let cleaned = cell.trim().replace('₪', "").replace(',', "");
        if let Some(caps) = RANGE_RE.captures(&cleaned) {
            let low: f64 = caps[1].parse().ok()?;
            let high: f64 = caps[2].parse().ok()?;
            return Some(NumericCell::Range(low, high));
        }
        let found = NUMBER_RE.find(&cleaned)?;
        let value: f64 = found.as_str().parse().ok()?;
        Some(NumericCell::Scalar(value))
    }

    /// The representative value used for aggregation: the scalar itself, or
    /// the arithmetic mean of the range endpoints.
    pub fn value(self) -> f64 {
        match self {
            NumericCell::Scalar(v) => v,
            NumericCell::Range(low, high) => (low + high) / 2.0,
        }
    }
}

/// Representative value of one cell, or `None` when the cell holds no number.
pub fn parse_numeric_cell(cell: &str) -> Option<f64> {
    NumericCell::parse(cell).map(NumericCell::value)
}
