//! Column letters, default cell labels and A1-style references.

use serde::{Deserialize, Serialize};

use crate::types::Coord;

/// Which number the first row is labelled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowLabelOrigin {
    /// Row 0 is labelled "1" (A1, B1, ...)
    #[default]
    OneBased,
    /// Row 0 is labelled "0" (A0, B0, ...)
    ZeroBased,
}

impl RowLabelOrigin {
    fn offset(self) -> u64 {
        match self {
            Self::OneBased => 1,
            Self::ZeroBased => 0,
        }
    }
}

/// Convert a 0-based column index to column letters (A, B, ..., Z, AA, AB, ...)
pub fn col_to_letter(col: u32) -> String {
    let mut result = String::new();
    let mut n = u64::from(col) + 1; // Convert to 1-based
    while n > 0 {
        n -= 1;
        let c = char::from(b'A' + u8::try_from(n % 26).unwrap_or(0));
        result.insert(0, c);
        n /= 26;
    }
    result
}

/// Label shown for a cell that has never been written: column letters
/// followed by the row number.
pub fn default_label(coord: Coord, origin: RowLabelOrigin) -> String {
    format!(
        "{}{}",
        col_to_letter(coord.col),
        u64::from(coord.row) + origin.offset()
    )
}

/// Parse a reference like "B3" into a coordinate.
///
/// Accepts lowercase letters and `$` anchors. Returns `None` if the letters or
/// digits are missing, out of order, or the row is below the origin.
pub fn parse_cell_ref(cell_ref: &str, origin: RowLabelOrigin) -> Option<Coord> {
    let mut col: u64 = 0;
    let mut row: u64 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for ch in cell_ref.trim().chars() {
        if ch == '$' {
            continue;
        }
        if ch.is_ascii_alphabetic() {
            if saw_row {
                return None;
            }
            let upper = ch.to_ascii_uppercase();
            col = col
                .checked_mul(26)?
                .checked_add(u64::from(upper) - u64::from('A') + 1)?;
            saw_col = true;
        } else if let Some(digit) = ch.to_digit(10) {
            row = row.checked_mul(10)?.checked_add(u64::from(digit))?;
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_col || !saw_row {
        return None;
    }

    let row = row.checked_sub(origin.offset())?;
    Some(Coord::new(
        u32::try_from(row).ok()?,
        u32::try_from(col - 1).ok()?,
    ))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_col_to_letter() {
        assert_eq!(col_to_letter(0), "A");
        assert_eq!(col_to_letter(25), "Z");
        assert_eq!(col_to_letter(26), "AA");
        assert_eq!(col_to_letter(27), "AB");
        assert_eq!(col_to_letter(701), "ZZ");
        assert_eq!(col_to_letter(702), "AAA");
    }

    #[test]
    fn test_default_label_origins() {
        assert_eq!(default_label(Coord::new(0, 0), RowLabelOrigin::OneBased), "A1");
        assert_eq!(default_label(Coord::new(0, 0), RowLabelOrigin::ZeroBased), "A0");
        assert_eq!(default_label(Coord::new(9, 2), RowLabelOrigin::OneBased), "C10");
        assert_eq!(default_label(Coord::new(4, 27), RowLabelOrigin::OneBased), "AB5");
    }

    #[test]
    fn test_parse_cell_ref() {
        let one = RowLabelOrigin::OneBased;
        assert_eq!(parse_cell_ref("A1", one), Some(Coord::new(0, 0)));
        assert_eq!(parse_cell_ref("$c$10", one), Some(Coord::new(9, 2)));
        assert_eq!(parse_cell_ref("AA3", one), Some(Coord::new(2, 26)));
        assert_eq!(parse_cell_ref("A0", RowLabelOrigin::ZeroBased), Some(Coord::new(0, 0)));
        assert_eq!(parse_cell_ref("A0", one), None);
        assert_eq!(parse_cell_ref("1A", one), None);
        assert_eq!(parse_cell_ref("A", one), None);
        assert_eq!(parse_cell_ref("A-1", one), None);
    }

    #[test]
    fn test_parse_round_trips_default_label() {
        for origin in [RowLabelOrigin::OneBased, RowLabelOrigin::ZeroBased] {
            let coord = Coord::new(39, 29);
            assert_eq!(parse_cell_ref(&default_label(coord, origin), origin), Some(coord));
        }
    }
}
