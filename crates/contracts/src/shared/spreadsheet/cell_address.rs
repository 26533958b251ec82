use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cell address: {0:?}")]
pub struct CellAddressError(pub String);

/// Zero-based position of a cell, parsed from A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parses `"B4"`, `"AA10"` (case-insensitive) into zero-based indices.
    pub fn parse(a1: &str) -> Result<Self, CellAddressError> {
        let err = || CellAddressError(a1.to_string());
        let s = a1.trim();
        let split = s.find(|c: char| c.is_ascii_digit()).ok_or_else(err)?;
        let (letters, digits) = s.split_at(split);

        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(err());
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            let v = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
            col = col.checked_mul(26).and_then(|x| x.checked_add(v)).ok_or_else(err)?;
        }

        let row: u32 = digits.parse().map_err(|_| err())?;
        if row == 0 {
            return Err(err());
        }

        Ok(Self {
            row: row - 1,
            col: col - 1,
        })
    }

    pub fn to_a1(self) -> String {
        let mut letters = Vec::new();
        let mut n = self.col + 1;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        letters.reverse();
        format!("{}{}", letters.into_iter().collect::<String>(), self.row + 1)
    }
}

impl std::fmt::Display for CellAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_a1())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(0, 0));
        assert_eq!(CellAddress::parse("B4").unwrap(), CellAddress::new(3, 1));
        assert_eq!(CellAddress::parse("r24").unwrap(), CellAddress::new(23, 17));
        assert_eq!(CellAddress::parse("Z1").unwrap().col, 25);
        assert_eq!(CellAddress::parse("AA10").unwrap(), CellAddress::new(9, 26));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "4B", "B", "B0", "B-1", "Ñ4", "B4C"] {
            assert!(CellAddress::parse(bad).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn test_to_a1() {
        for a1 in ["A1", "B4", "N16", "R24", "Z9", "AA10", "AZ3"] {
            assert_eq!(CellAddress::parse(a1).unwrap().to_a1(), a1);
        }
    }
}
