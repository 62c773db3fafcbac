//! Cell-range formulas of chart references.
//!
//! A chart series points at its source cells with a formula such as
//! `Sheet1!$B$2:$B$5` or `('Q1 data'!$A$2,'Q1 data'!$A$4:$A$6)`. This module
//! turns such a formula into the ordered list of cells it addresses.
//!
//! ```
//! use slidecascade::ooxml::charts::formula::parse_cell_range;
//!
//! let cells = parse_cell_range("Sheet1!$A$2:$A$4").unwrap();
//! let names: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
//! assert_eq!(names, ["A2", "A3", "A4"]);
//! ```
use std::fmt;
use std::str::FromStr;

use memchr::{memchr2_iter, memrchr};

use crate::ooxml::error::{OoxmlError, Result};

/// Last column of a worksheet (`XFD`).
pub const MAX_COLUMN: u32 = 16_384;

/// Last row of a worksheet.
pub const MAX_ROW: u32 = 1_048_576;

/// Upper bound on the number of cells a single formula may expand to.
const MAX_ADDRESSES: usize = 1 << 20;

/// A literal cell coordinate; both parts are one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    row: u32,
    column: u32,
}

impl CellAddress {
    pub fn new(column: u32, row: u32) -> Self {
        Self { row, column }
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Column in letters: 1 → `A`, 28 → `AB`.
    pub fn column_letters(&self) -> String {
        let mut letters = Vec::with_capacity(3);
        let mut n = self.column;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push(b'A' + rem as u8);
            n = (n - 1) / 26;
        }
        letters.reverse();
        String::from_utf8(letters).unwrap_or_default()
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letters(), self.row)
    }
}

impl FromStr for CellAddress {
    type Err = OoxmlError;

    /// Parse a single reference such as `B12` or `$B$12`.
    fn from_str(s: &str) -> Result<Self> {
        let cleaned: String = s.chars().filter(|&c| c != '$').collect();
        let bytes = cleaned.trim().as_bytes();
        let mut cursor = 0;
        let address = read_cell(bytes, &mut cursor).map_err(|reason| OoxmlError::formula(s, reason))?;
        if cursor != bytes.len() {
            return Err(OoxmlError::formula(s, "trailing characters after cell reference"));
        }
        Ok(address)
    }
}

/// A formula split into its sheet qualifier and the cells it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFormula {
    pub sheet_name: Option<String>,
    pub addresses: Vec<CellAddress>,
}

/// Parse a formula into its ordered cell addresses, dropping the sheet name.
pub fn parse_cell_range(formula: &str) -> Result<Vec<CellAddress>> {
    parse_formula(formula).map(|parsed| parsed.addresses)
}

/// Parse a formula into its sheet name and ordered cell addresses.
///
/// Single cells and `:` ranges may be mixed in a comma list. Ranges are
/// expanded row by row, left to right, both ends inclusive. Every group of a
/// list must name the same sheet, or none.
pub fn parse_formula(formula: &str) -> Result<ParsedFormula> {
    let mut body = formula.trim();
    if body.starts_with('(') && body.ends_with(')') && body.len() >= 2 {
        body = body[1..body.len() - 1].trim();
    }
    if body.is_empty() {
        return Err(OoxmlError::formula(formula, "formula is empty"));
    }

    let mut sheet_name: Option<String> = None;
    let mut addresses = Vec::new();

    for group in split_groups(body) {
        let (sheet, expr) = split_sheet(group);
        if let Some(sheet) = sheet {
            match &sheet_name {
                Some(existing) if !existing.eq_ignore_ascii_case(&sheet) => {
                    return Err(OoxmlError::formula(
                        formula,
                        format!("references both '{}' and '{}'", existing, sheet),
                    ));
                }
                Some(_) => {}
                None => sheet_name = Some(sheet),
            }
        }

        let expr: String = expr
            .chars()
            .filter(|&c| c != '$' && c != '\'' && !c.is_whitespace())
            .collect();
        if expr.is_empty() {
            return Err(OoxmlError::formula(formula, "empty address group"));
        }
        scan_group(expr.as_bytes(), &mut addresses).map_err(|reason| OoxmlError::formula(formula, reason))?;
    }

    Ok(ParsedFormula {
        sheet_name,
        addresses,
    })
}

/// Split on commas that are not inside a quoted sheet name.
fn split_groups(body: &str) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut groups = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for pos in memchr2_iter(b',', b'\'', bytes) {
        if bytes[pos] == b'\'' {
            quoted = !quoted;
        } else if !quoted {
            groups.push(&body[start..pos]);
            start = pos + 1;
        }
    }
    groups.push(&body[start..]);
    groups
}

/// `'Q1 data'!$A$2` → (`Some("Q1 data")`, `$A$2`).
fn split_sheet(group: &str) -> (Option<String>, &str) {
    let group = group.trim();
    let Some(bang) = memrchr(b'!', group.as_bytes()) else {
        return (None, group);
    };
    let raw = group[..bang].trim();
    let sheet = if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        raw[1..raw.len() - 1].replace("''", "'")
    } else {
        raw.replace('\'', "")
    };
    (Some(sheet), &group[bang + 1..])
}

/// One group: `A2` or `A2:B5`.
fn scan_group(bytes: &[u8], out: &mut Vec<CellAddress>) -> std::result::Result<(), String> {
    let mut cursor = 0;
    let start = read_cell(bytes, &mut cursor)?;
    if cursor == bytes.len() {
        out.push(start);
        return Ok(());
    }
    if bytes[cursor] != b':' {
        return Err(format!("unexpected '{}'", bytes[cursor] as char));
    }
    cursor += 1;
    let end = read_cell(bytes, &mut cursor)?;
    if cursor != bytes.len() {
        return Err(format!("unexpected '{}' after range", bytes[cursor] as char));
    }

    let (row_lo, row_hi) = (start.row.min(end.row), start.row.max(end.row));
    let (col_lo, col_hi) = (start.column.min(end.column), start.column.max(end.column));
    let count = (row_hi - row_lo + 1) as usize * (col_hi - col_lo + 1) as usize;
    if out.len() + count > MAX_ADDRESSES {
        return Err(format!("range covers more than {} cells", MAX_ADDRESSES));
    }
    out.reserve(count);
    for row in row_lo..=row_hi {
        for column in col_lo..=col_hi {
            out.push(CellAddress::new(column, row));
        }
    }
    Ok(())
}

/// A run of letters followed by a run of digits.
fn read_cell(bytes: &[u8], cursor: &mut usize) -> std::result::Result<CellAddress, String> {
    let letters_start = *cursor;
    while *cursor < bytes.len() && bytes[*cursor].is_ascii_alphabetic() {
        *cursor += 1;
    }
    let letters = &bytes[letters_start..*cursor];
    if letters.is_empty() {
        return Err("expected column letters".to_string());
    }

    let digits_start = *cursor;
    while *cursor < bytes.len() && bytes[*cursor].is_ascii_digit() {
        *cursor += 1;
    }
    let digits = &bytes[digits_start..*cursor];
    if digits.is_empty() {
        return Err("expected row number".to_string());
    }

    let column = column_index(letters)
        .filter(|&c| c <= MAX_COLUMN)
        .ok_or_else(|| format!("column '{}' out of range", String::from_utf8_lossy(letters)))?;
    let row = atoi_simd::parse::<u32, false, false>(digits)
        .ok()
        .filter(|&r| (1..=MAX_ROW).contains(&r))
        .ok_or_else(|| format!("row '{}' out of range", String::from_utf8_lossy(digits)))?;
    Ok(CellAddress::new(column, row))
}

fn column_index(letters: &[u8]) -> Option<u32> {
    let mut result: u32 = 0;
    for &b in letters {
        let value = (b.to_ascii_uppercase() - b'A') as u32 + 1;
        result = result.checked_mul(26)?.checked_add(value)?;
    }
    Some(result)
}
