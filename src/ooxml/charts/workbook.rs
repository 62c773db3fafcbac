//! The spreadsheet embedded behind a chart.
//!
//! Only what chart data binding needs is read: the sheet list, the shared
//! string table and the raw text of every cell.
use std::collections::HashMap;

use log::debug;

use crate::ooxml::charts::formula::{CellAddress, MAX_ROW};
use crate::ooxml::opc::constants::relationship_type as RT;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::{OpcPackage, Part};
use crate::ooxml::oxml::XmlElement;

/// One worksheet: its declared name and the raw text of its cells.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    name: String,
    cells: HashMap<CellAddress, String>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: HashMap::new(),
        }
    }

    pub fn with_cell(mut self, address: CellAddress, text: impl Into<String>) -> Self {
        self.cells.insert(address, text.into());
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw text of a cell; `None` for a cell the sheet does not store.
    pub fn cell_text(&self, address: &CellAddress) -> Option<&str> {
        self.cells.get(address).map(String::as_str)
    }

    /// `(address, raw text)` pairs in row-major order.
    pub fn cells(&self) -> Vec<(CellAddress, &str)> {
        let mut cells: Vec<(CellAddress, &str)> = self
            .cells
            .iter()
            .map(|(address, text)| (*address, text.as_str()))
            .collect();
        cells.sort_unstable_by_key(|(address, _)| *address);
        cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmbeddedWorkbook {
    sheets: Vec<Worksheet>,
}

impl EmbeddedWorkbook {
    pub fn from_sheets(sheets: Vec<Worksheet>) -> Self {
        Self { sheets }
    }

    /// Open the bytes of an embedded `.xlsx` part.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_package(&OpcPackage::from_bytes(bytes)?)
    }

    pub fn from_package(package: &OpcPackage) -> Result<Self> {
        let workbook_part = package.main_document_part()?;
        let workbook = xml_root(workbook_part)?;

        let shared_strings = match package.related_part_by_reltype(workbook_part, RT::SHARED_STRINGS)? {
            Some(part) => read_shared_strings(xml_root(part)?),
            None => Vec::new(),
        };

        let mut sheets = Vec::new();
        if let Some(sheet_list) = workbook.child("sheets") {
            for sheet in sheet_list.children_named("sheet") {
                let name = sheet.attr("name").unwrap_or_default();
                let r_id = sheet.attr("r:id").ok_or_else(|| malformed(workbook_part, "sheet without r:id"))?;
                let sheet_part = package.related_part(workbook_part, r_id)?;
                let cells = read_cells(sheet_part, &shared_strings)?;
                debug!("read sheet '{}' with {} cells", name, cells.len());
                sheets.push(Worksheet {
                    name: name.to_string(),
                    cells,
                });
            }
        }
        Ok(Self { sheets })
    }

    /// First worksheet with the given name. An exact match wins over a
    /// case-insensitive one.
    pub fn worksheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .or_else(|| self.sheets.iter().find(|sheet| sheet.name.eq_ignore_ascii_case(name)))
    }

    pub fn worksheets(&self) -> &[Worksheet] {
        &self.sheets
    }
}

fn xml_root(part: &dyn Part) -> Result<&XmlElement> {
    part.element().ok_or_else(|| malformed(part, "not an XML part"))
}

fn malformed(part: &dyn Part, reason: &str) -> OpcError {
    OpcError::MalformedPart {
        part: part.partname().to_string(),
        reason: reason.to_string(),
    }
}

fn read_shared_strings(sst: &XmlElement) -> Vec<String> {
    sst.children_named("si").map(string_item_text).collect()
}

fn read_cells(sheet_part: &dyn Part, shared_strings: &[String]) -> Result<HashMap<CellAddress, String>> {
    let root = xml_root(sheet_part)?;
    let mut cells = HashMap::new();
    let Some(sheet_data) = root.child("sheetData") else {
        return Ok(cells);
    };

    let mut row_number = 0u32;
    for row in sheet_data.children_named("row") {
        row_number = match row.attr("r") {
            Some(r) => atoi_simd::parse::<u32, false, false>(r.as_bytes())
                .ok()
                .filter(|r| (1..=MAX_ROW).contains(r))
                .ok_or_else(|| malformed(sheet_part, "invalid row number"))?,
            None => row_number
                .checked_add(1)
                .filter(|r| *r <= MAX_ROW)
                .ok_or_else(|| malformed(sheet_part, "row number out of range"))?,
        };

        let mut column = 0u32;
        for cell in row.children_named("c") {
            let address = match cell.attr("r") {
                Some(r) => r
                    .parse::<CellAddress>()
                    .map_err(|_| malformed(sheet_part, "invalid cell reference"))?,
                None => CellAddress::new(column + 1, row_number),
            };
            column = address.column();

            let text = match cell.attr("t") {
                Some("s") => {
                    let v = cell.child("v").map(XmlElement::text).unwrap_or_default();
                    let idx = atoi_simd::parse::<u32, false, false>(v.trim().as_bytes())
                        .map_err(|_| malformed(sheet_part, "invalid shared string index"))?;
                    shared_strings
                        .get(idx as usize)
                        .cloned()
                        .ok_or_else(|| malformed(sheet_part, "shared string index out of range"))?
                }
                Some("inlineStr") => cell.child("is").map(string_item_text).unwrap_or_default(),
                _ => cell.child("v").map(XmlElement::text).unwrap_or_default(),
            };
            cells.insert(address, text);
        }
    }
    Ok(cells)
}

/// Text of a shared string item or an inline string. Phonetic runs (`rPh`)
/// are not part of the value.
fn string_item_text(item: &XmlElement) -> String {
    match item.child("t") {
        Some(t) => t.text(),
        None => item
            .children_named("r")
            .filter_map(|r| r.child("t"))
            .map(XmlElement::text)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::testing::XlsxFixture;

    #[test]
    fn test_reads_cells_of_every_type() {
        let bytes = XlsxFixture::new()
            .shared_strings(&["Region", "North"])
            .sheet(
                "Data",
                r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="inlineStr"><is><t>Sales</t></is></c></row>
                   <row r="2"><c r="A2" t="s"><v>1</v></c><c r="B2"><v>12.5</v></c><c r="C2" t="b"><v>1</v></c></row>
                   <row><c><v>7</v></c><c/></row>"#,
            )
            .sheet("Empty", "")
            .build();
        let workbook = EmbeddedWorkbook::from_bytes(&bytes).unwrap();
        assert_eq!(workbook.worksheets().len(), 2);

        let data = workbook.worksheet("Data").unwrap();
        let text = |a: &str| data.cell_text(&a.parse().unwrap());
        assert_eq!(text("A1"), Some("Region"));
        assert_eq!(text("B1"), Some("Sales"));
        assert_eq!(text("A2"), Some("North"));
        assert_eq!(text("B2"), Some("12.5"));
        assert_eq!(text("C2"), Some("1"));
        assert_eq!(text("A3"), Some("7"));
        assert_eq!(text("B3"), Some(""));
        assert_eq!(text("D9"), None);

        let first: Vec<String> = data.cells().iter().take(2).map(|(a, _)| a.to_string()).collect();
        assert_eq!(first, ["A1", "B1"]);
        assert_eq!(workbook.worksheet("empty").unwrap().cell_count(), 0);
        assert!(workbook.worksheet("Missing").is_none());
    }

    #[test]
    fn test_rich_shared_strings_skip_phonetic_runs() {
        let sst = XmlElement::parse(
            br#"<sst><si><r><t>Hel</t></r><r><t>lo</t></r><rPh><t>x</t></rPh></si><si><t>plain</t></si></sst>"#,
        )
        .unwrap();
        assert_eq!(read_shared_strings(&sst), ["Hello", "plain"]);
    }

    #[test]
    fn test_bad_shared_string_index() {
        let bytes = XlsxFixture::new()
            .sheet("Data", r#"<row r="1"><c r="A1" t="s"><v>4</v></c></row>"#)
            .build();
        assert!(matches!(
            EmbeddedWorkbook::from_bytes(&bytes),
            Err(OpcError::MalformedPart { .. })
        ));
    }

    #[test]
    fn test_row_numbers_past_the_sheet_limit() {
        let wrapping = XlsxFixture::new()
            .sheet(
                "Data",
                r#"<row r="4294967295"><c><v>1</v></c></row><row><c><v>2</v></c></row>"#,
            )
            .build();
        assert!(matches!(
            EmbeddedWorkbook::from_bytes(&wrapping),
            Err(OpcError::MalformedPart { .. })
        ));

        let next_past_last = XlsxFixture::new()
            .sheet("Data", r#"<row r="1048576"><c><v>1</v></c></row><row><c><v>2</v></c></row>"#)
            .build();
        assert!(matches!(
            EmbeddedWorkbook::from_bytes(&next_past_last),
            Err(OpcError::MalformedPart { .. })
        ));

        let last = XlsxFixture::new()
            .sheet("Data", r#"<row r="1048575"/><row><c><v>2</v></c></row>"#)
            .build();
        let workbook = EmbeddedWorkbook::from_bytes(&last).unwrap();
        let sheet = workbook.worksheet("Data").unwrap();
        assert_eq!(sheet.cell_text(&CellAddress::new(1, MAX_ROW)), Some("2"));
    }
}
