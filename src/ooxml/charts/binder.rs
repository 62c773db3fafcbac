//! Resolves the values behind chart data references.
//!
//! A series reference (`c:numRef`, `c:strRef`, ...) usually carries a cache:
//! the values the authoring application last computed. The cache is the
//! answer whenever it is present. Only a reference without a cache is
//! resolved through its formula against the workbook embedded in the chart.
use std::rc::Rc;

use log::trace;

use crate::ooxml::charts::formula::parse_formula;
use crate::ooxml::charts::workbook::EmbeddedWorkbook;
use crate::ooxml::charts::workbook_cache::WorkbookCache;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::relationship_type as RT;
use crate::ooxml::opc::{OpcPackage, PackURI, Part};
use crate::ooxml::oxml::XmlElement;

/// Options for chart data resolution.
///
/// # Examples
///
/// ```
/// use slidecascade::ooxml::charts::ChartDataOptions;
///
/// let options = ChartDataOptions::new().with_cached_number_rounding(false);
/// assert!(!options.round_cached_numbers);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDataOptions {
    /// Round cached numbers to one decimal place, as they are displayed by
    /// the authoring application (default: true). Values read from the
    /// embedded workbook are never rounded.
    pub round_cached_numbers: bool,
}

impl Default for ChartDataOptions {
    fn default() -> Self {
        Self {
            round_cached_numbers: true,
        }
    }
}

impl ChartDataOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cached_number_rounding(mut self, round: bool) -> Self {
        self.round_cached_numbers = round;
        self
    }
}

/// One `c:pt` of a cache or literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPoint {
    pub index: u32,
    pub value: String,
}

/// Where the values of a reference come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Snapshot written into the chart part
    Cached(Vec<CachedPoint>),
    /// Values written inline without any formula (`c:numLit`, `c:strLit`, `c:v`)
    Literal(Vec<CachedPoint>),
    /// Cells of the embedded workbook `package` addressed by `formula`
    Linked { formula: String, package: PackURI },
}

const REFERENCE_KINDS: [&str; 6] = ["numRef", "strRef", "multiLvlStrRef", "numLit", "strLit", "v"];

/// Resolves references of one chart part.
#[derive(Clone, Copy)]
pub struct ChartDataBinder<'a> {
    package: &'a OpcPackage,
    chart_part: &'a dyn Part,
    workbooks: &'a WorkbookCache,
    options: &'a ChartDataOptions,
}

impl<'a> ChartDataBinder<'a> {
    pub fn new(
        package: &'a OpcPackage,
        chart_part: &'a dyn Part,
        workbooks: &'a WorkbookCache,
        options: &'a ChartDataOptions,
    ) -> Self {
        Self {
            package,
            chart_part,
            workbooks,
            options,
        }
    }

    /// Numeric values of a reference, in document order.
    ///
    /// Empty linked cells count as `0`; any other cell text that is not a
    /// number is an error.
    pub fn resolve_numbers(&self, reference: &XmlElement) -> Result<Vec<f64>> {
        match self.value_source(reference)? {
            ValueSource::Cached(points) => points
                .iter()
                .map(|pt| {
                    let value = parse_number(&pt.value)?;
                    Ok(if self.options.round_cached_numbers {
                        round_one_decimal(value)
                    } else {
                        value
                    })
                })
                .collect(),
            ValueSource::Literal(points) => points.iter().map(|pt| parse_number(&pt.value)).collect(),
            ValueSource::Linked { formula, package } => self
                .linked_cells(&formula, &package)?
                .iter()
                .map(|text| if text.is_empty() { Ok(0.0) } else { parse_number(text) })
                .collect(),
        }
    }

    /// Text values of a reference (categories), in document order.
    pub fn resolve_strings(&self, reference: &XmlElement) -> Result<Vec<String>> {
        match self.value_source(reference)? {
            ValueSource::Cached(points) | ValueSource::Literal(points) => {
                Ok(points.into_iter().map(|pt| pt.value).collect())
            }
            ValueSource::Linked { formula, package } => self.linked_cells(&formula, &package),
        }
    }

    /// The one text value of a reference, such as a series name.
    ///
    /// Zero or several values is an error.
    pub fn resolve_single_string(&self, reference: &XmlElement) -> Result<String> {
        let mut values = self.resolve_strings(reference)?;
        if values.len() != 1 {
            return Err(OoxmlError::ChartData(format!(
                "expected a single value, reference resolves to {}",
                values.len()
            )));
        }
        Ok(values.swap_remove(0))
    }

    /// Classify a reference. Accepts the reference element itself or a
    /// container such as `c:val`, `c:cat` or `c:tx`.
    pub fn value_source(&self, reference: &XmlElement) -> Result<ValueSource> {
        let reference = data_reference(reference).ok_or_else(|| {
            OoxmlError::ChartData(format!("<{}> holds no data reference", reference.name()))
        })?;

        match reference.local_name() {
            "v" => {
                return Ok(ValueSource::Literal(vec![CachedPoint {
                    index: 0,
                    value: reference.text(),
                }]));
            }
            "numLit" | "strLit" => return Ok(ValueSource::Literal(read_points(reference))),
            _ => {}
        }

        let cache_name = match reference.local_name() {
            "numRef" => "numCache",
            "strRef" => "strCache",
            _ => "multiLvlStrCache",
        };
        if let Some(cache) = reference.child(cache_name) {
            trace!("{} resolved from its cache", reference.name());
            let points = if cache.is("multiLvlStrCache") {
                cache.child("lvl").map(read_points).unwrap_or_default()
            } else {
                read_points(cache)
            };
            return Ok(ValueSource::Cached(points));
        }

        if reference.is("multiLvlStrRef") {
            return Err(OoxmlError::ChartData(
                "multi-level category reference without a cache".to_string(),
            ));
        }
        let formula = reference
            .child("f")
            .map(XmlElement::text)
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| {
                OoxmlError::ChartData(format!("<{}> has neither a cache nor a formula", reference.name()))
            })?;
        let package = self.embedded_package()?;
        Ok(ValueSource::Linked { formula, package })
    }

    /// Part name of the workbook embedded in this chart.
    ///
    /// `c:externalData/@r:id` names it; a chart without that element falls
    /// back to its first `package` relationship.
    pub fn embedded_package(&self) -> Result<PackURI> {
        let rels = self.chart_part.rels();
        let external_rid = self
            .chart_part
            .element()
            .and_then(|root| root.child("externalData"))
            .and_then(|data| data.attr("r:id"));
        let rel = match external_rid {
            Some(r_id) => rels.get(r_id).ok_or_else(|| {
                OoxmlError::InvalidRelationship(format!(
                    "externalData {} missing from {}",
                    r_id,
                    self.chart_part.partname()
                ))
            })?,
            None => rels.first_with_reltype(RT::PACKAGE).ok_or_else(|| {
                OoxmlError::ChartData(format!(
                    "{} has no embedded workbook",
                    self.chart_part.partname()
                ))
            })?,
        };
        Ok(rel.target_partname()?)
    }

    /// The embedded workbook, opened once per presentation.
    pub fn embedded_workbook(&self) -> Result<Rc<EmbeddedWorkbook>> {
        let partname = self.embedded_package()?;
        self.workbook(&partname)
    }

    fn workbook(&self, partname: &PackURI) -> Result<Rc<EmbeddedWorkbook>> {
        self.workbooks.get_or_open(partname, || {
            let part = self.package.get_part(partname)?;
            EmbeddedWorkbook::from_bytes(&part.blob()).map_err(|source| OoxmlError::WorkbookOpen {
                part: partname.to_string(),
                source,
            })
        })
    }

    /// Raw text of each addressed cell; cells the sheet does not store are empty.
    fn linked_cells(&self, formula: &str, package: &PackURI) -> Result<Vec<String>> {
        let parsed = parse_formula(formula)?;
        let workbook = self.workbook(package)?;
        let sheet = match parsed.sheet_name.as_deref() {
            Some(name) => workbook.worksheet(name),
            None => workbook.worksheets().first(),
        }
        .ok_or_else(|| {
            OoxmlError::ChartData(format!(
                "sheet '{}' not found in {}",
                parsed.sheet_name.as_deref().unwrap_or_default(),
                package
            ))
        })?;
        trace!("{} resolved from {} ({} cells)", formula, package, parsed.addresses.len());

        Ok(parsed
            .addresses
            .iter()
            .map(|address| sheet.cell_text(address).unwrap_or_default().to_string())
            .collect())
    }
}

fn data_reference(element: &XmlElement) -> Option<&XmlElement> {
    if REFERENCE_KINDS.contains(&element.local_name()) {
        return Some(element);
    }
    element
        .children()
        .find(|child| REFERENCE_KINDS.contains(&child.local_name()))
}

fn read_points(container: &XmlElement) -> Vec<CachedPoint> {
    container
        .children_named("pt")
        .enumerate()
        .map(|(position, pt)| CachedPoint {
            index: pt
                .attr("idx")
                .and_then(|idx| atoi_simd::parse::<u32, false, false>(idx.as_bytes()).ok())
                .unwrap_or(position as u32),
            value: pt.child("v").map(XmlElement::text).unwrap_or_default(),
        })
        .collect()
}

fn parse_number(text: &str) -> Result<f64> {
    fast_float2::parse::<f64, _>(text.trim())
        .map_err(|_| OoxmlError::ChartData(format!("'{}' is not a number", text)))
}

#[inline]
fn round_one_decimal(value: f64) -> f64 {
    let scaled = value * 10.0;
    if scaled.is_finite() {
        scaled.round() / 10.0
    } else {
        value
    }
}
