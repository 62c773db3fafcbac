//! Charts and their series.
use crate::ooxml::charts::binder::ChartDataBinder;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::Part;
use crate::ooxml::oxml::XmlElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    /// Horizontal bars
    Bar,
    /// Vertical bars
    Column,
    Line,
    Pie,
    Area,
    Scatter,
    Bubble,
    Doughnut,
    Radar,
    Surface,
    Stock,
    Unknown,
}

impl ChartType {
    fn from_plot(plot: &XmlElement) -> Self {
        match plot.local_name() {
            "barChart" | "bar3DChart" => match plot.child("barDir").and_then(|d| d.attr("val")) {
                Some("bar") => ChartType::Bar,
                _ => ChartType::Column,
            },
            "lineChart" | "line3DChart" => ChartType::Line,
            "pieChart" | "pie3DChart" | "ofPieChart" => ChartType::Pie,
            "areaChart" | "area3DChart" => ChartType::Area,
            "scatterChart" => ChartType::Scatter,
            "bubbleChart" => ChartType::Bubble,
            "doughnutChart" => ChartType::Doughnut,
            "radarChart" => ChartType::Radar,
            "surfaceChart" | "surface3DChart" => ChartType::Surface,
            "stockChart" => ChartType::Stock,
            _ => ChartType::Unknown,
        }
    }
}

/// A chart part, read through its data binder.
#[derive(Clone, Copy)]
pub struct Chart<'a> {
    part: &'a dyn Part,
    root: &'a XmlElement,
    binder: ChartDataBinder<'a>,
}

impl<'a> Chart<'a> {
    pub fn new(part: &'a dyn Part, binder: ChartDataBinder<'a>) -> Result<Self> {
        let root = part.element().ok_or_else(|| {
            OoxmlError::InvalidFormat(format!("{} is not an XML chart part", part.partname()))
        })?;
        Ok(Self { part, root, binder })
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    #[inline]
    pub fn binder(&self) -> ChartDataBinder<'a> {
        self.binder
    }

    fn plot_area(&self) -> Option<&'a XmlElement> {
        self.root.path(&["chart", "plotArea"])
    }

    /// Plot elements (`c:barChart`, `c:lineChart`, ...) in document order.
    fn plots(&self) -> impl Iterator<Item = &'a XmlElement> {
        self.plot_area()
            .into_iter()
            .flat_map(|area| area.children())
            .filter(|e| e.local_name().ends_with("Chart"))
    }

    /// Type of the first plot of the chart.
    pub fn chart_type(&self) -> ChartType {
        self.plots()
            .next()
            .map(ChartType::from_plot)
            .unwrap_or(ChartType::Unknown)
    }

    /// Title text, if the chart has a rich-text title.
    pub fn title(&self) -> Option<String> {
        let title = self.root.path(&["chart", "title"])?;
        let text: String = title.descendants().filter(|e| e.is("t")).map(XmlElement::text).collect();
        if text.is_empty() { None } else { Some(text) }
    }

    pub fn has_legend(&self) -> bool {
        self.root.path(&["chart", "legend"]).is_some()
    }

    /// All series of all plots.
    pub fn series(&self) -> Vec<ChartSeries<'a>> {
        let binder = self.binder;
        self.plots()
            .flat_map(|plot| plot.children_named("ser"))
            .map(|element| ChartSeries { element, binder })
            .collect()
    }
}

/// One `c:ser` of a chart.
#[derive(Clone, Copy)]
pub struct ChartSeries<'a> {
    element: &'a XmlElement,
    binder: ChartDataBinder<'a>,
}

impl<'a> ChartSeries<'a> {
    #[inline]
    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    /// Position of the series among all series of the chart (`c:idx`).
    pub fn index(&self) -> Option<u32> {
        self.element
            .child("idx")
            .and_then(|idx| idx.attr("val"))
            .and_then(|val| atoi_simd::parse::<u32, false, false>(val.as_bytes()).ok())
    }

    /// Series name from `c:tx`, if the series has one.
    pub fn name(&self) -> Result<Option<String>> {
        match self.element.child("tx") {
            Some(tx) => self.binder.resolve_single_string(tx).map(Some),
            None => Ok(None),
        }
    }

    /// Values of the series: `c:val`, or `c:yVal` for XY charts.
    pub fn values(&self) -> Result<Vec<f64>> {
        match self.element.child("val").or_else(|| self.element.child("yVal")) {
            Some(val) => self.binder.resolve_numbers(val),
            None => Ok(Vec::new()),
        }
    }

    /// Category labels: `c:cat`, or `c:xVal` for XY charts.
    pub fn categories(&self) -> Result<Vec<String>> {
        match self.element.child("cat").or_else(|| self.element.child("xVal")) {
            Some(cat) => self.binder.resolve_strings(cat),
            None => Ok(Vec::new()),
        }
    }
}
