//! In-memory packages for unit tests.
use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::ooxml::opc::constants::{content_type as CT, relationship_type as RT};
use crate::ooxml::pptx::Package;

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

/// Zip the given members, stored uncompressed.
pub(crate) fn zip_binary_members(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip_data = Vec::new();
    {
        let mut writer = ZipWriter::new(Cursor::new(&mut zip_data));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, data) in members {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }
    zip_data
}

pub(crate) fn zip_members(members: &[(&str, &str)]) -> Vec<u8> {
    let members: Vec<(&str, &[u8])> = members.iter().map(|(n, d)| (*n, d.as_bytes())).collect();
    zip_binary_members(&members)
}

fn relationships(rels: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (r_id, reltype, target) in rels {
        xml.push_str(&format!(r#"<Relationship Id="{r_id}" Type="{reltype}" Target="{target}"/>"#));
    }
    xml.push_str("</Relationships>");
    xml
}

fn content_types(defaults: &[(&str, &str)], overrides: &[(&str, &str)]) -> String {
    let mut xml = String::from(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    for (ext, ct) in defaults {
        xml.push_str(&format!(r#"<Default Extension="{ext}" ContentType="{ct}"/>"#));
    }
    for (partname, ct) in overrides {
        xml.push_str(&format!(r#"<Override PartName="{partname}" ContentType="{ct}"/>"#));
    }
    xml.push_str("</Types>");
    xml
}

/// A minimal spreadsheet package with inline-XML worksheets.
#[derive(Default)]
pub(crate) struct XlsxFixture {
    shared_strings: Vec<String>,
    sheets: Vec<(String, String)>,
}

impl XlsxFixture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn shared_strings(mut self, strings: &[&str]) -> Self {
        self.shared_strings = strings.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Add a sheet; `rows` is the content of `sheetData`.
    pub(crate) fn sheet(mut self, name: &str, rows: &str) -> Self {
        self.sheets.push((name.to_string(), rows.to_string()));
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut overrides = vec![("/xl/workbook.xml".to_string(), CT::SML_SHEET_MAIN)];
        let mut sheets_xml = String::new();
        let mut rels = Vec::new();
        let mut members = Vec::new();

        for (i, (name, rows)) in self.sheets.iter().enumerate() {
            let n = i + 1;
            sheets_xml.push_str(&format!(
                r#"<sheet name="{}" sheetId="{n}" r:id="rId{n}"/>"#,
                escape(name.as_str())
            ));
            rels.push((format!("rId{n}"), RT::WORKSHEET, format!("worksheets/sheet{n}.xml")));
            overrides.push((format!("/xl/worksheets/sheet{n}.xml"), CT::SML_WORKSHEET));
            members.push((
                format!("xl/worksheets/sheet{n}.xml"),
                format!("<worksheet><sheetData>{rows}</sheetData></worksheet>"),
            ));
        }

        if !self.shared_strings.is_empty() {
            let items: String = self
                .shared_strings
                .iter()
                .map(|s| format!("<si><t>{}</t></si>", escape(s.as_str())))
                .collect();
            members.push((
                "xl/sharedStrings.xml".to_string(),
                format!(r#"<sst count="{0}" uniqueCount="{0}">{items}</sst>"#, self.shared_strings.len()),
            ));
            rels.push((format!("rId{}", self.sheets.len() + 1), RT::SHARED_STRINGS, "sharedStrings.xml".to_string()));
            overrides.push(("/xl/sharedStrings.xml".to_string(), CT::SML_SHARED_STRINGS));
        }

        let overrides: Vec<(&str, &str)> = overrides.iter().map(|(p, c)| (p.as_str(), *c)).collect();
        let rels: Vec<(&str, &str, &str)> = rels.iter().map(|(i, t, g)| (i.as_str(), *t, g.as_str())).collect();
        members.push((
            "[Content_Types].xml".to_string(),
            content_types(&[("rels", CT::OPC_RELATIONSHIPS), ("xml", CT::XML)], &overrides),
        ));
        members.push((
            "_rels/.rels".to_string(),
            relationships(&[("rId1", RT::OFFICE_DOCUMENT, "xl/workbook.xml")]),
        ));
        members.push((
            "xl/workbook.xml".to_string(),
            format!(
                r#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{sheets_xml}</sheets></workbook>"#
            ),
        ));
        members.push(("xl/_rels/workbook.xml.rels".to_string(), relationships(&rels)));

        let members: Vec<(&str, &str)> = members.iter().map(|(n, d)| (n.as_str(), d.as_str())).collect();
        zip_members(&members)
    }
}

const DEFAULT_TEXT_STYLES: &str = r#"<p:titleStyle><a:lvl1pPr algn="ctr"><a:defRPr sz="4400"/></a:lvl1pPr></p:titleStyle><p:bodyStyle><a:lvl1pPr marL="228600"><a:defRPr sz="2800"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr><a:lvl2pPr marL="685800" algn="ctr"><a:defRPr sz="2400"/></a:lvl2pPr></p:bodyStyle><p:otherStyle><a:lvl1pPr><a:defRPr sz="1800"/></a:lvl1pPr></p:otherStyle>"#;

const DEFAULT_COLOR_MAP: &str = r#"bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink""#;

const THEME: &str = r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2><a:accent1><a:srgbClr val="4472C4"/></a:accent1></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri Light"/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/></a:minorFont></a:fontScheme></a:themeElements></a:theme>"#;

const SP_TREE_HEAD: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#;

const EMBEDDED_WORKBOOK: &str = "ppt/embeddings/Microsoft_Excel_Worksheet.xlsx";

/// A one-slide presentation: slide → layout → master → theme, with an
/// optional chart (`rId2` of the slide) and embedded workbook.
pub(crate) struct PptxFixture {
    master_shapes: String,
    master_text_styles: String,
    color_map: String,
    layout_shapes: String,
    slide_shapes: String,
    chart: Option<String>,
    workbook: Option<Vec<u8>>,
}

impl PptxFixture {
    pub(crate) fn new() -> Self {
        Self {
            master_shapes: String::new(),
            master_text_styles: DEFAULT_TEXT_STYLES.to_string(),
            color_map: DEFAULT_COLOR_MAP.to_string(),
            layout_shapes: String::new(),
            slide_shapes: String::new(),
            chart: None,
            workbook: None,
        }
    }

    pub(crate) fn master_shapes(mut self, xml: &str) -> Self {
        self.master_shapes = xml.to_string();
        self
    }

    /// Content of the master's `p:txStyles`.
    pub(crate) fn master_text_styles(mut self, xml: &str) -> Self {
        self.master_text_styles = xml.to_string();
        self
    }

    /// Attributes of the master's `p:clrMap`.
    pub(crate) fn color_map(mut self, attributes: &str) -> Self {
        self.color_map = attributes.to_string();
        self
    }

    pub(crate) fn layout_shapes(mut self, xml: &str) -> Self {
        self.layout_shapes = xml.to_string();
        self
    }

    pub(crate) fn slide_shapes(mut self, xml: &str) -> Self {
        self.slide_shapes = xml.to_string();
        self
    }

    pub(crate) fn chart(mut self, xml: &str) -> Self {
        self.chart = Some(xml.to_string());
        self
    }

    pub(crate) fn workbook(mut self, bytes: Vec<u8>) -> Self {
        self.workbook = Some(bytes);
        self
    }

    /// A `p:sp`, optionally a placeholder (`ph` is the `p:ph` element), with
    /// `body` as the content of its text body after `a:bodyPr`.
    pub(crate) fn shape(id: u32, name: &str, ph: Option<&str>, body: &str) -> String {
        format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{}"/><p:cNvSpPr/><p:nvPr>{}</p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/>{body}</p:txBody></p:sp>"#,
            escape(name),
            ph.unwrap_or("")
        )
    }

    /// A chart graphic frame pointing at the slide relationship `r_id`.
    pub(crate) fn chart_frame(id: u32, name: &str, r_id: &str) -> String {
        format!(
            r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{id}" name="{}"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr><p:xfrm/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" r:id="{r_id}"/></a:graphicData></a:graphic></p:graphicFrame>"#,
            escape(name)
        )
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut overrides = vec![
            ("/ppt/presentation.xml", CT::PML_PRESENTATION_MAIN),
            ("/ppt/slides/slide1.xml", CT::PML_SLIDE),
            ("/ppt/slideLayouts/slideLayout1.xml", CT::PML_SLIDE_LAYOUT),
            ("/ppt/slideMasters/slideMaster1.xml", CT::PML_SLIDE_MASTER),
            ("/ppt/theme/theme1.xml", CT::OFC_THEME),
        ];
        let mut slide_rels = vec![("rId1", RT::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml")];
        if self.chart.is_some() {
            overrides.push(("/ppt/charts/chart1.xml", CT::DML_CHART));
            slide_rels.push(("rId2", RT::CHART, "../charts/chart1.xml"));
        }

        let presentation = format!(
            r#"<p:presentation {NS}><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst><p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#
        );
        let master = format!(
            r#"<p:sldMaster {NS}><p:cSld><p:spTree>{SP_TREE_HEAD}{}</p:spTree></p:cSld><p:clrMap {}/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst><p:txStyles>{}</p:txStyles></p:sldMaster>"#,
            self.master_shapes, self.color_map, self.master_text_styles
        );
        let layout = format!(
            r#"<p:sldLayout {NS}><p:cSld name="Title and Content"><p:spTree>{SP_TREE_HEAD}{}</p:spTree></p:cSld></p:sldLayout>"#,
            self.layout_shapes
        );
        let slide = format!(
            r#"<p:sld {NS}><p:cSld><p:spTree>{SP_TREE_HEAD}{}</p:spTree></p:cSld></p:sld>"#,
            self.slide_shapes
        );

        let mut members: Vec<(String, Vec<u8>)> = vec![
            (
                "[Content_Types].xml".to_string(),
                content_types(
                    &[("rels", CT::OPC_RELATIONSHIPS), ("xml", CT::XML), ("xlsx", CT::SML_SHEET)],
                    &overrides,
                )
                .into_bytes(),
            ),
            (
                "_rels/.rels".to_string(),
                relationships(&[("rId1", RT::OFFICE_DOCUMENT, "ppt/presentation.xml")]).into_bytes(),
            ),
            ("ppt/presentation.xml".to_string(), presentation.into_bytes()),
            (
                "ppt/_rels/presentation.xml.rels".to_string(),
                relationships(&[
                    ("rId1", RT::SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
                    ("rId2", RT::SLIDE, "slides/slide1.xml"),
                    ("rId3", RT::THEME, "theme/theme1.xml"),
                ])
                .into_bytes(),
            ),
            ("ppt/slideMasters/slideMaster1.xml".to_string(), master.into_bytes()),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
                relationships(&[
                    ("rId1", RT::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
                    ("rId2", RT::THEME, "../theme/theme1.xml"),
                ])
                .into_bytes(),
            ),
            ("ppt/slideLayouts/slideLayout1.xml".to_string(), layout.into_bytes()),
            (
                "ppt/slideLayouts/_rels/slideLayout1.xml.rels".to_string(),
                relationships(&[("rId1", RT::SLIDE_MASTER, "../slideMasters/slideMaster1.xml")]).into_bytes(),
            ),
            ("ppt/slides/slide1.xml".to_string(), slide.into_bytes()),
            ("ppt/slides/_rels/slide1.xml.rels".to_string(), relationships(&slide_rels).into_bytes()),
            ("ppt/theme/theme1.xml".to_string(), THEME.as_bytes().to_vec()),
        ];

        if let Some(chart) = &self.chart {
            members.push(("ppt/charts/chart1.xml".to_string(), chart.clone().into_bytes()));
            if let Some(workbook) = &self.workbook {
                members.push((
                    "ppt/charts/_rels/chart1.xml.rels".to_string(),
                    relationships(&[("rId1", RT::PACKAGE, "../embeddings/Microsoft_Excel_Worksheet.xlsx")])
                        .into_bytes(),
                ));
                members.push((EMBEDDED_WORKBOOK.to_string(), workbook.clone()));
            }
        }

        let members: Vec<(&str, &[u8])> = members.iter().map(|(n, d)| (n.as_str(), d.as_slice())).collect();
        zip_binary_members(&members)
    }

    pub(crate) fn open(&self) -> Package {
        Package::from_bytes(&self.build()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::charts::EmbeddedWorkbook;

    #[test]
    fn test_fixtures_open() {
        let package = PptxFixture::new().open();
        assert_eq!(package.opc().part_count(), 5);

        let xlsx = XlsxFixture::new().shared_strings(&["a & b"]).sheet("S", "").build();
        let workbook = EmbeddedWorkbook::from_bytes(&xlsx).unwrap();
        assert_eq!(workbook.worksheets().len(), 1);
    }
}
