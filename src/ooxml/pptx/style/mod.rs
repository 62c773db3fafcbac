//! Effective text properties.
//!
//! A property that is not written on a paragraph or run is inherited, per
//! indent level, from the shape's own list style, then the matching layout
//! placeholder, then the matching master placeholder, and finally the
//! master's title, body or other text style. Every lookup walks the
//! [`TemplateChain`] as the parts stand at the time of the call.
//!
//! # Example
//!
//! ```rust,no_run
//! use slidecascade::ooxml::pptx::Package;
//! use slidecascade::ooxml::pptx::style::resolve_alignment;
//!
//! let pkg = Package::open("deck.pptx")?;
//! let pres = pkg.presentation()?;
//! for slide in pres.slides()? {
//!     for shape in slide.shapes() {
//!         if let Some(frame) = shape.text_frame() {
//!             for para in frame.paragraphs() {
//!                 println!("{:?}", resolve_alignment(&para)?);
//!             }
//!         }
//!     }
//! }
//! # Ok::<(), slidecascade::ooxml::OoxmlError>(())
//! ```
pub mod cascade;
pub mod text;

pub use cascade::{TemplateChain, Tier};
pub use text::{FontColor, IndentLevel, TextAlignment};

use crate::common::RGBColor;
use crate::common::unit::centipoints_to_pt;
use crate::ooxml::error::Result;
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::shapes::{Paragraph, Portion, Shape};

fn alignment_of(props: &XmlElement) -> Option<TextAlignment> {
    props.attr("algn").and_then(TextAlignment::from_token)
}

fn margin_of(props: &XmlElement) -> Option<i64> {
    props
        .attr("marL")
        .and_then(|m| atoi_simd::parse::<i64, false, false>(m.as_bytes()).ok())
}

fn size_of(run_props: &XmlElement) -> Option<f64> {
    run_props
        .attr("sz")
        .and_then(|sz| atoi_simd::parse::<i32, false, false>(sz.as_bytes()).ok())
        .map(centipoints_to_pt)
}

fn color_of(run_props: &XmlElement) -> Option<FontColor> {
    run_props.child("solidFill").and_then(FontColor::from_fill)
}

fn bold_of(run_props: &XmlElement) -> Option<bool> {
    match run_props.attr("b")? {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

fn latin_of(run_props: &XmlElement) -> Option<&str> {
    run_props.child("latin").and_then(|latin| latin.attr("typeface"))
}

/// Read a run property off the `a:defRPr` of a level element.
fn level_run<'a, T>(read: impl Fn(&'a XmlElement) -> Option<T>) -> impl Fn(&'a XmlElement) -> Option<T> {
    move |level| level.child("defRPr").and_then(&read)
}

fn cascade<'a, T>(
    shape: &Shape<'a>,
    level: IndentLevel,
    local: Option<T>,
    read: impl Fn(&'a XmlElement) -> Option<T>,
) -> Result<Option<T>> {
    if local.is_some() {
        return Ok(local);
    }
    Ok(shape.template_chain()?.resolve(level, None, read))
}

/// Effective paragraph alignment; Left when nothing in the chain sets one.
pub fn resolve_alignment(paragraph: &Paragraph<'_>) -> Result<TextAlignment> {
    let local = paragraph.properties().and_then(alignment_of);
    let resolved = cascade(paragraph.shape(), paragraph.indent_level(), local, alignment_of)?;
    Ok(resolved.unwrap_or_default())
}

/// Effective font size in points.
///
/// With a portion, its `a:rPr/@sz` is the local value; without one, the
/// paragraph's `a:endParaRPr/@sz`.
pub fn resolve_font_size(
    paragraph: &Paragraph<'_>,
    portion: Option<&Portion<'_>>,
    level: IndentLevel,
) -> Result<Option<f64>> {
    let local = match portion {
        Some(portion) => portion.properties().and_then(size_of),
        None => paragraph.end_properties().and_then(size_of),
    };
    cascade(paragraph.shape(), level, local, level_run(size_of))
}

/// Effective fill color of a portion, as written.
pub fn resolve_font_color(portion: &Portion<'_>) -> Result<Option<FontColor>> {
    let paragraph = portion.paragraph();
    let local = portion.properties().and_then(color_of);
    cascade(paragraph.shape(), paragraph.indent_level(), local, level_run(color_of))
}

/// Effective fill color of a portion as RGB.
///
/// Scheme colors go through the master's color map and theme; preset colors
/// are known for the common names only.
pub fn resolve_rgb_color(portion: &Portion<'_>) -> Result<Option<RGBColor>> {
    match resolve_font_color(portion)? {
        None => Ok(None),
        Some(FontColor::Rgb(color)) => Ok(Some(color)),
        Some(FontColor::Preset(name)) => Ok(FontColor::preset_rgb(&name)),
        Some(FontColor::Scheme(name)) => {
            let Some(master) = portion.paragraph().shape().tree().master()? else {
                return Ok(None);
            };
            let Some(theme) = master.theme()? else {
                return Ok(None);
            };
            Ok(theme.resolve_color(&master.color_map(), &name))
        },
    }
}

/// Whether a portion is bold; not bold when nothing in the chain says so.
pub fn resolve_bold(portion: &Portion<'_>) -> Result<bool> {
    let paragraph = portion.paragraph();
    let local = portion.properties().and_then(bold_of);
    let resolved = cascade(paragraph.shape(), paragraph.indent_level(), local, level_run(bold_of))?;
    Ok(resolved.unwrap_or(false))
}

/// Effective latin typeface, with `+mj-lt`/`+mn-lt` taken from the theme.
pub fn resolve_latin_font(portion: &Portion<'_>) -> Result<Option<String>> {
    let paragraph = portion.paragraph();
    let shape = paragraph.shape();
    let local = portion.properties().and_then(latin_of);
    let Some(typeface) = cascade(shape, paragraph.indent_level(), local, level_run(latin_of))? else {
        return Ok(None);
    };
    if !typeface.starts_with('+') {
        return Ok(Some(typeface.to_string()));
    }
    let theme = match shape.tree().master()? {
        Some(master) => master.theme()?,
        None => None,
    };
    Ok(theme
        .and_then(|theme| theme.resolve_typeface(typeface))
        .map(str::to_string))
}

/// Effective left margin of a paragraph, in EMU.
pub fn resolve_left_margin(paragraph: &Paragraph<'_>) -> Result<Option<i64>> {
    let local = paragraph.properties().and_then(margin_of);
    cascade(paragraph.shape(), paragraph.indent_level(), local, margin_of)
}
