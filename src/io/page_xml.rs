//! PAGE XML (Transkribus/PRImA) annotation loading.
//!
//! Reads the subset of the PAGE format the pipeline needs: page dimensions,
//! the image file reference, and each `TextLine`'s `Baseline` polyline and
//! `TextEquiv/Unicode` transcription. Everything else (regions, reading
//! order, word-level geometry) is skipped.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::core::errors::{SegResult, SegmentationError};
use crate::core::validation::validate_page_dimensions;
use crate::domain::{Page, Point, TextLine};

/// Loads a page from a PAGE XML annotation file.
pub fn load_page(path: &Path) -> SegResult<Page> {
    let context = path.display().to_string();
    let xml = std::fs::read_to_string(path)?;
    parse_page(&xml, &context)
}

/// Parses a page from PAGE XML content.
///
/// `context` names the source (normally the file path) in error messages.
///
/// # Errors
///
/// * [`SegmentationError::AnnotationParse`] on missing or unreadable page
///   attributes
/// * [`SegmentationError::MalformedGeometry`] on baseline coordinate tokens
///   that are not 2D points
/// * [`SegmentationError::Xml`] on malformed XML
pub fn parse_page(xml: &str, context: &str) -> SegResult<Page> {
    let mut reader = Reader::from_str(xml);

    let mut page_attrs: Option<(u32, u32, String)> = None;
    let mut lines: Vec<TextLine> = Vec::new();

    // Parser state for the TextLine currently open, if any.
    let mut current: Option<LineBuilder> = None;
    let mut equiv_text: Option<String> = None;
    let mut in_unicode = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"Page" => page_attrs = Some(read_page_attrs(&e, context)?),
                b"TextLine" => {
                    let id = attribute(&e, b"id")?
                        .unwrap_or_else(|| format!("line-{}", lines.len()));
                    current = Some(LineBuilder::new(id));
                }
                b"Baseline" => read_baseline(&e, current.as_mut())?,
                b"TextEquiv" => {
                    if current.is_some() {
                        equiv_text = Some(String::new());
                    }
                }
                b"Unicode" => {
                    if equiv_text.is_some() {
                        in_unicode = true;
                    }
                }
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"Page" => page_attrs = Some(read_page_attrs(&e, context)?),
                b"Baseline" => read_baseline(&e, current.as_mut())?,
                _ => {}
            },
            Event::Text(t) => {
                if in_unicode {
                    if let Some(buf) = equiv_text.as_mut() {
                        buf.push_str(&t.unescape()?);
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"TextLine" => {
                    if let Some(builder) = current.take() {
                        lines.push(builder.build());
                    }
                    equiv_text = None;
                }
                b"TextEquiv" => {
                    // A TextLine may hold word-level TextEquivs before its
                    // own; the line-level one comes last and wins.
                    if let (Some(builder), Some(text)) = (current.as_mut(), equiv_text.take()) {
                        builder.text = Some(text);
                    }
                }
                b"Unicode" => in_unicode = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    let (width, height, image_file) = page_attrs.ok_or_else(|| {
        SegmentationError::annotation(context, "no Page element with image dimensions found")
    })?;
    validate_page_dimensions(width, height, context)?;

    debug!(context, width, height, lines = lines.len(), "parsed page");

    Ok(Page::new(width, height, image_file, lines))
}

struct LineBuilder {
    id: String,
    baseline: Vec<Point>,
    text: Option<String>,
}

impl LineBuilder {
    fn new(id: String) -> Self {
        Self {
            id,
            baseline: Vec::new(),
            text: None,
        }
    }

    fn build(self) -> TextLine {
        // A missing Baseline element leaves the point list empty; the line
        // validator reports it as corrupt at first geometric use.
        TextLine::new(self.id, self.baseline, self.text)
    }
}

fn read_baseline(element: &BytesStart<'_>, current: Option<&mut LineBuilder>) -> SegResult<()> {
    if let Some(builder) = current {
        if let Some(points) = attribute(element, b"points")? {
            builder.baseline = parse_points(&builder.id, &points)?;
        }
    }
    Ok(())
}

fn read_page_attrs(element: &BytesStart<'_>, context: &str) -> SegResult<(u32, u32, String)> {
    let width = require_attribute(element, b"imageWidth", context)?;
    let height = require_attribute(element, b"imageHeight", context)?;
    let image_file = attribute(element, b"imageFilename")?.ok_or_else(|| {
        SegmentationError::annotation(context, "Page element is missing imageFilename")
    })?;

    let width: u32 = width.parse().map_err(|_| {
        SegmentationError::annotation(context, format!("imageWidth '{}' is not an integer", width))
    })?;
    let height: u32 = height.parse().map_err(|_| {
        SegmentationError::annotation(
            context,
            format!("imageHeight '{}' is not an integer", height),
        )
    })?;

    Ok((width, height, image_file))
}

fn require_attribute(
    element: &BytesStart<'_>,
    name: &[u8],
    context: &str,
) -> SegResult<String> {
    attribute(element, name)?.ok_or_else(|| {
        SegmentationError::annotation(
            context,
            format!(
                "Page element is missing attribute '{}'",
                String::from_utf8_lossy(name)
            ),
        )
    })
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> SegResult<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::InvalidAttr)?;
        if attr.key.local_name().as_ref() == name {
            let value = attr.unescape_value()?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Parses a PAGE `points` attribute (`"x1,y1 x2,y2 …"`) into baseline points.
///
/// Each whitespace-separated token must be exactly two comma-separated
/// integers; anything else is malformed geometry. Negative values parse
/// successfully here and are rejected by the line validator, which names the
/// offending coordinate.
fn parse_points(line_id: &str, raw: &str) -> SegResult<Vec<Point>> {
    let mut points = Vec::new();

    for token in raw.split_whitespace() {
        let coords: Vec<&str> = token.split(',').collect();
        if coords.len() != 2 {
            return Err(SegmentationError::MalformedGeometry {
                line_id: line_id.to_string(),
                detail: format!("coordinate token '{}' is not a 2D point", token),
            });
        }

        let x: i32 = coords[0].parse().map_err(|_| malformed(line_id, token))?;
        let y: i32 = coords[1].parse().map_err(|_| malformed(line_id, token))?;
        points.push(Point::new(x, y));
    }

    Ok(points)
}

fn malformed(line_id: &str, token: &str) -> SegmentationError {
    SegmentationError::MalformedGeometry {
        line_id: line_id.to_string(),
        detail: format!("coordinate token '{}' is not numeric", token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2013-07-15">
  <Page imageFilename="folio_042.jpg" imageWidth="1200" imageHeight="1600">
    <TextRegion id="r1">
      <TextLine id="r1l1">
        <Coords points="100,200 500,200 500,260 100,260"/>
        <Baseline points="100,250 300,252 500,251"/>
        <TextEquiv><Unicode>first line of text</Unicode></TextEquiv>
      </TextLine>
      <TextLine id="r1l2">
        <Baseline points="105,320 495,322"/>
        <TextEquiv><Unicode>second line</Unicode></TextEquiv>
      </TextLine>
      <TextLine id="r1l3">
        <Baseline points="110,390 480,391"/>
      </TextLine>
    </TextRegion>
  </Page>
</PcGts>"#;

    #[test]
    fn test_parses_page_dimensions_and_image() {
        let page = parse_page(SAMPLE, "test").unwrap();
        assert_eq!(page.width(), 1200);
        assert_eq!(page.height(), 1600);
        assert_eq!(page.image_file(), "folio_042.jpg");
    }

    #[test]
    fn test_parses_lines_in_document_order() {
        let page = parse_page(SAMPLE, "test").unwrap();
        assert_eq!(page.lines().len(), 3);
        assert_eq!(page.lines()[0].id(), "r1l1");
        assert_eq!(page.lines()[1].id(), "r1l2");
        assert_eq!(page.lines()[2].id(), "r1l3");

        assert_eq!(
            page.lines()[0].baseline(),
            &[Point::new(100, 250), Point::new(300, 252), Point::new(500, 251)]
        );
        assert_eq!(page.lines()[0].text(), Some("first line of text"));
        assert_eq!(page.lines()[1].text(), Some("second line"));
        // Untranscribed line
        assert_eq!(page.lines()[2].text(), None);
    }

    #[test]
    fn test_region_level_text_is_ignored() {
        let xml = r#"<PcGts>
  <Page imageFilename="p.jpg" imageWidth="100" imageHeight="100">
    <TextRegion id="r1">
      <TextLine id="l1">
        <Baseline points="1,2 3,4"/>
        <TextEquiv><Unicode>line text</Unicode></TextEquiv>
      </TextLine>
      <TextEquiv><Unicode>region text</Unicode></TextEquiv>
    </TextRegion>
  </Page>
</PcGts>"#;
        let page = parse_page(xml, "test").unwrap();
        assert_eq!(page.lines().len(), 1);
        assert_eq!(page.lines()[0].text(), Some("line text"));
    }

    #[test]
    fn test_malformed_point_token_is_rejected() {
        let xml = r#"<PcGts>
  <Page imageFilename="p.jpg" imageWidth="100" imageHeight="100">
    <TextLine id="l1"><Baseline points="1,2,3 4,5"/></TextLine>
  </Page>
</PcGts>"#;
        assert!(matches!(
            parse_page(xml, "test"),
            Err(SegmentationError::MalformedGeometry { .. })
        ));
    }

    #[test]
    fn test_non_numeric_point_is_rejected() {
        assert!(matches!(
            parse_points("l1", "1,2 x,5"),
            Err(SegmentationError::MalformedGeometry { .. })
        ));
    }

    #[test]
    fn test_negative_coordinates_survive_parsing() {
        // Negative values are the validator's business, not the parser's.
        let points = parse_points("l1", "-3,4 5,6").unwrap();
        assert_eq!(points[0], Point::new(-3, 4));
    }

    #[test]
    fn test_missing_page_element_is_rejected() {
        assert!(matches!(
            parse_page("<PcGts></PcGts>", "test"),
            Err(SegmentationError::AnnotationParse { .. })
        ));
    }

    #[test]
    fn test_zero_dimensions_are_rejected() {
        let xml = r#"<PcGts><Page imageFilename="p.jpg" imageWidth="0" imageHeight="100"/></PcGts>"#;
        assert!(parse_page(xml, "test").is_err());
    }
}
