use std::fmt::Write as FmtWrite;

use quick_xml::escape::escape;

use crate::domain::entities::document::{
    BorderSpec, Caption, PageSetup, TableDocument, TableRowSpec, TextStyle,
};
use crate::error::DocumentError;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

type Result<T> = std::result::Result<T, DocumentError>;

/// Inches to twentieths of a point.
pub fn twips(inches: f64) -> u32 {
    (inches * 1440.0).round() as u32
}

fn half_points(pt: f64) -> u32 {
    (pt * 2.0).round() as u32
}

/// Drops characters XML 1.0 cannot carry.
fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            (c == '\t' || c == '\n' || c == '\r' || c >= ' ') && c != '\u{FFFE}' && c != '\u{FFFF}'
        })
        .collect()
}

fn write_run_properties(xml: &mut String, font: &str, style: TextStyle) -> Result<()> {
    let font = escape(font);
    write!(
        xml,
        r#"<w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
    )?;
    if style.bold {
        xml.push_str("<w:b/><w:bCs/>");
    }
    if style.italic {
        xml.push_str("<w:i/><w:iCs/>");
    }
    let size = half_points(style.font_pt);
    write!(xml, r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr>"#)?;
    Ok(())
}

/// A centered paragraph; line breaks in `text` become `<w:br/>`.
fn write_paragraph(xml: &mut String, text: &str, font: &str, style: TextStyle) -> Result<()> {
    xml.push_str(r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr>"#);
    if !text.is_empty() {
        xml.push_str("<w:r>");
        write_run_properties(xml, font, style)?;
        let text = sanitize(text).replace("\r\n", "\n");
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                xml.push_str("<w:br/>");
            }
            write!(xml, r#"<w:t xml:space="preserve">{}</w:t>"#, escape(line))?;
        }
        xml.push_str("</w:r>");
    }
    xml.push_str("</w:p>");
    Ok(())
}

fn write_caption(xml: &mut String, caption: &Caption, font: &str) -> Result<()> {
    write_paragraph(xml, &caption.text, font, caption.style)
}

fn write_borders(xml: &mut String, border: BorderSpec) -> Result<()> {
    xml.push_str("<w:tblBorders>");
    for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        write!(
            xml,
            r#"<w:{side} w:val="single" w:sz="{}" w:space="0" w:color="{}"/>"#,
            border.size, border.color
        )?;
    }
    xml.push_str("</w:tblBorders>");
    Ok(())
}

fn write_cell(
    xml: &mut String,
    text: &str,
    width: u32,
    span: usize,
    font: &str,
    style: TextStyle,
) -> Result<()> {
    xml.push_str("<w:tc><w:tcPr>");
    write!(xml, r#"<w:tcW w:w="{width}" w:type="dxa"/>"#)?;
    if span > 1 {
        write!(xml, r#"<w:gridSpan w:val="{span}"/>"#)?;
    }
    xml.push_str(r#"<w:vAlign w:val="center"/></w:tcPr>"#);
    write_paragraph(xml, text, font, style)?;
    xml.push_str("</w:tc>");
    Ok(())
}

fn write_table(xml: &mut String, document: &TableDocument) -> Result<()> {
    let widths: Vec<u32> = document
        .column_widths_in
        .iter()
        .map(|&w| twips(w))
        .collect();
    let total: u32 = widths.iter().sum();
    let font = document.font_name.as_str();

    xml.push_str("<w:tbl><w:tblPr>");
    write!(xml, r#"<w:tblW w:w="{total}" w:type="dxa"/>"#)?;
    xml.push_str(r#"<w:jc w:val="center"/>"#);
    write_borders(xml, document.border)?;
    xml.push_str(r#"<w:tblLayout w:type="fixed"/></w:tblPr>"#);

    xml.push_str("<w:tblGrid>");
    for width in &widths {
        write!(xml, r#"<w:gridCol w:w="{width}"/>"#)?;
    }
    xml.push_str("</w:tblGrid>");

    for row in &document.rows {
        xml.push_str("<w:tr>");
        let style = row.style();
        match row {
            TableRowSpec::Cells { texts, .. } => {
                for (idx, width) in widths.iter().enumerate() {
                    let text = texts.get(idx).map(String::as_str).unwrap_or("");
                    write_cell(xml, text, *width, 1, font, style)?;
                }
            }
            TableRowSpec::Merged { text, .. } => {
                write_cell(xml, text, total, document.column_count(), font, style)?;
            }
        }
        xml.push_str("</w:tr>");
    }

    xml.push_str("</w:tbl>");
    Ok(())
}

fn write_section(xml: &mut String, page: PageSetup) -> Result<()> {
    let orient = if page.landscape {
        "landscape"
    } else {
        "portrait"
    };
    let margin = twips(page.margin_in);
    write!(
        xml,
        r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}" w:orient="{orient}"/>"#,
        twips(page.width_in),
        twips(page.height_in)
    )?;
    write!(
        xml,
        r#"<w:pgMar w:top="{margin}" w:right="{margin}" w:bottom="{margin}" w:left="{margin}" w:header="{margin}" w:footer="{margin}" w:gutter="0"/></w:sectPr>"#
    )?;
    Ok(())
}

pub fn document_xml(document: &TableDocument) -> Result<String> {
    let mut xml = String::with_capacity(4096 + document.rows.len() * 1024);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<w:document xmlns:w="{NS_W}" xmlns:r="{NS_R}"><w:body>"#)?;

    for caption in &document.captions {
        write_caption(&mut xml, caption, &document.font_name)?;
    }
    write_table(&mut xml, document)?;
    // A table may not be the last body element before sectPr.
    xml.push_str("<w:p/>");
    write_section(&mut xml, document.page)?;

    xml.push_str("</w:body></w:document>");
    Ok(xml)
}

pub fn styles_xml(font: &str, body_pt: f64) -> Result<String> {
    let font = escape(font);
    let size = half_points(body_pt);
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<w:styles xmlns:w="{NS_W}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>"#
    )?;
    xml.push_str(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
    );
    xml.push_str(
        r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>"#,
    );
    xml.push_str("</w:styles>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document(rows: Vec<TableRowSpec>) -> TableDocument {
        TableDocument {
            page: PageSetup {
                width_in: 11.69,
                height_in: 8.27,
                margin_in: 0.5,
                landscape: true,
            },
            font_name: "Roboto".to_string(),
            captions: vec![Caption {
                text: "Title".to_string(),
                style: TextStyle::bold(14.0),
            }],
            column_widths_in: vec![1.0, 2.0],
            rows,
            border: BorderSpec {
                size: 4,
                color: "000000",
            },
        }
    }

    #[test]
    fn twips_rounds_to_nearest() {
        assert_eq!(twips(11.69), 16834);
        assert_eq!(twips(8.27), 11909);
        assert_eq!(twips(0.5), 720);
    }

    #[test]
    fn page_is_landscape_a4_with_half_inch_margins() {
        let xml = document_xml(&sample_document(Vec::new())).expect("xml should render");

        assert!(xml.contains(r#"<w:pgSz w:w="16834" w:h="11909" w:orient="landscape"/>"#));
        assert!(xml.contains(r#"w:top="720" w:right="720" w:bottom="720" w:left="720""#));
    }

    #[test]
    fn merged_row_spans_every_column() {
        let xml = document_xml(&sample_document(vec![TableRowSpec::Merged {
            text: "Beam".to_string(),
            style: TextStyle::bold(12.0),
        }]))
        .expect("xml should render");

        assert!(xml.contains(r#"<w:tcW w:w="4320" w:type="dxa"/><w:gridSpan w:val="2"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="24"/>"#));
        assert_eq!(xml.matches("<w:tc>").count(), 1);
    }

    #[test]
    fn every_border_is_thin_single_black() {
        let xml = document_xml(&sample_document(Vec::new())).expect("xml should render");

        for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            let expected =
                format!(r#"<w:{side} w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#);
            assert!(xml.contains(&expected), "missing border {side}");
        }
    }

    #[test]
    fn cell_text_is_escaped_and_split_on_newlines() {
        let xml = document_xml(&sample_document(vec![TableRowSpec::Cells {
            texts: vec!["a < b & c".to_string(), "line1\nline2\u{1}".to_string()],
            style: TextStyle::regular(11.0),
        }]))
        .expect("xml should render");

        assert!(xml.contains("a &lt; b &amp; c"));
        assert!(xml.contains(r#"line1</w:t><w:br/><w:t xml:space="preserve">line2</w:t>"#));
        assert!(xml.contains(r#"<w:vAlign w:val="center"/>"#));
    }

    #[test]
    fn empty_cell_still_has_a_paragraph() {
        let xml = document_xml(&sample_document(vec![TableRowSpec::Cells {
            texts: vec![String::new()],
            style: TextStyle::regular(11.0),
        }]))
        .expect("xml should render");

        assert_eq!(xml.matches("<w:tc>").count(), 2, "short rows are padded");
        assert!(xml.contains(r#"</w:tcPr><w:p><w:pPr><w:jc w:val="center"/></w:pPr></w:p></w:tc>"#));
    }

    #[test]
    fn characters_outside_xml_are_dropped() {
        assert_eq!(sanitize("a\u{0}b\u{FFFE}c\u{FFFF}d\te"), "abcd\te");

        let document = sample_document(vec![TableRowSpec::Merged {
            text: "Wall\u{FFFF}".to_string(),
            style: TextStyle::bold(12.0),
        }]);
        let xml = document_xml(&document).expect("xml should render");

        assert!(xml.contains(r#"<w:t xml:space="preserve">Wall</w:t>"#));
        assert!(!xml.contains('\u{FFFF}'));
    }
}
