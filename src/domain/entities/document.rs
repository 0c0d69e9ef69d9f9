#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_pt: f64,
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    pub const fn regular(font_pt: f64) -> Self {
        Self {
            font_pt,
            bold: false,
            italic: false,
        }
    }

    pub const fn bold(font_pt: f64) -> Self {
        Self {
            font_pt,
            bold: true,
            italic: false,
        }
    }

    pub const fn italic(font_pt: f64) -> Self {
        Self {
            font_pt,
            bold: false,
            italic: true,
        }
    }
}

/// A centered paragraph above the table. Empty text renders a blank line.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableRowSpec {
    /// One cell per column.
    Cells { texts: Vec<String>, style: TextStyle },
    /// A single cell spanning every column.
    Merged { text: String, style: TextStyle },
}

impl TableRowSpec {
    pub fn style(&self) -> TextStyle {
        match self {
            TableRowSpec::Cells { style, .. } | TableRowSpec::Merged { style, .. } => *style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width_in: f64,
    pub height_in: f64,
    pub margin_in: f64,
    pub landscape: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSpec {
    /// Eighths of a point.
    pub size: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDocument {
    pub page: PageSetup,
    pub font_name: String,
    pub captions: Vec<Caption>,
    pub column_widths_in: Vec<f64>,
    pub rows: Vec<TableRowSpec>,
    pub border: BorderSpec,
}

impl TableDocument {
    pub fn column_count(&self) -> usize {
        self.column_widths_in.len()
    }
}
