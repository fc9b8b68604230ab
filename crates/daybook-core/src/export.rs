//! Document exporter
//!
//! Renders one journal entry into a paginated PDF with a fixed visual
//! template. The layout is computed first as a small block list; genpdf
//! owns line wrapping and page breaks, so overflow onto further pages
//! needs no handling here.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use genpdf::{elements, fonts, style, Document, Element, SimplePageDecorator};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::Entry;

/// Directories probed for a usable font family, in order. A configured
/// `font_dir` is tried before any of these.
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/TTF",
    "/usr/local/share/fonts",
];

/// Known family file sets: regular, bold, italic, bold italic
const FONT_SETS: &[[&str; 4]] = &[
    [
        "LiberationSans-Regular.ttf",
        "LiberationSans-Bold.ttf",
        "LiberationSans-Italic.ttf",
        "LiberationSans-BoldItalic.ttf",
    ],
    [
        "DejaVuSans.ttf",
        "DejaVuSans-Bold.ttf",
        "DejaVuSans-Oblique.ttf",
        "DejaVuSans-BoldOblique.ttf",
    ],
];

/// One visual block of the exported document, in layout order
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Entry title, large heading style
    Title(String),
    /// `Mood: {mood}`, secondary style
    MoodLine(String),
    /// `Date: {long date-time}`, tertiary style
    DateLine(String),
    /// One non-blank content line
    Paragraph(String),
    /// A blank content line, rendered as a small vertical spacer
    Gap,
}

/// Compute the fixed layout for an entry
///
/// Content is split on line breaks; non-blank lines become styled
/// paragraphs and blank lines become spacers, so the author's
/// blank-line formatting survives without empty paragraph elements.
pub fn document_blocks(entry: &Entry) -> Vec<Block> {
    let mut blocks = vec![
        Block::Title(entry.title.clone()),
        Block::MoodLine(format!("Mood: {}", entry.mood)),
        Block::DateLine(format!("Date: {}", format_created_at(entry.created_at))),
    ];

    for line in entry.content.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            blocks.push(Block::Gap);
        } else {
            blocks.push(Block::Paragraph(line.to_string()));
        }
    }

    blocks
}

/// Long human-readable date-time on a 12-hour clock,
/// e.g. "March 14, 2024 at 03:30 PM"
fn format_created_at(ts: DateTime<Utc>) -> String {
    ts.format("%B %d, %Y at %I:%M %p").to_string()
}

/// Conventional download filename for an exported entry
///
/// `exported_at` is the wall-clock time of the export, not the entry's
/// creation time.
pub fn export_filename(entry_id: i64, exported_at: DateTime<Utc>) -> String {
    format!(
        "journal_entry_{}_{}.pdf",
        entry_id,
        exported_at.format("%Y%m%d_%H%M%S")
    )
}

/// Renders entries into PDF byte streams
///
/// Holds the raw TrueType data for one font family; genpdf needs the
/// full regular/bold/italic/bold-italic set for text metrics.
pub struct Exporter {
    regular: Vec<u8>,
    bold: Vec<u8>,
    italic: Vec<u8>,
    bold_italic: Vec<u8>,
}

impl Exporter {
    /// Locate and load a usable font family, honoring `Config::font_dir`
    pub fn new(config: &Config) -> Result<Self> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        if let Some(ref dir) = config.font_dir {
            dirs.push(dir.clone());
        }
        dirs.extend(FONT_DIRS.iter().map(PathBuf::from));

        for dir in &dirs {
            for set in FONT_SETS {
                if let Some(exporter) = Self::try_load(dir, set)? {
                    return Ok(exporter);
                }
            }
        }

        let searched = dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::FontDiscovery { searched })
    }

    /// Load a family from `dir` if all four files are present
    fn try_load(dir: &Path, set: &[&str; 4]) -> Result<Option<Self>> {
        let paths: Vec<PathBuf> = set.iter().map(|f| dir.join(f)).collect();
        if !paths.iter().all(|p| p.is_file()) {
            return Ok(None);
        }

        Ok(Some(Self {
            regular: std::fs::read(&paths[0])?,
            bold: std::fs::read(&paths[1])?,
            italic: std::fs::read(&paths[2])?,
            bold_italic: std::fs::read(&paths[3])?,
        }))
    }

    fn font_family(&self) -> Result<fonts::FontFamily<fonts::FontData>> {
        Ok(fonts::FontFamily {
            regular: fonts::FontData::new(self.regular.clone(), None)?,
            bold: fonts::FontData::new(self.bold.clone(), None)?,
            italic: fonts::FontData::new(self.italic.clone(), None)?,
            bold_italic: fonts::FontData::new(self.bold_italic.clone(), None)?,
        })
    }

    /// Render the entry into a complete PDF byte stream
    pub fn render(&self, entry: &Entry) -> Result<Vec<u8>> {
        let mut doc = Document::new(self.font_family()?);
        doc.set_title(entry.title.clone());
        doc.set_minimal_conformance();
        doc.set_line_spacing(1.25);

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(20);
        doc.set_page_decorator(decorator);

        for block in document_blocks(entry) {
            match block {
                Block::Title(text) => {
                    doc.push(elements::Paragraph::new(text).styled(title_style()));
                    doc.push(elements::Break::new(0.5));
                }
                Block::MoodLine(text) => {
                    doc.push(elements::Paragraph::new(text).styled(mood_style()));
                }
                Block::DateLine(text) => {
                    doc.push(elements::Paragraph::new(text).styled(date_style()));
                    doc.push(elements::Break::new(1.0));
                }
                Block::Paragraph(text) => {
                    doc.push(elements::Paragraph::new(text).styled(body_style()));
                }
                Block::Gap => {
                    doc.push(elements::Break::new(0.5));
                }
            }
        }

        let mut buffer = Vec::new();
        doc.render(&mut buffer)?;
        Ok(buffer)
    }
}

fn title_style() -> style::Style {
    let mut s = style::Style::new().bold().with_font_size(18);
    s.set_color(style::Color::Rgb(44, 62, 80));
    s
}

fn mood_style() -> style::Style {
    let mut s = style::Style::new().with_font_size(12);
    s.set_color(style::Color::Rgb(127, 140, 141));
    s
}

fn date_style() -> style::Style {
    let mut s = style::Style::new().with_font_size(10);
    s.set_color(style::Color::Rgb(149, 165, 166));
    s
}

fn body_style() -> style::Style {
    let mut s = style::Style::new().with_font_size(11);
    s.set_color(style::Color::Rgb(52, 73, 94));
    s
}
