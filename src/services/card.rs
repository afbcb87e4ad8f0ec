//! Custody acknowledgment form rendering

use std::fs::File;
use std::io::BufWriter;

use chrono::Local;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, Rect, Rgb,
};

use crate::{
    config::CardConfig,
    error::{AppError, AppResult},
    models::{equipment::Equipment, personnel::Personnel},
    repository::Repository,
};

/// Rendered custody form ready for download
pub struct RenderedCard {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct CardService {
    repository: Repository,
    config: CardConfig,
}

impl CardService {
    pub fn new(repository: Repository, config: CardConfig) -> Self {
        Self { repository, config }
    }

    /// Render the one-page custody form for a personnel record
    pub async fn render(&self, person_id: i64) -> AppResult<RenderedCard> {
        let person = self.repository.personnel.get_by_id(person_id).await?;
        let equipments = self.repository.equipment.list_by_owner(person_id).await?;

        let bytes = build_pdf(&person, &equipments, self.config.font_path.as_deref())?;
        let filename = format!(
            "zimmet_{}_{}.pdf",
            ascii_slug(&person.name),
            ascii_slug(&person.surname)
        );
        Ok(RenderedCard { filename, bytes })
    }
}

/// Draw the fixed A4 layout: banner, identity lines, enumerated items, date.
fn build_pdf(
    person: &Personnel,
    equipments: &[Equipment],
    font_path: Option<&str>,
) -> AppResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new("Zimmet Formu", Mm(210.0), Mm(297.0), "form");
    let layer = doc.get_page(page).get_layer(layer);
    let font = load_font(&doc, font_path)?;

    // Title banner across the top of the page
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.3, 0.6, None)));
    layer.add_rect(Rect::new(Mm(0.0), Mm(262.0), Mm(210.0), Mm(297.0)).with_mode(PaintMode::Fill));
    layer.set_fill_color(Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None)));
    layer.use_text("ZIMMET FORMU", 18.0, Mm(76.0), Mm(272.0), &font);

    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    let mut y = 248.0;
    layer.use_text(
        format!("Personel: {}", person.full_name()),
        12.0,
        Mm(21.0),
        Mm(y),
        &font,
    );
    y -= 11.0;
    layer.use_text(
        format!("Görev: {}", person.duty.as_deref().unwrap_or("-")),
        12.0,
        Mm(21.0),
        Mm(y),
        &font,
    );
    y -= 11.0;
    layer.use_text(
        format!("Telefon: {}", person.phone.as_deref().unwrap_or("-")),
        12.0,
        Mm(21.0),
        Mm(y),
        &font,
    );
    y -= 18.0;

    for (index, equipment) in equipments.iter().enumerate() {
        layer.use_text(
            format!("{}. {} - {}", index + 1, equipment.name, equipment.serial),
            12.0,
            Mm(21.0),
            Mm(y),
            &font,
        );
        y -= 9.0;
    }

    y -= 14.0;
    layer.use_text(
        format!("Tarih: {}", Local::now().format("%d.%m.%Y")),
        12.0,
        Mm(21.0),
        Mm(y),
        &font,
    );

    let mut bytes = Vec::new();
    {
        let mut writer = BufWriter::new(&mut bytes);
        doc.save(&mut writer)
            .map_err(|e| AppError::Internal(format!("Failed to render custody form: {}", e)))?;
    }
    Ok(bytes)
}

/// Load the configured TrueType font, falling back to builtin Helvetica on
/// any failure. The render never fails for font reasons.
fn load_font(doc: &PdfDocumentReference, font_path: Option<&str>) -> AppResult<IndirectFontRef> {
    if let Some(path) = font_path {
        match File::open(path) {
            Ok(file) => match doc.add_external_font(file) {
                Ok(font) => return Ok(font),
                Err(e) => {
                    tracing::warn!("Could not embed font {}, using builtin: {}", path, e);
                }
            },
            Err(e) => {
                tracing::debug!("Font file {} unavailable, using builtin: {}", path, e);
            }
        }
    }
    doc.add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Internal(format!("Failed to load builtin font: {}", e)))
}

/// Reduce a name to ASCII so the download filename is always a valid header
/// value. Turkish letters are transliterated, everything else non-alphanumeric
/// becomes an underscore.
fn ascii_slug(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            'ç' => 'c',
            'Ç' => 'C',
            'ğ' => 'g',
            'Ğ' => 'G',
            'ı' => 'i',
            'İ' => 'I',
            'ö' => 'o',
            'Ö' => 'O',
            'ş' => 's',
            'Ş' => 'S',
            'ü' => 'u',
            'Ü' => 'U',
            c if c.is_ascii_alphanumeric() => c,
            _ => '_',
        })
        .collect()
}
