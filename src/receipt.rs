//! Purchase confirmation PDF.
//!
//! Layout is expressed in PostScript points on a US-letter page (612 × 792)
//! with the origin at the bottom-left corner.

use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, Line, Mm, PdfDocument, Point};
use uuid::Uuid;

use crate::models::{PaymentMethod, format_amount};

const PAGE_WIDTH_PT: f32 = 612.0;
const PAGE_HEIGHT_PT: f32 = 792.0;
const ROW_SPACING_PT: f32 = 25.0;

#[derive(Debug, Clone)]
pub struct ReceiptData {
    pub commande_id: Uuid,
    pub site_name: Option<String>,
    pub customer_name: String,
    pub product_name: String,
    pub quantity: i32,
    pub customer_address: String,
    pub payment: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub total_amount: i64,
}

pub fn receipt_filename(commande_id: Uuid) -> String {
    format!("commande_{commande_id}.pdf")
}

pub fn receipt_title(commande_id: Uuid) -> String {
    let [heading, reference] = receipt_heading(commande_id);
    format!("{heading} - {reference}")
}

/// The title as printed: a UUID does not fit on the heading line at 16pt, so
/// the reference goes on its own line below.
pub fn receipt_heading(commande_id: Uuid) -> [String; 2] {
    [
        "Confirmation de Commande".to_string(),
        format!("#{commande_id}"),
    ]
}

/// Label/value rows printed under the title, top to bottom.
pub fn receipt_rows(data: &ReceiptData) -> Vec<(&'static str, String)> {
    vec![
        ("Client", data.customer_name.clone()),
        ("Produit", data.product_name.clone()),
        ("Quantité", data.quantity.to_string()),
        ("Adresse", single_line(&data.customer_address)),
        ("Paiement", data.payment.label().to_string()),
        ("Date", data.created_at.format("%d/%m/%Y %H:%M").to_string()),
        ("Total", format!("{} €", format_amount(data.total_amount))),
    ]
}

pub fn render_receipt(data: &ReceiptData) -> anyhow::Result<Vec<u8>> {
    let title = receipt_title(data.commande_id);
    let (doc, page, layer) = PdfDocument::new(
        title.as_str(),
        pt(PAGE_WIDTH_PT),
        pt(PAGE_HEIGHT_PT),
        "Receipt",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let top = PAGE_HEIGHT_PT;
    if let Some(site_name) = data.site_name.as_deref() {
        layer.use_text(site_name, 12.0, pt(50.0), pt(top - 47.0), &bold);
    }

    let [heading, reference] = receipt_heading(data.commande_id);
    layer.use_text(heading, 16.0, pt(180.0), pt(top - 50.0), &bold);
    layer.use_text(reference, 12.0, pt(180.0), pt(top - 66.0), &regular);

    layer.add_line(Line {
        points: vec![
            (Point::new(pt(50.0), pt(top - 76.0)), false),
            (Point::new(pt(550.0), pt(top - 76.0)), false),
        ],
        is_closed: false,
    });

    let mut y = top - 110.0;
    for (label, value) in receipt_rows(data) {
        layer.use_text(format!("{label} :"), 12.0, pt(100.0), pt(y), &bold);
        layer.use_text(value, 12.0, pt(250.0), pt(y), &regular);
        y -= ROW_SPACING_PT;
    }

    layer.use_text(
        "Merci pour votre confiance",
        12.0,
        pt(100.0),
        pt(y - 30.0),
        &regular,
    );

    Ok(doc.save_to_bytes()?)
}

fn pt(value: f32) -> Mm {
    Mm(value * 25.4 / 72.0)
}

fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
