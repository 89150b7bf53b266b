use chrono::{TimeZone, Utc};
use storefront_api::{
    models::PaymentMethod,
    receipt::{
        ReceiptData, receipt_filename, receipt_heading, receipt_rows, receipt_title, render_receipt,
    },
};
use uuid::Uuid;

fn sample() -> ReceiptData {
    ReceiptData {
        commande_id: Uuid::nil(),
        site_name: Some("Ma Boutique".into()),
        customer_name: "Awa Ndiaye".into(),
        product_name: "Sac en cuir".into(),
        quantity: 2,
        customer_address: "12 avenue\nCheikh Anta Diop".into(),
        payment: PaymentMethod::Orange,
        created_at: Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 0).unwrap(),
        total_amount: 9000,
    }
}

#[test]
fn receipt_names_follow_the_commande_id() {
    let id = Uuid::nil();
    assert_eq!(
        receipt_filename(id),
        "commande_00000000-0000-0000-0000-000000000000.pdf"
    );
    assert_eq!(
        receipt_title(id),
        "Confirmation de Commande - #00000000-0000-0000-0000-000000000000"
    );
}

#[test]
fn receipt_heading_keeps_the_uuid_off_the_title_line() {
    let id = Uuid::new_v4();
    let [heading, reference] = receipt_heading(id);
    assert_eq!(heading, "Confirmation de Commande");
    assert_eq!(reference, format!("#{id}"));
    assert_eq!(receipt_title(id), format!("{heading} - {reference}"));

    // Digits, hex letters and lowercase Helvetica glyphs are at most 0.75em
    // wide; both lines start at x=180 on a 612pt page.
    assert!(180.0 + heading.chars().count() as f32 * 16.0 * 0.75 < 612.0);
    assert!(180.0 + reference.chars().count() as f32 * 12.0 * 0.75 < 612.0);
}

#[test]
fn receipt_rows_are_in_print_order() {
    let rows = receipt_rows(&sample());
    let labels: Vec<_> = rows.iter().map(|(label, _)| *label).collect();
    assert_eq!(
        labels,
        ["Client", "Produit", "Quantité", "Adresse", "Paiement", "Date", "Total"]
    );

    assert_eq!(rows[2].1, "2");
    assert_eq!(rows[3].1, "12 avenue Cheikh Anta Diop");
    assert_eq!(rows[4].1, "Orange Money");
    assert_eq!(rows[5].1, "07/03/2025 14:05");
    assert_eq!(rows[6].1, "90.00 €");
}

#[test]
fn rendered_receipt_is_a_pdf() {
    let bytes = render_receipt(&sample()).expect("render receipt");
    assert!(bytes.starts_with(b"%PDF"));

    let without_site = ReceiptData {
        site_name: None,
        ..sample()
    };
    let bytes = render_receipt(&without_site).expect("render receipt");
    assert!(bytes.len() > 100);
}
