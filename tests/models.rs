use storefront_api::{
    models::{
        CategorySummary, LOW_STOCK_THRESHOLD, NO_CATEGORY_LABEL, PaymentMethod, Role,
        SupplierType, categories_list, commande_status, commande_total, format_amount,
        is_low_stock, stock_status,
    },
    routes::params::{CommandeListQuery, Pagination, SearchQuery},
    validation,
};
use uuid::Uuid;

fn category(name: &str) -> CategorySummary {
    CategorySummary {
        id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

#[test]
fn categories_list_joins_names_or_falls_back() {
    assert_eq!(categories_list(&[]), NO_CATEGORY_LABEL);
    assert_eq!(
        categories_list(&[category("Vêtements"), category("Accessoires")]),
        "Vêtements, Accessoires"
    );
}

#[test]
fn stock_columns_follow_quantity() {
    assert_eq!(stock_status(3), "En stock");
    assert_eq!(stock_status(0), "Rupture de stock");

    assert!(is_low_stock(LOW_STOCK_THRESHOLD));
    assert!(is_low_stock(0));
    assert!(!is_low_stock(LOW_STOCK_THRESHOLD + 1));
}

#[test]
fn commande_total_is_price_times_quantity() {
    assert_eq!(commande_total(1250, 3), Some(3750));
    assert_eq!(commande_total(0, 2), Some(0));
    assert_eq!(commande_total(1250, 0), None);
    assert_eq!(commande_total(i64::MAX, 2), None);
}

#[test]
fn amounts_render_with_two_decimals() {
    assert_eq!(format_amount(1250), "12.50");
    assert_eq!(format_amount(5), "0.05");
    assert_eq!(format_amount(-199), "-1.99");
}

#[test]
fn commande_status_labels() {
    assert_eq!(commande_status(true), "Livrée");
    assert_eq!(commande_status(false), "En attente");
}

#[test]
fn payment_methods_parse_case_insensitively() {
    assert_eq!("wave".parse::<PaymentMethod>(), Ok(PaymentMethod::Wave));
    assert_eq!(" MTN ".parse::<PaymentMethod>(), Ok(PaymentMethod::Mtn));
    assert!("cash".parse::<PaymentMethod>().is_err());

    assert_eq!(PaymentMethod::Livraison.label(), "Paiement à la livraison");
    assert_eq!(PaymentMethod::Orange.to_string(), "ORANGE");

    let json = serde_json::to_value(PaymentMethod::Mtn).unwrap();
    assert_eq!(json, "MTN");
}

#[test]
fn supplier_types_and_roles_parse() {
    assert_eq!("fabricant".parse::<SupplierType>(), Ok(SupplierType::Fabricant));
    assert!("grossiste".parse::<SupplierType>().is_err());

    assert_eq!("staff".parse::<Role>(), Ok(Role::Staff));
    assert!("user".parse::<Role>().is_err());
}

#[test]
fn pagination_is_clamped() {
    let default = Pagination::default().normalize();
    assert_eq!(default, (1, 20, 0));

    let clamped = Pagination {
        page: Some(0),
        per_page: Some(1000),
    }
    .normalize();
    assert_eq!(clamped, (1, 100, 0));

    let third = Pagination {
        page: Some(3),
        per_page: Some(10),
    }
    .normalize();
    assert_eq!(third, (3, 10, 20));

    let (page, per_page, offset) = Pagination {
        page: Some(i64::MAX),
        per_page: None,
    }
    .normalize();
    assert_eq!((page, per_page), (i64::MAX, 20));
    assert_eq!(offset, i64::MAX);
}

#[test]
fn blank_search_is_ignored() {
    let query = SearchQuery {
        q: Some("   ".into()),
        ..Default::default()
    };
    assert_eq!(query.search(), None);

    let query = CommandeListQuery {
        q: Some(" awa ".into()),
        ..Default::default()
    };
    assert_eq!(query.search(), Some("awa"));
}

#[test]
fn required_fields_are_trimmed_and_bounded() {
    assert_eq!(
        validation::required("name", "  Sac  ".into(), 100).unwrap(),
        "Sac"
    );
    assert!(validation::required("name", "   ".into(), 100).is_err());
    assert!(validation::required("phone", "1".repeat(21), 20).is_err());

    assert_eq!(validation::optional("notes", Some(" ".into()), 10).unwrap(), None);
}

#[test]
fn email_and_url_checks() {
    assert!(validation::email("email", "awa@example.com").is_ok());
    assert!(validation::email("email", "awa.example.com").is_err());
    assert!(validation::email("email", "awa@localhost").is_err());

    assert!(validation::url("website", "https://boutique.example").is_ok());
    assert!(validation::url("website", "ftp://boutique.example").is_err());
    assert!(validation::url("website", "https://").is_err());

    assert!(validation::non_negative("price", -1).is_err());
}

#[test]
fn search_patterns_escape_like_wildcards() {
    assert_eq!(validation::contains_pattern("sac"), "%sac%");
    assert_eq!(validation::contains_pattern("%"), "%\\%%");
    assert_eq!(validation::contains_pattern("a_b"), "%a\\_b%");
    assert_eq!(validation::contains_pattern("c:\\x"), "%c:\\\\x%");
}
