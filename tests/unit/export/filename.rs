use super::*;
use chrono::NaiveDate;

fn at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 7)
        .unwrap()
        .and_hms_opt(9, 5, 1)
        .unwrap()
}

#[test]
fn slug_rules() {
    assert_eq!(slugify("  São Paulo! "), "s_o_paulo");
    assert_eq!(slugify("New York City"), "new_york_city");
    assert_eq!(slugify("--Hanover--"), "hanover");
    assert_eq!(slugify("東京"), "untitled");
    assert_eq!(slugify(""), "untitled");
}

#[test]
fn filename_format() {
    assert_eq!(
        poster_filename_at("Hanover", "midnight_blue", "PDF", at()),
        "hanover_midnight_blue_20240307_090501.pdf"
    );
    assert_eq!(
        poster_filename_at("", "noir", " ", at()),
        "untitled_noir_20240307_090501.png"
    );
}

#[test]
fn filename_with_current_time_has_expected_shape() {
    let name = poster_filename("Oslo", "sage", "png");
    assert!(name.starts_with("oslo_sage_"));
    assert!(name.ends_with(".png"));
    assert_eq!(name.len(), "oslo_sage_".len() + 15 + 4);
}
