use pilot_core::{format_display_date, normalize_date, DateKey};

#[test]
fn iso_prefix_is_extracted() {
    assert_eq!(normalize_date("2024-03-15T10:00:00"), "2024-03-15");
    assert_eq!(normalize_date("2024-03-15"), "2024-03-15");
    assert_eq!(normalize_date("2024-03-15 afternoon"), "2024-03-15");
}

#[test]
fn long_form_is_zero_padded() {
    assert_eq!(normalize_date("2024年3月5日"), "2024-03-05");
    assert_eq!(normalize_date("2024年12月25日 下午"), "2024-12-25");
    assert_eq!(normalize_date("下周 2024年1月9日"), "2024-01-09");
}

#[test]
fn unrecognized_text_normalizes_to_empty() {
    for raw in ["TBD", "", "15/03/2024", "2024-3-15", "March 15, 2024", "2024年3月"] {
        assert_eq!(normalize_date(raw), "", "input {raw:?}");
    }
}

#[test]
fn normalization_is_idempotent_on_its_output() {
    for raw in ["2024-03-15T10:00:00", "2024年3月5日", "2023年11月30日 14:00"] {
        let once = normalize_date(raw);
        assert!(!once.is_empty());
        assert_eq!(normalize_date(&once), once);
    }
}

#[test]
fn date_keys_are_always_ten_characters() {
    for raw in ["2024年1月1日", "2024-01-01", "0999年9月9日"] {
        assert_eq!(normalize_date(raw).len(), 10, "input {raw:?}");
    }
}

#[test]
fn display_date_uses_embedded_clock() {
    assert_eq!(
        format_display_date("2024-03-15T10:00:00", None),
        "2024年3月15日 10:00"
    );
}

#[test]
fn display_date_prefers_explicit_time() {
    assert_eq!(
        format_display_date("2024-03-15T10:00:00", Some("14:30")),
        "2024年3月15日 14:30"
    );
    assert_eq!(
        format_display_date("2024年3月5日", Some("上午10点")),
        "2024年3月5日 上午10点"
    );
}

#[test]
fn display_date_treats_empty_time_as_absent() {
    assert_eq!(format_display_date("2024-03-05", Some("")), "2024年3月5日");
    assert_eq!(format_display_date("2024-03-05T", None), "2024年3月5日");
}

#[test]
fn display_date_ignores_words_starting_with_t() {
    assert_eq!(format_display_date("2024-03-15 Tuesday", None), "2024年3月15日");
    assert_eq!(format_display_date("2024-03-15 TBD", None), "2024年3月15日");
    assert_eq!(format_display_date("2024年3月5日 TBD", None), "2024年3月5日");
    assert_eq!(format_display_date("2024-03-15T9:00", None), "2024年3月15日");
}

#[test]
fn display_date_falls_back_to_raw_text() {
    assert_eq!(format_display_date("TBD", Some("10:00")), "TBD");
    assert_eq!(format_display_date("next Tuesday", None), "next Tuesday");
}

#[test]
fn date_key_parts_and_ordering() {
    let key = DateKey::parse("2024年3月5日").unwrap();
    assert_eq!((key.year(), key.month(), key.day()), (2024, 3, 5));
    assert_eq!(key.long_form(), "2024年3月5日");
    assert_eq!(key, DateKey::new(2024, 3, 5));
    assert!(DateKey::new(2024, 3, 5) < DateKey::new(2024, 3, 15));
    assert!(DateKey::parse("someday").is_none());
}
