use super::*;

fn list(source: RegionSource, entries: &[(i64, &str)]) -> RegionList {
    RegionList::from_source(
        source,
        entries
            .iter()
            .map(|(id, name)| RegionEntry {
                id: RegionId::Number(*id),
                name: (*name).to_string(),
            })
            .collect(),
    )
}

/// Address book with provinces loaded, province 1 picked, its districts
/// loaded, district 10 picked and its wards loaded.
fn populated() -> AddressBook {
    let mut book = AddressBook::default();
    let ticket = book.request_provinces();
    assert!(book.complete(
        &ticket,
        list(RegionSource::Primary, &[(1, "Hà Nội"), (79, "Hồ Chí Minh")])
    ));

    let ticket = book.select_province(Some(RegionId::Number(1))).unwrap();
    assert!(book.complete(
        &ticket,
        list(RegionSource::Primary, &[(10, "Ba Đình"), (11, "Hoàn Kiếm")])
    ));

    let ticket = book.select_district(Some(RegionId::Number(10))).unwrap();
    assert!(book.complete(
        &ticket,
        list(RegionSource::Primary, &[(100, "Phúc Xá"), (101, "Trúc Bạch")])
    ));
    book.select_ward(Some(RegionId::Number(101)));
    book
}

#[test]
fn names_resolve_from_loaded_lists() {
    let book = populated();
    assert_eq!(book.province_name(), Some("Hà Nội"));
    assert_eq!(book.district_name(), Some("Ba Đình"));
    assert_eq!(book.ward_name(), Some("Trúc Bạch"));
}

#[test]
fn selecting_province_clears_children_and_issues_one_district_ticket() {
    let mut book = populated();

    let ticket = book
        .select_province(Some(RegionId::Number(79)))
        .expect("district lookup ticket");

    assert_eq!(ticket.level, RegionLevel::District);
    assert_eq!(ticket.parent, Some(RegionId::Number(79)));
    assert!(book.district().is_none());
    assert!(book.ward().is_none());
    assert!(book.districts().is_empty());
    assert!(book.wards().is_empty());
    assert_eq!(book.provinces().entries.len(), 2, "provinces are kept");
}

#[test]
fn selecting_district_clears_ward_only() {
    let mut book = populated();

    let ticket = book
        .select_district(Some(RegionId::Number(11)))
        .expect("ward lookup ticket");

    assert_eq!(ticket.level, RegionLevel::Ward);
    assert_eq!(ticket.parent, Some(RegionId::Number(11)));
    assert!(book.ward().is_none());
    assert!(book.wards().is_empty());
    assert_eq!(book.district_name(), Some("Hoàn Kiếm"));
    assert_eq!(book.districts().entries.len(), 2, "districts are kept");
}

#[test]
fn clearing_province_issues_no_ticket() {
    let mut book = populated();
    assert!(book.select_province(None).is_none());
    assert!(book.province().is_none());
    assert!(book.districts().is_empty());
}

#[test]
fn stale_district_result_is_discarded_after_province_change() {
    let mut book = AddressBook::default();
    let stale = book.select_province(Some(RegionId::Number(1))).unwrap();
    let fresh = book.select_province(Some(RegionId::Number(79))).unwrap();

    let applied = book.complete(&stale, list(RegionSource::Primary, &[(10, "Ba Đình")]));
    assert!(!applied);
    assert!(book.districts().is_empty());

    assert!(book.complete(
        &fresh,
        list(RegionSource::Primary, &[(760, "Quận 1")])
    ));
    assert_eq!(book.districts().entries[0].name, "Quận 1");
}

#[test]
fn reselecting_same_province_still_invalidates_older_ticket() {
    let mut book = AddressBook::default();
    let first = book.select_province(Some(RegionId::Number(1))).unwrap();
    let second = book.select_province(Some(RegionId::Number(1))).unwrap();

    assert!(!book.complete(&first, list(RegionSource::Primary, &[(10, "Ba Đình")])));
    assert!(book.complete(&second, list(RegionSource::Primary, &[(10, "Ba Đình")])));
}

#[test]
fn stale_ward_result_is_discarded_after_province_change() {
    let mut book = populated();
    let ward_ticket = book.select_district(Some(RegionId::Number(11))).unwrap();
    book.select_province(Some(RegionId::Number(79)));

    assert!(!book.complete(&ward_ticket, list(RegionSource::Primary, &[(200, "Hàng Bạc")])));
    assert!(book.wards().is_empty());
}

#[test]
fn child_tickets_carry_the_parent_list_family() {
    let mut book = AddressBook::default();
    let ticket = book.request_provinces();
    assert_eq!(ticket.family, None);
    book.complete(&ticket, list(RegionSource::Fallback, &[(1, "Hà Nội")]));

    let district_ticket = book.select_province(Some(RegionId::Number(1))).unwrap();
    assert_eq!(district_ticket.family, Some(RegionSource::Fallback));
    book.complete(&district_ticket, list(RegionSource::Fallback, &[(10, "Ba Đình")]));

    let ward_ticket = book.select_district(Some(RegionId::Number(10))).unwrap();
    assert_eq!(ward_ticket.family, Some(RegionSource::Fallback));
}

#[test]
fn region_id_parse_keeps_leading_zero_as_text() {
    assert_eq!(RegionId::parse("79"), RegionId::Number(79));
    assert_eq!(RegionId::parse("0"), RegionId::Number(0));
    assert_eq!(RegionId::parse("01"), RegionId::Text("01".to_string()));
    assert_eq!(RegionId::parse(" hn "), RegionId::Text("hn".to_string()));
}

#[test]
fn region_id_matches_across_representations() {
    assert!(RegionId::Number(1).matches(&RegionId::Text("1".to_string())));
    assert!(!RegionId::Number(1).matches(&RegionId::Text("01".to_string())));
}

#[test]
fn region_id_serializes_untagged() {
    assert_eq!(serde_json::to_string(&RegionId::Number(5)).unwrap(), "5");
    assert_eq!(
        serde_json::from_str::<RegionId>("\"01\"").unwrap(),
        RegionId::Text("01".to_string())
    );
}
