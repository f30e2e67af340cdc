use super::*;

fn running(catalog: &Catalog) -> Configurator {
    let mut configurator = Configurator::new(catalog);
    configurator.start();
    configurator
}

fn at_step(catalog: &Catalog, number: u8) -> Configurator {
    let mut configurator = running(catalog);
    for _ in 1..number {
        configurator.next();
    }
    configurator
}

#[test]
fn starts_on_landing_with_defaults() {
    let catalog = Catalog::builtin();
    let configurator = Configurator::new(&catalog);

    assert_eq!(configurator.stage(), Stage::Landing);
    assert_eq!(configurator.step(), None);
    assert_eq!(configurator.selection(), &Selection::defaults(&catalog));
}

#[test]
fn start_enters_step_one() {
    let catalog = Catalog::builtin();
    let configurator = running(&catalog);
    assert_eq!(configurator.step(), Some(Step::FIRST));
}

#[test]
fn next_and_back_are_bounded() {
    let catalog = Catalog::builtin();
    for n in 1..=4u8 {
        let mut forward = at_step(&catalog, n);
        forward.next();
        assert_eq!(forward.step().map(Step::number), Some((n + 1).min(4)));

        let mut backward = at_step(&catalog, n);
        backward.back();
        assert_eq!(backward.step().map(Step::number), Some((n - 1).max(1)));
    }
}

#[test]
fn next_on_landing_does_nothing() {
    let catalog = Catalog::builtin();
    let mut configurator = Configurator::new(&catalog);
    configurator.next();
    configurator.back();
    assert_eq!(configurator.stage(), Stage::Landing);
}

#[test]
fn selecting_updates_only_that_category() {
    let catalog = Catalog::builtin();
    let mut configurator = at_step(&catalog, 2);
    let before = configurator.selection().clone();

    configurator
        .select(&catalog, Category::Plant, "senda")
        .unwrap();

    let after = configurator.selection();
    assert_eq!(after.plant.id, "senda");
    assert_eq!(after.container, before.container);
    assert_eq!(after.topping, before.topping);
    assert_eq!(configurator.step().map(Step::number), Some(2));
}

#[test]
fn selecting_unknown_option_fails_without_change() {
    let catalog = Catalog::builtin();
    let mut configurator = running(&catalog);
    let before = configurator.selection().clone();

    let err = configurator
        .select(&catalog, Category::Container, "sphere")
        .unwrap_err();

    assert_eq!(
        err,
        CoreError::UnknownOption {
            category: Category::Container,
            id: "sphere".to_string()
        }
    );
    assert_eq!(configurator.selection(), &before);
}

#[test]
fn total_is_sum_of_selected_prices() {
    let catalog = Catalog::builtin();
    let configurator = running(&catalog);
    // cube 25 000 + mong rong 25 000 + white pebbles 7 000
    assert_eq!(configurator.total(), 57_000);
}

#[test]
fn total_of_restored_selection_saturates() {
    // A resumed session carries its own option snapshots, which catalog
    // validation never saw.
    let mut selection = Selection::defaults(&Catalog::builtin());
    selection.container.price = i64::MAX;
    selection.plant.price = 1;
    assert_eq!(selection.total(), i64::MAX);
}

#[test]
fn total_tracks_selection() {
    let catalog = Catalog::builtin();
    let mut configurator = running(&catalog);
    configurator
        .select(&catalog, Category::Container, "hexagon")
        .unwrap();
    configurator
        .select(&catalog, Category::Plant, "senda")
        .unwrap();
    assert_eq!(configurator.total(), 35_000 + 20_000 + 7_000);
}

#[test]
fn preview_on_step_one_uses_container_only() {
    let catalog = Catalog::builtin();
    let mut configurator = running(&catalog);
    configurator
        .select(&catalog, Category::Plant, "senda")
        .unwrap();
    assert_eq!(configurator.preview_image(), "/cube.jpg");
    assert_eq!(configurator.preview_alt(), "Cube");
}

#[test]
fn preview_from_step_two_combines_container_and_plant() {
    let catalog = Catalog::builtin();
    for n in 2..=4 {
        let configurator = at_step(&catalog, n);
        assert_eq!(configurator.preview_image(), "/cube-mongrong.jpg");
        assert_eq!(configurator.preview_alt(), "Cube + Móng rồng (Haworthia)");
    }
}

#[test]
fn reset_returns_to_defaults_on_step_one() {
    let catalog = Catalog::builtin();
    let mut configurator = at_step(&catalog, 4);
    configurator
        .select(&catalog, Category::Topping, "soitunhien")
        .unwrap();
    configurator.set_creation_name("Góc xanh");

    configurator.reset(&catalog);

    assert_eq!(configurator.step(), Some(Step::FIRST));
    assert_eq!(configurator.selection(), &Selection::defaults(&catalog));
    assert_eq!(configurator.creation_name(), "");
}

#[test]
fn step_serializes_as_number_and_rejects_out_of_range() {
    let json = serde_json::to_string(&Step::LAST).unwrap();
    assert_eq!(json, "4");
    assert!(serde_json::from_str::<Step>("5").is_err());
    assert!(serde_json::from_str::<Step>("0").is_err());
}

#[test]
fn step_labels_follow_categories() {
    let labels: Vec<&str> = Step::all().map(Step::label).collect();
    assert_eq!(labels, ["Chậu", "Cây", "Sỏi", "Tên"]);
}
