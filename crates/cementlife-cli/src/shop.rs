//! Read-only catalog commands: `catalog` and `quote`.

use cementlife_core::{format_vnd, Catalog, Category, Configurator, Step};

pub(crate) fn run_catalog(catalog: &Catalog) {
    for category in Category::ALL {
        println!("{} ({category})", category.label());
        for option in catalog.options(category) {
            println!(
                "  {:<12}{:<28}{:>10}",
                option.id,
                option.name,
                format_vnd(option.price)
            );
        }
    }
}

/// Walk the wizard with the given picks (defaults where omitted) and print
/// the resulting price and preview.
///
/// # Errors
///
/// Returns an error if a pick is not in the catalog.
pub(crate) fn run_quote(
    catalog: &Catalog,
    container: Option<&str>,
    plant: Option<&str>,
    topping: Option<&str>,
) -> anyhow::Result<()> {
    let configurator = quote(catalog, container, plant, topping)?;
    let selection = configurator.selection();

    for category in Category::ALL {
        let option = selection.get(category);
        println!(
            "{:<6}{:<28}{:>10}",
            category.label(),
            option.name,
            format_vnd(option.price)
        );
    }
    println!("{:<34}{:>10}", "Tổng", format_vnd(configurator.total()));
    println!(
        "preview: {} ({})",
        configurator.preview_image(),
        configurator.preview_alt()
    );
    Ok(())
}

fn quote(
    catalog: &Catalog,
    container: Option<&str>,
    plant: Option<&str>,
    topping: Option<&str>,
) -> anyhow::Result<Configurator> {
    let mut configurator = Configurator::new(catalog);
    configurator.start();
    let picks = [
        (Category::Container, container),
        (Category::Plant, plant),
        (Category::Topping, topping),
    ];
    for (category, id) in picks {
        if let Some(id) = id {
            configurator.select(catalog, category, id)?;
        }
    }
    while configurator.step() != Some(Step::LAST) {
        configurator.next();
    }
    Ok(configurator)
}
