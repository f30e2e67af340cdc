use serde::{Deserialize, Serialize};

use crate::catalog::CatalogOption;
use crate::configurator::Selection;

/// A finalized configuration. The total is captured when the item is created
/// and never recomputed, even if catalog prices change later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredItem {
    pub container: CatalogOption,
    pub plant: CatalogOption,
    pub topping: CatalogOption,
    pub total: i64,
    pub preview_image: String,
    pub creation_name: Option<String>,
}

impl ConfiguredItem {
    #[must_use]
    pub fn from_selection(
        selection: &Selection,
        preview_image: String,
        creation_name: Option<String>,
    ) -> Self {
        Self {
            container: selection.container.clone(),
            plant: selection.plant.clone(),
            topping: selection.topping.clone(),
            total: selection.total(),
            preview_image,
            creation_name: creation_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        }
    }
}

/// Ordered list of configured items. Entries have no identity beyond their
/// position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<ConfiguredItem>,
}

impl Cart {
    pub fn push(&mut self, item: ConfiguredItem) {
        self.items.push(item);
    }

    /// Remove the entry at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<ConfiguredItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .fold(0, |total, item| total.saturating_add(item.total))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[ConfiguredItem] {
        &self.items
    }
}
