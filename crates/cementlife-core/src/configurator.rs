//! The step-by-step configurator: which step the customer is on and which
//! option is chosen in each category.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogOption, Category};
use crate::CoreError;

const PREVIEW_SEPARATOR: char = '-';

/// A wizard step, always within `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Step(u8);

impl Step {
    pub const FIRST: Step = Step(1);
    pub const LAST: Step = Step(4);

    #[must_use]
    pub fn new(number: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::LAST.0)
            .contains(&number)
            .then_some(Self(number))
    }

    #[must_use]
    pub fn number(self) -> u8 {
        self.0
    }

    /// The following step, saturating at [`Step::LAST`].
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::LAST.0))
    }

    /// The preceding step, saturating at [`Step::FIRST`].
    #[must_use]
    pub fn back(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::FIRST.0))
    }

    /// The category picked on this step. Step 4 names the creation instead.
    #[must_use]
    pub fn category(self) -> Option<Category> {
        match self.0 {
            1 => Some(Category::Container),
            2 => Some(Category::Plant),
            3 => Some(Category::Topping),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.category().map_or("Tên", Category::label)
    }

    pub fn all() -> impl Iterator<Item = Step> {
        (Self::FIRST.0..=Self::LAST.0).map(Step)
    }
}

impl TryFrom<u8> for Step {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Step::new(value).ok_or_else(|| format!("step must be between 1 and 4, got {value}"))
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.0
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", content = "step", rename_all = "snake_case")]
pub enum Stage {
    Landing,
    Step(Step),
}

/// Exactly one option per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub container: CatalogOption,
    pub plant: CatalogOption,
    pub topping: CatalogOption,
}

impl Selection {
    /// First catalog entry of every category.
    #[must_use]
    pub fn defaults(catalog: &Catalog) -> Self {
        Self {
            container: catalog.default_option(Category::Container).clone(),
            plant: catalog.default_option(Category::Plant).clone(),
            topping: catalog.default_option(Category::Topping).clone(),
        }
    }

    #[must_use]
    pub fn get(&self, category: Category) -> &CatalogOption {
        match category {
            Category::Container => &self.container,
            Category::Plant => &self.plant,
            Category::Topping => &self.topping,
        }
    }

    fn set(&mut self, category: Category, option: CatalogOption) {
        match category {
            Category::Container => self.container = option,
            Category::Plant => self.plant = option,
            Category::Topping => self.topping = option,
        }
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.container
            .price
            .saturating_add(self.plant.price)
            .saturating_add(self.topping.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configurator {
    stage: Stage,
    selection: Selection,
    creation_name: String,
}

impl Configurator {
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            stage: Stage::Landing,
            selection: Selection::defaults(catalog),
            creation_name: String::new(),
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Current step, or `None` on the landing screen.
    #[must_use]
    pub fn step(&self) -> Option<Step> {
        match self.stage {
            Stage::Landing => None,
            Stage::Step(step) => Some(step),
        }
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn creation_name(&self) -> &str {
        &self.creation_name
    }

    /// Leave the landing screen. Has no effect once the wizard is running.
    pub fn start(&mut self) {
        if self.stage == Stage::Landing {
            self.stage = Stage::Step(Step::FIRST);
        }
    }

    pub fn next(&mut self) {
        if let Stage::Step(step) = self.stage {
            self.stage = Stage::Step(step.next());
        }
    }

    pub fn back(&mut self) {
        if let Stage::Step(step) = self.stage {
            self.stage = Stage::Step(step.back());
        }
    }

    /// Choose `id` in `category`. The step is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownOption`] if the catalog has no such option.
    pub fn select(
        &mut self,
        catalog: &Catalog,
        category: Category,
        id: &str,
    ) -> Result<(), CoreError> {
        let option = catalog
            .find(category, id)
            .ok_or_else(|| CoreError::UnknownOption {
                category,
                id: id.to_string(),
            })?;
        self.selection.set(category, option.clone());
        Ok(())
    }

    pub fn set_creation_name(&mut self, name: impl Into<String>) {
        self.creation_name = name.into();
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.selection.total()
    }

    /// Category picked on the current step, if any.
    #[must_use]
    pub fn active_category(&self) -> Option<Category> {
        self.step().and_then(Step::category)
    }

    /// Preview image path. Up to step 1 it shows the bare container; from
    /// step 2 onwards the container with its plant.
    #[must_use]
    pub fn preview_image(&self) -> String {
        let container = &self.selection.container.id;
        if self.shows_plant() {
            format!("/{container}{PREVIEW_SEPARATOR}{}.jpg", self.selection.plant.id)
        } else {
            format!("/{container}.jpg")
        }
    }

    #[must_use]
    pub fn preview_alt(&self) -> String {
        if self.shows_plant() {
            format!(
                "{} + {}",
                self.selection.container.name, self.selection.plant.name
            )
        } else {
            self.selection.container.name.clone()
        }
    }

    fn shows_plant(&self) -> bool {
        self.step().is_some_and(|step| step > Step::FIRST)
    }

    /// Back to step 1 with default options and no creation name.
    pub fn reset(&mut self, catalog: &Catalog) {
        self.stage = Stage::Step(Step::FIRST);
        self.selection = Selection::defaults(catalog);
        self.creation_name.clear();
    }
}

#[cfg(test)]
#[path = "configurator_test.rs"]
mod tests;
