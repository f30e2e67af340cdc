use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Upper bound for a single option's price in VND. Keeps item and order
/// totals far from `i64` overflow.
pub const MAX_OPTION_PRICE: i64 = 1_000_000_000;

/// The three option groups a configured item is built from, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Container,
    Plant,
    Topping,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Container, Category::Plant, Category::Topping];

    /// Storefront label shown in the step indicator.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Container => "Chậu",
            Category::Plant => "Cây",
            Category::Topping => "Sỏi",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Container => write!(f, "container"),
            Category::Plant => write!(f, "plant"),
            Category::Topping => write!(f, "topping"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "container" => Ok(Category::Container),
            "plant" => Ok(Category::Plant),
            "topping" => Ok(Category::Topping),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

/// A selectable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOption {
    /// Unique within its category; also used to build preview image paths.
    pub id: String,
    pub name: String,
    /// Price in whole VND.
    pub price: i64,
    pub description: String,
    pub image: String,
}

/// On-disk shape of the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub containers: Vec<CatalogOption>,
    pub plants: Vec<CatalogOption>,
    pub toppings: Vec<CatalogOption>,
}

/// A validated catalog: every category is non-empty and ids are unique per
/// category, so the first entry of each category is always a valid default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile")]
pub struct Catalog {
    containers: Vec<CatalogOption>,
    plants: Vec<CatalogOption>,
    toppings: Vec<CatalogOption>,
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = ConfigError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        validate_catalog(&file)?;
        Ok(Self {
            containers: file.containers,
            plants: file.plants,
            toppings: file.toppings,
        })
    }
}

impl Catalog {
    /// The catalog the storefront ships with.
    #[must_use]
    pub fn builtin() -> Self {
        fn option(id: &str, name: &str, price: i64, description: &str, image: &str) -> CatalogOption {
            CatalogOption {
                id: id.to_string(),
                name: name.to_string(),
                price,
                description: description.to_string(),
                image: image.to_string(),
            }
        }

        Self {
            containers: vec![
                option(
                    "cube",
                    "Cube",
                    25_000,
                    "Balanced form with crisp edges and grounded presence.",
                    "/cube.jpg",
                ),
                option(
                    "cylinder",
                    "Cylinder",
                    30_000,
                    "Softly rounded silhouette with timeless appeal.",
                    "/cylinder.jpg",
                ),
                option(
                    "hexagon",
                    "Hexagon",
                    35_000,
                    "Facet-rich geometry with artisan precision.",
                    "/hexagon.jpg",
                ),
            ],
            plants: vec![
                option(
                    "mongrong",
                    "Móng rồng (Haworthia)",
                    25_000,
                    "Ít nước, ánh sáng vừa. Dễ chăm.",
                    "/thumb-mongrong.jpg",
                ),
                option(
                    "xuongrong",
                    "Xương rồng (Cactus)",
                    30_000,
                    "Ít nước, nhiều sáng. Khoẻ mạnh.",
                    "/thumb-xuongrong.jpg",
                ),
                option(
                    "senda",
                    "Sen đá (Succulent)",
                    20_000,
                    "Ít nước, sáng tốt. Thanh lịch.",
                    "/thumb-senda.jpg",
                ),
            ],
            toppings: vec![
                option(
                    "soitrang",
                    "Sỏi trắng",
                    7_000,
                    "Sạch, sáng, tạo cảm giác tinh khiết.",
                    "/thumb-soitrang.jpg",
                ),
                option(
                    "soitunhien",
                    "Sỏi tự nhiên",
                    7_000,
                    "Tự nhiên, gần gũi, gam màu ấm.",
                    "/thumb-soitunhien.jpg",
                ),
            ],
        }
    }

    #[must_use]
    pub fn options(&self, category: Category) -> &[CatalogOption] {
        match category {
            Category::Container => &self.containers,
            Category::Plant => &self.plants,
            Category::Topping => &self.toppings,
        }
    }

    #[must_use]
    pub fn find(&self, category: Category, id: &str) -> Option<&CatalogOption> {
        self.options(category).iter().find(|option| option.id == id)
    }

    /// First entry of the category. Validation guarantees it exists.
    #[must_use]
    pub fn default_option(&self, category: Category) -> &CatalogOption {
        &self.options(category)[0]
    }
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CatalogFile = serde_yaml::from_str(&content)?;
    Catalog::try_from(file)
}

fn validate_catalog(file: &CatalogFile) -> Result<(), ConfigError> {
    let groups = [
        (Category::Container, &file.containers),
        (Category::Plant, &file.plants),
        (Category::Topping, &file.toppings),
    ];

    for (category, options) in groups {
        if options.is_empty() {
            return Err(ConfigError::CatalogValidation(format!(
                "{category} list must contain at least one option"
            )));
        }

        let mut seen = HashSet::new();
        for option in options {
            if option.id.trim().is_empty() {
                return Err(ConfigError::CatalogValidation(format!(
                    "{category} option '{}' has an empty id",
                    option.name
                )));
            }
            if option.name.trim().is_empty() {
                return Err(ConfigError::CatalogValidation(format!(
                    "{category} option '{}' has an empty name",
                    option.id
                )));
            }
            if option.price < 0 {
                return Err(ConfigError::CatalogValidation(format!(
                    "{category} option '{}' has a negative price",
                    option.id
                )));
            }
            if option.price > MAX_OPTION_PRICE {
                return Err(ConfigError::CatalogValidation(format!(
                    "{category} option '{}' price {} exceeds the limit of {MAX_OPTION_PRICE}",
                    option.id, option.price
                )));
            }
            if !seen.insert(option.id.as_str()) {
                return Err(ConfigError::CatalogValidation(format!(
                    "duplicate {category} id '{}'",
                    option.id
                )));
            }
        }
    }

    Ok(())
}
