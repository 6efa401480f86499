//! Menu catalog entities and category grouping.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// One orderable dish or drink.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MenuItem {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Lomo Saltado")]
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 18.0)]
    pub price: Decimal,
    pub image_url: Option<String>,
    #[schema(example = "Platos de fondo")]
    pub category: String,
}

/// Menu item to be inserted (no id yet).
#[derive(Debug, Clone, PartialEq)]
pub struct NewMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category: String,
}

/// Items sharing one category label, as the client renders a section list.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MenuCategory {
    /// Category label
    #[schema(example = "Entradas")]
    pub title: String,
    /// Items in catalog order
    pub data: Vec<MenuItem>,
}

/// Group items by category, keeping categories in first-seen order and
/// items in input order within each category.
pub fn group_by_category(items: impl IntoIterator<Item = MenuItem>) -> Vec<MenuCategory> {
    let mut groups: Vec<MenuCategory> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        match index.get(&item.category) {
            Some(&pos) => groups[pos].data.push(item),
            None => {
                index.insert(item.category.clone(), groups.len());
                groups.push(MenuCategory {
                    title: item.category.clone(),
                    data: vec![item],
                });
            }
        }
    }

    groups
}
