//! Catalog loading
//!
//! Flattens the nested categories file (list-type -> parent -> subcategory
//! array) into a flat, ordered `Vec<Category>`. Load order matters: the
//! ranking pipeline relies on it for stable ties and fallback selection, so
//! JSON object order is preserved end to end.

use crate::models::{Category, CategoryTags, ListKind};
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Category fields as they appear in a subcategory object
#[derive(Debug, Deserialize)]
struct CategorySpec {
    name: String,
    #[serde(default)]
    tags: CategoryTags,
    #[serde(default)]
    search_query_template: String,
    #[serde(default)]
    description: String,
}

/// Read and flatten the categories file
pub fn load_categories(path: impl AsRef<Path>) -> Result<Vec<Category>> {
    let raw = load_raw(&path)?;
    let categories = flatten_catalog(&raw)?;
    info!("Loaded {} total categories", categories.len());
    Ok(categories)
}

/// Read the categories file as raw JSON (served verbatim by the API)
pub fn load_raw(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read categories file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse categories file: {}", path.display()))
}

/// Flatten the nested catalog structure into an ordered category list
pub fn flatten_catalog(root: &Value) -> Result<Vec<Category>> {
    let mut categories = Vec::new();

    collect_grouped(root.get("places"), ListKind::Places, &mut categories)?;
    collect_grouped(root.get("activities"), ListKind::Activities, &mut categories)?;

    let dining = root.get("dining");
    collect_grouped(
        dining.and_then(|d| d.get("cuisines")),
        ListKind::DiningCuisines,
        &mut categories,
    )?;
    collect_flat(
        dining.and_then(|d| d.get("formats")),
        ListKind::DiningFormats,
        "Dining Formats",
        &mut categories,
    )?;
    collect_flat(
        dining.and_then(|d| d.get("dietary")),
        ListKind::DiningDietary,
        "Dietary Options",
        &mut categories,
    )?;

    Ok(categories)
}

/// Collect `parent -> {subcategories: [...]}` groups in object order
fn collect_grouped(
    section: Option<&Value>,
    list: ListKind,
    categories: &mut Vec<Category>,
) -> Result<()> {
    let Some(section) = section else {
        return Ok(());
    };
    let object = section
        .as_object()
        .ok_or_else(|| anyhow!("Expected an object for {:?} section", list))?;

    for (parent_name, parent_data) in object {
        for spec in subcategories(parent_data)? {
            categories.push(into_category(spec, list, parent_name.clone()));
        }
    }

    Ok(())
}

/// Collect a single `{subcategories: [...]}` section under a fixed parent
fn collect_flat(
    section: Option<&Value>,
    list: ListKind,
    parent_name: &str,
    categories: &mut Vec<Category>,
) -> Result<()> {
    let Some(section) = section else {
        return Ok(());
    };

    for spec in subcategories(section)? {
        categories.push(into_category(spec, list, parent_name.to_string()));
    }

    Ok(())
}

fn subcategories(parent_data: &Value) -> Result<Vec<CategorySpec>> {
    match parent_data.get("subcategories") {
        Some(subcats) => serde_json::from_value(subcats.clone())
            .with_context(|| "Malformed subcategory entry"),
        None => Ok(Vec::new()),
    }
}

fn into_category(spec: CategorySpec, list: ListKind, parent_category: String) -> Category {
    Category {
        name: spec.name,
        list,
        parent_category,
        tags: spec.tags,
        search_query_template: spec.search_query_template,
        description: spec.description,
    }
}
