//! Service catalog entry: an offering shown to clients.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::DEFAULT_SERVICE_ICON;
use crate::errors::{AppError, AppResult};

/// Catalog entry domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntry {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Генеральная уборка")]
    pub title: String,
    pub description: String,
    /// Icon identifier understood by the front end
    #[schema(example = "Building2")]
    pub icon: String,
    /// Display price, free text
    #[schema(example = "от 2000 ₽")]
    pub price: String,
}

/// Catalog fields as submitted; absent fields are `None`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CatalogEntryDraft {
    #[validate(length(max = 255, message = "Title is too long"))]
    #[schema(example = "Window cleaning")]
    pub title: Option<String>,
    #[validate(length(max = 4000, message = "Description is too long"))]
    pub description: Option<String>,
    #[validate(length(max = 64, message = "Icon is too long"))]
    #[schema(example = "Sparkles")]
    pub icon: Option<String>,
    #[validate(length(max = 64, message = "Price is too long"))]
    #[schema(example = "от 1500 ₽")]
    pub price: Option<String>,
}

/// Validated data for a new catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCatalogEntry {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub price: String,
}

/// Field replacements for an existing entry; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogEntryChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub price: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl CatalogEntryDraft {
    /// Title, description and price are required; icon falls back to the default.
    pub fn into_new(self) -> AppResult<NewCatalogEntry> {
        match (
            non_empty(self.title),
            non_empty(self.description),
            non_empty(self.price),
        ) {
            (Some(title), Some(description), Some(price)) => Ok(NewCatalogEntry {
                title,
                description,
                icon: non_empty(self.icon).unwrap_or_else(|| DEFAULT_SERVICE_ICON.to_string()),
                price,
            }),
            _ => Err(AppError::validation(
                "Title, description and price are required",
            )),
        }
    }

    pub fn into_changes(self) -> CatalogEntryChanges {
        CatalogEntryChanges {
            title: non_empty(self.title),
            description: non_empty(self.description),
            icon: non_empty(self.icon),
            price: non_empty(self.price),
        }
    }
}
