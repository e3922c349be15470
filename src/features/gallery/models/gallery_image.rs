use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Gallery image category. Drives the design-id prefix and the public
/// category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Birthdays,
    Weddings,
    Corporate,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Birthdays => "birthdays",
            Category::Weddings => "weddings",
            Category::Corporate => "corporate",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "birthdays" => Ok(Category::Birthdays),
            "weddings" => Ok(Category::Weddings),
            "corporate" => Ok(Category::Corporate),
            other => Err(format!(
                "Unknown category '{}' (expected birthdays, weddings or corporate)",
                other
            )),
        }
    }
}

/// Database model for a gallery image.
///
/// `design_id` is unique and immutable after creation. `keywords` is stored
/// comma-joined; the wire format is a list. `image_keys` is an ordered,
/// non-empty list of object-storage keys.
#[derive(Debug, Clone, FromRow)]
pub struct GalleryImage {
    pub id: Uuid,
    pub design_id: String,
    pub title: String,
    pub category: String,
    pub keywords: String,
    pub image_keys: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for category in [Category::Birthdays, Category::Weddings, Category::Corporate] {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("galas".parse::<Category>().is_err());
        assert!("Birthdays".parse::<Category>().is_err());
    }
}
