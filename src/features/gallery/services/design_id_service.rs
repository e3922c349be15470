use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::gallery::models::Category;
use crate::shared::validation::DESIGN_ID_REGEX;

/// Allocates human-readable sequential design ids, scoped by category prefix.
///
/// Allocation is a single upsert against `design_id_counters`, so concurrent
/// uploads in the same category always observe distinct numbers. The original
/// scan-then-increment approach raced under concurrency; the counter table
/// replaces it.
pub struct DesignIdService {
    pool: PgPool,
}

impl DesignIdService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return the next unused design id for the category, e.g. `FLORAL-042`.
    pub async fn generate(&self, category: Category) -> Result<String> {
        let prefix = prefix_for(category);

        let next_number: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO design_id_counters (prefix, last_number)
            VALUES ($1, 1)
            ON CONFLICT (prefix) DO UPDATE
            SET last_number = design_id_counters.last_number + 1
            RETURNING last_number
            "#,
        )
        .bind(prefix)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to allocate design id for '{}': {:?}", prefix, e);
            AppError::Database(e)
        })?;

        Ok(format_design_id(prefix, next_number as u32))
    }
}

/// Weddings and corporate work is floral-led; everything else is balloon-led.
pub fn prefix_for(category: Category) -> &'static str {
    match category {
        Category::Weddings | Category::Corporate => "FLORAL",
        Category::Birthdays => "BALLOON",
    }
}

/// Format `PREFIX-NNN`, zero-padded to 3 digits. Numbers beyond 999 keep all
/// their digits.
pub fn format_design_id(prefix: &str, number: u32) -> String {
    format!("{}-{:03}", prefix, number)
}

/// Split a design id into its prefix and numeric suffix.
pub fn parse_design_id(design_id: &str) -> Option<(&str, u32)> {
    let captures = DESIGN_ID_REGEX.captures(design_id)?;
    let prefix = captures.get(1)?.as_str();
    let number = captures.get(2)?.as_str().parse().ok()?;
    Some((prefix, number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_mapping_matches_categories() {
        assert_eq!(prefix_for(Category::Weddings), "FLORAL");
        assert_eq!(prefix_for(Category::Corporate), "FLORAL");
        assert_eq!(prefix_for(Category::Birthdays), "BALLOON");
    }

    #[test]
    fn design_ids_are_zero_padded() {
        assert_eq!(format_design_id("BALLOON", 1), "BALLOON-001");
        assert_eq!(format_design_id("FLORAL", 42), "FLORAL-042");
        assert_eq!(format_design_id("FLORAL", 999), "FLORAL-999");
        assert_eq!(format_design_id("FLORAL", 1234), "FLORAL-1234");
    }

    #[test]
    fn parse_inverts_format() {
        assert_eq!(parse_design_id("BALLOON-001"), Some(("BALLOON", 1)));
        assert_eq!(parse_design_id("FLORAL-1234"), Some(("FLORAL", 1234)));
        assert_eq!(parse_design_id("floral-001"), None);
        assert_eq!(parse_design_id("FLORAL"), None);
    }

    #[test]
    fn formatted_ids_sort_numerically_within_padding() {
        let a = parse_design_id(&format_design_id("FLORAL", 7)).unwrap().1;
        let b = parse_design_id(&format_design_id("FLORAL", 8)).unwrap().1;
        assert!(b > a);
    }
}
