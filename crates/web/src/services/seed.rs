//! Sample catalog seeding.
//!
//! Inserts a fixed set of Vietnamese dessert products, but only into an empty
//! store - calling against a store that already has products reports success
//! with the existing count and performs no writes. Exposed over
//! `GET /api/seed` and as `gc-cli seed`.

use gung_corner_core::{NewProduct, Price};

use super::catalog::{DirectoryError, ProductDirectory};

/// Outcome of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Number of products now relevant: inserted count, or the pre-existing
    /// count when seeding was skipped.
    pub count: u64,
    /// True when the store already had products and nothing was written.
    pub skipped: bool,
}

impl SeedReport {
    /// Human-readable summary for the JSON response and CLI output.
    #[must_use]
    pub fn message(&self) -> String {
        if self.skipped {
            format!(
                "Database already has {} products. Skipping seed.",
                self.count
            )
        } else {
            format!("Successfully added {} sample products!", self.count)
        }
    }
}

/// The menu's sample products.
#[must_use]
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Sữa chua truyền thống".to_string(),
            description: Some(
                "Sữa chua handmade truyền thống, thơm béo ngậy, vị chua ngọt hài hòa.".to_string(),
            ),
            ingredients: Some("Sữa tươi, men vi sinh, đường".to_string()),
            price: Price::new(8000),
            images: vec![],
            category: "yogurt".to_string(),
            best_seller: Some(true),
        },
        NewProduct {
            name: "Sữa chua Phomai".to_string(),
            description: Some(
                "Sữa chua kết hợp với phô mai béo ngậy, tan chảy trong miệng.".to_string(),
            ),
            ingredients: Some("Sữa tươi, men vi sinh, phô mai".to_string()),
            price: Price::new(10000),
            images: vec![],
            category: "yogurt".to_string(),
            best_seller: Some(true),
        },
        NewProduct {
            name: "Sữa chua Matcha Phomai".to_string(),
            description: Some(
                "Sự kết hợp hoàn hảo giữa matcha Nhật Bản và phô mai béo ngậy.".to_string(),
            ),
            ingredients: Some("Sữa tươi, matcha, phô mai".to_string()),
            price: Price::new(10000),
            images: vec![],
            category: "yogurt".to_string(),
            best_seller: Some(true),
        },
        NewProduct {
            name: "Tàu hũ Singapore nguyên vị".to_string(),
            description: Some(
                "Tàu hũ Singapore mềm mịn, ngọt thanh, tan ngay khi chạm môi.".to_string(),
            ),
            ingredients: Some("Đậu nành, đường phèn, gừng".to_string()),
            price: Price::new(8000),
            images: vec![],
            category: "tofu".to_string(),
            best_seller: Some(true),
        },
        NewProduct {
            name: "Tàu hũ Singapore lá dứa".to_string(),
            description: Some("Tàu hũ Singapore vị lá dứa thơm lừng, thanh mát.".to_string()),
            ingredients: Some("Đậu nành, đường phèn, lá dứa".to_string()),
            price: Price::new(8000),
            images: vec![],
            category: "tofu".to_string(),
            best_seller: Some(false),
        },
        NewProduct {
            name: "Hộp trái cây mix 750ml".to_string(),
            description: Some("Hộp trái cây tươi mix cùng sữa chua thơm ngon.".to_string()),
            ingredients: Some("Sữa chua, trái cây tươi theo mùa".to_string()),
            price: Price::new(35000),
            images: vec![],
            category: "combo".to_string(),
            best_seller: Some(false),
        },
    ]
}

/// Seed the directory with the sample catalog if it is empty.
///
/// # Errors
///
/// Propagates the first [`DirectoryError`] from the existence check or an
/// insert. Inserts are sequential single-document writes; a mid-run failure
/// leaves the already-inserted products in place (no rollback).
pub async fn seed_catalog(
    directory: &dyn ProductDirectory,
) -> Result<SeedReport, DirectoryError> {
    let existing = directory.list().await?;
    if !existing.is_empty() {
        return Ok(SeedReport {
            count: existing.len() as u64,
            skipped: true,
        });
    }

    let samples = sample_products();
    let mut added: u64 = 0;
    for product in &samples {
        directory.create(product).await?;
        added += 1;
    }

    Ok(SeedReport {
        count: added,
        skipped: false,
    })
}
