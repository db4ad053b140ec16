//! Static product catalog.
//!
//! The catalog is compiled into the binary and never changes at runtime.
//! It is shared between the cart store and the renderer through an `Arc`,
//! so cloning a [`Catalog`] is cheap.

use std::collections::HashSet;
use std::sync::Arc;

use aqua_aura_core::{Price, ProductId};
use thiserror::Error;

/// Errors building a custom catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share an ID.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub description: String,
    /// Image file name, relative to the configured image base path.
    pub image: String,
}

impl Product {
    fn new(id: i32, name: &str, cents: i64, description: &str, image: &str) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::from_cents(cents),
            description: description.to_string(),
            image: image.to_string(),
        }
    }
}

/// Read-only product list with lookup by ID.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog from a product list, preserving its order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an ID.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self {
            products: products.into(),
        })
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The first `count` products, shown in the featured section.
    #[must_use]
    pub fn featured(&self, count: usize) -> &[Product] {
        let end = count.min(self.products.len());
        self.products.get(..end).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    /// The Aqua Aura diffuser line.
    fn default() -> Self {
        let products = vec![
            Product::new(
                1,
                "Modern Cylindrical Diffuser",
                4999,
                "Sleek, modern design with a powerful, quiet mist.",
                "modern_cylindrical_black.png",
            ),
            Product::new(
                2,
                "Animal Cat Diffuser",
                3499,
                "A cute, white cat-shaped diffuser for a playful touch.",
                "animal_cat_white.png",
            ),
            Product::new(
                3,
                "Animal Bear Diffuser",
                3499,
                "A charming pink bear diffuser, perfect for a cozy atmosphere.",
                "animal_bear_pink.png",
            ),
            Product::new(
                4,
                "Teardrop Diffuser",
                5999,
                "Elegant teardrop shape in a clean white finish.",
                "teardrop_white.png",
            ),
            Product::new(
                5,
                "Spherical Diffuser",
                4599,
                "Minimalist spherical design with a warm ambient light.",
                "spherical_white.png",
            ),
            Product::new(
                6,
                "Plant Diffuser",
                6599,
                "Unique plant-inspired design for a natural look.",
                "plant_white.png",
            ),
            Product::new(
                7,
                "Pyramid Diffuser",
                5599,
                "Striking pyramid shape in a matte black finish.",
                "pyramid_black.png",
            ),
            Product::new(
                8,
                "Minimalist Humidifier",
                3999,
                "Simple, square design for effective humidification.",
                "minimalist_humidifier.jpg",
            ),
            Product::new(
                9,
                "Mushroom Diffuser",
                3299,
                "Cute mushroom shape with a smiling face and colorful light.",
                "category_cute_playful_new_bg.png",
            ),
        ];
        Self {
            products: products.into(),
        }
    }
}
