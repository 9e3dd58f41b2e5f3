//! Shared type definitions.
//!
//! Newtype wrappers prevent accidentally mixing values of different meaning
//! (e.g. a product ID and an image file ID are both strings on the wire).

mod id;
mod price;
mod product;

pub use id::ProductId;
pub use price::Price;
pub use product::{NewProduct, Product, ProductPatch};
