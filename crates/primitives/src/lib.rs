//! Value types shared by the storefront client crates.

/// Email normalization and plausibility checks.
pub mod email;
/// Opaque identifiers for cart lines, products and reviews.
pub mod ids;
/// Currency amounts stored as integer cents.
pub mod money;
/// Coercion of raw quantity input.
pub mod quantity;

pub use email::{is_plausible_email, normalize_email};
pub use ids::{ItemId, ProductId, ReviewId};
pub use money::{Money, MoneyError};
pub use quantity::{QuantityInput, parse_leading_int, sanitize_digits};
