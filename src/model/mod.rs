//! Pure data structures for products and user identities.

pub mod product;
pub mod user;

pub use product::*;
pub use user::*;
