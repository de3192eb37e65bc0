//! Domain logic for the digilink product registry.
//!
//! Everything in this crate is pure: GTIN validation, canonical link
//! construction, symbol encoding, and product input validation. No I/O,
//! no async -- the `db`, `cloud`, and `api` crates supply those.

pub mod error;
pub mod gtin;
pub mod link;
pub mod product;
pub mod symbol;
