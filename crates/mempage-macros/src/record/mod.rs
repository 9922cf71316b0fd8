//! Implementation of the `#[derive(Record)]` macro.
//!
//! This module maps a struct's serialized field names onto the `Record`
//! trait of mempage, generating tag resolution, field reads and name
//! constants.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
