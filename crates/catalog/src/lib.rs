//! Specialist catalog for Foreman.
//!
//! Provides the immutable [`Catalog`] snapshot (loading, validation and
//! lookup), the built-in specialist roster, and profile-document parsing.

pub mod builtin;
pub mod catalog;
pub mod profile;

pub use catalog::Catalog;
pub use profile::{
    format_response, parse_profile, DeliverableTemplate, ProfileStore, SpecialistProfile,
};
