//! View-model for a rendered portfolio and the pure transforms that build it.

pub mod aggregate;
pub mod language;
mod model;
mod normalize;

pub use aggregate::{
    DEFAULT_FEATURED_COUNT, DEFAULT_LANGUAGE_LIMIT, Summary, distinct_languages, featured,
    total_stars,
};
pub use language::{Palette, language_color};
pub use model::{NO_DESCRIPTION, Portfolio, Profile, Repository, profile_url};
pub use normalize::normalize;
