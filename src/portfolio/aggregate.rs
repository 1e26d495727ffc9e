//! Display aggregates derived from a repository sequence.

use serde::Serialize;
use std::collections::HashSet;

use super::model::{Portfolio, Repository};

/// Maximum number of languages listed in the skills section.
pub const DEFAULT_LANGUAGE_LIMIT: usize = 8;

/// Number of repositories shown in the featured grid.
pub const DEFAULT_FEATURED_COUNT: usize = 8;

/// Sum of stars across all repositories, saturating at `u64::MAX`.
pub fn total_stars(repos: &[Repository]) -> u64 {
    repos
        .iter()
        .fold(0u64, |total, r| total.saturating_add(r.star_count))
}

/// Distinct primary languages in first-seen order, at most `limit` of them.
pub fn distinct_languages(repos: &[Repository], limit: usize) -> Vec<&str> {
    let mut seen = HashSet::new();
    repos
        .iter()
        .filter_map(|r| r.primary_language.as_deref())
        .filter(|lang| seen.insert(*lang))
        .take(limit)
        .collect()
}

/// The first `count` repositories, in input order.
pub fn featured(repos: &[Repository], count: usize) -> &[Repository] {
    &repos[..count.min(repos.len())]
}

/// Everything the presentation layer derives from a portfolio.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Summary<'a> {
    pub total_stars: u64,
    pub languages: Vec<&'a str>,
    pub featured: &'a [Repository],
}

impl<'a> Summary<'a> {
    pub fn from_portfolio(portfolio: &'a Portfolio, language_limit: usize, featured_count: usize) -> Self {
        let repos = portfolio.repositories.as_slice();
        Self {
            total_stars: total_stars(repos),
            languages: distinct_languages(repos, language_limit),
            featured: featured(repos, featured_count),
        }
    }
}
