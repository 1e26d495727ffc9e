//! Turns a portfolio into a document: a Markdown page or the JSON view-model.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;

use crate::portfolio::{
    DEFAULT_FEATURED_COUNT, DEFAULT_LANGUAGE_LIMIT, Palette, Portfolio, Profile, Repository,
    Summary, language_color,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub language_limit: usize,
    pub featured_count: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Markdown,
            language_limit: DEFAULT_LANGUAGE_LIMIT,
            featured_count: DEFAULT_FEATURED_COUNT,
        }
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    profile: &'a Profile,
    repositories: &'a [Repository],
    summary: &'a Summary<'a>,
}

pub fn render(portfolio: &Portfolio, options: &RenderOptions) -> Result<String> {
    let summary = Summary::from_portfolio(portfolio, options.language_limit, options.featured_count);
    match options.format {
        OutputFormat::Markdown => {
            render_markdown(&portfolio.profile, &summary).context("Failed to render portfolio")
        }
        OutputFormat::Json => {
            let document = JsonDocument {
                profile: &portfolio.profile,
                repositories: &portfolio.repositories,
                summary: &summary,
            };
            serde_json::to_string_pretty(&document).context("Failed to serialize portfolio")
        }
    }
}

fn render_markdown(profile: &Profile, summary: &Summary<'_>) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    write_header(&mut out, profile)?;
    write_stats(&mut out, profile, summary.total_stars)?;
    write_about(&mut out, profile, summary.total_stars)?;
    if !summary.languages.is_empty() {
        write_skills(&mut out, &summary.languages)?;
    }
    write_featured(&mut out, profile, summary.featured)?;

    Ok(out)
}

fn write_header(out: &mut String, profile: &Profile) -> std::fmt::Result {
    let display_name = inline(&profile.display_name);
    writeln!(out, "# {}", display_name)?;
    writeln!(out)?;
    writeln!(out, "![{}]({})", profile.handle, profile.avatar_url)?;
    writeln!(out)?;
    writeln!(out, "**@{}**", profile.handle)?;
    writeln!(out)?;
    match &profile.bio {
        Some(bio) => writeln!(out, "Hi 👋, I'm {}. {}", display_name, inline(bio))?,
        None => writeln!(out, "Hi 👋, I'm {}", display_name)?,
    }
    let details: Vec<&str> = [profile.location.as_deref(), profile.blog.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !details.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", details.join(" · "))?;
    }
    writeln!(out)
}

fn write_stats(out: &mut String, profile: &Profile, total_stars: u64) -> std::fmt::Result {
    writeln!(out, "| public repos | followers | following | total stars |")?;
    writeln!(out, "| ---: | ---: | ---: | ---: |")?;
    writeln!(
        out,
        "| {} | {} | {} | {} |",
        profile.repo_count, profile.follower_count, profile.following_count, total_stars
    )?;
    writeln!(out)
}

fn write_about(out: &mut String, profile: &Profile, total_stars: u64) -> std::fmt::Result {
    writeln!(out, "## About")?;
    writeln!(out)?;
    writeln!(
        out,
        "As a developer, **@{}** has built a portfolio of **{} public repositories**, \
         spanning a range of languages and technologies.",
        profile.handle, profile.repo_count
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "With **{} followers** and **{} following**, they take part in the open-source community.",
        profile.follower_count, profile.following_count
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Their repositories have collectively earned **{} stars**.",
        total_stars
    )?;
    writeln!(out)?;
    if let Some(bio) = &profile.bio {
        writeln!(out, "{}", inline(bio))?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_skills(out: &mut String, languages: &[&str]) -> std::fmt::Result {
    writeln!(out, "## Skills")?;
    writeln!(out)?;
    for language in languages {
        writeln!(
            out,
            "- {} `{}`",
            language,
            language_color(language, Palette::Badge)
        )?;
    }
    writeln!(out)
}

fn write_featured(out: &mut String, profile: &Profile, featured: &[Repository]) -> std::fmt::Result {
    writeln!(out, "## Featured Work")?;
    writeln!(out)?;
    writeln!(
        out,
        "[Show all {} projects]({})",
        profile.repo_count, profile.profile_url
    )?;

    if featured.is_empty() {
        writeln!(out)?;
        writeln!(out, "_No public repositories yet._")?;
        return Ok(());
    }

    for repo in featured {
        writeln!(out)?;
        writeln!(out, "### [{}]({})", inline(&repo.name), repo.url)?;
        writeln!(out)?;
        writeln!(out, "{}", inline(&repo.description))?;
        writeln!(out)?;
        let mut facts = vec![
            format!("★ {}", repo.star_count),
            format!("forks {}", repo.fork_count),
        ];
        if let Some(language) = &repo.primary_language {
            facts.insert(
                0,
                format!("{} `{}`", language, language_color(language, Palette::Badge)),
            );
        }
        writeln!(out, "{}", facts.join(" · "))?;
    }
    Ok(())
}

/// Collapses `text` onto one line and escapes brackets so it cannot end a
/// link label or start a new block.
fn inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        for c in word.chars() {
            if matches!(c, '[' | ']') {
                out.push('\\');
            }
            out.push(c);
        }
    }
    out
}
