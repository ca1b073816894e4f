use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

const BUILTIN_CONTENT: &str = include_str!("../content/default.toml");

/// The text a portfolio page is rendered from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteContent {
    pub hero: Hero,
    pub skills: Skills,
    #[serde(default)]
    pub experience: Vec<Experience>,
    pub about: About,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hero {
    pub name: String,
    pub specialty: String,
    pub summary: String,
    /// Rendered as the call to action button when present.
    #[serde(default)]
    pub email: Option<String>,
}

/// Two marquee rows of skill badges.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Skills {
    #[serde(default)]
    pub row1: Vec<String>,
    #[serde(default)]
    pub row2: Vec<String>,
}

impl Skills {
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.row1.iter().chain(self.row2.iter()).map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experience {
    pub company: String,
    pub position: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct About {
    #[serde(default)]
    pub cards: Vec<String>,
    /// Free text. Blank lines separate paragraphs and `#words` become hashtags.
    #[serde(default)]
    pub description: String,
}

impl About {
    /// Non-empty blocks of the description that are not just a line of hashtags.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.description
            .split("\n\n")
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .filter(|block| !block.split_whitespace().all(|word| word.starts_with('#')))
            .collect()
    }

    pub fn hashtags(&self) -> Vec<&str> {
        self.description
            .split_whitespace()
            .filter(|word| word.len() > 1 && word.starts_with('#'))
            .collect()
    }
}

impl SiteContent {
    /// The content the page ships with.
    pub fn builtin() -> anyhow::Result<Self> {
        toml::from_str(BUILTIN_CONTENT).context("Built-in site content is invalid")
    }

    /// Load content from a TOML file with the same layout as the built-in content.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read site content from {}", path.display()))?;

        toml::from_str(&raw)
            .with_context(|| format!("Invalid site content in {}", path.display()))
    }
}
