//! Landing page profile card.
//!
//! The card is plain data: loaded from a JSON file, or a neutral
//! placeholder when none is given.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

/// Owner of the storefront, shown above the entry into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub links: Vec<ProfileLink>,
}

impl Profile {
    /// Card shown when no profile file is configured.
    pub fn placeholder() -> Self {
        Self {
            name: "Storefront".to_string(),
            headline: "Product catalog".to_string(),
            about: "Browse, filter and sort the product catalog.".to_string(),
            email: None,
            links: Vec::new(),
        }
    }

    /// Load a profile from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile {}", path.display()))?;
        let profile: Profile = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse profile {}", path.display()))?;
        info!("Loaded profile for {}", profile.name);
        Ok(profile)
    }

    /// Avatar initials: first letter of up to two words of the name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::placeholder()
    }
}
