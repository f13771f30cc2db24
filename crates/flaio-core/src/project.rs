use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// App shown inside a project card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreview {
    pub name: String,
    /// Emoji fallback when no image is available
    pub icon: String,
    pub href: String,
    /// Icon image path, relative to the assets directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_image: Option<String>,
}

/// One entry of the wheel: the word it spells plus the project behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Word displayed on the wheel
    pub word: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub href: String,
    pub link_label: String,
    /// Hue (degrees) used to tint the card
    #[serde(default)]
    pub accent_hue: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apps: Vec<AppPreview>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    projects: Vec<Project>,
}

/// Ordered, non-empty, fixed set of projects
#[derive(Debug, Clone)]
pub struct ProjectSet {
    projects: Vec<Project>,
}

impl ProjectSet {
    pub fn new(projects: Vec<Project>) -> Result<Self> {
        if projects.is_empty() {
            return Err(Error::EmptyItemSet);
        }
        Ok(Self { projects })
    }

    /// Load a catalog from TOML (`[[projects]]` tables)
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        Self::new(file.projects)
    }

    /// Load from a file, or the built-in catalog when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                Self::from_toml(&content)
            }
            None => Ok(Self::builtin()),
        }
    }

    /// The four FLAIO projects
    pub fn builtin() -> Self {
        Self {
            projects: builtin_projects(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Always false; kept for API symmetry with slices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Project at an active index; indices wrap so any value is valid
    pub fn get(&self, index: usize) -> &Project {
        &self.projects[index % self.projects.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn words(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.word.as_str()).collect()
    }

    pub fn as_slice(&self) -> &[Project] {
        &self.projects
    }
}

fn app(name: &str, icon: &str, href: &str, image: &str) -> AppPreview {
    AppPreview {
        name: name.to_string(),
        icon: icon.to_string(),
        href: href.to_string(),
        icon_image: Some(image.to_string()),
    }
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

fn builtin_projects() -> Vec<Project> {
    vec![
        Project {
            word: "apps".to_string(),
            name: "FLAIO Apps".to_string(),
            description: "A suite of web apps built for fun, strategy, and daily use. Play poker, beat the house, or read the internet.".to_string(),
            icon: "🎰".to_string(),
            href: "https://flaio.com/apps".to_string(),
            link_label: "Explore apps".to_string(),
            accent_hue: 220,
            screenshot: None,
            apps: vec![
                app("Leprechaun", "🍀", "https://leprechaun.flaio.com", "icons/leprechaun.png"),
                app("Video Poker", "🃏", "https://poker.flaio.com", "icons/videopoker.png"),
                app("Lector", "📰", "https://lector.flaio.com", "icons/lector.png"),
            ],
            tags: tags(&["gaming", "productivity", "web"]),
        },
        Project {
            word: "atelier".to_string(),
            name: "FLAIO Atelier".to_string(),
            description: "Rhinestone athleisure. Every crystal placed by hand. Premium activewear covered in thousands of Crystal AB stones.".to_string(),
            icon: "✨".to_string(),
            href: "https://atelier.flaio.com".to_string(),
            link_label: "Visit store".to_string(),
            accent_hue: 35,
            screenshot: Some("screenshots/atelier.jpg".to_string()),
            apps: Vec::new(),
            tags: tags(&["fashion", "shopify", "e-commerce"]),
        },
        Project {
            word: "archive".to_string(),
            name: "The Beyoncé Archive".to_string(),
            description: "A curated archive of Beyoncé: performances, visuals, fashion, eras, and cultural moments. Organized, searchable, and ever-growing.".to_string(),
            icon: "🐝".to_string(),
            href: "https://beyonce.flaio.com".to_string(),
            link_label: "Browse the archive".to_string(),
            accent_hue: 45,
            screenshot: Some("screenshots/archive.jpg".to_string()),
            apps: Vec::new(),
            tags: tags(&["archive", "media", "culture"]),
        },
        Project {
            word: "art".to_string(),
            name: "FLAIO Art".to_string(),
            description: "Original digital art, generative visuals, and creative experiments. Where code meets canvas.".to_string(),
            icon: "🎨".to_string(),
            href: "https://flaio.com/art".to_string(),
            link_label: "View gallery".to_string(),
            accent_hue: 310,
            screenshot: None,
            apps: Vec::new(),
            tags: tags(&["art", "generative", "creative"]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let set = ProjectSet::builtin();
        assert_eq!(set.words(), vec!["apps", "atelier", "archive", "art"]);
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(matches!(ProjectSet::new(Vec::new()), Err(Error::EmptyItemSet)));
        assert!(matches!(
            ProjectSet::from_toml("projects = []"),
            Err(Error::EmptyItemSet)
        ));
    }

    #[test]
    fn test_get_wraps() {
        let set = ProjectSet::builtin();
        assert_eq!(set.get(5).word, "atelier");
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
[[projects]]
word = "audio"
name = "FLAIO Audio"
description = "Loops."
icon = "🎧"
href = "https://audio.flaio.com"
link_label = "Listen"
accent_hue = 180
tags = ["music"]
"#;
        let set = ProjectSet::from_toml(toml).unwrap();
        assert_eq!(set.len(), 1);
        let p = set.get(0);
        assert_eq!(p.word, "audio");
        assert!(p.apps.is_empty());
        assert!(p.screenshot.is_none());
        assert_eq!(p.tags, vec!["music".to_string()]);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        assert!(matches!(
            ProjectSet::from_toml("[[projects]]\nword = 3"),
            Err(Error::Config(_))
        ));
    }
}
