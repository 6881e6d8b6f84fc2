//! Light/dark appearance: palettes, preference resolution and persistence

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File (relative to the site base directory) holding the stored preference
const PREFERENCE_FILE: &str = ".folio/theme";

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => anyhow::bail!("Unknown theme: {}. Available: light, dark", other),
        }
    }
}

/// CSS custom properties applied for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub text: String,
    pub background: String,
    pub text_rgb: String,
    pub background_rgb: String,
    pub border: String,
    pub code_bg: String,
    pub accent: String,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            text: "#000000".to_string(),
            background: "#ffffff".to_string(),
            text_rgb: "0, 0, 0".to_string(),
            background_rgb: "255, 255, 255".to_string(),
            border: "#e5e5e5".to_string(),
            code_bg: "#f8f8f8".to_string(),
            accent: "#0070f3".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            text: "#ffffff".to_string(),
            background: "#000000".to_string(),
            text_rgb: "255, 255, 255".to_string(),
            background_rgb: "0, 0, 0".to_string(),
            border: "#333333".to_string(),
            code_bg: "#1e1e1e".to_string(),
            accent: "#0070f3".to_string(),
        }
    }

    /// Variable declarations, one per line
    pub fn css_declarations(&self) -> String {
        [
            ("--text", &self.text),
            ("--background", &self.background),
            ("--text-rgb", &self.text_rgb),
            ("--background-rgb", &self.background_rgb),
            ("--border", &self.border),
            ("--code-bg", &self.code_bg),
            ("--accent", &self.accent),
        ]
        .iter()
        .map(|(name, value)| format!("  {}: {};\n", name, value))
        .collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}

/// Configured palette values; anything left out keeps the built-in value
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PaletteOverrides {
    text: Option<String>,
    background: Option<String>,
    text_rgb: Option<String>,
    background_rgb: Option<String>,
    border: Option<String>,
    code_bg: Option<String>,
    accent: Option<String>,
}

impl PaletteOverrides {
    fn apply(self, base: Palette) -> Palette {
        Palette {
            text: self.text.unwrap_or(base.text),
            background: self.background.unwrap_or(base.background),
            text_rgb: self.text_rgb.unwrap_or(base.text_rgb),
            background_rgb: self.background_rgb.unwrap_or(base.background_rgb),
            border: self.border.unwrap_or(base.border),
            code_bg: self.code_bg.unwrap_or(base.code_bg),
            accent: self.accent.unwrap_or(base.accent),
        }
    }
}

fn light_palette<'de, D>(deserializer: D) -> std::result::Result<Palette, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(PaletteOverrides::deserialize(deserializer)?.apply(Palette::light()))
}

fn dark_palette<'de, D>(deserializer: D) -> std::result::Result<Palette, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(PaletteOverrides::deserialize(deserializer)?.apply(Palette::dark()))
}

/// Theme section of the site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Used when neither a stored nor an OS preference exists
    pub default: Theme,
    #[serde(deserialize_with = "light_palette")]
    pub light: Palette,
    #[serde(deserialize_with = "dark_palette")]
    pub dark: Palette,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: Theme::Light,
            light: Palette::light(),
            dark: Palette::dark(),
        }
    }
}

impl ThemeConfig {
    pub fn palette(&self, theme: Theme) -> &Palette {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }

    /// Stylesheet with the initial theme on `:root` and both themes keyed
    /// by the `data-theme` attribute
    pub fn stylesheet(&self, initial: Theme) -> String {
        format!(
            ":root {{\n{}}}\n\n:root[data-theme=\"light\"] {{\n{}}}\n\n:root[data-theme=\"dark\"] {{\n{}}}\n",
            self.palette(initial).css_declarations(),
            self.light.css_declarations(),
            self.dark.css_declarations()
        )
    }
}

/// Current appearance
///
/// Initialized once from the stored preference, then the OS preference,
/// then the configured default. Changes go through [`Appearance::set`] or
/// [`Appearance::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    theme: Theme,
}

impl Appearance {
    pub fn resolve(stored: Option<Theme>, os_prefers: Option<Theme>, default: Theme) -> Self {
        Self {
            theme: stored.or(os_prefers).unwrap_or(default),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

/// File-backed stored theme preference
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store located under the site base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            path: base_dir.as_ref().join(PREFERENCE_FILE),
        }
    }

    /// Stored preference, if any. An unreadable value counts as no preference.
    pub fn load(&self) -> Option<Theme> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!("Ignoring stored theme preference {:?}: {}", self.path, e);
                None
            }
        }
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, theme.as_str())
            .with_context(|| format!("Failed to write {:?}", self.path))?;
        tracing::debug!("Stored theme preference {} in {:?}", theme, self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_order() {
        let a = Appearance::resolve(Some(Theme::Light), Some(Theme::Dark), Theme::Dark);
        assert_eq!(a.theme(), Theme::Light);

        let a = Appearance::resolve(None, Some(Theme::Dark), Theme::Light);
        assert_eq!(a.theme(), Theme::Dark);

        let a = Appearance::resolve(None, None, Theme::Dark);
        assert_eq!(a.theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut a = Appearance::resolve(None, None, Theme::Light);
        assert_eq!(a.toggle(), Theme::Dark);
        assert_eq!(a.toggle(), Theme::Light);
        a.set(Theme::Dark);
        assert_eq!(a.theme(), Theme::Dark);
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light\n".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_stylesheet_contains_both_palettes() {
        let css = ThemeConfig::default().stylesheet(Theme::Dark);
        assert!(css.starts_with(":root {\n  --text: #ffffff;"));
        assert!(css.contains(":root[data-theme=\"light\"]"));
        assert!(css.contains("--code-bg: #f8f8f8;"));
        assert!(css.contains("--code-bg: #1e1e1e;"));
    }

    #[test]
    fn test_partial_palette_override() {
        let config: ThemeConfig =
            serde_yaml::from_str("default: dark\ndark:\n  accent: '#ff0080'\n").unwrap();
        assert_eq!(config.default, Theme::Dark);
        assert_eq!(config.dark.accent, "#ff0080");
        assert_eq!(config.dark.background, "#000000");
        assert_eq!(config.light, Palette::light());
    }

    #[test]
    fn test_preference_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path());
        assert_eq!(store.load(), None);

        store.save(Theme::Dark).unwrap();
        assert_eq!(store.load(), Some(Theme::Dark));

        fs::write(dir.path().join(PREFERENCE_FILE), "purple").unwrap();
        assert_eq!(store.load(), None);
    }
}
