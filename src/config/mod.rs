//! Configuration module

mod site;
mod theme;

pub use site::HighlightConfig;
pub use site::{SiteConfig, SiteLink};
pub use theme::{Appearance, Palette, PreferenceStore, Theme, ThemeConfig};
