//! Show or change the stored theme preference

use anyhow::Result;

use crate::config::{Appearance, PreferenceStore, Theme};
use crate::Site;

/// What to do with the preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Toggle,
    Set(Theme),
}

/// Apply `action` and return the resulting theme
///
/// Without a stored preference the configured default applies; toggling
/// and setting persist the result for the next generation.
pub fn run(site: &Site, action: ThemeAction) -> Result<Theme> {
    let store = PreferenceStore::new(&site.base_dir);
    let mut appearance = Appearance::resolve(store.load(), None, site.config.theme.default);

    match action {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            appearance.toggle();
            store.save(appearance.theme())?;
        }
        ThemeAction::Set(theme) => {
            appearance.set(theme);
            store.save(theme)?;
        }
    }

    tracing::debug!("Theme is now {}", appearance.theme());
    Ok(appearance.theme())
}
