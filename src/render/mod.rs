//! Built-in page templates using the Tera template engine
//!
//! Templates, the stylesheet and the client script are embedded in the
//! binary.

pub mod navigation;
mod sidebar;

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::format_date;

pub use sidebar::{SidebarEntry, SidebarView, NO_POSTS};

/// Layout stylesheet
pub const SITE_CSS: &str = include_str!("assets/site.css");

/// Theme toggle, sidebar, navigation and copy-button script
pub const SITE_JS: &str = include_str!("assets/folio.js");

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("templates/layout.html")),
            ("index.html", include_str!("templates/index.html")),
            ("post.html", include_str!("templates/post.html")),
            ("404.html", include_str!("templates/404.html")),
            // Partials
            (
                "partials/navigation.html",
                include_str!("templates/partials/navigation.html"),
            ),
            (
                "partials/sidebar.html",
                include_str!("templates/partials/sidebar.html"),
            ),
        ])?;

        tera.register_filter("format_date", format_date_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the sidebar on its own
    pub fn render_sidebar(&self, sidebar: &SidebarView) -> Result<String> {
        let mut context = Context::new();
        context.insert("sidebar", sidebar);
        self.render("partials/sidebar.html", &context)
    }
}

/// Tera filter: long-form display date
fn format_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("format_date", "value", String, value);
    Ok(tera::Value::String(format_date(&s)))
}
