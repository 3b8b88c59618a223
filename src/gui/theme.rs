use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub base: Srgba<f64>,
    pub alternate: Srgba<f64>,
    pub hovered: Srgba<f64>,
    pub outline: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            base: grey(220),
            alternate: grey(242),
            hovered: grey(250),
            outline: grey(200),
        }
    }
}

fn grey(level: u8) -> Srgba<f64> {
    let v = level as f64 / 255.0;
    Srgba::new(v, v, v, 1.0)
}

impl ThemeColors {
    /// Named colours from the active stylesheet (`@define-color pie_menu_*`)
    /// override the built-in greys.
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            base: Self::lookup_color(context, "pie_menu_base_color", fallback.base),
            alternate: Self::lookup_color(context, "pie_menu_alternate_color", fallback.alternate),
            hovered: Self::lookup_color(context, "pie_menu_hover_color", fallback.hovered),
            outline: Self::lookup_color(context, "pie_menu_outline_color", fallback.outline),
        }
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

/// Installs the built-in styles plus an optional user stylesheet.
pub fn load_css(stylesheet: Option<&Path>) {
    let Some(display) = gdk::Display::default() else {
        log::error!("No display available for styling");
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_data(
        "
.pie-menu-surface {
    background-color: @theme_base_color;
}
.pie-menu-controls {
    padding: 12px;
}
",
    );
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );

    let Some(path) = stylesheet else {
        return;
    };

    match fs_err::read_to_string(path) {
        Ok(css) => {
            let user = gtk::CssProvider::new();
            user.load_from_data(&css);
            gtk::style_context_add_provider_for_display(
                &display,
                &user,
                gtk::STYLE_PROVIDER_PRIORITY_USER,
            );
            log::info!("Loaded stylesheet {}", path.display());
        }
        Err(e) => log::error!("Failed to read stylesheet: {}", e),
    }
}
