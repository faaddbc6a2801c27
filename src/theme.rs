use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct ThemePalette {
    pub name: &'static str,
    pub text_primary: Color,
    pub text_muted: Color,
    pub column_header: Color,
    pub bg_selected: Color,
    pub progress: Color,
    pub status: Color,
    pub danger: Color,
    pub on_danger: Color,
}

pub const THEMES: [ThemePalette; 3] = [
    ThemePalette {
        name: "terminal",
        text_primary: Color::Reset,
        text_muted: Color::DarkGray,
        column_header: Color::Cyan,
        bg_selected: Color::DarkGray,
        progress: Color::Green,
        status: Color::Yellow,
        danger: Color::Red,
        on_danger: Color::White,
    },
    ThemePalette {
        name: "midnight",
        text_primary: Color::Rgb(226, 234, 250),
        text_muted: Color::Rgb(141, 157, 190),
        column_header: Color::Rgb(166, 189, 255),
        bg_selected: Color::Rgb(28, 42, 71),
        progress: Color::Rgb(68, 201, 127),
        status: Color::Rgb(255, 214, 102),
        danger: Color::Rgb(238, 111, 129),
        on_danger: Color::Rgb(9, 13, 20),
    },
    ThemePalette {
        name: "graphite",
        text_primary: Color::Rgb(231, 236, 245),
        text_muted: Color::Rgb(151, 160, 179),
        column_header: Color::Rgb(186, 204, 255),
        bg_selected: Color::Rgb(44, 51, 66),
        progress: Color::Rgb(103, 205, 147),
        status: Color::Rgb(240, 198, 116),
        danger: Color::Rgb(241, 124, 149),
        on_danger: Color::Rgb(16, 18, 22),
    },
];

/// Unknown names fall back to the default palette instead of failing.
pub fn resolve_theme(name: Option<&str>) -> &'static ThemePalette {
    if let Some(name) = name
        && let Some(theme) = THEMES
            .iter()
            .find(|theme| theme.name.eq_ignore_ascii_case(name))
    {
        return theme;
    }
    default_theme()
}

pub fn default_theme() -> &'static ThemePalette {
    &THEMES[0]
}

#[cfg(test)]
mod tests {
    use super::{default_theme, resolve_theme};

    #[test]
    fn resolves_known_theme_case_insensitive() {
        let theme = resolve_theme(Some("GrApHiTe"));
        assert_eq!(theme.name, "graphite");
    }

    #[test]
    fn missing_or_unknown_theme_uses_terminal_colors() {
        assert_eq!(resolve_theme(None).name, "terminal");
        assert_eq!(resolve_theme(Some("solarized")).name, default_theme().name);
    }
}
