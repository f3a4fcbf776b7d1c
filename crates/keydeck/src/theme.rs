use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub secondary_accent: Color32,
    pub panel_background: Color32,
    pub title_size: f32,
    pub body_size: f32,
    pub notes_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x0A, 0x0E, 0x27),
            foreground: Color32::from_rgb(0xC8, 0xCC, 0xE0),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x00, 0xF5, 0xFF),
            secondary_accent: Color32::from_rgb(0xFF, 0x00, 0x80),
            panel_background: Color32::from_rgb(0x16, 0x1B, 0x3D),
            title_size: 72.0,
            body_size: 36.0,
            notes_size: 22.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xF7, 0xF8, 0xFC),
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0x00, 0x8C, 0xA8),
            secondary_accent: Color32::from_rgb(0xC4, 0x00, 0x66),
            panel_background: Color32::from_rgb(0xE6, 0xE8, 0xF0),
            title_size: 72.0,
            body_size: 36.0,
            notes_size: 22.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        let opacity = opacity.clamp(0.0, 1.0);
        Color32::from_rgba_unmultiplied(
            color.r(),
            color.g(),
            color.b(),
            (color.a() as f32 * opacity) as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_defaults_to_dark() {
        assert_eq!(Theme::from_name("light").name, "light");
        assert_eq!(Theme::from_name("dark").name, "dark");
        assert_eq!(Theme::from_name("neon").name, "dark");
    }

    #[test]
    fn test_with_opacity_scales_alpha() {
        let c = Theme::with_opacity(Color32::WHITE, 0.5);
        assert_eq!(c.a(), 127);
        assert_eq!(Theme::with_opacity(Color32::WHITE, 2.0).a(), 255);
    }
}
