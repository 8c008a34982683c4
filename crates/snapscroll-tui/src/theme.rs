use ratatui::style::Color;

/// Runtime theme colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub accent: Color,

    /// Section background colors, cycled by section index
    pub sections: Vec<Color>,
    /// Background of free-scrolling sections
    pub normal_section: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Default to Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            success: Color::Rgb(0xa9, 0xb6, 0x65),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            sections: vec![
                Color::Rgb(0x7d, 0xae, 0xa3),
                Color::Rgb(0xd3, 0x86, 0x9b),
                Color::Rgb(0xd8, 0xa6, 0x57),
                Color::Rgb(0xa9, 0xb6, 0x65),
                Color::Rgb(0xe7, 0x8a, 0x4e),
            ],
            normal_section: Color::Rgb(0x50, 0x49, 0x45),
        }
    }
}

impl Theme {
    /// Background for the section at `index`
    pub fn section_color(&self, index: usize, normal: bool) -> Color {
        if normal || self.sections.is_empty() {
            self.normal_section
        } else {
            self.sections[index % self.sections.len()]
        }
    }
}
