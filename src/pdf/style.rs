use super::fonts::Font;

/// A4 in points.
pub const A4: PageSize = PageSize {
    width: 595.2756,
    height: 841.8898,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Center,
    Justify,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub name: &'static str,
    pub font: Font,
    pub font_size: f32,
    pub leading: f32,
    pub alignment: Alignment,
    pub space_after: f32,
}

impl ParagraphStyle {
    pub fn title() -> Self {
        Self {
            name: "Title",
            font: Font::HelveticaBold,
            font_size: 18.0,
            leading: 22.0,
            alignment: Alignment::Center,
            space_after: 6.0,
        }
    }

    pub fn body() -> Self {
        Self {
            name: "Body",
            font: Font::Helvetica,
            font_size: 10.0,
            leading: 16.0,
            alignment: Alignment::Justify,
            space_after: 0.0,
        }
    }

    /// Face used for a run; bold markup upgrades the style's face.
    pub fn font_for(&self, bold: bool) -> Font {
        if bold {
            Font::HelveticaBold
        } else {
            self.font
        }
    }
}
