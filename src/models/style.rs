//! Cell types and text styles
//!
//! A cell carries two tags: its `CellType` (the role it plays in a worksheet,
//! e.g. prompt, label, image) and its `TextStyle` (which font/colour entry of
//! the palette it is drawn with). Setting the type picks a matching style.

use serde_repr::{Deserialize_repr, Serialize_repr};

/// All text styles a cell can be drawn with
#[repr(u8)]
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TextStyle {
    #[default]
    Default = 0,
    Variable = 1,
    Function = 2,
    Number = 3,
    GreekConstant = 4,
    SpecialConstant = 5,
    String = 6,
    MainPrompt = 7,
    OtherPrompt = 8,
    Label = 9,
    Input = 10,
    Highlight = 11,
    TextBackground = 12,
    Text = 13,
    Subsection = 14,
    Subsubsection = 15,
    Section = 16,
    Title = 17,
    Error = 18,
    CellBracket = 19,
    ActiveCellBracket = 20,
    Cursor = 21,
    Selection = 22,
    EqualsSelection = 23,
    Outdated = 24,
    CodeComment = 25,
    CodeVariable = 26,
    CodeFunction = 27,
    CodeNumber = 28,
    CodeString = 29,
    CodeOperator = 30,
    CodeEndOfLine = 31,
}

/// Number of entries in the style table
pub const STYLE_COUNT: usize = 32;

/// Role of a cell inside its worksheet
#[repr(u8)]
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CellType {
    #[default]
    Default = 0,
    MainPrompt = 1,
    Prompt = 2,
    Label = 3,
    Input = 4,
    Error = 5,
    Text = 6,
    Title = 7,
    Section = 8,
    Subsection = 9,
    Subsubsection = 10,
    Image = 11,
    Slide = 12,
}

impl CellType {
    /// The style a cell of this type is drawn with unless told otherwise
    pub fn default_style(self) -> TextStyle {
        match self {
            CellType::MainPrompt => TextStyle::MainPrompt,
            CellType::Prompt => TextStyle::OtherPrompt,
            CellType::Label => TextStyle::Label,
            CellType::Input => TextStyle::Input,
            CellType::Error => TextStyle::Error,
            CellType::Text => TextStyle::Text,
            CellType::Subsubsection => TextStyle::Subsubsection,
            CellType::Subsection => TextStyle::Subsection,
            CellType::Section => TextStyle::Section,
            CellType::Title => TextStyle::Title,
            _ => TextStyle::Default,
        }
    }

    /// Cells of these types always open a new visual line
    pub fn starts_line(self) -> bool {
        self == CellType::MainPrompt
    }
}

impl TextStyle {
    /// Whether text in this style is mathematics (as opposed to labels/input)
    pub fn is_math(self) -> bool {
        !matches!(self, TextStyle::Default | TextStyle::Label | TextStyle::Input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_selects_style() {
        assert_eq!(CellType::MainPrompt.default_style(), TextStyle::MainPrompt);
        assert_eq!(CellType::Prompt.default_style(), TextStyle::OtherPrompt);
        assert_eq!(CellType::Label.default_style(), TextStyle::Label);
        assert_eq!(CellType::Image.default_style(), TextStyle::Default);
    }

    #[test]
    fn test_is_math() {
        assert!(TextStyle::Variable.is_math());
        assert!(!TextStyle::Label.is_math());
        assert!(!TextStyle::Input.is_math());
        assert!(!TextStyle::Default.is_math());
    }

    #[test]
    fn test_style_serializes_as_number() {
        let json = serde_json::to_string(&TextStyle::Label).unwrap();
        assert_eq!(json, "9");
        let back: TextStyle = serde_json::from_str("3").unwrap();
        assert_eq!(back, TextStyle::Number);
    }
}
