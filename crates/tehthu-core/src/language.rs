use std::fmt;

pub const DEFAULT_LEFT_NAME: &str = "Left";
pub const DEFAULT_RIGHT_NAME: &str = "Right";

/// Which side of the dictionary the input sentence is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Input is in the left-hand language, output in the right-hand one
    #[default]
    LeftToRight,
    /// Input is in the right-hand language, output in the left-hand one
    RightToLeft,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::LeftToRight => Direction::RightToLeft,
            Direction::RightToLeft => Direction::LeftToRight,
        }
    }

    /// Parse `ltr`/`rtl` and a few spelled-out variants
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ltr" | "left-to-right" | "lefttoright" | "left" => Some(Direction::LeftToRight),
            "rtl" | "right-to-left" | "righttoleft" | "right" => Some(Direction::RightToLeft),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::LeftToRight => "ltr",
            Direction::RightToLeft => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing display names of the two dictionary languages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageNames {
    pub left: String,
    pub right: String,
}

impl LanguageNames {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Name of the language a word is written in when translating in `direction`
    pub fn source(&self, direction: Direction) -> &str {
        match direction {
            Direction::LeftToRight => &self.left,
            Direction::RightToLeft => &self.right,
        }
    }

    /// Name of the language produced when translating in `direction`
    pub fn target(&self, direction: Direction) -> &str {
        self.source(direction.reversed())
    }

    /// Label such as `English-to-Spanish`
    pub fn label(&self, direction: Direction) -> String {
        format!("{}-to-{}", self.source(direction), self.target(direction))
    }
}

impl Default for LanguageNames {
    fn default() -> Self {
        Self::new(DEFAULT_LEFT_NAME, DEFAULT_RIGHT_NAME)
    }
}
