//! Toolbar actions and their markup
//!
//! Each toolbar button maps to exactly one [`MarkupOperation`]. Link and text
//! color first need a value from the user, so they map to a [`PromptKind`]
//! instead; the surface opens a prompt modal and finishes the action with
//! [`PromptKind::operation`] once the user confirms.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::markup::MarkupOperation;

pub const UNORDERED_LIST_BLOCK: &str =
    "<ul>\n  <li>First item</li>\n  <li>Second item</li>\n  <li>Third item</li>\n</ul>";
pub const ORDERED_LIST_BLOCK: &str =
    "<ol>\n  <li>First item</li>\n  <li>Second item</li>\n  <li>Third item</li>\n</ol>";
pub const PARAGRAPH_BLOCK: &str = "<p>New paragraph content here.</p>";

/// Heading level, 1 through 6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Text alignment for the alignment wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

/// All toolbar buttons of the post editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    Bold,
    Italic,
    Underline,
    Heading(HeadingLevel),
    UnorderedList,
    OrderedList,
    /// Prompts for a URL
    Link,
    /// Prompts for a CSS color
    TextColor,
    Align(Alignment),
    Paragraph,
}

/// Value the user must supply before an action can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    LinkUrl,
    TextColor,
}

/// What a toolbar action needs to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionPlan {
    /// Apply right away
    Apply(MarkupOperation),
    /// Ask the user first
    Prompt(PromptKind),
}

impl ToolbarAction {
    pub fn plan(self) -> ActionPlan {
        let op = match self {
            ToolbarAction::Bold => MarkupOperation::wrap("<strong>", "</strong>", "bold text"),
            ToolbarAction::Italic => MarkupOperation::wrap("<em>", "</em>", "italic text"),
            ToolbarAction::Underline => MarkupOperation::wrap("<u>", "</u>", "underlined text"),
            ToolbarAction::Heading(level) => {
                let n = level.get();
                MarkupOperation::wrap(format!("<h{n}>"), format!("</h{n}>"), format!("Heading {n}"))
            }
            ToolbarAction::UnorderedList => MarkupOperation::block(UNORDERED_LIST_BLOCK),
            ToolbarAction::OrderedList => MarkupOperation::block(ORDERED_LIST_BLOCK),
            ToolbarAction::Link => return ActionPlan::Prompt(PromptKind::LinkUrl),
            ToolbarAction::TextColor => return ActionPlan::Prompt(PromptKind::TextColor),
            ToolbarAction::Align(dir) => MarkupOperation::wrap(
                format!("<div style=\"text-align: {}\">", dir.as_str()),
                "</div>",
                "aligned text",
            ),
            ToolbarAction::Paragraph => MarkupOperation::block(PARAGRAPH_BLOCK),
        };
        ActionPlan::Apply(op)
    }
}

impl PromptKind {
    /// Question shown in the prompt modal
    pub fn message(self) -> &'static str {
        match self {
            PromptKind::LinkUrl => "Enter URL:",
            PromptKind::TextColor => "Enter color (e.g. #ff0000 or red):",
        }
    }

    /// Build the operation for the user's answer.
    ///
    /// `None` (cancelled) and blank answers produce no operation.
    pub fn operation(self, value: Option<&str>) -> Option<MarkupOperation> {
        let value = value.map(str::trim).filter(|v| !v.is_empty())?;
        let op = match self {
            PromptKind::LinkUrl => MarkupOperation::wrap(
                format!("<a href=\"{value}\" target=\"_blank\" rel=\"noopener noreferrer\">"),
                "</a>",
                "link text",
            ),
            PromptKind::TextColor => MarkupOperation::wrap(
                format!("<span style=\"color: {value}\">"),
                "</span>",
                "colored text",
            ),
        };
        Some(op)
    }
}

// ============================================================================
// Toolbar Registry
// ============================================================================

/// A toolbar button definition
#[derive(Debug, Clone)]
pub struct ToolbarButton {
    pub action: ToolbarAction,
    pub label: &'static str,
    pub shortcut: Option<&'static str>,
}

const fn heading(level: u8) -> ToolbarAction {
    ToolbarAction::Heading(HeadingLevel(level))
}

/// Static registry of the toolbar, in display order
pub static TOOLBAR: &[ToolbarButton] = &[
    ToolbarButton {
        action: ToolbarAction::Bold,
        label: "Bold",
        shortcut: Some("⌘B"),
    },
    ToolbarButton {
        action: ToolbarAction::Italic,
        label: "Italic",
        shortcut: Some("⌘I"),
    },
    ToolbarButton {
        action: ToolbarAction::Underline,
        label: "Underline",
        shortcut: Some("⌘U"),
    },
    ToolbarButton {
        action: heading(1),
        label: "Heading 1",
        shortcut: None,
    },
    ToolbarButton {
        action: heading(2),
        label: "Heading 2",
        shortcut: None,
    },
    ToolbarButton {
        action: heading(3),
        label: "Heading 3",
        shortcut: None,
    },
    ToolbarButton {
        action: ToolbarAction::UnorderedList,
        label: "Bullet List",
        shortcut: None,
    },
    ToolbarButton {
        action: ToolbarAction::OrderedList,
        label: "Numbered List",
        shortcut: None,
    },
    ToolbarButton {
        action: ToolbarAction::Link,
        label: "Insert Link",
        shortcut: Some("⌘K"),
    },
    ToolbarButton {
        action: ToolbarAction::TextColor,
        label: "Text Color",
        shortcut: None,
    },
    ToolbarButton {
        action: ToolbarAction::Align(Alignment::Left),
        label: "Align Left",
        shortcut: None,
    },
    ToolbarButton {
        action: ToolbarAction::Align(Alignment::Center),
        label: "Align Center",
        shortcut: None,
    },
    ToolbarButton {
        action: ToolbarAction::Align(Alignment::Right),
        label: "Align Right",
        shortcut: None,
    },
    ToolbarButton {
        action: ToolbarAction::Paragraph,
        label: "Paragraph",
        shortcut: None,
    },
];

/// Look up the static shortcut for an action
pub fn shortcut_for(action: ToolbarAction) -> Option<&'static str> {
    TOOLBAR
        .iter()
        .find(|button| button.action == action)
        .and_then(|button| button.shortcut)
}

// ============================================================================
// Parsing
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolbarParseError {
    #[error("unknown toolbar action: {0}")]
    UnknownAction(String),
    #[error("invalid heading level: {0} (expected 1-6)")]
    InvalidHeading(String),
    #[error("invalid alignment: {0} (expected left, center, right or justify)")]
    InvalidAlignment(String),
}

impl FromStr for Alignment {
    type Err = ToolbarParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" | "centre" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            "justify" => Ok(Alignment::Justify),
            _ => Err(ToolbarParseError::InvalidAlignment(s.to_string())),
        }
    }
}

/// Parse names like `bold`, `heading:2`, `h2`, `align:center`, `ordered-list`
impl FromStr for ToolbarAction {
    type Err = ToolbarParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let (name, arg) = match lower.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (lower.as_str(), None),
        };

        let action = match (name, arg) {
            ("bold" | "b" | "strong", None) => ToolbarAction::Bold,
            ("italic" | "i" | "em", None) => ToolbarAction::Italic,
            ("underline" | "u", None) => ToolbarAction::Underline,
            ("heading", Some(level)) => ToolbarAction::Heading(parse_heading(level)?),
            ("h1" | "h2" | "h3" | "h4" | "h5" | "h6", None) => {
                ToolbarAction::Heading(parse_heading(&name[1..])?)
            }
            ("list" | "ul" | "unordered-list" | "bullet-list", None) => {
                ToolbarAction::UnorderedList
            }
            ("ordered-list" | "ol" | "numbered-list", None) => ToolbarAction::OrderedList,
            ("link", None) => ToolbarAction::Link,
            ("color" | "colour", None) => ToolbarAction::TextColor,
            ("align", Some(dir)) => ToolbarAction::Align(dir.parse()?),
            ("paragraph" | "p", None) => ToolbarAction::Paragraph,
            _ => return Err(ToolbarParseError::UnknownAction(s.to_string())),
        };
        Ok(action)
    }
}

fn parse_heading(level: &str) -> Result<HeadingLevel, ToolbarParseError> {
    level
        .parse::<u8>()
        .ok()
        .and_then(HeadingLevel::new)
        .ok_or_else(|| ToolbarParseError::InvalidHeading(level.to_string()))
}

impl fmt::Display for ToolbarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolbarAction::Bold => write!(f, "bold"),
            ToolbarAction::Italic => write!(f, "italic"),
            ToolbarAction::Underline => write!(f, "underline"),
            ToolbarAction::Heading(level) => write!(f, "heading:{}", level.get()),
            ToolbarAction::UnorderedList => write!(f, "list"),
            ToolbarAction::OrderedList => write!(f, "ordered-list"),
            ToolbarAction::Link => write!(f, "link"),
            ToolbarAction::TextColor => write!(f, "color"),
            ToolbarAction::Align(dir) => write!(f, "align:{}", dir.as_str()),
            ToolbarAction::Paragraph => write!(f, "paragraph"),
        }
    }
}
