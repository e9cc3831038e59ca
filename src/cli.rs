//! Command-line argument parsing
//!
//! Supports:
//! - Loading a draft from a file and writing the result to a file or stdout
//! - Selecting a char range before the first action
//! - Toolbar actions by name, with `name=value` for prompting actions
//! - Inserting an uploaded or generated image
//! - Saving the result as a post
//! - Listing the available toolbar actions

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::messages::{ImageMsg, Msg, PromptMsg};
use crate::toolbar::{ActionPlan, ToolbarAction, TOOLBAR};

/// Apply rich-text toolbar actions to a blog post draft
#[derive(Parser, Debug)]
#[command(
    name = "postedit",
    version,
    about = "Apply rich-text toolbar actions to a blog post draft"
)]
pub struct CliArgs {
    /// Toolbar actions to apply in order (bold, heading:2, link=https://...)
    #[arg(value_name = "ACTIONS")]
    pub actions: Vec<ActionSpec>,

    /// Read the initial content from this file
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Write the resulting content here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Select START:END (char offsets) before the first action
    #[arg(short, long, value_name = "START:END", value_parser = parse_selection)]
    pub select: Option<(usize, usize)>,

    /// Upload this image and insert it at the cursor
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Generate an image from this description and insert it at the cursor
    #[arg(long, value_name = "PROMPT")]
    pub generate: Option<String>,

    /// Alt text for --image or --generate
    #[arg(long, value_name = "TEXT")]
    pub alt: Option<String>,

    /// Save the result as a post with this title
    #[arg(short, long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Post excerpt (derived from the content when omitted)
    #[arg(long, value_name = "TEXT")]
    pub excerpt: Option<String>,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the toolbar actions and exit
    #[arg(long)]
    pub list_actions: bool,
}

/// A toolbar action from the command line, with its prompt answer if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpec {
    pub action: ToolbarAction,
    pub value: Option<String>,
}

impl ActionSpec {
    /// Messages that perform this action, answering its prompt if it has one
    pub fn to_msgs(&self) -> Vec<Msg> {
        let mut msgs = vec![Msg::Toolbar(self.action)];
        if let Some(value) = &self.value {
            msgs.push(Msg::Prompt(PromptMsg::SetInput(value.clone())));
            msgs.push(Msg::Prompt(PromptMsg::Confirm));
        }
        msgs
    }
}

impl FromStr for ActionSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (s, None),
        };
        let action: ToolbarAction = name.parse().map_err(|e| format!("{}", e))?;

        match (action.plan(), &value) {
            (ActionPlan::Prompt(_), None) => Err(format!("'{}' needs a value: {}=VALUE", name, name)),
            (ActionPlan::Apply(_), Some(_)) => Err(format!("'{}' does not take a value", name)),
            _ => Ok(Self { action, value }),
        }
    }
}

fn parse_selection(s: &str) -> Result<(usize, usize), String> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{}'", s))?;
    let start = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid selection start '{}'", start))?;
    let end = end
        .trim()
        .parse()
        .map_err(|_| format!("invalid selection end '{}'", end))?;
    Ok((start, end))
}

/// One line per toolbar button: action name, label, and shortcut if any
pub fn action_listing() -> String {
    let width = TOOLBAR
        .iter()
        .map(|button| button.action.to_string().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for button in TOOLBAR {
        let name = button.action.to_string();
        let line = match button.shortcut {
            Some(shortcut) => format!("{:width$}  {} ({})", name, button.label, shortcut),
            None => format!("{:width$}  {}", name, button.label),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Where the inserted image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSpec {
    Upload { path: PathBuf, alt_text: String },
    Generate { prompt: String, alt_text: String },
}

impl ImageSpec {
    /// Messages that open the dialog and fill in everything but the submit
    pub fn prepare_msgs(&self) -> Vec<Msg> {
        let mut msgs = vec![Msg::Image(ImageMsg::OpenDialog)];
        match self {
            ImageSpec::Upload { alt_text, .. } => {
                msgs.push(Msg::Image(ImageMsg::SetAltText(alt_text.clone())));
            }
            ImageSpec::Generate { prompt, alt_text } => {
                msgs.push(Msg::Image(ImageMsg::SetAltText(alt_text.clone())));
                msgs.push(Msg::Image(ImageMsg::SetPrompt(prompt.clone())));
            }
        }
        msgs
    }
}

/// Post metadata for `--title`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSpec {
    pub title: String,
    pub excerpt: Option<String>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub selection: Option<(usize, usize)>,
    pub actions: Vec<ActionSpec>,
    pub image: Option<ImageSpec>,
    pub save: Option<SaveSpec>,
    pub config_path: Option<PathBuf>,
    pub list_actions: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let image = match (self.image, self.generate, self.alt) {
            (Some(_), Some(_), _) => {
                return Err("--image and --generate cannot be used together".to_string())
            }
            (Some(path), None, Some(alt_text)) => Some(ImageSpec::Upload { path, alt_text }),
            (None, Some(prompt), Some(alt_text)) => Some(ImageSpec::Generate { prompt, alt_text }),
            (Some(_), None, None) | (None, Some(_), None) => {
                return Err("--alt is required when inserting an image".to_string())
            }
            (None, None, Some(_)) => {
                return Err("--alt needs --image or --generate".to_string())
            }
            (None, None, None) => None,
        };

        let save = match (self.title, self.excerpt) {
            (Some(title), excerpt) => Some(SaveSpec { title, excerpt }),
            (None, Some(_)) => return Err("--excerpt needs --title".to_string()),
            (None, None) => None,
        };

        Ok(StartupConfig {
            input: self.input,
            output: self.output,
            selection: self.select,
            actions: self.actions,
            image,
            save,
            config_path: self.config,
            list_actions: self.list_actions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolbar::HeadingLevel;

    fn parse(args: &[&str]) -> Result<StartupConfig, String> {
        let mut argv = vec!["postedit"];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(argv)
            .map_err(|e| e.to_string())?
            .into_config()
    }

    #[test]
    fn test_empty_args() {
        let config = parse(&[]).unwrap();
        assert!(config.actions.is_empty());
        assert!(config.image.is_none());
        assert!(config.save.is_none());
        assert!(config.selection.is_none());
    }

    #[test]
    fn test_actions_in_order() {
        let config = parse(&["bold", "h2", "link=https://example.com"]).unwrap();
        assert_eq!(
            config.actions,
            vec![
                ActionSpec {
                    action: ToolbarAction::Bold,
                    value: None
                },
                ActionSpec {
                    action: ToolbarAction::Heading(HeadingLevel::new(2).unwrap()),
                    value: None
                },
                ActionSpec {
                    action: ToolbarAction::Link,
                    value: Some("https://example.com".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_prompting_action_requires_value() {
        assert!("link".parse::<ActionSpec>().is_err());
        assert!("color".parse::<ActionSpec>().is_err());
        assert!("bold=yes".parse::<ActionSpec>().is_err());
        assert!("sparkle".parse::<ActionSpec>().is_err());
    }

    #[test]
    fn test_link_value_keeps_equals_signs() {
        let spec: ActionSpec = "link=https://example.com/?a=1".parse().unwrap();
        assert_eq!(spec.value.as_deref(), Some("https://example.com/?a=1"));
    }

    #[test]
    fn test_action_messages() {
        let spec: ActionSpec = "color=#ff0000".parse().unwrap();
        assert_eq!(
            spec.to_msgs(),
            vec![
                Msg::Toolbar(ToolbarAction::TextColor),
                Msg::Prompt(PromptMsg::SetInput("#ff0000".to_string())),
                Msg::Prompt(PromptMsg::Confirm),
            ]
        );
    }

    #[test]
    fn test_selection_parsing() {
        let config = parse(&["--select", "0:5", "bold"]).unwrap();
        assert_eq!(config.selection, Some((0, 5)));
        assert!(parse(&["--select", "5", "bold"]).is_err());
        assert!(parse(&["--select", "a:b", "bold"]).is_err());
    }

    #[test]
    fn test_image_requires_alt() {
        let err = parse(&["--image", "photo.png"]).unwrap_err();
        assert!(err.contains("--alt"));

        let config = parse(&["--image", "photo.png", "--alt", "A photo"]).unwrap();
        assert_eq!(
            config.image,
            Some(ImageSpec::Upload {
                path: PathBuf::from("photo.png"),
                alt_text: "A photo".to_string()
            })
        );
    }

    #[test]
    fn test_image_and_generate_conflict() {
        assert!(parse(&["--image", "a.png", "--generate", "cat", "--alt", "x"]).is_err());
    }

    #[test]
    fn test_excerpt_requires_title() {
        assert!(parse(&["--excerpt", "short"]).is_err());
        let config = parse(&["--title", "Hello", "--excerpt", "short"]).unwrap();
        assert_eq!(
            config.save,
            Some(SaveSpec {
                title: "Hello".to_string(),
                excerpt: Some("short".to_string())
            })
        );
    }

    #[test]
    fn test_list_actions_flag() {
        assert!(parse(&["--list-actions"]).unwrap().list_actions);
        assert!(!parse(&[]).unwrap().list_actions);
    }

    #[test]
    fn test_action_listing() {
        let listing = action_listing();
        assert_eq!(listing.lines().count(), TOOLBAR.len());

        let first = listing.lines().next().unwrap();
        assert!(first.starts_with("bold "));
        assert!(first.ends_with("Bold (⌘B)"));
        assert!(listing.contains("ordered-list  Numbered List\n"));
    }
}
