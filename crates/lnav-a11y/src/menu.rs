//! Landmark menu model handed to the host's menu surface

use crate::scanner::LandmarkEntry;

/// Placeholder shown when a page has no landmarks
pub const NO_LANDMARKS_LABEL: &str = "No landmarks found";

/// Command a menu item runs when activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Focus the landmark at this index
    Focus(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    /// `None` for disabled items
    pub command: Option<MenuCommand>,
}

impl MenuItem {
    pub fn is_disabled(&self) -> bool {
        self.command.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LandmarkMenu {
    pub items: Vec<MenuItem>,
}

impl LandmarkMenu {
    /// One item per landmark, or a single disabled placeholder
    pub fn from_entries(entries: &[LandmarkEntry]) -> Self {
        if entries.is_empty() {
            return Self {
                items: vec![MenuItem {
                    label: NO_LANDMARKS_LABEL.to_string(),
                    command: None,
                }],
            };
        }

        let items = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| MenuItem {
                label: entry.display_label(),
                command: Some(MenuCommand::Focus(index)),
            })
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
