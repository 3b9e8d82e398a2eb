//! Numbered command menu.

use imgmark_core::ToolKind;
use std::str::FromStr;
use thiserror::Error;

/// Menu input errors. Both are reported and the menu is shown again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("Please enter a number from 1 to {}", MenuCommand::ALL.len())]
    NotANumber,
    #[error("Invalid option {0}")]
    OutOfRange(i64),
}

/// Commands offered by the menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Draw(ToolKind),
    Show,
    Save,
    Reset,
    Exit,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 7] = [
        MenuCommand::Draw(ToolKind::Rectangle),
        MenuCommand::Draw(ToolKind::Line),
        MenuCommand::Draw(ToolKind::Circle),
        MenuCommand::Show,
        MenuCommand::Save,
        MenuCommand::Reset,
        MenuCommand::Exit,
    ];

    /// Menu label.
    pub fn label(self) -> String {
        match self {
            MenuCommand::Draw(tool) => format!("Draw {}", tool.name().to_lowercase()),
            MenuCommand::Show => "Show image".to_string(),
            MenuCommand::Save => "Save image".to_string(),
            MenuCommand::Reset => "Reset image".to_string(),
            MenuCommand::Exit => "Exit".to_string(),
        }
    }

    /// Print the menu to the console.
    pub fn print_menu() {
        println!("\n=== Menu ===");
        for (index, command) in Self::ALL.iter().enumerate() {
            println!("  {}. {}", index + 1, command.label());
        }
    }
}

impl FromStr for MenuCommand {
    type Err = MenuError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let number: i64 = input.trim().parse().map_err(|_| MenuError::NotANumber)?;
        usize::try_from(number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(MenuError::OutOfRange(number))
    }
}
