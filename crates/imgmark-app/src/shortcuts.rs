//! Window key bindings and their console help.

use imgmark_core::{KeyEvent, ToolKind};

/// A key understood by one of the windows.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: egui::Key,
    pub action: KeyEvent,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: egui::Key, action: KeyEvent, description: &'static str) -> Self {
        Self {
            key,
            action,
            description,
        }
    }

    /// Key name for display (e.g. "Enter").
    pub fn format(&self) -> &'static str {
        self.key.name()
    }
}

/// Registry of the drawing window's keys.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Keys handled while a drawing session is live.
    pub fn session() -> [Shortcut; 2] {
        [
            Shortcut::new(egui::Key::Enter, KeyEvent::Confirm, "Confirm the shape"),
            Shortcut::new(egui::Key::Escape, KeyEvent::Cancel, "Cancel the shape"),
        ]
    }

    /// The session command bound to `key`, if any.
    pub fn action_for(key: egui::Key) -> Option<KeyEvent> {
        Self::session()
            .into_iter()
            .find(|shortcut| shortcut.key == key)
            .map(|shortcut| shortcut.action)
    }

    /// Print how to draw with `tool` to the console.
    pub fn print_session_help(tool: ToolKind) {
        println!("\n=== {} ===", tool);
        println!("  {}", tool.instructions());
        for shortcut in Self::session() {
            println!("  {:10} {}", shortcut.format(), shortcut.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_keys() {
        assert_eq!(
            ShortcutRegistry::action_for(egui::Key::Enter),
            Some(KeyEvent::Confirm)
        );
        assert_eq!(
            ShortcutRegistry::action_for(egui::Key::Escape),
            Some(KeyEvent::Cancel)
        );
        assert_eq!(ShortcutRegistry::action_for(egui::Key::A), None);
    }

    #[test]
    fn test_format() {
        let [confirm, cancel] = ShortcutRegistry::session();
        assert_eq!(confirm.format(), "Enter");
        assert_eq!(cancel.format(), "Escape");
    }
}
