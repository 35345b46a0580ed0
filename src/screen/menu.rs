use crate::game::InputAction;

/// What selecting a menu item does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    StartGame,
    Options,
    MainMenu,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub command: MenuCommand,
}

/// Vertical list of items with one selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    title: String,
    items: Vec<MenuItem>,
    selected: usize,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            selected: 0,
        }
    }

    pub fn main() -> Self {
        Self::new("snek")
            .with_item("Start Game", MenuCommand::StartGame)
            .with_item("Options", MenuCommand::Options)
            .with_item("Exit", MenuCommand::Quit)
    }

    pub fn options() -> Self {
        Self::new("Options").with_item("Back", MenuCommand::MainMenu)
    }

    pub fn with_item(mut self, label: impl Into<String>, command: MenuCommand) -> Self {
        self.items.push(MenuItem {
            label: label.into(),
            command,
        });
        self
    }

    /// Forward/Backward move the selection, TurnRight activates it.
    pub fn update(&mut self, action: InputAction) -> Option<MenuCommand> {
        match action {
            InputAction::Forward => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            InputAction::Backward => {
                if self.selected + 1 < self.items.len() {
                    self.selected += 1;
                }
                None
            }
            InputAction::TurnRight => self.items.get(self.selected).map(|item| item.command),
            _ => None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }
}
