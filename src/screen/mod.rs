//! Active screen composition: either a menu or the board receives each
//! frame's input.

pub mod menu;

pub use menu::{Menu, MenuCommand, MenuItem};

use crate::game::{Board, InputAction, StepInfo};

/// The screen that currently owns input and drawing
pub enum Layer {
    Menu(Menu),
    Board(Board),
}

/// Outcome of one frame for the active layer
#[derive(Debug, Clone, PartialEq)]
pub enum LayerEvent {
    /// The layer asks to switch screens or quit
    Command(MenuCommand),
    /// The board advanced one tick
    Step(StepInfo),
    Idle,
}

impl Layer {
    pub fn update(&mut self, action: InputAction) -> LayerEvent {
        match self {
            Layer::Menu(menu) => match menu.update(action) {
                Some(command) => LayerEvent::Command(command),
                None => LayerEvent::Idle,
            },
            Layer::Board(board) => {
                if action == InputAction::Exit {
                    return LayerEvent::Command(MenuCommand::MainMenu);
                }
                LayerEvent::Step(board.update(action))
            }
        }
    }

    pub fn board(&self) -> Option<&Board> {
        match self {
            Layer::Board(board) => Some(board),
            Layer::Menu(_) => None,
        }
    }

    pub fn board_mut(&mut self) -> Option<&mut Board> {
        match self {
            Layer::Board(board) => Some(board),
            Layer::Menu(_) => None,
        }
    }
}
