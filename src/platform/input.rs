//! Input sources
//!
//! The loop asks once per tick whether input is pending and, if so, consumes
//! exactly one symbol. Nothing here ever blocks.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controller::Command;

/// Non-blocking source of input symbols
pub trait InputSource {
    /// Is a symbol waiting to be read?
    fn pending(&mut self) -> io::Result<bool>;

    /// Consume one symbol. Only called after `pending` returned true.
    fn read(&mut self) -> io::Result<Command>;

    /// The symbol for this tick, or [`Command::None`] if nothing is waiting
    fn poll_command(&mut self) -> io::Result<Command> {
        if self.pending()? {
            self.read()
        } else {
            Ok(Command::None)
        }
    }
}

/// Decode a key press; unknown keys decode to [`Command::None`]
pub fn command_for_key(key: KeyEvent) -> Command {
    if key.kind != KeyEventKind::Press {
        return Command::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Command::Quit;
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('a' | 'A') => Command::Left,
        KeyCode::Right | KeyCode::Char('d' | 'D') => Command::Right,
        KeyCode::Char(' ' | 'p' | 'P') => Command::Pause,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Command::Quit,
        _ => Command::None,
    }
}

/// Keyboard input from the terminal (requires raw mode to see single keys)
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn pending(&mut self) -> io::Result<bool> {
        event::poll(Duration::ZERO)
    }

    fn read(&mut self) -> io::Result<Command> {
        Ok(match event::read()? {
            Event::Key(key) => command_for_key(key),
            // Resize, mouse, focus, paste: not game input
            _ => Command::None,
        })
    }
}

/// A scripted sequence of symbols, one per tick, then nothing
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    commands: VecDeque<Command>,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

impl InputSource for ScriptedInput {
    fn pending(&mut self) -> io::Result<bool> {
        Ok(!self.commands.is_empty())
    }

    fn read(&mut self) -> io::Result<Command> {
        Ok(self.commands.pop_front().unwrap_or_default())
    }
}

/// Input source that never has anything pending
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn pending(&mut self) -> io::Result<bool> {
        Ok(false)
    }

    fn read(&mut self) -> io::Result<Command> {
        Ok(Command::None)
    }
}
