//! Platform abstraction layer
//!
//! The two ports the game loop talks to:
//! - Input: non-blocking key polling decoded into input symbols
//! - Output: somewhere to show a frame plus status lines
//!
//! Terminal implementations use crossterm; tests use the scripted/null ones.

pub mod input;
pub mod terminal;

pub use input::{InputSource, KeyboardInput, NoInput, ScriptedInput, command_for_key};
pub use terminal::{NullOutput, OutputDevice, TerminalOutput, TerminalSession, wait_for_key};
