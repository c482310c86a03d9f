//! Grid Snake - a fixed-tick snake game for the terminal
//!
//! This library provides:
//! - Core game logic: grid, snake, food placement, direction rules, speed and tick clock (game module)
//! - High score persistence (storage module)
//! - Sound cues (audio module)
//! - TUI rendering and keyboard input (render, input modules)
//! - The interactive play loop (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
