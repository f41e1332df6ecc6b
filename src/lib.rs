//! Otrio, a two-player game on a 3x3 board of nested rings.
//!
//! [`game`] holds the rules. [`console`] and [`gui`] are the two front ends
//! that drive an [`game::Otrio`] value and draw it.

pub mod console;
pub mod game;
pub mod gui;
