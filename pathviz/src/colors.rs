//! Color palette for the board display, tuned for a dark terminal.

use pathviz_core::style::Color;

/// Start marker 'S' — green.
pub const START_FG: Color = Color::from_rgb(60, 190, 60);
/// End marker 'E' — red.
pub const END_FG: Color = Color::from_rgb(210, 60, 60);
/// Wall '#' — light blue-grey.
pub const WALL_FG: Color = Color::from_rgb(150, 155, 170);
/// Unvisited open cell '.' — dim grey.
pub const EMPTY_FG: Color = Color::from_rgb(90, 94, 100);
/// Closed (visited) cell — light blue.
pub const VISITED_FG: Color = Color::from_rgb(140, 185, 225);
/// Frontier cell — dimmer cyan, not yet finalized.
pub const FRONTIER_FG: Color = Color::from_rgb(85, 135, 155);
/// Reconstructed path — yellow.
pub const PATH_FG: Color = Color::from_rgb(230, 210, 70);
/// Most recently expanded cell — orange.
pub const CURRENT_FG: Color = Color::from_rgb(240, 165, 50);
/// Status line text.
pub const STATUS_FG: Color = Color::DEFAULT;
/// Key hint line.
pub const HINT_FG: Color = Color::from_rgb(120, 120, 126);
