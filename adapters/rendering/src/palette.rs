//! Colors shared by every backend so levels look the same everywhere.

use crate::Color;
use platformer_core::Cell;

/// Window background behind the level.
pub const BACKGROUND: Color = Color::from_rgb_u8(0x1d, 0x22, 0x33);
/// Player body.
pub const PLAYER: Color = Color::from_rgb_u8(0x4f, 0xa3, 0xf7);
/// Enemy body.
pub const ENEMY: Color = Color::from_rgb_u8(0xc8, 0x2a, 0x36);
/// HUD and overlay text.
pub const TEXT: Color = Color::from_rgb_u8(0xf2, 0xf2, 0xf2);
/// Translucent band drawn behind overlay messages.
pub const OVERLAY: Color = Color::new(0.0, 0.0, 0.0, 0.6);

/// Fill color of a grid cell, or `None` for cells that are not drawn.
///
/// Spawn markers never reach the renderer because they are consumed on load.
#[must_use]
pub fn cell_color(cell: Cell, exit_open: bool) -> Option<Color> {
    match cell {
        Cell::Air | Cell::Player | Cell::Enemy => None,
        Cell::Wall => Some(Color::from_rgb_u8(0x6b, 0x5b, 0x4e)),
        Cell::Coin => Some(Color::from_rgb_u8(0xff, 0xc1, 0x07)),
        Cell::Spike => Some(Color::from_rgb_u8(0xb0, 0xb7, 0xc3)),
        Cell::Exit => {
            let exit = Color::from_rgb_u8(0x2f, 0x95, 0x32);
            Some(if exit_open { exit.lighten(0.4) } else { exit })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawn_cells_have_distinct_colors() {
        let colors: Vec<Color> = Cell::ALL
            .into_iter()
            .filter_map(|cell| cell_color(cell, false))
            .collect();

        assert_eq!(colors.len(), 4);
        for (index, color) in colors.iter().enumerate() {
            assert!(!colors[index + 1..].contains(color), "{color:?} repeats");
        }
    }

    #[test]
    fn open_exit_is_highlighted() {
        assert_ne!(cell_color(Cell::Exit, true), cell_color(Cell::Exit, false));
        assert_eq!(cell_color(Cell::Wall, true), cell_color(Cell::Wall, false));
    }
}
