use crate::consts;
use crate::utils;

/// 64x32 monochrome frame buffer, row major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBuffer {
    buffer: [[bool; consts::DISPL_WIDTH]; consts::DISPL_HEIGHT],
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        DisplayBuffer {
            buffer: [[false; consts::DISPL_WIDTH]; consts::DISPL_HEIGHT],
        }
    }
}

impl DisplayBuffer {
    pub fn clear(&mut self) {
        self.buffer
            .iter_mut()
            .for_each(|row| *row = [false; consts::DISPL_WIDTH]);
    }

    /// XORs `rows` onto the grid with its top-left corner at (`x`, `y`).
    /// Every coordinate wraps around the edges. Returns true when any lit
    /// pixel was switched off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let mut collision = false;
        for (r, &row) in rows.iter().enumerate() {
            let py = (y + r) % consts::DISPL_HEIGHT;
            for b in 0..8 {
                if row & (0x80 >> b) == 0 {
                    continue;
                }
                let px = (x + b) % consts::DISPL_WIDTH;
                let pixel = &mut self.buffer[py][px];
                collision |= *pixel;
                *pixel ^= true;
            }
        }
        collision
    }

    /// False for any coordinate outside the grid.
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        utils::bounds_check(x, y, consts::DISPL_WIDTH, consts::DISPL_HEIGHT) && self.buffer[y][x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; consts::DISPL_WIDTH]> {
        self.buffer.iter()
    }
}
