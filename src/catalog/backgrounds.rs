//! Procedural scene backgrounds
//!
//! Each background is a coarse grid (one cell per 32 surface pixels at the
//! default 640x400 size) with a darker floor band, furniture stamped in, and
//! brightness noise over a share of the cells.

use super::furniture::{chair, door, table, window};
use super::noise::Noise;
use super::palette::*;
use super::Generator;
use crate::color::{adjust_brightness, is_transparent, Color};
use crate::sprite::Sprite;

/// Surface pixels covered by one background cell.
pub const CELL_SIZE: u32 = 32;
pub const COLUMNS: usize = 20;
pub const ROWS: usize = 13;
/// First floor row as a fraction of the height.
pub const FLOOR_START: f64 = 0.8;
pub const FLOOR_SHADE: i32 = -20;
pub const NOISE_AMOUNT: i32 = 10;

pub(super) const BUILTINS: &[(&str, Generator)] = &[
    ("bar-background", bar),
    ("street-background", street),
    ("hotel-lobby-background", hotel_lobby),
    ("hotel-hallway-background", hotel_hallway),
    ("secret-room-background", secret_room),
];

/// A sprite stamped into the background at a cell position.
struct Placement {
    sprite: Sprite,
    col: usize,
    row: usize,
}

fn place(sprite: Sprite, col: usize, row: usize) -> Placement {
    Placement { sprite, col, row }
}

/// Build a background: base fill, floor band, placements, then noise.
///
/// Placements that do not fit inside the grid are skipped.
fn scene_background(noise: &mut Noise, base: Color, placements: &[Placement]) -> Sprite {
    let floor = adjust_brightness(base, FLOOR_SHADE);
    let floor_row = (ROWS as f64 * FLOOR_START).floor() as usize;
    let mut grid: Vec<Vec<Color>> = (0..ROWS)
        .map(|row| vec![if row >= floor_row { floor } else { base }; COLUMNS])
        .collect();

    for p in placements {
        if p.col + p.sprite.width() > COLUMNS || p.row + p.sprite.height() > ROWS {
            log::debug!("skipping placement at ({}, {}): does not fit", p.col, p.row);
            continue;
        }
        for (dy, line) in p.sprite.grid().rows().enumerate() {
            for (dx, &c) in line.iter().enumerate() {
                if !is_transparent(c) {
                    grid[p.row + dy][p.col + dx] = c;
                }
            }
        }
    }

    let percent = noise.percent();
    for cell in grid.iter_mut().flatten() {
        if noise.chance(percent) {
            *cell = noise.jitter(*cell, NOISE_AMOUNT);
        }
    }

    Sprite::new(grid)
}

fn bar(noise: &mut Noise) -> Sprite {
    let placements = [
        place(table(noise), 4, 7),
        place(chair(noise), 2, 8),
        place(chair(noise), 8, 8),
        place(door(noise), 15, 4),
    ];
    scene_background(noise, DARK_BROWN, &placements)
}

fn street(noise: &mut Noise) -> Sprite {
    let placements = [place(window(noise), 3, 2), place(window(noise), 12, 2), place(door(noise), 8, 4)];
    scene_background(noise, DARK_BLUE, &placements)
}

fn hotel_lobby(noise: &mut Noise) -> Sprite {
    let placements = [
        place(table(noise), 9, 7),
        place(chair(noise), 7, 8),
        place(door(noise), 2, 4),
        place(door(noise), 15, 4),
    ];
    scene_background(noise, DARK_TAN, &placements)
}

fn hotel_hallway(noise: &mut Noise) -> Sprite {
    let placements: Vec<Placement> = [1, 6, 11, 16].into_iter().map(|col| place(door(noise), col, 4)).collect();
    scene_background(noise, DARK_PURPLE, &placements)
}

fn secret_room(noise: &mut Noise) -> Sprite {
    let placements = [place(table(noise), 9, 7), place(chair(noise), 7, 8), place(door(noise), 2, 4)];
    scene_background(noise, DARK_WINE, &placements)
}
