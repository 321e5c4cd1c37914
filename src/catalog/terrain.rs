//! Outdoor scenery: vegetation, ground tiles and buildings

use super::noise::Noise;
use super::palette::*;
use super::{pixels, Generator};
use crate::color::Color;
use crate::sprite::Sprite;

/// Share of tile cells that take the accent color, in percent.
pub const TILE_ACCENT_PERCENT: f64 = 20.0;
pub const TILE_SIZE: usize = 4;

pub(super) const BUILTINS: &[(&str, Generator)] = &[
    ("tree", tree),
    ("pine-tree", pine_tree),
    ("bush", bush),
    ("rock", rock),
    ("grass", grass),
    ("water", water),
    ("sand", sand),
    ("house", house),
    ("cabin", cabin),
];

fn tree(_: &mut Noise) -> Sprite {
    pixels(
        &[('g', PLANT), ('b', WOOD)],
        &["..g..", ".ggg.", "ggggg", ".ggg.", "..b..", "..b..", "..b.."],
    )
}

fn pine_tree(_: &mut Noise) -> Sprite {
    pixels(
        &[('g', PLANT), ('l', LEAF), ('b', WOOD)],
        &["..g..", ".ggg.", ".lgl.", "glglg", "..b..", "..b.."],
    )
}

fn bush(_: &mut Noise) -> Sprite {
    pixels(&[('l', LEAF), ('g', PLANT)], &[".ll.", "lggl", "llll"])
}

fn rock(_: &mut Noise) -> Sprite {
    pixels(&[('s', STONE), ('d', DARK_STONE)], &[".ss.", "ssss", "sdss", ".ss."])
}

/// A square ground tile where roughly one cell in five is the accent.
fn tile(noise: &mut Noise, main: Color, accent: Color) -> Sprite {
    let rows = (0..TILE_SIZE)
        .map(|_| {
            (0..TILE_SIZE)
                .map(|_| if noise.chance(TILE_ACCENT_PERCENT) { accent } else { main })
                .collect()
        })
        .collect();
    Sprite::new(rows)
}

fn grass(noise: &mut Noise) -> Sprite {
    tile(noise, LIGHT_LEAF, PLANT)
}

fn water(noise: &mut Noise) -> Sprite {
    tile(noise, WATER, LIGHT_WATER)
}

fn sand(noise: &mut Noise) -> Sprite {
    tile(noise, SAND, CARDBOARD)
}

fn house(_: &mut Noise) -> Sprite {
    pixels(
        &[('r', ROOF), ('w', WOOD), ('y', LAMP)],
        &["..rrr..", ".rrrrr.", "rrrrrrr", "wwwwwww", "wwywyww", "wwywyww", "wwwwwww"],
    )
}

fn cabin(_: &mut Noise) -> Sprite {
    pixels(&[('d', DARK_WOOD), ('w', WOOD), ('y', LAMP)], &[".dd.", "dwwd", "dywd", "dddd"])
}
