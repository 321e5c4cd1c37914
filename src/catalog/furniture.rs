//! Furniture and small props

use super::noise::Noise;
use super::palette::*;
use super::{pixels, Generator};
use crate::sprite::Sprite;

pub(super) const BUILTINS: &[(&str, Generator)] = &[
    ("table", table),
    ("chair", chair),
    ("bed", bed),
    ("window", window),
    ("door", door),
    ("crate", metal_crate),
    ("bar-counter", bar_counter),
    ("neon-sign", neon_sign),
    ("liquor-bottle", liquor_bottle),
    ("hotel-key", hotel_key),
    ("newspaper", newspaper),
    ("mysterious-package", mysterious_package),
    ("treasure-chest", treasure_chest),
];

pub(super) fn table(_: &mut Noise) -> Sprite {
    pixels(&[('w', WOOD)], &["wwww", "wwww", "w..w", "w..w"])
}

pub(super) fn chair(_: &mut Noise) -> Sprite {
    pixels(&[('w', WOOD)], &["w..", "www", "w.w"])
}

fn bed(_: &mut Noise) -> Sprite {
    pixels(&[('w', WOOD), ('s', WHITE)], &["wsss", "wsss", "wsss", "wwww"])
}

pub(super) fn window(_: &mut Noise) -> Sprite {
    pixels(&[('w', WOOD), ('g', GLASS)], &["wwww", "wggw", "wggw", "wwww"])
}

pub(super) fn door(_: &mut Noise) -> Sprite {
    pixels(&[('w', WOOD), ('m', METAL)], &["wwww", "wwww", "wwww", "wmww", "wwww", "wwww"])
}

fn metal_crate(_: &mut Noise) -> Sprite {
    pixels(&[('m', METAL)], &["mm", "mm"])
}

fn bar_counter(_: &mut Noise) -> Sprite {
    pixels(&[('w', WOOD), ('d', DARK_WOOD)], &["wwwww", "wdddw", "wdddw", "wdddw", "wwwww"])
}

fn neon_sign(_: &mut Noise) -> Sprite {
    pixels(&[('p', NEON), ('y', LAMP)], &[".pp.", "pyyp", "pyyp", ".pp."])
}

fn liquor_bottle(_: &mut Noise) -> Sprite {
    pixels(&[('g', LEAF), ('l', LIGHT_LEAF)], &[".gg.", "gllg", "gllg", ".gg."])
}

fn hotel_key(_: &mut Noise) -> Sprite {
    pixels(&[('m', METAL)], &[".mm", "mm."])
}

fn newspaper(_: &mut Noise) -> Sprite {
    pixels(&[('w', WHITE), ('k', BLACK)], &["wwww", "wkkw", "wkkw", "wwww"])
}

fn mysterious_package(_: &mut Noise) -> Sprite {
    pixels(&[('c', CARDBOARD), ('d', DARK_BROWN)], &["cccc", "cddc", "cddc", "cccc"])
}

fn treasure_chest(_: &mut Noise) -> Sprite {
    pixels(
        &[('w', DARK_WOOD), ('g', GOLD), ('k', BLACK)],
        &[".wwww.", "wggggw", "wwkkww", "wwwwww", "wwwwww"],
    )
}
