//! Named colors shared by the built-in sprite library

use image::Rgba;

use crate::color::Color;

pub const BLACK: Color = Rgba([0x00, 0x00, 0x00, 255]);
pub const WHITE: Color = Rgba([0xFF, 0xFF, 0xFF, 255]);

// Scene base tones
pub const DARK_BROWN: Color = Rgba([0x33, 0x11, 0x00, 255]);
pub const DARK_BLUE: Color = Rgba([0x11, 0x22, 0x33, 255]);
pub const DARK_TAN: Color = Rgba([0x33, 0x22, 0x11, 255]);
pub const DARK_PURPLE: Color = Rgba([0x22, 0x11, 0x22, 255]);
pub const DARK_WINE: Color = Rgba([0x33, 0x00, 0x22, 255]);

// People
pub const SKIN: Color = Rgba([0xFF, 0xC8, 0xA2, 255]);
pub const HAIR: Color = Rgba([0x8B, 0x45, 0x13, 255]);
pub const BLONDE: Color = Rgba([0xFF, 0xFF, 0x00, 255]);
pub const SHIRT: Color = Rgba([0x30, 0x50, 0xFF, 255]);
pub const PANTS: Color = Rgba([0x15, 0x22, 0x66, 255]);
pub const DRESS: Color = Rgba([0xFF, 0x30, 0x30, 255]);
pub const COAT: Color = Rgba([0x40, 0x40, 0x40, 255]);

// Materials
pub const WOOD: Color = Rgba([0x8B, 0x45, 0x13, 255]);
pub const DARK_WOOD: Color = Rgba([0x5C, 0x33, 0x17, 255]);
pub const CARDBOARD: Color = Rgba([0xD2, 0xB4, 0x8C, 255]);
pub const BRICK: Color = Rgba([0xAA, 0x33, 0x33, 255]);
pub const METAL: Color = Rgba([0xAA, 0xAA, 0xAA, 255]);
pub const GLASS: Color = Rgba([0xCC, 0xDD, 0xFF, 255]);
pub const GOLD: Color = Rgba([0xFF, 0xD7, 0x00, 255]);
pub const NEON: Color = Rgba([0xFF, 0x69, 0xB4, 255]);
pub const LAMP: Color = Rgba([0xFF, 0xFF, 0x00, 255]);

// Nature
pub const PLANT: Color = Rgba([0x00, 0x64, 0x00, 255]);
pub const LEAF: Color = Rgba([0x00, 0x80, 0x00, 255]);
pub const LIGHT_LEAF: Color = Rgba([0x90, 0xEE, 0x90, 255]);
pub const STONE: Color = Rgba([0x80, 0x80, 0x80, 255]);
pub const DARK_STONE: Color = Rgba([0x40, 0x40, 0x40, 255]);
pub const WATER: Color = Rgba([0x00, 0x00, 0xFF, 255]);
pub const LIGHT_WATER: Color = Rgba([0xAD, 0xD8, 0xE6, 255]);
pub const SAND: Color = Rgba([0xFF, 0xFF, 0x00, 255]);
pub const ROOF: Color = Rgba([0xFF, 0x00, 0x00, 255]);
