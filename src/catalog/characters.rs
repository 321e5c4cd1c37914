//! Player and NPC sprites

use super::noise::Noise;
use super::palette::*;
use super::{pixels, Generator};
use crate::color::Color;
use crate::sprite::Sprite;

pub(super) const BUILTINS: &[(&str, Generator)] = &[
    ("player", player_front),
    ("player-left", player_left),
    ("player-right", player_right),
    ("player-back", player_back),
    ("player-character", player_character),
    ("npc", npc),
    ("bartender", bartender),
    ("mysterious-woman", mysterious_woman),
    ("mysterious-person", mysterious_person),
    ("receptionist", receptionist),
    ("dealer", dealer),
];

fn player_front(_: &mut Noise) -> Sprite {
    pixels(
        &[('h', HAIR), ('s', SKIN), ('b', SHIRT)],
        &[".hhh.", "hsssh", ".sss.", ".bbb.", "bbbbb", "bbbbb", ".b.b.", ".h.h."],
    )
}

fn player_right(_: &mut Noise) -> Sprite {
    pixels(
        &[('h', HAIR), ('s', SKIN), ('b', SHIRT)],
        &[".hh..", ".ssh.", ".sss.", ".bbb.", ".bbbb", "bbbb.", ".b.b.", ".h.h."],
    )
}

fn player_left(noise: &mut Noise) -> Sprite {
    player_right(noise).flip_horizontal()
}

fn player_back(_: &mut Noise) -> Sprite {
    pixels(
        &[('h', HAIR), ('b', SHIRT)],
        &[".hhh.", "hhhhh", ".hhh.", ".bbb.", "bbbbb", "bbbbb", ".b.b.", ".h.h."],
    )
}

/// The generic adventurer shape, four pixels wide.
fn person(hair: Color, top: Color, legs: Color) -> Sprite {
    pixels(
        &[('h', hair), ('s', SKIN), ('t', top), ('l', legs)],
        &[".hh.", "hssh", ".ss.", ".tt.", "tttt", "tttt", ".ll.", ".ll."],
    )
}

fn player_character(_: &mut Noise) -> Sprite {
    person(HAIR, SHIRT, PANTS)
}

fn npc(_: &mut Noise) -> Sprite {
    person(DARK_WOOD, DRESS, BLACK)
}

fn bartender(_: &mut Noise) -> Sprite {
    // Mustache row, then apron
    pixels(
        &[('h', DARK_BROWN), ('s', SKIN), ('a', METAL)],
        &[".hh.", "hssh", "hssh", ".aa.", "aaaa", "aaaa", ".hh.", ".hh."],
    )
}

fn mysterious_woman(_: &mut Noise) -> Sprite {
    pixels(
        &[('h', BLONDE), ('s', SKIN), ('d', DRESS)],
        &[".hh.", "hssh", ".ss.", ".dd.", "dddd", "dddd", ".s.s", ".s.s"],
    )
}

fn mysterious_person(_: &mut Noise) -> Sprite {
    person(BLACK, COAT, BLACK)
}

fn receptionist(_: &mut Noise) -> Sprite {
    person(DARK_BROWN, WHITE, BLACK)
}

fn dealer(_: &mut Noise) -> Sprite {
    pixels(
        &[('k', BLACK), ('s', SKIN), ('w', WHITE)],
        &[".kk.", "kssk", ".ss.", ".kk.", "kkkk", "kwwk", ".kk.", ".kk."],
    )
}
