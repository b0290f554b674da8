//! 3x5 bitmap font covering printable ASCII from `' '` to `'_'`. Lowercase
//! letters fold to uppercase; anything else renders as `?`.

pub const GLYPH_WIDTH: i32 = 3;
pub const GLYPH_HEIGHT: i32 = 5;

const FIRST_GLYPH: u32 = ' ' as u32;
const LAST_GLYPH: u32 = '_' as u32;

#[rustfmt::skip]
const GLYPHS: [[u8; GLYPH_HEIGHT as usize]; 64] = [
    [0b000, 0b000, 0b000, 0b000, 0b000], // space
    [0b010, 0b010, 0b010, 0b000, 0b010], // !
    [0b101, 0b101, 0b000, 0b000, 0b000], // "
    [0b101, 0b111, 0b101, 0b111, 0b101], // #
    [0b111, 0b110, 0b111, 0b011, 0b111], // $
    [0b101, 0b001, 0b010, 0b100, 0b101], // %
    [0b010, 0b101, 0b010, 0b101, 0b011], // &
    [0b010, 0b010, 0b000, 0b000, 0b000], // '
    [0b001, 0b010, 0b010, 0b010, 0b001], // (
    [0b100, 0b010, 0b010, 0b010, 0b100], // )
    [0b000, 0b101, 0b010, 0b101, 0b000], // *
    [0b000, 0b010, 0b111, 0b010, 0b000], // +
    [0b000, 0b000, 0b000, 0b010, 0b100], // ,
    [0b000, 0b000, 0b111, 0b000, 0b000], // -
    [0b000, 0b000, 0b000, 0b000, 0b010], // .
    [0b001, 0b001, 0b010, 0b100, 0b100], // /
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
    [0b000, 0b010, 0b000, 0b010, 0b000], // :
    [0b000, 0b010, 0b000, 0b010, 0b100], // ;
    [0b001, 0b010, 0b100, 0b010, 0b001], // <
    [0b000, 0b111, 0b000, 0b111, 0b000], // =
    [0b100, 0b010, 0b001, 0b010, 0b100], // >
    [0b111, 0b001, 0b011, 0b000, 0b010], // ?
    [0b111, 0b101, 0b111, 0b100, 0b111], // @
    [0b010, 0b101, 0b111, 0b101, 0b101], // A
    [0b110, 0b101, 0b110, 0b101, 0b110], // B
    [0b111, 0b100, 0b100, 0b100, 0b111], // C
    [0b110, 0b101, 0b101, 0b101, 0b110], // D
    [0b111, 0b100, 0b110, 0b100, 0b111], // E
    [0b111, 0b100, 0b110, 0b100, 0b100], // F
    [0b111, 0b100, 0b101, 0b101, 0b111], // G
    [0b101, 0b101, 0b111, 0b101, 0b101], // H
    [0b111, 0b010, 0b010, 0b010, 0b111], // I
    [0b111, 0b001, 0b001, 0b101, 0b111], // J
    [0b101, 0b101, 0b110, 0b101, 0b101], // K
    [0b100, 0b100, 0b100, 0b100, 0b111], // L
    [0b101, 0b111, 0b111, 0b101, 0b101], // M
    [0b101, 0b111, 0b111, 0b111, 0b101], // N
    [0b111, 0b101, 0b101, 0b101, 0b111], // O
    [0b110, 0b101, 0b110, 0b100, 0b100], // P
    [0b111, 0b101, 0b101, 0b111, 0b001], // Q
    [0b110, 0b101, 0b110, 0b101, 0b101], // R
    [0b111, 0b100, 0b111, 0b001, 0b111], // S
    [0b111, 0b010, 0b010, 0b010, 0b010], // T
    [0b101, 0b101, 0b101, 0b101, 0b111], // U
    [0b101, 0b101, 0b101, 0b101, 0b010], // V
    [0b101, 0b101, 0b111, 0b111, 0b101], // W
    [0b101, 0b101, 0b010, 0b101, 0b101], // X
    [0b101, 0b101, 0b010, 0b010, 0b010], // Y
    [0b111, 0b001, 0b010, 0b100, 0b111], // Z
    [0b110, 0b100, 0b100, 0b100, 0b110], // [
    [0b100, 0b100, 0b010, 0b001, 0b001], // \
    [0b011, 0b001, 0b001, 0b001, 0b011], // ]
    [0b010, 0b101, 0b000, 0b000, 0b000], // ^
    [0b000, 0b000, 0b000, 0b000, 0b111], // _
];

/// Pixel rows for `ch`, most significant of the low three bits on the left.
pub fn glyph_rows(ch: char) -> [u8; GLYPH_HEIGHT as usize] {
    let folded = ch.to_ascii_uppercase() as u32;
    let index = if (FIRST_GLYPH..=LAST_GLYPH).contains(&folded) {
        folded - FIRST_GLYPH
    } else {
        '?' as u32 - FIRST_GLYPH
    };
    GLYPHS[index as usize]
}

pub fn glyph_pixel_set(rows: &[u8; GLYPH_HEIGHT as usize], col: i32, row: usize) -> bool {
    rows[row] & (1 << (GLYPH_WIDTH - 1 - col)) != 0
}
