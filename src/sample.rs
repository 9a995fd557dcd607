// sample.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! GIF samples for unit tests

/// Single frame 10x10 with global color table and graphic control
#[rustfmt::skip]
pub const SIMPLE: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x0A, 0x00,
    0x0A, 0x00, 0x91, 0x00, 0x00, 0xFF, 0xFF, 0xFF,
    0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00,
    0x00, 0x21, 0xF9, 0x04, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x2C, 0x00, 0x00, 0x00, 0x00, 0x0A, 0x00,
    0x0A, 0x00, 0x00, 0x02, 0x16, 0x8C, 0x2D, 0x99,
    0x87, 0x2A, 0x1C, 0xDC, 0x33, 0xA0, 0x02, 0x75,
    0xEC, 0x95, 0xFA, 0xA8, 0xDE, 0x60, 0x8C, 0x04,
    0x91, 0x4C, 0x01, 0x00, 0x3B,
];

/// Smallest useful GIF: no color tables, one data sub-block of 3 bytes
#[rustfmt::skip]
pub const MINIMAL: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00,
    0x01, 0x00, 0x00, 0x00, 0x00,
    0x2C, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00,
    0x02, 0x03, 0xAA, 0xBB, 0xCC, 0x00,
    0x3B,
];

#[rustfmt::skip]
const PREAMBLE: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00,
    0x02, 0x00, 0x80, 0x00, 0x00,
    0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF,
];

const TRAILER: &[u8] = &[0x3B];

/// Looping application extension
#[rustfmt::skip]
pub const NETSCAPE: &[u8] = &[
    0x21, 0xFF, 0x0B,
    b'N', b'E', b'T', b'S', b'C', b'A', b'P', b'E', b'2', b'.', b'0',
    0x03, 0x01, 0x00, 0x00, 0x00,
];

/// Non-looping application extension
#[rustfmt::skip]
pub const XMP: &[u8] = &[
    0x21, 0xFF, 0x0B,
    b'X', b'M', b'P', b' ', b'D', b'a', b't', b'a', b'X', b'M', b'P',
    0x02, 0x3C, 0x3E, 0x00,
];

/// Comment extension
pub const COMMENT: &[u8] =
    &[0x21, 0xFE, 0x05, b'h', b'e', b'l', b'l', b'o', 0x00];

/// Graphic control extension (delay 0.10 s)
pub const GRAPHIC_CONTROL: &[u8] =
    &[0x21, 0xF9, 0x04, 0x04, 0x0A, 0x00, 0x00, 0x00];

#[rustfmt::skip]
const FRAME_1: &[u8] = &[
    0x2C, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x02, 0x00, 0x00,
    0x02, 0x03, 0x0C, 0x10, 0x05, 0x00,
];

#[rustfmt::skip]
const FRAME_2: &[u8] = &[
    0x2C, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x02, 0x00, 0x81,
    0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80, 0x90, 0xA0, 0xB0, 0xC0,
    0x02, 0x03, 0x0C, 0x10, 0x05, 0x00,
];

/// Two frame animated GIF with looping, comment and graphic control
pub fn animated() -> Vec<u8> {
    [
        PREAMBLE,
        NETSCAPE,
        COMMENT,
        GRAPHIC_CONTROL,
        FRAME_1,
        GRAPHIC_CONTROL,
        FRAME_2,
        TRAILER,
    ]
    .concat()
}

/// Expected result of de-animating `animated()`
pub fn animated_still() -> Vec<u8> {
    [PREAMBLE, COMMENT, GRAPHIC_CONTROL, FRAME_1, TRAILER].concat()
}

/// Single frame GIF with a non-looping application extension and a
/// local color table
pub fn with_app_ext() -> Vec<u8> {
    [PREAMBLE, XMP, FRAME_2, TRAILER].concat()
}

/// Split a buffer into chunks of a fixed size
pub fn chunked(buf: &[u8], sz: usize) -> Vec<Vec<u8>> {
    buf.chunks(sz).map(|c| c.to_vec()).collect()
}
