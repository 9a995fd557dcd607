// block.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! GIF block codes and fixed descriptor views

/// Size of header + logical screen descriptor
pub const HEADER_LSD_SZ: usize = 13;

/// Size of image descriptor (after the image separator)
pub const IMAGE_DESC_SZ: usize = 9;

const CHANNELS: usize = 3;

/// Block code, read at the start of each block
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BlockCode {
    ImageDesc_,
    Extension_,
    Trailer_,
}

impl BlockCode {
    pub fn from_u8(t: u8) -> Option<Self> {
        use self::BlockCode::*;
        match t {
            b',' => Some(ImageDesc_), // (0x2C) Image separator
            b'!' => Some(Extension_), // (0x21) Extension introducer
            b';' => Some(Trailer_),   // (0x3B) GIF trailer
            _ => None,
        }
    }
    pub fn signature(self) -> &'static [u8] {
        use self::BlockCode::*;
        match self {
            ImageDesc_ => b",",
            Extension_ => b"!",
            Trailer_ => b";",
        }
    }
}

/// Extension label, following the extension introducer
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExtensionCode {
    PlainText_,
    GraphicControl_,
    Comment_,
    Application_,
    Unknown_(u8),
}

impl From<u8> for ExtensionCode {
    fn from(n: u8) -> Self {
        use self::ExtensionCode::*;
        match n {
            0x01 => PlainText_,
            0xF9 => GraphicControl_,
            0xFE => Comment_,
            0xFF => Application_,
            _ => Unknown_(n),
        }
    }
}

impl From<ExtensionCode> for u8 {
    fn from(t: ExtensionCode) -> Self {
        use self::ExtensionCode::*;
        match t {
            PlainText_ => 0x01,
            GraphicControl_ => 0xF9,
            Comment_ => 0xFE,
            Application_ => 0xFF,
            Unknown_(n) => n,
        }
    }
}

/// Check for an application extension which loops an animation
pub fn is_looping(app_id: &[u8]) -> bool {
    app_id == b"NETSCAPE2.0"
}

/// Color table configuration, from packed flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTableConfig {
    present: bool,
    table_len: usize, // must be between 2...256
}

impl ColorTableConfig {
    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    /// Decode from the packed flags of a screen or image descriptor.
    ///
    /// Both descriptors keep the present bit and size exponent in the same
    /// positions.
    pub fn from_flags(flags: u8) -> Self {
        let present = flags & Self::COLOR_TABLE_PRESENT != 0;
        let table_len = 2 << (flags & Self::COLOR_TABLE_SIZE) as usize;
        ColorTableConfig { present, table_len }
    }
    pub fn is_present(&self) -> bool {
        self.present
    }
    /// Number of entries (zero if absent)
    pub fn len(&self) -> usize {
        if self.present {
            self.table_len
        } else {
            0
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn size_bytes(&self) -> usize {
        self.len() * CHANNELS
    }
}

/// View of the header and logical screen descriptor
#[derive(Debug, Clone, Copy)]
pub struct ScreenDesc<'a> {
    buf: &'a [u8],
}

impl<'a> ScreenDesc<'a> {
    /// Create a view over a header + logical screen descriptor.
    ///
    /// Returns `None` unless `buf` is exactly `HEADER_LSD_SZ` bytes.
    pub fn new(buf: &'a [u8]) -> Option<Self> {
        if buf.len() == HEADER_LSD_SZ {
            Some(ScreenDesc { buf })
        } else {
            None
        }
    }
    /// Check for a supported signature (87a or 89a)
    pub fn is_gif(&self) -> bool {
        &self.buf[..3] == b"GIF" && matches!(&self.version(), b"87a" | b"89a")
    }
    pub fn version(&self) -> [u8; 3] {
        [self.buf[3], self.buf[4], self.buf[5]]
    }
    pub fn screen_width(&self) -> u16 {
        u16::from_le_bytes([self.buf[6], self.buf[7]])
    }
    pub fn screen_height(&self) -> u16 {
        u16::from_le_bytes([self.buf[8], self.buf[9]])
    }
    pub fn flags(&self) -> u8 {
        self.buf[10]
    }
    pub fn background_color_idx(&self) -> u8 {
        self.buf[11]
    }
    pub fn color_table_config(&self) -> ColorTableConfig {
        ColorTableConfig::from_flags(self.flags())
    }
}

/// View of an image descriptor (without the image separator)
#[derive(Debug, Clone, Copy)]
pub struct ImageDesc<'a> {
    buf: &'a [u8],
}

impl<'a> ImageDesc<'a> {
    const INTERLACED: u8 = 0b0100_0000;

    /// Create a view over an image descriptor.
    ///
    /// Returns `None` unless `buf` is exactly `IMAGE_DESC_SZ` bytes.
    pub fn new(buf: &'a [u8]) -> Option<Self> {
        if buf.len() == IMAGE_DESC_SZ {
            Some(ImageDesc { buf })
        } else {
            None
        }
    }
    pub fn left(&self) -> u16 {
        u16::from_le_bytes([self.buf[0], self.buf[1]])
    }
    pub fn top(&self) -> u16 {
        u16::from_le_bytes([self.buf[2], self.buf[3]])
    }
    pub fn width(&self) -> u16 {
        u16::from_le_bytes([self.buf[4], self.buf[5]])
    }
    pub fn height(&self) -> u16 {
        u16::from_le_bytes([self.buf[6], self.buf[7]])
    }
    pub fn flags(&self) -> u8 {
        self.buf[8]
    }
    pub fn interlaced(&self) -> bool {
        (self.flags() & Self::INTERLACED) != 0
    }
    pub fn color_table_config(&self) -> ColorTableConfig {
        ColorTableConfig::from_flags(self.flags())
    }
}
