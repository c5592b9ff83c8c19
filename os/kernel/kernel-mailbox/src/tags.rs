//! Property tag identifiers.

pub const END: u32 = 0x0000_0000;

pub const GET_FIRMWARE_REVISION: u32 = 0x0000_0001;
pub const GET_BOARD_REVISION: u32 = 0x0001_0002;
pub const GET_ARM_MEMORY: u32 = 0x0001_0005;
pub const GET_VC_MEMORY: u32 = 0x0001_0006;

pub const ALLOCATE_BUFFER: u32 = 0x0004_0001;
pub const RELEASE_BUFFER: u32 = 0x0004_8001;
pub const GET_PITCH: u32 = 0x0004_0008;
pub const SET_PHYSICAL_SIZE: u32 = 0x0004_8003;
pub const SET_VIRTUAL_SIZE: u32 = 0x0004_8004;
pub const SET_DEPTH: u32 = 0x0004_8005;
pub const SET_PIXEL_ORDER: u32 = 0x0004_8006;
pub const SET_VIRTUAL_OFFSET: u32 = 0x0004_8009;

/// Message and tag status codes.
pub mod code {
    pub const REQUEST: u32 = 0x0000_0000;
    pub const SUCCESS: u32 = 0x8000_0000;
    pub const PARSE_ERROR: u32 = 0x8000_0001;
    /// Set in a tag's length word once the firmware has answered the tag.
    pub const TAG_RESPONSE: u32 = 0x8000_0000;
}
