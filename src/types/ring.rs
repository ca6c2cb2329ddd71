//! Pixel colours and the 24-slot ring frame

/// Number of pixels on the indicator ring.
pub const RING_PIXELS: usize = 24;

/// Colour as (R, G, B), each 0-255.
pub type Rgb = (u8, u8, u8);

/// One full ring of pixel colours, index 0 first.
pub type Frame = [Rgb; RING_PIXELS];

/// Ring palette. Channel values are kept low; the ring sits in a dark room.
pub mod palette {
    use super::Rgb;

    pub const RED: Rgb = (32, 0, 0);
    pub const GREEN: Rgb = (0, 32, 0);
    pub const BLUE: Rgb = (0, 0, 32);
    pub const YELLOW: Rgb = (32, 32, 0);
    pub const MAGENTA: Rgb = (64, 0, 64);
    pub const OFF: Rgb = (0, 0, 0);
}
