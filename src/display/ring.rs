//! Severity scores to ring pixels.
//!
//! ## Layout (24 slots, drawn in this order)
//!
//! | Segment  | Base | Slots    | Colour  |
//! |----------|------|----------|---------|
//! | G        | 0    | 0..5     | yellow  |
//! | Bt       | 4    | 4..9     | red     |
//! | Bz       | 9    | 9..14    | green   |
//! | Density  | 14   | 14..19   | blue    |
//! | Speed    | 19   | 19..24   | magenta |
//!
//! G and Bt share slot 4; Bt is drawn later, so any Bt reading claims it.

use crate::types::{palette, Frame, Rgb, SeverityScores, RING_PIXELS};

/// One coloured run on the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingSegment {
    pub label: &'static str,
    pub base: usize,
    pub colour: Rgb,
}

/// Segments in draw order.
pub const RING_LAYOUT: [RingSegment; 5] = [
    RingSegment { label: "G", base: 0, colour: palette::YELLOW },
    RingSegment { label: "Bt", base: 4, colour: palette::RED },
    RingSegment { label: "Bz", base: 9, colour: palette::GREEN },
    RingSegment { label: "Density", base: 14, colour: palette::BLUE },
    RingSegment { label: "Speed", base: 19, colour: palette::MAGENTA },
];

/// Render severity scores onto a full ring frame.
///
/// Starts from an all-off frame and paints each segment in [`RING_LAYOUT`]
/// order for as many slots as its score. Runs stop at the last pixel; scores
/// of zero or below paint nothing.
pub fn render(scores: &SeverityScores) -> Frame {
    let lengths = [
        scores.g,
        i64::from(scores.bt),
        i64::from(scores.bz),
        i64::from(scores.density),
        i64::from(scores.speed),
    ];

    let mut frame = [palette::OFF; RING_PIXELS];
    for (segment, length) in RING_LAYOUT.iter().zip(lengths) {
        paint(&mut frame, segment.base, length, segment.colour);
    }
    frame
}

fn paint(frame: &mut Frame, base: usize, length: i64, colour: Rgb) {
    let length = usize::try_from(length).unwrap_or(0);
    let end = base.saturating_add(length).min(RING_PIXELS);
    for pixel in frame.iter_mut().take(end).skip(base) {
        *pixel = colour;
    }
}
