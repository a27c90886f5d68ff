//! Maps samples to a centered, color banded bar and paints it with ANSI escapes.
use crate::SampleReading;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

// --- ANSI control sequences ---
pub const CLEAR_SCREEN: &str = "\x1b[2J";
pub const CURSOR_HOME: &str = "\x1b[H";
pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";
pub const RESET_COLOR: &str = "\x1b[0m";

const BAR_GLYPH: char = '#';

/// Scales `sample` to a glyph count in `0..=bar_capacity`.
///
/// Rounds half up in integer arithmetic. Samples above `reference_max`
/// paint a full bar.
#[must_use]
pub fn midpoint(sample: SampleReading, reference_max: u16, bar_capacity: u16) -> u16 {
    if reference_max == 0 {
        return bar_capacity;
    }
    let reference = u32::from(reference_max);
    let scaled = (u32::from(sample) * u32::from(bar_capacity) + reference / 2) / reference;
    scaled.min(u32::from(bar_capacity)) as u16
}

/// Splits a bar into its left and right halves; the right takes the odd glyph.
#[must_use]
pub const fn halves(midpoint: u16) -> (u16, u16) {
    let left = midpoint / 2;
    (left, midpoint - left)
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorBand {
    Low,
    Mid,
    High,
}

impl ColorBand {
    /// Picks the band of `sample` by thirds of `reference_max`.
    #[must_use]
    pub fn for_sample(sample: SampleReading, reference_max: u16) -> Self {
        let sample = u32::from(sample);
        let reference = u32::from(reference_max);
        if sample < reference / 3 {
            Self::Low
        } else if sample < 2 * reference / 3 {
            Self::Mid
        } else {
            Self::High
        }
    }

    /// Foreground color escape: green, yellow, red.
    #[must_use]
    pub const fn ansi(self) -> &'static str {
        match self {
            Self::Low => "\x1b[32m",
            Self::Mid => "\x1b[33m",
            Self::High => "\x1b[31m",
        }
    }
}

/// Everything needed to paint one sample. Recomputed every frame.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayFrame {
    pub sample: SampleReading,
    pub midpoint: u16,
    pub band: ColorBand,
    pub left: u16,
    pub right: u16,
    /// Leading blanks that center the bar on the middle column.
    pub padding: u16,
}

impl DisplayFrame {
    #[must_use]
    pub fn new(sample: SampleReading, reference_max: u16, bar_capacity: u16) -> Self {
        let midpoint = midpoint(sample, reference_max, bar_capacity);
        let (left, right) = halves(midpoint);
        Self {
            sample,
            midpoint,
            band: ColorBand::for_sample(sample, reference_max),
            left,
            right,
            padding: (bar_capacity / 2).saturating_sub(left),
        }
    }

    /// The full repaint sequence for this frame.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(
            CLEAR_SCREEN.len() + CURSOR_HOME.len() + 16 + usize::from(self.padding + self.midpoint),
        );
        out.push_str(CLEAR_SCREEN);
        out.push_str(CURSOR_HOME);
        out.push_str(self.band.ansi());
        out.extend(std::iter::repeat(' ').take(usize::from(self.padding)));
        out.extend(std::iter::repeat(BAR_GLYPH).take(usize::from(self.left + self.right)));
        out.push_str(RESET_COLOR);
        out
    }
}

/// Paints frames onto an ANSI terminal.
///
/// Hides the cursor while alive and restores it on drop.
pub struct Terminal<W: Write> {
    out: W,
}

impl<W: Write> Terminal<W> {
    /// # Errors
    /// Returns the error of the initial clear.
    pub fn new(mut out: W) -> io::Result<Self> {
        write!(out, "{HIDE_CURSOR}{CLEAR_SCREEN}{CURSOR_HOME}")?;
        out.flush()?;
        Ok(Self { out })
    }

    /// Repaints the whole screen with `frame` and flushes.
    /// # Errors
    /// Returns the error of the underlying writer.
    pub fn paint(&mut self, frame: &DisplayFrame) -> io::Result<()> {
        self.out.write_all(frame.render().as_bytes())?;
        self.out.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = write!(self.out, "{RESET_COLOR}{SHOW_CURSOR}");
        let _ = self.out.flush();
    }
}
