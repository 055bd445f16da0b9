//! Spinner widget for loading states.

/// Braille spinner advanced by the UI tick.
#[derive(Debug, Default)]
pub struct Spinner {
    frame: usize,
}

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

impl Spinner {
    /// Advances to the next frame. Call once per tick.
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    /// Returns the glyph for the current frame.
    pub fn glyph(&self) -> &'static str {
        FRAMES[self.frame]
    }
}
