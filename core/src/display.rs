use crate::framebuffer::Framebuffer;

/// Refresh modes for the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Full refresh with complete waveform
    Full,
    /// Fast partial refresh
    Fast,
}

pub trait Display {
    fn flush(&mut self, fb: &Framebuffer, mode: RefreshMode);
}
