//! Lock-free home of the live display mode

use portable_atomic::{AtomicU32, Ordering};

use super::display_mode::DisplayMode;
use super::events::InputEvent;

/// Live display mode, held as its packed word
///
/// Input handlers advance it with a compare-and-swap loop; readers load the
/// word. Only packed values produced by [`DisplayMode::pack`] are ever
/// stored, so decoding the live word cannot fail in practice.
#[derive(Debug)]
pub struct DisplayModeStore {
    word: AtomicU32,
}

impl Default for DisplayModeStore {
    fn default() -> Self {
        Self::new(DisplayMode::default())
    }
}

impl DisplayModeStore {
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            word: AtomicU32::new(mode.pack()),
        }
    }

    /// Current mode
    pub fn current(&self) -> DisplayMode {
        DisplayMode::unpack(self.packed()).unwrap_or_default()
    }

    /// Current mode in its persisted encoding
    #[inline]
    pub fn packed(&self) -> u32 {
        self.word.load(Ordering::Acquire)
    }

    /// Replace the mode wholesale (startup restore)
    pub fn set(&self, mode: DisplayMode) {
        self.word.store(mode.pack(), Ordering::Release);
    }

    /// Apply one input event atomically, returning the new mode
    pub fn apply(&self, event: InputEvent) -> DisplayMode {
        let step = |word: u32| {
            DisplayMode::unpack(word)
                .unwrap_or_default()
                .transition(event)
        };
        let previous = self
            .word
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |w| Some(step(w).pack()))
            .unwrap_or_else(|w| w);
        step(previous)
    }

    pub fn advance_layout(&self) -> DisplayMode {
        self.apply(InputEvent::AdvanceLayout)
    }

    pub fn advance_secondary_metric(&self) -> DisplayMode {
        self.apply(InputEvent::AdvanceSecondaryMetric)
    }
}
