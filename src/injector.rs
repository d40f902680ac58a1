//! OS-level keyboard text injection.
//!
//! This module wraps the platform's synthetic-input capability behind one
//! trait: type a string into whatever surface currently has input focus,
//! pacing keystrokes by a fixed interval. The `enigo` crate provides the
//! actual event synthesis.

use std::thread;
use std::time::Duration;

use enigo::{Enigo, Keyboard, Settings as EnigoSettings};

use crate::error::{AutoTyperError, Result};

/// The injection primitive: type `text` into the focused surface.
///
/// Implementations are expected to be synchronous; with a non-zero
/// `char_delay` the call consumes roughly `text.chars().count() *
/// char_delay` of wall-clock time.
pub trait Inject {
    fn inject(&mut self, text: &str, char_delay: Duration) -> Result<()>;
}

/// Keyboard injector backed by synthetic OS input events.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use autotyper::{Inject, TextInjector};
///
/// let mut injector = TextInjector::new().unwrap();
/// injector.inject("hello", Duration::from_millis(20)).unwrap();
/// ```
pub struct TextInjector {
    enigo: Enigo,
}

impl TextInjector {
    /// Open a connection to the platform input system.
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&EnigoSettings::default())
            .map_err(|err| AutoTyperError::injection(err.to_string()))?;
        Ok(Self { enigo })
    }
}

impl Inject for TextInjector {
    fn inject(&mut self, text: &str, char_delay: Duration) -> Result<()> {
        if char_delay.is_zero() {
            return self
                .enigo
                .text(text)
                .map_err(|err| AutoTyperError::injection(err.to_string()));
        }

        let mut buf = [0u8; 4];
        for ch in text.chars() {
            self.enigo
                .text(ch.encode_utf8(&mut buf))
                .map_err(|err| AutoTyperError::injection(err.to_string()))?;
            thread::sleep(char_delay);
        }
        Ok(())
    }
}
