//! # AutoTyper
//!
//! A cross-platform tool that types user-supplied text into whatever window
//! currently has input focus, after a configurable delay.
//!
//! ## Features
//!
//! - Configurable start delay before typing begins
//! - Configurable pause between individual keystrokes
//! - Persistent settings (delays, font, colors, window behavior) in a JSON
//!   file under the home directory, self-healing on partial or corrupt files
//! - Time-based completion signal for a success acknowledgment
//! - Cross-platform keyboard injection via synthetic input events
//!
//! ## Example
//!
//! ```no_run
//! use autotyper::{sequencer, Settings, TextInjector, TypingRequest};
//!
//! let settings = Settings::load();
//! let request = TypingRequest::new("hello world", &settings).unwrap();
//! let injector = TextInjector::new().unwrap();
//!
//! let rt = tokio::runtime::Builder::new_current_thread()
//!     .enable_all()
//!     .build()
//!     .unwrap();
//! let local = tokio::task::LocalSet::new();
//! local.block_on(&rt, async move {
//!     let mut handle = sequencer::spawn(injector, request);
//!     handle.completed().await;
//!     println!("done");
//!     handle.drained().await;
//! });
//! ```
//!
//! ## Configuration
//!
//! Settings are stored as JSON, with defaults filling in any missing keys:
//!
//! ```json
//! {
//!   "start_delay": 3.0,
//!   "delay": 0.02,
//!   "font": "Segoe UI",
//!   "font_size": 12,
//!   "text_color": "#000000",
//!   "bg_color": "#ffffff",
//!   "always_on_top": false
//! }
//! ```

pub mod config;
pub mod error;
pub mod injector;
pub mod sequencer;

pub use config::Settings;
pub use error::{AutoTyperError, Result};
pub use injector::{Inject, TextInjector};
pub use sequencer::{Schedule, TypingHandle, TypingRequest};
