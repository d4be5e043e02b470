//! Core systems for Horizon Toolstrip.
//!
//! This crate provides the foundational pieces the toolbar engine is built on:
//!
//! - **Signal/Slot System**: Type-safe notification channels
//! - **Frame Scheduler**: Callbacks deferred to the next rendered frame
//! - **Logging**: `tracing` targets and span names used across the workspace
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_toolstrip_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Frame Example
//!
//! ```
//! use horizon_toolstrip_core::FrameScheduler;
//!
//! let frames = FrameScheduler::new();
//! frames.request_frame(|| println!("measured after layout"));
//!
//! // The host calls this once per rendered frame.
//! frames.run_frame();
//! ```

mod frame;
pub mod logging;
pub mod signal;

pub use frame::{FrameCallbackId, FrameScheduler};
pub use signal::{ConnectionId, Signal};
