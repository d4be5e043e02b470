//! Render-frame callback queue.
//!
//! Layout measurements are only meaningful after the host has completed a
//! layout pass. [`FrameScheduler`] models the host's "call me before the next
//! render" mechanism: callbacks requested now run during the next call to
//! [`FrameScheduler::run_frame`], which the host makes once per rendered frame.
//!
//! [`FrameScheduler::defer_past_next_frame`] chains two requests under a
//! single id, so the callback runs after the next render has happened and
//! before the one after that.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::logging::targets;

/// A unique identifier for a requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameCallbackId(u64);

impl FrameCallbackId {
    /// Get the raw u64 value of this callback ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique callback IDs.
static NEXT_FRAME_CALLBACK_ID: AtomicU64 = AtomicU64::new(1);

fn next_callback_id() -> FrameCallbackId {
    FrameCallbackId(NEXT_FRAME_CALLBACK_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed frame callback.
type BoxedCallback = Box<dyn FnOnce() + Send + 'static>;

enum Step {
    /// Run on the frame that picks this entry up.
    Run(BoxedCallback),
    /// Requeue as `Run` for the following frame.
    Defer(BoxedCallback),
}

struct PendingCallback {
    id: FrameCallbackId,
    step: Step,
}

#[derive(Default)]
struct FrameQueue {
    pending: VecDeque<PendingCallback>,
    /// Entries at the front of `pending` that belong to the running frame.
    batch_remaining: usize,
    frames_run: u64,
}

/// Shared handle to a render-frame callback queue.
///
/// Cloning the scheduler clones the handle; all clones feed the same queue.
///
/// # Example
///
/// ```
/// use horizon_toolstrip_core::FrameScheduler;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let scheduler = FrameScheduler::new();
/// let ran = Arc::new(AtomicBool::new(false));
///
/// let ran_clone = ran.clone();
/// scheduler.defer_past_next_frame(move || ran_clone.store(true, Ordering::SeqCst));
///
/// scheduler.run_frame();
/// assert!(!ran.load(Ordering::SeqCst));
/// scheduler.run_frame();
/// assert!(ran.load(Ordering::SeqCst));
/// ```
#[derive(Clone, Default)]
pub struct FrameScheduler {
    inner: Arc<Mutex<FrameQueue>>,
}

impl FrameScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a callback on the next frame.
    pub fn request_frame<F>(&self, callback: F) -> FrameCallbackId
    where
        F: FnOnce() + Send + 'static,
    {
        self.push(Step::Run(Box::new(callback)))
    }

    /// Request a callback that runs after the next frame has rendered.
    ///
    /// The returned id stays valid across both steps, so [`cancel`](Self::cancel)
    /// works whichever step is currently queued.
    pub fn defer_past_next_frame<F>(&self, callback: F) -> FrameCallbackId
    where
        F: FnOnce() + Send + 'static,
    {
        self.push(Step::Defer(Box::new(callback)))
    }

    fn push(&self, step: Step) -> FrameCallbackId {
        let id = next_callback_id();
        self.inner.lock().pending.push_back(PendingCallback { id, step });
        id
    }

    /// Cancel a pending callback.
    ///
    /// Returns `true` if the callback was found and removed.
    pub fn cancel(&self, id: FrameCallbackId) -> bool {
        let mut queue = self.inner.lock();
        if let Some(pos) = queue.pending.iter().position(|p| p.id == id) {
            queue.pending.remove(pos);
            if pos < queue.batch_remaining {
                queue.batch_remaining -= 1;
            }
            true
        } else {
            false
        }
    }

    /// Check whether a callback is still waiting to run.
    pub fn is_pending(&self, id: FrameCallbackId) -> bool {
        self.inner.lock().pending.iter().any(|p| p.id == id)
    }

    /// Number of callbacks waiting for a frame.
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending.len()
    }

    /// Number of frames processed so far.
    pub fn frames_run(&self) -> u64 {
        self.inner.lock().frames_run
    }

    /// Process one frame.
    ///
    /// Only callbacks queued before this call are considered; anything a
    /// callback requests runs on the following frame. Callbacks that have not
    /// run yet remain pending, and cancellable, until their turn. The queue
    /// lock is not held while callbacks execute. Returns the number of
    /// callbacks run.
    pub fn run_frame(&self) -> usize {
        {
            let mut queue = self.inner.lock();
            queue.frames_run += 1;
            queue.batch_remaining = queue.pending.len();
        }

        let mut ran = 0;
        loop {
            // Entries stay queued until their turn, so callbacks earlier in
            // the frame can still cancel them.
            let next = {
                let mut queue = self.inner.lock();
                if queue.batch_remaining == 0 {
                    break;
                }
                queue.batch_remaining -= 1;
                queue.pending.pop_front()
            };
            let Some(PendingCallback { id, step }) = next else {
                break;
            };

            match step {
                Step::Run(callback) => {
                    callback();
                    ran += 1;
                }
                Step::Defer(callback) => {
                    self.inner.lock().pending.push_back(PendingCallback {
                        id,
                        step: Step::Run(callback),
                    });
                }
            }
        }

        tracing::trace!(target: targets::FRAME, ran, "frame processed");
        ran
    }

    /// Run frames until nothing is pending or `max_frames` is reached.
    ///
    /// Returns the number of frames processed.
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.pending_count() > 0 {
            self.run_frame();
            frames += 1;
        }
        frames
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let queue = self.inner.lock();
        f.debug_struct("FrameScheduler")
            .field("pending", &queue.pending.len())
            .field("frames_run", &queue.frames_run)
            .finish()
    }
}
