//! Cancellable frame scheduling
//!
//! The simulation never reschedules itself. A [`FrameLoop`] holds at most one
//! pending frame request and always cancels it before asking for another, so
//! a restart can never leave two loops running and a teardown never leaves a
//! frame behind.

/// Host facility that can call back once on the next display refresh
pub trait FrameScheduler {
    type Handle;

    /// Ask for one callback. `None` if the host refused.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Withdraw a request that has not fired yet
    fn cancel_frame(&mut self, handle: Self::Handle);
}

pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Request the next frame, replacing any request still outstanding
    pub fn schedule(&mut self) {
        self.cancel();
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Frame request refused; loop stopped");
        }
    }

    /// Drop the outstanding request, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    /// Call at the top of the frame callback: the request that fired is spent
    pub fn begin_frame(&mut self) {
        self.pending = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
