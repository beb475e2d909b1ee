// Drives a `ParticleField` from host callbacks.
//
// The host supplies a `FrameClock` (one callback before the next paint) and a
// `ResizeSignal`. Every frame renders once and re-arms the clock. Callbacks only
// hold a `Weak` to the shared state, so dropping the `Animation` ends the loop.

use crate::field::ParticleField;
use crate::surface::Surface;
use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

pub trait FrameClock {
    type Request;

    // Runs `callback` once before the next paint. None if the host refused.
    fn request_frame(&mut self, callback: Box<dyn FnOnce()>) -> Option<Self::Request>;

    fn cancel_frame(&mut self, request: Self::Request);
}

pub trait ResizeSignal {
    type Subscription;

    fn subscribe(&mut self, listener: Box<dyn FnMut()>) -> Option<Self::Subscription>;

    fn unsubscribe(&mut self, subscription: Self::Subscription);
}

struct Shared<S: Surface, C: FrameClock> {
    field: ParticleField<S>,
    clock: C,
    pending: Option<C::Request>,
    running: bool,
    frames: u64,
}

pub struct Animation<S, C, R>
where
    S: Surface,
    C: FrameClock,
    R: ResizeSignal,
{
    shared: Rc<RefCell<Shared<S, C>>>,
    signal: R,
    subscription: Option<R::Subscription>,
}

impl<S, C, R> Animation<S, C, R>
where
    S: Surface + 'static,
    C: FrameClock + 'static,
    R: ResizeSignal,
{
    // Arms the first frame and subscribes to resizes. An inert field gets
    // neither and the animation starts out stopped.
    pub fn start(field: ParticleField<S>, clock: C, mut signal: R) -> Self {
        let running = !field.is_inert();
        let shared = Rc::new(RefCell::new(Shared {
            field,
            clock,
            pending: None,
            running,
            frames: 0,
        }));

        let mut subscription = None;
        if running {
            let weak = Rc::downgrade(&shared);
            subscription = signal.subscribe(Box::new(move || on_resize(&weak)));
            schedule(&shared);
        }

        Animation {
            shared,
            signal,
            subscription,
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.borrow().running
    }

    // Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.shared.borrow().frames
    }

    pub fn field(&self) -> Ref<'_, ParticleField<S>> {
        Ref::map(self.shared.borrow(), |shared| &shared.field)
    }

    pub fn field_mut<T>(&self, f: impl FnOnce(&mut ParticleField<S>) -> T) -> T {
        f(&mut self.shared.borrow_mut().field)
    }

    pub fn resize(&self) {
        self.shared.borrow_mut().field.resize();
    }

    // Cancels the pending frame and drops the resize subscription. Safe to call
    // more than once.
    pub fn stop(&mut self) {
        {
            let mut shared = self.shared.borrow_mut();
            shared.running = false;
            if let Some(request) = shared.pending.take() {
                shared.clock.cancel_frame(request);
            }
        }
        if let Some(subscription) = self.subscription.take() {
            self.signal.unsubscribe(subscription);
        }
    }
}

impl<S, C, R> Drop for Animation<S, C, R>
where
    S: Surface,
    C: FrameClock,
    R: ResizeSignal,
{
    fn drop(&mut self) {
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.running = false;
            if let Some(request) = shared.pending.take() {
                shared.clock.cancel_frame(request);
            }
        }
        if let Some(subscription) = self.subscription.take() {
            self.signal.unsubscribe(subscription);
        }
    }
}

fn schedule<S, C>(shared: &Rc<RefCell<Shared<S, C>>>)
where
    S: Surface + 'static,
    C: FrameClock + 'static,
{
    let weak = Rc::downgrade(shared);
    let mut state = shared.borrow_mut();
    let request = state.clock.request_frame(Box::new(move || on_frame(&weak)));
    // A refused request ends the loop
    if request.is_none() {
        state.running = false;
    }
    state.pending = request;
}

fn on_frame<S, C>(weak: &Weak<RefCell<Shared<S, C>>>)
where
    S: Surface + 'static,
    C: FrameClock + 'static,
{
    let shared = match weak.upgrade() {
        Some(shared) => shared,
        None => return,
    };
    {
        let mut state = shared.borrow_mut();
        state.pending = None;
        if !state.running {
            return;
        }
        state.field.render_frame();
        state.frames += 1;
    }
    schedule(&shared);
}

fn on_resize<S, C>(weak: &Weak<RefCell<Shared<S, C>>>)
where
    S: Surface,
    C: FrameClock,
{
    if let Some(shared) = weak.upgrade() {
        // Host events never interleave with a frame, a busy cell would mean a
        // re-entrant call from inside the render.
        if let Ok(mut state) = shared.try_borrow_mut() {
            state.field.resize();
        }
    }
}
