//! Step observers.
//!
//! An observer is handed to a single step call and dropped afterwards; the
//! limiter never keeps a reference to caller storage.

use super::derivs::Step;

/// Receives the result of every observed step.
pub trait StepObserver {
    /// Called once after the step has been applied.
    fn on_step(&mut self, step: &Step);
}

impl<F> StepObserver for F
where
    F: FnMut(&Step),
{
    #[inline]
    fn on_step(&mut self, step: &Step) {
        self(step)
    }
}

/// Copies position and velocity into caller-owned variables.
///
/// For polling code that reads plain variables instead of calling getters.
#[derive(Debug)]
pub struct Mirror<'a> {
    /// Receives the position.
    pub position: &'a mut f32,
    /// Receives the velocity.
    pub velocity: &'a mut f32,
}

impl<'a> Mirror<'a> {
    /// Create a mirror over two caller-owned variables.
    pub fn new(position: &'a mut f32, velocity: &'a mut f32) -> Self {
        Self { position, velocity }
    }
}

impl StepObserver for Mirror<'_> {
    #[inline]
    fn on_step(&mut self, step: &Step) {
        *self.position = step.position;
        *self.velocity = step.velocity;
    }
}
