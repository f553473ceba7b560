//! Middleware pipeline.
//!
//! A [`Pipeline`] composes an ordered sequence of interceptors plus one
//! terminal handler into a single synchronous call chain. Each interceptor
//! receives a [`Next`] capability and chooses whether and when to delegate:
//! code before `next.run(..)` executes in registration order (outermost
//! first), code after it in reverse order as the call stack unwinds, and an
//! interceptor that never delegates short-circuits every later link while
//! earlier links still finish normally.

use std::cell::Cell;
use std::sync::Arc;

use crate::context::Context;

/// A terminal request handler.
pub type HandlerFn = Arc<dyn Fn(&mut Context) + Send + Sync>;

/// A middleware link: runs around the rest of the chain via [`Next`].
pub type Interceptor = Arc<dyn Fn(&mut Context, &Next<'_>) + Send + Sync>;

/// Wrap a closure as a [`HandlerFn`].
pub fn handler<F>(f: F) -> HandlerFn
where
    F: Fn(&mut Context) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a closure as an [`Interceptor`].
pub fn interceptor<F>(f: F) -> Interceptor
where
    F: Fn(&mut Context, &Next<'_>) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// An immutable interceptor sequence plus terminal handler.
///
/// The pipeline holds a single forward cursor shared by every [`Next`]
/// handed out during one run. The cursor only ever advances: delegating a
/// second time resumes after whatever already ran, and a call made once the
/// chain is spent is a no-op. Nothing validates how often an interceptor
/// delegates; that is the interceptor's choice.
pub struct Pipeline {
    stack: Vec<Interceptor>,
    terminal: HandlerFn,
    cursor: Cell<usize>,
}

impl Pipeline {
    /// Compose `stack` around `terminal`.
    #[must_use]
    pub fn new(stack: Vec<Interceptor>, terminal: HandlerFn) -> Self {
        Self {
            stack,
            terminal,
            cursor: Cell::new(0),
        }
    }

    /// Execute the chain from the first link.
    ///
    /// An empty stack plus the terminal handler is the minimum valid case.
    pub fn run(&self, cx: &mut Context) {
        self.cursor.set(0);
        Next { pipeline: self }.run(cx);
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("links", &self.stack.len())
            .field("cursor", &self.cursor.get())
            .finish_non_exhaustive()
    }
}

/// Capability to invoke the next link in the chain.
pub struct Next<'a> {
    pipeline: &'a Pipeline,
}

impl Next<'_> {
    /// Advance the cursor and invoke the link at the new position.
    ///
    /// The link after the last interceptor is the terminal handler; past
    /// that, the chain is spent and this does nothing.
    pub fn run(&self, cx: &mut Context) {
        let index = self.pipeline.cursor.get();
        self.pipeline.cursor.set(index + 1);
        if index < self.pipeline.stack.len() {
            let link = &self.pipeline.stack[index];
            link(
                cx,
                &Next {
                    pipeline: self.pipeline,
                },
            );
        } else if index == self.pipeline.stack.len() {
            (self.pipeline.terminal)(cx);
        }
    }
}
