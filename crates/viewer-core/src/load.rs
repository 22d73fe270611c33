//! Single-shot completion channel between an asset loader and the render loop.
//!
//! The loader owns a [`LoadCompleter`] and resolves it exactly once; the
//! render loop polls the matching [`LoadSlot`] every tick. Both halves live
//! on the same thread, so the shared cell is an `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Result, ViewerError};

enum SlotState<T> {
    Pending,
    Ready(Result<T>),
    Taken,
}

/// Create a connected completer/slot pair for the asset at `reference`.
pub fn load_channel<T>(reference: &str) -> (LoadCompleter<T>, LoadSlot<T>) {
    let shared = Rc::new(RefCell::new(SlotState::Pending));
    (
        LoadCompleter {
            shared: Some(shared.clone()),
            reference: reference.to_string(),
        },
        LoadSlot { shared },
    )
}

/// Loader half. Completing consumes it; dropping it unresolved reports a failure.
pub struct LoadCompleter<T> {
    shared: Option<Rc<RefCell<SlotState<T>>>>,
    reference: String,
}

impl<T> LoadCompleter<T> {
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn complete(mut self, result: Result<T>) {
        if let Some(shared) = self.shared.take() {
            *shared.borrow_mut() = SlotState::Ready(result);
        }
    }
}

impl<T> Drop for LoadCompleter<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.take() {
            *shared.borrow_mut() = SlotState::Ready(Err(ViewerError::asset_load(
                &self.reference,
                "loader dropped before completing",
            )));
        }
    }
}

/// Render-loop half.
pub struct LoadSlot<T> {
    shared: Rc<RefCell<SlotState<T>>>,
}

impl<T> LoadSlot<T> {
    pub fn is_pending(&self) -> bool {
        matches!(*self.shared.borrow(), SlotState::Pending)
    }

    /// Take the result if the loader has finished. Yields it at most once.
    pub fn take_ready(&self) -> Option<Result<T>> {
        let mut state = self.shared.borrow_mut();
        match std::mem::replace(&mut *state, SlotState::Taken) {
            SlotState::Ready(result) => Some(result),
            other => {
                *state = other;
                None
            }
        }
    }
}
