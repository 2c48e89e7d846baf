// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use std::any::Any;
use std::fmt;

use crate::events::Event;

use super::ReturnCode;

/// The opaque state an [`Element`]'s callbacks operate on.
///
/// Boxed as `dyn Any` so that a single `Element` type can host every shape
/// of state the operator library needs (a counter, a deadline, a list of
/// chain names to watch) without the domain layer knowing about any of
/// them. Callbacks downcast it back to their own private state type.
pub type ElementData = Box<dyn Any>;

type ProcessFn = Box<dyn FnMut(&mut dyn Any, &Event) -> ReturnCode>;
type LifecycleFn = Box<dyn FnMut(&mut dyn Any)>;

/// A named unit of behavior within a [`crate::Chain`].
///
/// An element owns a single piece of opaque state and up to three
/// callbacks:
///
/// - `process` (required): runs once per dispatched event while the element
///   is enabled, and decides what happens next via its [`ReturnCode`].
/// - `init` (optional): runs once, the first time the element becomes
///   active after being enabled.
/// - `terminate` (optional): runs once, when the element is disabled
///   (whether by its own `process` returning [`ReturnCode::Disable`] or by
///   the chain being disabled out from under it), but only if `init` ever
///   ran.
///
/// Invariant: `initialized` can only be `true` while `enable` is `true`.
/// The engine, not the element itself, is responsible for calling these
/// methods in the right order; `Element` only enforces that the invariant
/// can't be violated by the calls it exposes.
pub struct Element {
    name: String,
    enable: bool,
    initialized: bool,
    data: ElementData,
    process: ProcessFn,
    init: Option<LifecycleFn>,
    terminate: Option<LifecycleFn>,
}

impl Element {
    /// Build a new element. It starts enabled and uninitialized.
    pub fn new<D, P>(name: impl Into<String>, data: D, process: P) -> Self
    where
        D: Any,
        P: FnMut(&mut dyn Any, &Event) -> ReturnCode + 'static,
    {
        Self {
            name: name.into(),
            enable: true,
            initialized: false,
            data: Box::new(data),
            process: Box::new(process),
            init: None,
            terminate: None,
        }
    }

    /// Attach an initialization callback, run once when the element first
    /// becomes active.
    pub fn with_init<F>(mut self, init: F) -> Self
    where
        F: FnMut(&mut dyn Any) + 'static,
    {
        self.init = Some(Box::new(init));
        self
    }

    /// Attach a termination callback, run once when the element is
    /// disabled after having been initialized.
    pub fn with_terminate<F>(mut self, terminate: F) -> Self
    where
        F: FnMut(&mut dyn Any) + 'static,
    {
        self.terminate = Some(Box::new(terminate));
        self
    }

    /// The element's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the element currently participates in dispatch.
    pub fn is_enabled(&self) -> bool {
        self.enable
    }

    /// Whether the element's `init` callback has already run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the `init` callback, if any, and mark the element initialized.
    ///
    /// A no-op if the element is already initialized. Panics (via a debug
    /// assertion) if called while the element is disabled, since that would
    /// violate the `initialized ⇒ enable` invariant.
    pub fn initialize(&mut self) {
        debug_assert!(self.enable, "cannot initialize a disabled element");
        if self.initialized {
            return;
        }
        if let Some(init) = self.init.as_mut() {
            init(self.data.as_mut());
        }
        self.initialized = true;
    }

    /// Run the `process` callback for `event`, initializing first if this is
    /// the element's first activation.
    pub fn process(&mut self, event: &Event) -> ReturnCode {
        if !self.initialized {
            self.initialize();
        }
        (self.process)(self.data.as_mut(), event)
    }

    /// Disable the element, running its `terminate` callback if it was ever
    /// initialized.
    pub fn disable(&mut self) {
        if self.initialized {
            if let Some(terminate) = self.terminate.as_mut() {
                terminate(self.data.as_mut());
            }
        }
        self.enable = false;
        self.initialized = false;
    }

    /// Re-enable a previously disabled element. It will run `init` again the
    /// next time it processes an event.
    pub fn enable(&mut self) {
        self.enable = true;
    }

    /// Restore the element to its freshly-constructed state: enabled,
    /// uninitialized, `terminate` not yet run for the current cycle. Used by
    /// the engine when handling `CF_RESET_SYSTEM`.
    pub fn reset(&mut self) {
        self.enable = true;
        self.initialized = false;
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name)
            .field("enable", &self.enable)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn process_initializes_on_first_call() {
        let mut init_count = 0usize;
        let element = Element::new(
            "counter",
            0i32,
            |data: &mut dyn Any, _event: &Event| -> ReturnCode {
                let n = data.downcast_mut::<i32>().unwrap();
                *n += 1;
                ReturnCode::Halt
            },
        );
        let mut element = element.with_init(move |_data| {
            init_count += 1;
        });

        assert!(!element.is_initialized());
        let event = Event::unit("CF_TIMER_EVENT").unwrap();
        element.process(&event);
        assert!(element.is_initialized());
        element.process(&event);
        assert!(element.is_initialized());
    }

    #[test]
    fn disable_runs_terminate_only_if_initialized() {
        let terminated = std::rc::Rc::new(std::cell::RefCell::new(false));
        let terminated_clone = terminated.clone();

        let mut element = Element::new("one_shot", (), |_data, _event| ReturnCode::Disable)
            .with_terminate(move |_data| {
                *terminated_clone.borrow_mut() = true;
            });

        // Never processed, so never initialized; disable must not run terminate.
        element.disable();
        assert!(!*terminated.borrow());

        element.enable();
        let event = Event::unit("CF_TIMER_EVENT").unwrap();
        element.process(&event);
        element.disable();
        assert!(*terminated.borrow());
    }

    #[test]
    fn reset_restores_fresh_state() {
        let mut element = Element::new("x", 0i32, |_data, _event| ReturnCode::Disable);
        let event = Event::new("e", Value::Null).unwrap();
        element.process(&event);
        element.disable();
        assert!(!element.is_enabled());

        element.reset();
        assert!(element.is_enabled());
        assert!(!element.is_initialized());
    }
}
