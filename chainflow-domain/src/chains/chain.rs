// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use std::any::Any;
use std::fmt;

use crate::elements::Element;
use crate::error::ChainFlowError;

/// An ordered, named list of [`Element`]s.
///
/// A chain is built up with [`Chain::add_element`] and then locked with
/// [`Chain::finalize`] - after that, its element list never changes shape
/// again, only the elements' own internal state does. This mirrors the
/// engine's overall two-phase lifecycle: define everything, finalize once,
/// then run.
pub struct Chain {
    name: String,
    elements: Vec<Element>,
    active: bool,
    auto_flag: bool,
    finalized: bool,
    chain_data: Option<Box<dyn Any>>,
}

impl Chain {
    /// Start building a new chain. `auto_flag` controls whether the chain is
    /// active as soon as the engine starts, without needing an explicit
    /// enable from another chain's operator.
    pub fn new(name: impl Into<String>, auto_flag: bool) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
            active: auto_flag,
            auto_flag,
            finalized: false,
            chain_data: None,
        }
    }

    /// The chain's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an element to the chain.
    ///
    /// # Errors
    ///
    /// Returns [`ChainFlowError::AlreadyFinalized`] if the chain has already
    /// been finalized.
    pub fn add_element(&mut self, element: Element) -> Result<(), ChainFlowError> {
        if self.finalized {
            return Err(ChainFlowError::already_finalized(format!(
                "cannot add element {:?} to chain {:?} after finalize",
                element.name(),
                self.name
            )));
        }
        self.elements.push(element);
        Ok(())
    }

    /// Lock the chain's element list. Idempotent.
    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    /// True once [`Chain::finalize`] has been called.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// The chain's elements, in definition order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Mutable access to the chain's elements, in definition order.
    pub fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    /// Whether the chain currently participates in event dispatch.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the chain starts active automatically when the engine
    /// starts.
    pub fn auto_flag(&self) -> bool {
        self.auto_flag
    }

    /// Activate the chain.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Deactivate the chain. Does not touch any element's individual
    /// enable/initialized state - a reactivated chain resumes its elements
    /// exactly where they left off.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Restore the chain to its auto_flag-determined starting state and
    /// reset every element within it. Used by the engine when handling
    /// `CF_RESET_SYSTEM`.
    pub fn reset(&mut self) {
        self.active = self.auto_flag;
        for element in &mut self.elements {
            element.reset();
        }
    }

    /// Opaque per-chain data, shared across every element in the chain.
    pub fn chain_data(&self) -> Option<&dyn Any> {
        self.chain_data.as_deref()
    }

    /// Mutable access to the chain's opaque data.
    pub fn chain_data_mut(&mut self) -> Option<&mut (dyn Any)> {
        self.chain_data.as_deref_mut()
    }

    /// Set the chain's opaque data.
    pub fn set_chain_data<D: Any>(&mut self, data: D) {
        self.chain_data = Some(Box::new(data));
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("name", &self.name)
            .field("active", &self.active)
            .field("auto_flag", &self.auto_flag)
            .field("finalized", &self.finalized)
            .field("element_count", &self.elements.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ReturnCode;

    #[test]
    fn auto_flag_determines_starting_activity() {
        let auto = Chain::new("auto", true);
        assert!(auto.is_active());

        let manual = Chain::new("manual", false);
        assert!(!manual.is_active());
    }

    #[test]
    fn element_list_is_immutable_after_finalize() {
        let mut chain = Chain::new("door", true);
        chain
            .add_element(Element::new("e1", (), |_d, _e| ReturnCode::Halt))
            .unwrap();
        chain.finalize();

        let err = chain
            .add_element(Element::new("e2", (), |_d, _e| ReturnCode::Halt))
            .unwrap_err();
        assert!(matches!(err, ChainFlowError::AlreadyFinalized(_)));
        assert_eq!(chain.elements().len(), 1);
    }

    #[test]
    fn reset_restores_auto_flag_activity() {
        let mut chain = Chain::new("door", true);
        chain.deactivate();
        assert!(!chain.is_active());
        chain.reset();
        assert!(chain.is_active());
    }
}
