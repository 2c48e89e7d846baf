// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Small, reusable process-function recipes shared by several operators.

use std::any::Any;

use crate::elements::ReturnCode;
use crate::events::Event;

/// A process function that always disables its element, regardless of the
/// event received. Used as the "do the thing once, then get out of the
/// way" half of the one-shot element recipes.
pub fn null_disable(_data: &mut dyn Any, _event: &Event) -> ReturnCode {
    ReturnCode::Disable
}

/// A process function that always continues, regardless of the event
/// received. Used by the bidirectional one-shot recipe, whose element must
/// stay active (so its terminate callback eventually runs) rather than
/// disabling itself immediately.
pub fn null_continue(_data: &mut dyn Any, _event: &Event) -> ReturnCode {
    ReturnCode::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn null_disable_always_disables() {
        let event = Event::new("anything", Value::Null).unwrap();
        assert_eq!(null_disable(&mut (), &event), ReturnCode::Disable);
    }

    #[test]
    fn null_continue_always_continues() {
        let event = Event::new("anything", Value::Null).unwrap();
        assert_eq!(null_continue(&mut (), &event), ReturnCode::Continue);
    }
}
