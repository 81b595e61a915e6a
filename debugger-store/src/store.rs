//! Owns the state and closes the sticky line-follow loop
//!
//! The reducer never dispatches. After every accepted action the store asks
//! the stack-trace selectors whether sticky mode wants a different focused
//! line and, if so, reduces that follow-up immediately.

use tracing::info;

use crate::actions::Action;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::reducer::reduce;
use crate::selectors::derive_auto_focus_action;
use crate::state::DebuggerState;

#[derive(Debug, Clone)]
pub struct Store {
    state: DebuggerState,
}

impl Store {
    pub fn new(config: &StoreConfig) -> Self {
        Self::from_state(DebuggerState::new(config))
    }

    pub fn from_state(state: DebuggerState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &DebuggerState {
        &self.state
    }

    pub fn into_state(self) -> DebuggerState {
        self.state
    }

    /// Reduces `action` and returns the follow-up actions that were applied
    /// after it.
    pub fn dispatch(&mut self, action: Action) -> Result<Vec<Action>, StoreError> {
        reduce(&mut self.state, action)?;

        let mut follow_ups = Vec::new();
        if let Some(follow_up) = derive_auto_focus_action(&self.state) {
            if let Action::SourceLineFocused { source_line_spec } = &follow_up {
                info!(
                    host_name = %source_line_spec.host_name,
                    file_path = %source_line_spec.file_path,
                    lineno = source_line_spec.lineno,
                    "following bottommost frame of focused file"
                );
            }
            reduce(&mut self.state, follow_up.clone())?;
            follow_ups.push(follow_up);
        }
        Ok(follow_ups)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}
