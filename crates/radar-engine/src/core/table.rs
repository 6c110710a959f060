use std::collections::HashMap;

use anyhow::{Context, Result};

use super::ctx::SimCtx;
use super::subsystem::{dispatch, Hook, Subsystem, SubsystemId};
use crate::lifecycle::LifecycleError;

/// Collaborator table: subsystem name to hook set.
///
/// Injected into the controller at construction so any collaborator can be
/// replaced by a test double.
#[derive(Default)]
pub struct SubsystemTable {
    entries: HashMap<SubsystemId, Box<dyn Subsystem>>,
}

impl SubsystemTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `subsystem` under `id`, returning the one it replaces.
    pub fn insert(
        &mut self,
        id: SubsystemId,
        subsystem: impl Subsystem + 'static,
    ) -> Option<Box<dyn Subsystem>> {
        self.entries.insert(id, Box::new(subsystem))
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, id: SubsystemId, subsystem: impl Subsystem + 'static) -> Self {
        self.insert(id, subsystem);
        self
    }

    pub fn contains(&self, id: SubsystemId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fails on the first subsystem that some hook order names but the table lacks.
    pub fn validate(&self) -> Result<(), LifecycleError> {
        match SubsystemId::ALL.into_iter().find(|id| !self.contains(*id)) {
            Some(id) => Err(LifecycleError::MissingSubsystem(id)),
            None => Ok(()),
        }
    }

    /// Invokes `hook` on every subsystem in its fixed order.
    ///
    /// Stops at the first failing subsystem; later subsystems are not called.
    pub fn run(&mut self, hook: Hook, ctx: &mut SimCtx<'_>) -> Result<()> {
        for &id in hook.order() {
            let subsystem = self
                .entries
                .get_mut(&id)
                .ok_or(LifecycleError::MissingSubsystem(id))?;

            dispatch(subsystem.as_mut(), hook, ctx)
                .with_context(|| format!("{hook} hook failed for subsystem '{id}'"))?;
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
