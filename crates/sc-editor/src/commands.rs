//! Undo/Redo command stack.
//!
//! Gestures preview edits by mutating the live document directly; only at
//! drag-end is the accumulated delta turned into one immutable command.
//! A command reaches the history only if it represents a real change
//! (`is_executable`), so a divider released at its original position
//! leaves the history untouched.

use crate::document::{Document, DocumentError};
use sc_core::{NodeId, PropertyId, PropertyValue};
use smallvec::SmallVec;

/// One attribute delta: the value before the gesture and the captured
/// live value at drag-end.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEdit {
    pub prop: PropertyId,
    pub before: PropertyValue,
    pub after: PropertyValue,
}

impl PropertyEdit {
    pub fn new(prop: PropertyId, before: PropertyValue, after: PropertyValue) -> Self {
        Self {
            prop,
            before,
            after,
        }
    }

    fn is_change(&self) -> bool {
        self.before != self.after
    }
}

/// An immutable, executable/undoable unit of document mutation targeting
/// one node. Constructed only after a gesture completes.
#[derive(Debug, Clone)]
pub struct EditCommand {
    pub target: NodeId,
    pub edits: SmallVec<[PropertyEdit; 4]>,
    pub label: String,
}

impl EditCommand {
    pub fn new(
        target: NodeId,
        label: impl Into<String>,
        edits: impl IntoIterator<Item = PropertyEdit>,
    ) -> Self {
        Self {
            target,
            edits: edits.into_iter().collect(),
            label: label.into(),
        }
    }

    /// True iff executing this command changes at least one value.
    pub fn is_executable(&self) -> bool {
        self.edits.iter().any(PropertyEdit::is_change)
    }

    pub fn execute(&self, doc: &mut Document) -> Result<(), DocumentError> {
        let values: Vec<_> = self
            .edits
            .iter()
            .map(|e| (e.prop, e.after.clone()))
            .collect();
        doc.set_properties(self.target, &values)
    }

    pub fn unexecute(&self, doc: &mut Document) -> Result<(), DocumentError> {
        let values: Vec<_> = self
            .edits
            .iter()
            .map(|e| (e.prop, e.before.clone()))
            .collect();
        doc.set_properties(self.target, &values)
    }
}

/// A history entry: a single command or a batch committed as one step
/// (multi-node relocation).
#[derive(Debug, Clone)]
pub enum Command {
    Edit(EditCommand),
    Batch {
        label: String,
        commands: Vec<EditCommand>,
    },
}

impl Command {
    pub fn label(&self) -> &str {
        match self {
            Self::Edit(cmd) => &cmd.label,
            Self::Batch { label, .. } => label,
        }
    }

    pub fn is_executable(&self) -> bool {
        match self {
            Self::Edit(cmd) => cmd.is_executable(),
            Self::Batch { commands, .. } => commands.iter().any(EditCommand::is_executable),
        }
    }

    fn execute(&self, doc: &mut Document) -> Result<(), DocumentError> {
        match self {
            Self::Edit(cmd) => cmd.execute(doc),
            Self::Batch { commands, .. } => {
                for cmd in commands {
                    cmd.execute(doc)?;
                }
                Ok(())
            }
        }
    }

    fn unexecute(&self, doc: &mut Document) -> Result<(), DocumentError> {
        match self {
            Self::Edit(cmd) => cmd.unexecute(doc),
            Self::Batch { commands, .. } => {
                for cmd in commands.iter().rev() {
                    cmd.unexecute(doc)?;
                }
                Ok(())
            }
        }
    }
}

/// Manages undo/redo stacks with a bounded depth.
pub struct CommandStack {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    max_depth: usize,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Execute `command` against the document and record it, unless it is
    /// a no-op. Returns whether anything was recorded.
    pub fn push(&mut self, doc: &mut Document, command: Command) -> Result<bool, DocumentError> {
        if !command.is_executable() {
            log::trace!("skipping no-op command: {}", command.label());
            return Ok(false);
        }
        command.execute(doc)?;
        log::debug!("history push: {}", command.label());

        self.undo_stack.push(command);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }

        // New action invalidates the redo chain
        self.redo_stack.clear();
        Ok(true)
    }

    /// Undo the most recent command. Returns its label.
    pub fn undo(&mut self, doc: &mut Document) -> Result<Option<String>, DocumentError> {
        let Some(cmd) = self.undo_stack.pop() else {
            return Ok(None);
        };
        cmd.unexecute(doc)?;
        log::debug!("undo: {}", cmd.label());
        let label = cmd.label().to_string();
        self.redo_stack.push(cmd);
        Ok(Some(label))
    }

    /// Redo the most recently undone command. Returns its label.
    pub fn redo(&mut self, doc: &mut Document) -> Result<Option<String>, DocumentError> {
        let Some(cmd) = self.redo_stack.pop() else {
            return Ok(None);
        };
        cmd.execute(doc)?;
        log::debug!("redo: {}", cmd.label());
        let label = cmd.label().to_string();
        self.undo_stack.push(cmd);
        Ok(Some(label))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
