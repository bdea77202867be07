//! Bounded undo/redo history over reversible commands.
//!
//! The manager is a plain two-deque command history: it knows nothing about
//! tables, only the [`Command`] contract. The editing session owns one
//! manager per document; there is no process-wide history. [`TableCommand`]
//! enumerates every reversible table mutation, each carrying enough captured
//! state to reverse itself.

use std::collections::VecDeque;

use crate::column::ColumnTree;
use crate::data::{DataType, Value};
use crate::error::Result;
use crate::table::DataTable;
use crate::tree::Leaf;
use crate::variable::{Variable, VariableBindings};

/// A reversible operation against some target. `execute` runs (or re-runs)
/// the forward action; `undo` reverses it; `name` is the short description a
/// presentation layer shows next to undo/redo menu entries.
pub trait Command {
    type Target;

    fn execute(&mut self, target: &mut Self::Target) -> Result<()>;
    fn undo(&mut self, target: &mut Self::Target) -> Result<()>;
    fn name(&self) -> &str;
}

/// Two bounded sequences of commands: `done` (most recent first) and
/// `undone` (most recent first), each capped at the capacity fixed at
/// construction. A capacity of zero disables recording.
#[derive(Debug)]
pub struct UndoManager<C> {
    max_size: usize,
    done: VecDeque<C>,
    undone: VecDeque<C>,
}

impl<C: Command> UndoManager<C> {
    pub fn new(max_size: usize) -> Self {
        UndoManager {
            max_size,
            done: VecDeque::with_capacity(max_size),
            undone: VecDeque::with_capacity(max_size),
        }
    }

    /// Accepts a command the caller has already executed. The oldest entry
    /// falls off a full history, and any redo history is invalidated.
    pub fn record(&mut self, command: C) {
        if self.max_size == 0 {
            return;
        }
        if self.done.len() == self.max_size {
            self.done.pop_back();
        }
        self.done.push_front(command);
        self.undone.clear();
    }

    /// Reverses the most recent command. A no-op returning `false` when
    /// nothing is undoable. On failure the command stays undoable.
    pub fn undo(&mut self, target: &mut C::Target) -> Result<bool> {
        let Some(mut command) = self.done.pop_front() else {
            return Ok(false);
        };
        match command.undo(target) {
            Ok(()) => {
                if self.undone.len() == self.max_size {
                    self.undone.pop_back();
                }
                self.undone.push_front(command);
                Ok(true)
            }
            Err(err) => {
                self.done.push_front(command);
                Err(err)
            }
        }
    }

    /// Re-executes the most recently undone command. A no-op returning
    /// `false` when nothing is redoable.
    pub fn redo(&mut self, target: &mut C::Target) -> Result<bool> {
        let Some(mut command) = self.undone.pop_front() else {
            return Ok(false);
        };
        match command.execute(target) {
            Ok(()) => {
                if self.done.len() == self.max_size {
                    self.done.pop_back();
                }
                self.done.push_front(command);
                Ok(true)
            }
            Err(err) => {
                self.undone.push_front(command);
                Err(err)
            }
        }
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.done.front().map(Command::name)
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.undone.front().map(Command::name)
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Erases the whole history, e.g. when switching documents.
    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
    }
}

#[derive(Debug, Clone)]
pub struct RemovedColumn {
    column: Leaf<DataType>,
    values: Vec<Value>,
    variable: Option<Variable>,
    /// Column tree as it stood before the removal; re-inserting by flat
    /// index alone cannot reconstruct which category the leaf sat in.
    columns: ColumnTree,
}

/// Every reversible table mutation, with the state captured on execution
/// that its reversal needs.
#[derive(Debug, Clone)]
pub enum TableCommand {
    SetValue {
        row: usize,
        column: usize,
        value: Value,
        previous: Option<Value>,
    },
    InsertRow {
        segment: usize,
        index: usize,
        row: Leaf<Vec<Value>>,
    },
    RemoveRow {
        segment: usize,
        index: usize,
        removed: Option<Leaf<Vec<Value>>>,
    },
    InsertColumn {
        index: usize,
        column: Leaf<DataType>,
        values: Vec<Value>,
    },
    RemoveColumn {
        index: usize,
        removed: Option<RemovedColumn>,
    },
    RenameColumn {
        index: usize,
        title: String,
        previous: Option<String>,
    },
    ReorderColumn {
        from: usize,
        to: usize,
        previous: Option<ColumnTree>,
    },
    BindVariable {
        variable: Variable,
        column: usize,
        previous: Option<VariableBindings>,
    },
    ClearVariables {
        previous: Option<VariableBindings>,
    },
}

impl TableCommand {
    pub fn set_value(row: usize, column: usize, value: Value) -> Self {
        TableCommand::SetValue {
            row,
            column,
            value,
            previous: None,
        }
    }

    pub fn insert_row(segment: usize, index: usize, row: Leaf<Vec<Value>>) -> Self {
        TableCommand::InsertRow {
            segment,
            index,
            row,
        }
    }

    pub fn remove_row(segment: usize, index: usize) -> Self {
        TableCommand::RemoveRow {
            segment,
            index,
            removed: None,
        }
    }

    pub fn insert_column(index: usize, column: Leaf<DataType>, values: Vec<Value>) -> Self {
        TableCommand::InsertColumn {
            index,
            column,
            values,
        }
    }

    pub fn remove_column(index: usize) -> Self {
        TableCommand::RemoveColumn {
            index,
            removed: None,
        }
    }

    pub fn rename_column(index: usize, title: impl Into<String>) -> Self {
        TableCommand::RenameColumn {
            index,
            title: title.into(),
            previous: None,
        }
    }

    pub fn reorder_column(from: usize, to: usize) -> Self {
        TableCommand::ReorderColumn {
            from,
            to,
            previous: None,
        }
    }

    pub fn bind_variable(variable: Variable, column: usize) -> Self {
        TableCommand::BindVariable {
            variable,
            column,
            previous: None,
        }
    }

    pub fn clear_variables() -> Self {
        TableCommand::ClearVariables { previous: None }
    }
}

impl Command for TableCommand {
    type Target = DataTable;

    fn execute(&mut self, table: &mut DataTable) -> Result<()> {
        match self {
            TableCommand::SetValue {
                row,
                column,
                value,
                previous,
            } => {
                *previous = Some(table.set_value(*row, *column, value.clone())?);
            }
            TableCommand::InsertRow {
                segment,
                index,
                row,
            } => {
                table.insert_row(*segment, *index, row.clone())?;
            }
            TableCommand::RemoveRow {
                segment,
                index,
                removed,
            } => {
                *removed = Some(table.remove_row(*segment, *index));
            }
            TableCommand::InsertColumn {
                index,
                column,
                values,
            } => {
                table.insert_column(*index, column.clone(), values.clone())?;
            }
            TableCommand::RemoveColumn { index, removed } => {
                let columns = table.column_tree().clone();
                let (column, values, variable) = table.remove_column(*index);
                *removed = Some(RemovedColumn {
                    column,
                    values,
                    variable,
                    columns,
                });
            }
            TableCommand::RenameColumn {
                index,
                title,
                previous,
            } => {
                *previous = Some(table.rename_column(*index, title.clone()));
            }
            TableCommand::ReorderColumn { from, to, previous } => {
                *previous = Some(table.column_tree().clone());
                table.reorder_column(*from, *to);
            }
            TableCommand::BindVariable {
                variable,
                column,
                previous,
            } => {
                *previous = Some(table.bindings().clone());
                table.set_variable(*variable, *column);
            }
            TableCommand::ClearVariables { previous } => {
                *previous = Some(table.bindings().clone());
                table.clear_variables();
            }
        }
        Ok(())
    }

    fn undo(&mut self, table: &mut DataTable) -> Result<()> {
        match self {
            TableCommand::SetValue {
                row,
                column,
                previous,
                ..
            } => {
                let value = previous.take().expect("undo follows execute");
                table.set_value(*row, *column, value)?;
            }
            TableCommand::InsertRow { segment, index, .. } => {
                table.remove_row(*segment, *index);
            }
            TableCommand::RemoveRow {
                segment,
                index,
                removed,
            } => {
                let row = removed.take().expect("undo follows execute");
                table.insert_row(*segment, *index, row)?;
            }
            TableCommand::InsertColumn { index, .. } => {
                table.remove_column(*index);
            }
            TableCommand::RemoveColumn { index, removed } => {
                let state = removed.take().expect("undo follows execute");
                table.insert_column(*index, state.column, state.values)?;
                table.restore_columns(state.columns);
                if let Some(variable) = state.variable {
                    table.set_variable(variable, *index);
                }
            }
            TableCommand::RenameColumn {
                index, previous, ..
            } => {
                let title = previous.take().expect("undo follows execute");
                table.rename_column(*index, title);
            }
            TableCommand::ReorderColumn { from, to, previous } => {
                table.reorder_column(*to, *from);
                let columns = previous.take().expect("undo follows execute");
                table.restore_columns(columns);
            }
            TableCommand::BindVariable { previous, .. }
            | TableCommand::ClearVariables { previous } => {
                let bindings = previous.take().expect("undo follows execute");
                table.restore_bindings(bindings);
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self {
            TableCommand::SetValue { .. } => "Edit cell",
            TableCommand::InsertRow { .. } => "Insert row",
            TableCommand::RemoveRow { .. } => "Delete row",
            TableCommand::InsertColumn { .. } => "Insert column",
            TableCommand::RemoveColumn { .. } => "Delete column",
            TableCommand::RenameColumn { .. } => "Rename column",
            TableCommand::ReorderColumn { .. } => "Change column position",
            TableCommand::BindVariable { .. } => "Set variable",
            TableCommand::ClearVariables { .. } => "Clear variables",
        }
    }
}
