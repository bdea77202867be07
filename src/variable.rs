//! Plotting variables and the per-table variable/column binding registry.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::DataType;

/// A fixed semantic role a column can be bound to. Variables exist
/// independently of any table; a table maps them onto its own columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    X,
    SigmaX,
    Y,
    SigmaY,
    Rho,
    Label,
    Aliquot,
    Selected,
    Visible,
}

impl Variable {
    pub const ALL: [Variable; 9] = [
        Variable::X,
        Variable::SigmaX,
        Variable::Y,
        Variable::SigmaY,
        Variable::Rho,
        Variable::Label,
        Variable::Aliquot,
        Variable::Selected,
        Variable::Visible,
    ];

    /// The classic plotting set: X, σX, Y, σY, ρ.
    pub const CLASSIC: [Variable; 5] = [
        Variable::X,
        Variable::SigmaX,
        Variable::Y,
        Variable::SigmaY,
        Variable::Rho,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Variable::X => "x",
            Variable::SigmaX => "sigma_x",
            Variable::Y => "y",
            Variable::SigmaY => "sigma_y",
            Variable::Rho => "rho",
            Variable::Label => "label",
            Variable::Aliquot => "aliquot",
            Variable::Selected => "selected",
            Variable::Visible => "visible",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Variable::X => "X",
            Variable::SigmaX => "σX",
            Variable::Y => "Y",
            Variable::SigmaY => "σY",
            Variable::Rho => "rho",
            Variable::Label => "label",
            Variable::Aliquot => "alqt.",
            Variable::Selected => "selected",
            Variable::Visible => "visible",
        }
    }

    /// Declared value type of columns this variable expects. The flag
    /// variables map onto text columns; the engine has no boolean columns.
    pub fn value_type(self) -> DataType {
        match self {
            Variable::X | Variable::SigmaX | Variable::Y | Variable::SigmaY | Variable::Rho => {
                DataType::Number
            }
            Variable::Label | Variable::Aliquot | Variable::Selected | Variable::Visible => {
                DataType::String
            }
        }
    }

    pub fn from_key(key: &str) -> Option<Variable> {
        Variable::ALL.into_iter().find(|v| v.key() == key)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Table-scoped bijective partial map between variables and column indices.
/// Both directions are indexed; both invariants (one column per variable,
/// one variable per column) resolve by last-writer-wins replacement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableBindings {
    by_variable: BTreeMap<Variable, usize>,
    by_column: BTreeMap<usize, Variable>,
}

impl VariableBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `variable` to `column`, silently displacing any prior binding
    /// of either side.
    pub fn bind(&mut self, variable: Variable, column: usize) {
        if let Some(old_column) = self.by_variable.remove(&variable) {
            self.by_column.remove(&old_column);
        }
        if let Some(old_variable) = self.by_column.remove(&column) {
            self.by_variable.remove(&old_variable);
        }
        self.by_variable.insert(variable, column);
        self.by_column.insert(column, variable);
    }

    pub fn unbind(&mut self, variable: Variable) -> Option<usize> {
        let column = self.by_variable.remove(&variable)?;
        self.by_column.remove(&column);
        Some(column)
    }

    pub fn unbind_column(&mut self, column: usize) -> Option<Variable> {
        let variable = self.by_column.remove(&column)?;
        self.by_variable.remove(&variable);
        Some(variable)
    }

    pub fn clear(&mut self) {
        self.by_variable.clear();
        self.by_column.clear();
    }

    pub fn column_for(&self, variable: Variable) -> Option<usize> {
        self.by_variable.get(&variable).copied()
    }

    pub fn variable_for(&self, column: usize) -> Option<Variable> {
        self.by_column.get(&column).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.by_variable.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_variable.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, usize)> + '_ {
        self.by_variable.iter().map(|(v, c)| (*v, *c))
    }

    /// Shifts bindings after a column insertion at `index`.
    pub(crate) fn shift_for_insert(&mut self, index: usize) {
        let moved: Vec<(usize, Variable)> = self
            .by_column
            .range(index..)
            .map(|(c, v)| (*c, *v))
            .collect();
        for (column, _) in moved.iter().rev() {
            self.by_column.remove(column);
        }
        for (column, variable) in moved {
            self.by_column.insert(column + 1, variable);
            self.by_variable.insert(variable, column + 1);
        }
    }

    /// Drops any binding on the removed column and shifts the rest down.
    /// Returns the displaced variable, if any.
    pub(crate) fn shift_for_remove(&mut self, index: usize) -> Option<Variable> {
        let dropped = self.unbind_column(index);
        let moved: Vec<(usize, Variable)> = self
            .by_column
            .range(index + 1..)
            .map(|(c, v)| (*c, *v))
            .collect();
        for (column, _) in &moved {
            self.by_column.remove(column);
        }
        for (column, variable) in moved {
            self.by_column.insert(column - 1, variable);
            self.by_variable.insert(variable, column - 1);
        }
        dropped
    }

    /// Remaps bindings after a column moved from `from` to `to`, keeping
    /// every binding attached to the column it was on.
    pub(crate) fn shift_for_reorder(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        let remap = |column: usize| -> usize {
            if column == from {
                to
            } else if from < to && column > from && column <= to {
                column - 1
            } else if to < from && column >= to && column < from {
                column + 1
            } else {
                column
            }
        };
        let entries: Vec<(Variable, usize)> = self.iter().collect();
        self.by_variable.clear();
        self.by_column.clear();
        for (variable, column) in entries {
            let column = remap(column);
            self.by_variable.insert(variable, column);
            self.by_column.insert(column, variable);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_replaces_on_both_sides() {
        let mut bindings = VariableBindings::new();
        bindings.bind(Variable::X, 0);
        bindings.bind(Variable::X, 1);
        assert_eq!(bindings.column_for(Variable::X), Some(1));
        assert_eq!(bindings.variable_for(0), None);

        bindings.bind(Variable::Y, 1);
        assert_eq!(bindings.variable_for(1), Some(Variable::Y));
        assert_eq!(bindings.column_for(Variable::X), None);
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn shift_for_remove_drops_and_renumbers() {
        let mut bindings = VariableBindings::new();
        bindings.bind(Variable::X, 0);
        bindings.bind(Variable::Y, 2);
        assert_eq!(bindings.shift_for_remove(0), Some(Variable::X));
        assert_eq!(bindings.column_for(Variable::Y), Some(1));
    }

    #[test]
    fn shift_for_reorder_follows_the_moved_column() {
        let mut bindings = VariableBindings::new();
        bindings.bind(Variable::X, 0);
        bindings.bind(Variable::Y, 2);
        bindings.shift_for_reorder(0, 2);
        assert_eq!(bindings.column_for(Variable::X), Some(2));
        assert_eq!(bindings.column_for(Variable::Y), Some(1));
    }

    #[test]
    fn variable_keys_round_trip() {
        for variable in Variable::ALL {
            assert_eq!(Variable::from_key(variable.key()), Some(variable));
        }
        assert_eq!(Variable::from_key("nope"), None);
    }
}
