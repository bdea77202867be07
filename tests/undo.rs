use geotable::data::{DataType, Value};
use geotable::table::DataTable;
use geotable::tree::Leaf;
use geotable::undo::{Command, TableCommand, UndoManager};
use geotable::variable::Variable;

mod common;

use common::uranium_lead_table;

fn run(history: &mut UndoManager<TableCommand>, table: &mut DataTable, mut command: TableCommand) {
    command.execute(table).expect("command applies");
    history.record(command);
}

#[test]
fn cell_edit_round_trips_through_undo_and_redo() {
    let mut table = uranium_lead_table();
    let original = table.clone();
    let mut history = UndoManager::new(10);

    run(
        &mut history,
        &mut table,
        TableCommand::set_value(0, 1, Value::number(9.9)),
    );
    assert_eq!(table.value_at(0, 1), &Value::number(9.9));
    assert_eq!(history.undo_label(), Some("Edit cell"));

    assert!(history.undo(&mut table).unwrap());
    assert_eq!(table, original);
    assert_eq!(history.redo_label(), Some("Edit cell"));

    assert!(history.redo(&mut table).unwrap());
    assert_eq!(table.value_at(0, 1), &Value::number(9.9));
}

#[test]
fn row_insert_and_remove_are_reversible() {
    let mut table = uranium_lead_table();
    let original = table.clone();
    let mut history = UndoManager::new(10);

    let row = Leaf::new(
        "Z1:3",
        vec![
            Value::string("c"),
            Value::number(0.09),
            Value::number(0.012),
        ],
    );
    run(&mut history, &mut table, TableCommand::insert_row(0, 2, row));
    run(&mut history, &mut table, TableCommand::remove_row(0, 0));
    assert_eq!(table.row_count(), 2);

    history.undo(&mut table).unwrap();
    history.undo(&mut table).unwrap();
    assert_eq!(table, original);
}

#[test]
fn column_removal_restores_values_and_binding_on_undo() {
    let mut table = uranium_lead_table();
    table.set_variable(Variable::X, 1);
    let before = table.clone();
    let mut history = UndoManager::new(10);

    run(&mut history, &mut table, TableCommand::remove_column(1));
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.column_for_variable(Variable::X), None);

    history.undo(&mut table).unwrap();
    assert_eq!(table, before);
    assert_eq!(table.column_for_variable(Variable::X), Some(1));
}

#[test]
fn column_insert_reorder_and_rename_are_reversible() {
    let mut table = uranium_lead_table();
    let original = table.clone();
    let mut history = UndoManager::new(10);

    run(
        &mut history,
        &mut table,
        TableCommand::insert_column(
            3,
            Leaf::new("rho", DataType::Number),
            vec![Value::number(0.5), Value::number(0.6)],
        ),
    );
    run(&mut history, &mut table, TableCommand::reorder_column(3, 0));
    run(
        &mut history,
        &mut table,
        TableCommand::rename_column(0, "correlation"),
    );
    assert_eq!(table.column_tree().column_title(0), "correlation");
    assert_eq!(table.value_at(0, 0), &Value::number(0.5));
    assert_eq!(history.undo_label(), Some("Rename column"));

    history.undo(&mut table).unwrap();
    history.undo(&mut table).unwrap();
    history.undo(&mut table).unwrap();
    assert_eq!(table, original);
}

#[test]
fn binding_commands_snapshot_and_restore_the_registry() {
    let mut table = uranium_lead_table();
    table.set_variable(Variable::X, 1);
    table.set_variable(Variable::Y, 2);
    let bound = table.clone();
    let mut history = UndoManager::new(10);

    run(
        &mut history,
        &mut table,
        TableCommand::bind_variable(Variable::X, 2),
    );
    assert_eq!(table.column_for_variable(Variable::X), Some(2));
    assert_eq!(table.column_for_variable(Variable::Y), None);

    run(&mut history, &mut table, TableCommand::clear_variables());
    assert!(table.bindings().is_empty());

    history.undo(&mut table).unwrap();
    assert_eq!(table.column_for_variable(Variable::X), Some(2));
    history.undo(&mut table).unwrap();
    assert_eq!(table, bound);
}

#[test]
fn history_bounds_apply_to_table_commands() {
    let mut table = uranium_lead_table();
    let mut history = UndoManager::new(2);

    for value in [1.0, 2.0, 3.0] {
        run(
            &mut history,
            &mut table,
            TableCommand::set_value(0, 1, Value::number(value)),
        );
    }
    assert!(history.undo(&mut table).unwrap());
    assert!(history.undo(&mut table).unwrap());
    assert!(!history.undo(&mut table).unwrap());
    // the oldest edit survived eviction and was never undone
    assert_eq!(table.value_at(0, 1), &Value::number(1.0));
}

#[test]
fn failed_commands_leave_the_table_untouched() {
    let mut table = uranium_lead_table();
    let before = table.clone();
    let mut command = TableCommand::set_value(0, 1, Value::string("wrong type"));
    assert!(command.execute(&mut table).is_err());
    assert_eq!(table, before);
}
