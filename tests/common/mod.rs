#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

use geotable::column::{ColumnTree, category, number_column, string_column};
use geotable::data::Value;
use geotable::row::{RowTree, data_row, segment};
use geotable::table::DataTable;

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// The worked example from the import wizard docs: one category over two
/// number columns, one segment, two rows.
pub fn uranium_lead_table() -> DataTable {
    let columns = ColumnTree::new(vec![
        string_column("aliquot"),
        category(
            "ratios",
            vec![number_column("207Pb/235U"), number_column("206Pb/238U")],
        ),
    ]);
    let rows = RowTree::new(vec![segment(
        "Z1",
        vec![
            data_row(
                "Z1:1",
                vec![
                    Value::string("a"),
                    Value::number(0.071),
                    Value::number(0.0097),
                ],
            ),
            data_row(
                "Z1:2",
                vec![
                    Value::string("b"),
                    Value::number(0.084),
                    Value::number(0.011),
                ],
            ),
        ],
    )]);
    DataTable::new("uranium_lead", columns, rows).expect("valid table")
}
