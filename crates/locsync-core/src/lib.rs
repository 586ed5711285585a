use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Structural errors raised by [`LocTable`] mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("a table needs at least a key column")]
    NoColumns,
    #[error("empty column name")]
    EmptyColumnName,
    #[error("duplicate column `{0}`")]
    DuplicateColumn(String),
    #[error("unknown column `{0}`")]
    UnknownColumn(String),
    #[error("row {0} is out of bounds")]
    RowOutOfBounds(usize),
    #[error("the key column `{0}` cannot be edited")]
    KeyColumnEdit(String),
}

/// In-memory localization table: an ordered header row plus data rows.
///
/// The first column holds translation keys, every further column is a
/// language. Rows are kept exactly as wide as the header; the only way to
/// change the shape is through the methods here, so consumers can rely on
/// `row.len() == columns.len()` everywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl LocTable {
    /// Creates an empty table with the given header. Column names must be
    /// non-empty and unique.
    pub fn new(columns: Vec<String>) -> std::result::Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::NoColumns);
        }
        for (i, name) in columns.iter().enumerate() {
            if name.is_empty() {
                return Err(TableError::EmptyColumnName);
            }
            if columns[..i].contains(name) {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
        }
        Ok(LocTable {
            columns,
            rows: Vec::new(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Name of the key column (always the first one).
    pub fn key_column(&self) -> &str {
        &self.columns[0]
    }

    /// Language columns, i.e. every column except the key column.
    pub fn languages(&self) -> &[String] {
        &self.columns[1..]
    }

    pub fn has_language(&self, lang: &str) -> bool {
        self.languages().iter().any(|l| l == lang)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    pub fn row(&self, idx: usize) -> Option<&[String]> {
        self.rows.get(idx).map(|r| r.as_slice())
    }

    /// Key cell of a row.
    pub fn key(&self, idx: usize) -> Option<&str> {
        self.rows.get(idx).map(|r| r[0].as_str())
    }

    /// Index of the first row whose key matches.
    pub fn find_key(&self, key: &str) -> Option<usize> {
        self.rows.iter().position(|r| r[0] == key)
    }

    /// Cell lookup by row index and column name.
    pub fn get(&self, idx: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(idx).map(|r| r[col].as_str())
    }

    /// Appends a row, padding or truncating the cells to the header width.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    /// Appends a row for `key` (or a generated `New_Key_<n>` when absent)
    /// with all language cells empty. Returns the key actually used.
    pub fn add_key(&mut self, key: Option<String>) -> String {
        let key = key.unwrap_or_else(|| format!("New_Key_{}", self.rows.len() + 1));
        let mut row = vec![key.clone()];
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
        key
    }

    /// Adds a language column at the end of the header and back-fills an
    /// empty cell into every existing row.
    pub fn add_language(&mut self, lang: &str) -> std::result::Result<(), TableError> {
        if lang.is_empty() {
            return Err(TableError::EmptyColumnName);
        }
        if self.columns.iter().any(|c| c == lang) {
            return Err(TableError::DuplicateColumn(lang.to_string()));
        }
        self.columns.push(lang.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        Ok(())
    }

    /// Writes a cell. The key column is refused so keys stay stable once a
    /// row exists.
    pub fn set_cell(
        &mut self,
        idx: usize,
        column: &str,
        value: String,
    ) -> std::result::Result<(), TableError> {
        let col = self
            .column_index(column)
            .ok_or_else(|| TableError::UnknownColumn(column.to_string()))?;
        if col == 0 {
            return Err(TableError::KeyColumnEdit(column.to_string()));
        }
        let row = self
            .rows
            .get_mut(idx)
            .ok_or(TableError::RowOutOfBounds(idx))?;
        row[col] = value;
        Ok(())
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}
