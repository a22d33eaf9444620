use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a stats table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common dataframe dtypes.
/// `Null` stands for a missing value (empty CSV field, JSON null, Arrow null).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

/// Display form used by the UI tables: floats are rounded to two decimals.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "—"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell. `Null` and text are `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Text key used for team / player matching. `None` for missing cells.
    pub fn as_key(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Float(v) if v.is_nan() => None,
            CellValue::String(s) => Some(s.clone()),
            other => Some(other.to_field()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null) || matches!(self, CellValue::Float(v) if v.is_nan())
    }

    /// Raw field representation for delimited export. Floats keep a decimal
    /// point (`15.0`) so they read back as floats; missing cells are empty.
    pub fn to_field(&self) -> String {
        match self {
            CellValue::String(s) => s.clone(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(v) if v.is_nan() => String::new(),
            CellValue::Float(v) => {
                let s = v.to_string();
                if s.contains(['.', 'e', 'E']) || !v.is_finite() {
                    s
                } else {
                    format!("{s}.0")
                }
            }
            CellValue::Bool(b) => (if *b { "True" } else { "False" }).to_string(),
            CellValue::Null => String::new(),
        }
    }

    /// Guess the type of a raw text field (CSV cell).
    pub fn guess(s: &str) -> CellValue {
        let s = s.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            if f.is_nan() {
                return CellValue::Null;
            }
            return CellValue::Float(f);
        }
        match s {
            "true" | "True" | "TRUE" => CellValue::Bool(true),
            "false" | "False" | "FALSE" => CellValue::Bool(false),
            _ => CellValue::String(s.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Source – which competition a row comes from
// ---------------------------------------------------------------------------

/// Competition a dataset was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    RegularSeason,
    Playoffs,
}

impl Source {
    /// Value written into the `Source` column.
    pub fn label(self) -> &'static str {
        match self {
            Source::RegularSeason => "Regular Season",
            Source::Playoffs => "Playoffs",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Table – ordered columns, ordered rows
// ---------------------------------------------------------------------------

/// Name of the column tagging each row with its competition.
pub const SOURCE_COLUMN: &str = "Source";

/// A rectangular table: every row has exactly one cell per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding with `Null` or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of one column, in row order.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a CellValue> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Sorted distinct non-missing values of a column, in text form.
    pub fn distinct_keys(&self, name: &str) -> Option<BTreeSet<String>> {
        Some(self.column(name)?.filter_map(CellValue::as_key).collect())
    }

    /// Keep the rows matching `keep`, preserving order.
    pub fn filter_rows(&self, mut keep: impl FnMut(&[CellValue]) -> bool) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row))
                .cloned()
                .collect(),
        }
    }

    /// Stack two tables. Columns are the union (ours first, then the ones only
    /// `other` has); cells a table lacks become `Null`.
    pub fn concat(&self, other: &Table) -> Table {
        let mut columns = self.columns.clone();
        for col in &other.columns {
            if !columns.contains(col) {
                columns.push(col.clone());
            }
        }

        let mut out = Table::new(columns);
        for part in [self, other] {
            let mapping: Vec<Option<usize>> =
                out.columns.iter().map(|c| part.column_index(c)).collect();
            for row in &part.rows {
                let cells = mapping
                    .iter()
                    .map(|idx| idx.map_or(CellValue::Null, |i| row[i].clone()))
                    .collect();
                out.rows.push(cells);
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Dataset – one loaded competition file
// ---------------------------------------------------------------------------

/// A loaded file. Every row carries `source` in the `Source` column.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub source: Source,
    pub table: Table,
}

impl Dataset {
    /// Wrap a table and tag its rows, overwriting any existing `Source` column.
    pub fn tagged(source: Source, mut table: Table) -> Self {
        let tag = CellValue::String(source.label().to_string());
        match table.column_index(SOURCE_COLUMN) {
            Some(idx) => {
                for row in &mut table.rows {
                    row[idx] = tag.clone();
                }
            }
            None => {
                table.columns.push(SOURCE_COLUMN.to_string());
                for row in &mut table.rows {
                    row.push(tag.clone());
                }
            }
        }
        Dataset { source, table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// The regular-season and playoff datasets loaded together.
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets {
    pub regular: Dataset,
    pub playoffs: Dataset,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn guess_types() {
        assert_eq!(CellValue::guess(""), CellValue::Null);
        assert_eq!(CellValue::guess("82"), CellValue::Integer(82));
        assert_eq!(CellValue::guess("27.5"), CellValue::Float(27.5));
        assert_eq!(CellValue::guess("NaN"), CellValue::Null);
        assert_eq!(CellValue::guess("LAL"), CellValue::String("LAL".into()));
    }

    #[test]
    fn float_fields_keep_decimal_point() {
        assert_eq!(CellValue::Float(15.0).to_field(), "15.0");
        assert_eq!(CellValue::Float(2.25).to_field(), "2.25");
        assert_eq!(CellValue::Null.to_field(), "");
    }

    #[test]
    fn concat_unions_columns() {
        let a = table(
            &["Player", "PTS"],
            vec![vec![CellValue::String("A".into()), CellValue::Integer(10)]],
        );
        let b = table(
            &["Player", "AST"],
            vec![vec![CellValue::String("B".into()), CellValue::Integer(3)]],
        );
        let c = a.concat(&b);
        assert_eq!(c.columns, vec!["Player", "PTS", "AST"]);
        assert_eq!(c.rows[0][2], CellValue::Null);
        assert_eq!(c.rows[1][1], CellValue::Null);
        assert_eq!(c.rows[1][2], CellValue::Integer(3));
    }

    #[test]
    fn tagging_overwrites_existing_source() {
        let t = table(
            &["Player", "Source"],
            vec![vec![CellValue::String("A".into()), CellValue::String("x".into())]],
        );
        let ds = Dataset::tagged(Source::Playoffs, t);
        assert_eq!(ds.table.columns.len(), 2);
        assert_eq!(ds.table.rows[0][1], CellValue::String("Playoffs".into()));
    }
}
