/// SQL dialect differences between the supported backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    /// Expression extracting the calendar year of a date column as a number.
    pub fn year_of(self, column: &str) -> String {
        match self {
            Dialect::Postgres => format!("DATE_PART('year', {})", column),
            Dialect::Sqlite => format!("CAST(strftime('%Y', {}) AS INTEGER)", column),
        }
    }
}
