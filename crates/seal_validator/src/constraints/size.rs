use super::{ColumnConstraint, conclude};
use crate::DataSource;
use seal_core::{CheckOutcome, ConstraintConfigError};

/// Limits on the number of rows of the whole table.
///
/// The column is kept only for labelling and is never looked up.
#[derive(Debug, Clone, PartialEq)]
pub struct RowCountConstraint {
    column: String,
    min_rows: Option<usize>,
    max_rows: Option<usize>,
}

impl RowCountConstraint {
    pub fn new(
        column: impl Into<String>,
        min_rows: Option<usize>,
        max_rows: Option<usize>,
    ) -> Result<Self, ConstraintConfigError> {
        if min_rows.is_none() && max_rows.is_none() {
            return Err(ConstraintConfigError::missing(
                Self::NAME,
                "at least one of min_rows or max_rows",
            ));
        }

        Ok(Self {
            column: column.into(),
            min_rows,
            max_rows,
        })
    }

    pub fn min_rows(&self) -> Option<usize> {
        self.min_rows
    }

    pub fn max_rows(&self) -> Option<usize> {
        self.max_rows
    }
}

impl ColumnConstraint for RowCountConstraint {
    const NAME: &'static str = "RowCountConstraint";
    const WHOLE_TABLE: bool = true;

    fn column(&self) -> &str {
        &self.column
    }

    fn evaluate(&self, source: &dyn DataSource) -> CheckOutcome {
        let row_count = source.row_count();
        let mut messages = Vec::new();

        if let Some(min) = self.min_rows
            && row_count < min
        {
            messages.push(format!("Row count {row_count} is below minimum {min}"));
        }

        if let Some(max) = self.max_rows
            && row_count > max
        {
            messages.push(format!("Row count {row_count} exceeds maximum {max}"));
        }

        conclude("Row count", messages)
            .with_detail("row_count", row_count)
            .with_detail("min_rows", self.min_rows)
            .with_detail("max_rows", self.max_rows)
    }
}
