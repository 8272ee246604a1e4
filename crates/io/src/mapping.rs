//! Source column to quantity mapping.

use hydrofill_gapfill::Quantity;

use crate::error::IoError;

/// Million gallons per day to cubic metres per second.
pub const MGD_TO_M3_PER_S: f64 = 0.043812636;

/// One source column feeding a quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    header: String,
    quantity: Quantity,
    scale: f64,
}

impl ColumnSpec {
    /// Creates a column spec. Raw values are multiplied by `scale`.
    pub fn new(header: impl Into<String>, quantity: Quantity, scale: f64) -> Self {
        Self {
            header: header.into(),
            quantity,
            scale,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

/// Which header holds dates and which headers feed which quantities.
///
/// The default mapping matches the plant exports: `Date`, flow in MGD and
/// nutrient concentrations already in mg/L.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    date_column: String,
    columns: Vec<ColumnSpec>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::new("Date")
            .with_column(ColumnSpec::new("flow mgd", Quantity::Flow, MGD_TO_M3_PER_S))
            .with_column(ColumnSpec::new("NO3 mg/L N", Quantity::No3Conc, 1.0))
            .with_column(ColumnSpec::new("NO2 mg/L N", Quantity::No2Conc, 1.0))
            .with_column(ColumnSpec::new("N+N mg/L N", Quantity::NnConc, 1.0))
            .with_column(ColumnSpec::new("NH3 mg/L N", Quantity::Nh3Conc, 1.0))
            .with_column(ColumnSpec::new("PO4 mg/L P", Quantity::Po4Conc, 1.0))
    }
}

impl ColumnMapping {
    /// Creates a mapping with no analyte columns.
    pub fn new(date_column: impl Into<String>) -> Self {
        Self {
            date_column: date_column.into(),
            columns: Vec::new(),
        }
    }

    /// Adds an analyte column.
    pub fn with_column(mut self, spec: ColumnSpec) -> Self {
        self.columns.push(spec);
        self
    }

    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Checks for blank or duplicate headers and unusable scale factors.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem found.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if self.date_column.trim().is_empty() {
            problems.push("date column name is blank".to_string());
        }
        for (i, spec) in self.columns.iter().enumerate() {
            if spec.header.trim().is_empty() {
                problems.push(format!("column {i} has a blank header"));
            }
            if spec.header.eq_ignore_ascii_case(&self.date_column) {
                problems.push(format!("column '{}' is also the date column", spec.header));
            }
            if self.columns[..i]
                .iter()
                .any(|s| s.header.eq_ignore_ascii_case(&spec.header))
            {
                problems.push(format!("duplicate header '{}'", spec.header));
            }
            if !spec.scale.is_finite() || spec.scale == 0.0 {
                problems.push(format!(
                    "column '{}' has unusable scale {}",
                    spec.header, spec.scale
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            })
        }
    }
}
