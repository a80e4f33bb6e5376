use crate::error::CellError;

/// Coerce a cell to a finite `f64`.
///
/// Surrounding whitespace is ignored. Empty cells, non-numeric text, `NaN` and
/// infinities are all rejected.
pub fn parse_f64(value: &str) -> Result<f64, CellError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CellError::Empty);
    }
    let parsed = trimmed
        .parse::<f64>()
        .map_err(|_| CellError::NotNumeric(value.to_string()))?;
    if !parsed.is_finite() {
        return Err(CellError::NotFinite(value.to_string()));
    }
    Ok(parsed)
}

pub fn parse_optional_f64(value: Option<&str>) -> Result<f64, CellError> {
    match value {
        Some(v) => parse_f64(v),
        None => Err(CellError::Empty),
    }
}
