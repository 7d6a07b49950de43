use thiserror::Error;

/// Errors that abort a processing run.
///
/// Per-attribute problems (problematic keys, missing provenance fields) are
/// not errors: problematic keys are skipped, missing fields become empty
/// strings. Everything here is structural and fatal for the whole run.
#[derive(Debug, Error)]
pub enum Error {
    /// The source extract is not well-formed XML.
    #[error("malformed source extract: {0}")]
    MalformedSource(#[from] quick_xml::Error),

    /// The document ended inside a node or way element.
    #[error("malformed source extract: '{0}' element is not closed")]
    UnclosedElement(&'static str),

    /// A shaped record does not match the fixed table contract.
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// A schema mismatch on one shaped record.
///
/// Validation failures indicate a structural problem with the extract as a
/// whole, so the pipeline stops on the first one rather than skipping rows.
#[derive(Debug, Error)]
#[error("record for table '{table}' failed validation: field '{field}' {reason} (value: {value:?})")]
pub struct ValidationFailure {
    pub table: &'static str,
    pub field: &'static str,
    pub reason: &'static str,
    pub value: String,
}
