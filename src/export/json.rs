//! JSON export

use std::io::Write;

use serde::Serialize;

use crate::error::{SpendError, SpendResult};

/// Write `value` as pretty-printed JSON followed by a newline
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> SpendResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer).map_err(|e| SpendError::Export(e.to_string()))
}
