//! YAML export

use std::io::Write;

use serde::Serialize;

use crate::error::SpendResult;

pub fn write_yaml<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> SpendResult<()> {
    serde_yaml::to_writer(writer, value)?;
    Ok(())
}
