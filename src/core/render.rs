use std::io::{self, Write};
use std::path::PathBuf;

/// Write one batch, one path per line, with a blank separator line before
/// every batch but the first.
pub fn write_batch<W: Write>(writer: &mut W, batch: &[PathBuf], first: bool) -> io::Result<()> {
    if !first {
        writer.write_all(b"\n")?;
    }
    for path in batch {
        writeln!(writer, "{}", path.display())?;
    }
    Ok(())
}
