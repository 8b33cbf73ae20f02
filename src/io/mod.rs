pub mod output;
pub mod walker;
pub mod writers;

use crate::core::{Error, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::file_system("Failed to read file", path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::file_system("Failed to write file", path, e))
}

/// Write `lines` to `path`, one per line with a trailing newline each,
/// replacing whatever the file held before. No lines gives an empty file.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let wrap = |e: std::io::Error| Error::file_system("Failed to write output", path, e);
    let file = File::create(path).map_err(wrap)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writer.write_all(line.as_ref().as_bytes()).map_err(wrap)?;
        writer.write_all(b"\n").map_err(wrap)?;
    }
    writer.flush().map_err(wrap)
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| Error::file_system("Failed to create directory", path, e))?;
    }
    Ok(())
}
