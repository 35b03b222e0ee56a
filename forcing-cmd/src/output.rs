//! Writing forcing files without ever leaving a truncated one behind.

use anyhow::Context;
use log::debug;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// A file written under `<path>.partial` and renamed onto `<path>` by
/// [`PartialFile::commit`]. Dropping it uncommitted deletes the partial file.
pub struct PartialFile {
    path: PathBuf,
    partial: PathBuf,
    writer: Option<BufWriter<File>>,
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

impl PartialFile {
    pub fn create(path: &Path) -> io::Result<PartialFile> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let partial = partial_path(path);
        let writer = BufWriter::new(File::create(&partial)?);
        Ok(PartialFile {
            path: path.to_path_buf(),
            partial,
            writer: Some(writer),
        })
    }

    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.write_all(text.as_bytes()),
            None => Err(io::Error::new(io::ErrorKind::Other, "file already committed")),
        }
    }

    /// Flush and move the file into place.
    pub fn commit(mut self) -> io::Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        fs::rename(&self.partial, &self.path)
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        // a committed file has been renamed away already
        if self.partial.exists() {
            self.writer.take();
            if let Err(e) = fs::remove_file(&self.partial) {
                debug!("Could not remove {}: {}", self.partial.display(), e);
            }
        }
    }
}

/// Write every line to `path`, committing only if all of them are `Ok`.
/// Returns the number of lines written.
pub fn write_lines<I>(path: &Path, lines: I) -> anyhow::Result<usize>
where
    I: IntoIterator<Item = forcing_types::Result<String>>,
{
    let mut file = PartialFile::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut count = 0;
    for line in lines {
        file.write_str(&line?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        count += 1;
    }
    if count == 0 {
        anyhow::bail!("No records to write to {}", path.display());
    }
    file.commit()
        .with_context(|| format!("Failed to move {} into place", path.display()))?;
    Ok(count)
}
