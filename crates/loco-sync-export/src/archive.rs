//! Reading zip exports.

use std::io::{Cursor, Read};

use bytes::Bytes;
use zip::ZipArchive;

use crate::error::{ExportError, Result};

/// Largest entry copied out of an archive.
pub const MAX_ENTRY_BYTES: u64 = 10 * 1_000_000;

/// One file inside an export archive, split the way paths are split on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPath {
    /// Full entry name, e.g. `hourglass/locales/pt_BR/LC_MESSAGES/messages.po`.
    pub full: String,
    /// Directory part including the trailing `/`, empty for top-level entries.
    pub dir: String,
    /// File name.
    pub name: String,
}

impl EntryPath {
    pub fn new(full: &str) -> Self {
        let (dir, name) = match full.rfind('/') {
            Some(idx) => (&full[..=idx], &full[idx + 1..]),
            None => ("", full),
        };
        Self {
            full: full.to_string(),
            dir: dir.to_string(),
            name: name.to_string(),
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> Option<&str> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() {
            None
        } else {
            Some(ext)
        }
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        match self.extension() {
            Some(ext) => &self.name[..self.name.len() - ext.len() - 1],
            None => &self.name,
        }
    }

    /// Last component of the directory part.
    pub fn dir_name(&self) -> &str {
        self.dir
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

/// An export archive held in memory.
pub struct Archive {
    inner: ZipArchive<Cursor<Bytes>>,
}

impl Archive {
    /// Open a zip payload.
    pub fn new(payload: Bytes) -> Result<Self> {
        let inner = ZipArchive::new(Cursor::new(payload))?;
        Ok(Self { inner })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// File entries whose extension is `ext`, in archive order.
    pub fn entries_with_extension(&self, ext: &str) -> Vec<EntryPath> {
        self.inner
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(EntryPath::new)
            .filter(|entry| entry.extension() == Some(ext))
            .collect()
    }

    /// Read an entry, capped at [`MAX_ENTRY_BYTES`].
    pub fn read(&mut self, entry: &EntryPath) -> Result<Vec<u8>> {
        let file = self.inner.by_name(&entry.full)?;
        let mut contents = Vec::with_capacity(file.size().min(MAX_ENTRY_BYTES) as usize);
        file.take(MAX_ENTRY_BYTES)
            .read_to_end(&mut contents)
            .map_err(|e| ExportError::io(&entry.full, e))?;
        Ok(contents)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::Write;

    use bytes::Bytes;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    /// Build an in-memory zip from `(name, contents)` pairs.
    pub fn zip_of(files: &[(&str, &str)]) -> Bytes {
        let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for (name, contents) in files {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        Bytes::from(writer.finish().unwrap().into_inner())
    }
}
