use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::model::document::Document;
use crate::parse::archive::delimiter_collisions;
use crate::parse::{collapse_archive, expand_archive};

/// Error type for task list I/O
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

/// Load a task list. A file that does not exist yet is an empty document;
/// any other read failure is an error.
pub fn load_document(path: &Path) -> Result<Document, DocumentError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "new task list");
            return Ok(Document::new());
        }
        Err(source) => {
            return Err(DocumentError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let doc = Document::from_lines(expand_archive(text.lines()));
    info!(path = %path.display(), lines = doc.len(), "loaded task list");
    Ok(doc)
}

/// The file contents `doc` saves as: body lines, then the archive block,
/// every line newline-terminated.
pub fn render_document(doc: &Document) -> String {
    let mut out = String::new();
    for line in collapse_archive(doc.lines()) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Write `doc` to `path` and clear its modified flag. On failure the file is
/// untouched and the document stays modified.
pub fn save_document(doc: &mut Document, path: &Path) -> Result<(), DocumentError> {
    for i in delimiter_collisions(doc.lines()) {
        warn!(line = i + 1, "line is an archive delimiter and will not survive reload");
    }
    let content = render_document(doc);
    atomic_write(path, content.as_bytes()).map_err(|source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    doc.mark_saved();
    info!(path = %path.display(), lines = doc.len(), "saved task list");
    Ok(())
}

/// Write via a temp file in the same directory and rename over `path`,
/// keeping the permissions of the file being replaced.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
