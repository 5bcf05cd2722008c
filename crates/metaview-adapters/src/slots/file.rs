//! File-backed slots: one file per slot in an output directory.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use metaview_core::{
    application::{
        ApplicationError,
        ports::{SlotContent, SlotId, SlotSink},
    },
    error::MetaviewResult,
};

/// Writes `<slot>.svg` for markup, `<slot>.txt` for text and
/// `<slot>.error.txt` for failures.
#[derive(Debug, Clone)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Target file for a slot and content kind.
    pub fn path_for(&self, slot: &SlotId, content: &SlotContent) -> PathBuf {
        let stem: String = slot
            .as_str()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let extension = match content {
            SlotContent::Markup(_) => "svg",
            SlotContent::Text(_) => "txt",
            SlotContent::Error(_) => "error.txt",
        };
        self.dir.join(format!("{stem}.{extension}"))
    }
}

impl SlotSink for FileSlots {
    fn update(&self, slot: &SlotId, content: SlotContent) -> MetaviewResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| map_io_error(slot, &self.dir, e))?;
        let path = self.path_for(slot, &content);
        std::fs::write(&path, content.as_str()).map_err(|e| map_io_error(slot, &path, e))?;
        debug!(%slot, path = %path.display(), "Slot written");
        Ok(())
    }
}

fn map_io_error(slot: &SlotId, path: &Path, error: io::Error) -> ApplicationError {
    ApplicationError::SlotUpdateFailed {
        slot: slot.to_string(),
        reason: format!("{}: {}", path.display(), error),
    }
}
