// Progress messages sent from the pipeline worker to the console

#[derive(Clone, Debug, PartialEq)]
pub enum RunMsg {
    CatalogStarted {
        base_url: String,
        sheets: usize,
    },
    SheetStarted {
        filename: String,
    },
    SheetGeometry {
        filename: String,
        sheet_size: (u32, u32),
        frame_size: (u32, u32),
    },
    WidthMismatch {
        filename: String,
        expected: u32,
        actual: u32,
    },
    SheetSaved {
        filename: String,
        frames: usize,
    },
    DownloadFailed {
        filename: String,
        error: String,
    },
    SheetFailed {
        filename: String,
        error: String,
    },
    RunCompleted {
        succeeded: usize,
        failed: usize,
    },
}

impl RunMsg {
    pub fn filename(&self) -> Option<&str> {
        match self {
            RunMsg::SheetStarted { filename }
            | RunMsg::SheetGeometry { filename, .. }
            | RunMsg::WidthMismatch { filename, .. }
            | RunMsg::SheetSaved { filename, .. }
            | RunMsg::DownloadFailed { filename, .. }
            | RunMsg::SheetFailed { filename, .. } => Some(filename.as_str()),
            RunMsg::CatalogStarted { .. } | RunMsg::RunCompleted { .. } => None,
        }
    }
}
