// Pipeline worker: fetch, decode, slice and write every sheet of a catalog

use crossbeam_channel::Sender;
use rayon::prelude::*;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::event::RunMsg;
use crate::model::catalog::{Catalog, SheetSpec};
use crate::pipeline::error::SheetError;
use crate::pipeline::fetcher::Fetch;
use crate::pipeline::png_writer::write_frame;
use crate::pipeline::slicer::{decode_sheet, slice};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetOutcome {
    pub filename: String,
    pub frames_saved: usize,
    pub error: Option<String>,
}

impl SheetOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<SheetOutcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SheetOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn frames_saved(&self) -> usize {
        self.outcomes.iter().map(|o| o.frames_saved).sum()
    }

    /// Process exit status. Failures only count when `strict` is set.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && self.failed() > 0 { 1 } else { 0 }
    }
}

pub struct PipelineWorker<F: Fetch> {
    fetcher: F,
    config: Config,
    tx: Sender<RunMsg>,
}

impl<F: Fetch + 'static> PipelineWorker<F> {
    pub fn new(fetcher: F, config: Config, tx: Sender<RunMsg>) -> Self {
        Self {
            fetcher,
            config,
            tx,
        }
    }

    #[cfg(test)]
    pub(crate) fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Runs on a background thread. The channel disconnects once the run is over.
    pub fn start(self, catalogs: Vec<Catalog>) -> JoinHandle<RunReport> {
        thread::spawn(move || self.run(&catalogs))
    }

    pub fn run(&self, catalogs: &[Catalog]) -> RunReport {
        let mut report = RunReport::default();

        for catalog in catalogs {
            let _ = self.tx.send(RunMsg::CatalogStarted {
                base_url: catalog.base_url.clone(),
                sheets: catalog.sheets.len(),
            });
            report.outcomes.extend(self.run_catalog(catalog));
        }

        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            frames = report.frames_saved(),
            "run finished"
        );
        let _ = self.tx.send(RunMsg::RunCompleted {
            succeeded: report.succeeded(),
            failed: report.failed(),
        });
        report
    }

    fn run_catalog(&self, catalog: &Catalog) -> Vec<SheetOutcome> {
        if self.config.jobs > 1 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.jobs)
                .build()
            {
                Ok(pool) => {
                    return pool.install(|| {
                        catalog
                            .sheets
                            .par_iter()
                            .map(|spec| self.process_sheet(&catalog.base_url, spec))
                            .collect()
                    });
                }
                Err(e) => warn!("failed to build thread pool, running sequentially: {}", e),
            }
        }

        catalog
            .sheets
            .iter()
            .map(|spec| self.process_sheet(&catalog.base_url, spec))
            .collect()
    }

    fn process_sheet(&self, base_url: &str, spec: &SheetSpec) -> SheetOutcome {
        let filename = spec.remote_filename.clone();
        let _ = self.tx.send(RunMsg::SheetStarted {
            filename: filename.clone(),
        });

        let mut frames_saved = 0;
        let result = self.extract_sheet(base_url, spec, &mut frames_saved);

        let error = match result {
            Ok(()) => {
                let _ = self.tx.send(RunMsg::SheetSaved {
                    filename: filename.clone(),
                    frames: frames_saved,
                });
                None
            }
            Err(e) => {
                warn!(error = %e, frames_saved, "sheet skipped");
                let msg = if e.is_fetch() {
                    RunMsg::DownloadFailed {
                        filename: filename.clone(),
                        error: e.to_string(),
                    }
                } else {
                    RunMsg::SheetFailed {
                        filename: filename.clone(),
                        error: e.to_string(),
                    }
                };
                let _ = self.tx.send(msg);
                Some(e.to_string())
            }
        };

        SheetOutcome {
            filename,
            frames_saved,
            error,
        }
    }

    fn extract_sheet(
        &self,
        base_url: &str,
        spec: &SheetSpec,
        frames_saved: &mut usize,
    ) -> Result<(), SheetError> {
        spec.validate()?;

        let bytes = self.fetcher.fetch(base_url, &spec.remote_filename)?;
        let sheet = decode_sheet(&spec.remote_filename, &bytes)?;
        let (width, height) = (sheet.width(), sheet.height());

        if let Some(expected) = spec.expected_width.filter(|&w| w != width) {
            warn!(
                file = %spec.remote_filename,
                expected,
                actual = width,
                "sheet width differs from catalog"
            );
            let _ = self.tx.send(RunMsg::WidthMismatch {
                filename: spec.remote_filename.clone(),
                expected,
                actual: width,
            });
        }

        let frames = slice(&sheet, spec.frame_count, self.config.remainder);
        let frame_width = frames.first().map(|f| f.rect.width()).unwrap_or(0);
        let _ = self.tx.send(RunMsg::SheetGeometry {
            filename: spec.remote_filename.clone(),
            sheet_size: (width, height),
            frame_size: (frame_width, height),
        });

        for frame in &frames {
            let path = write_frame(
                &frame.image,
                &self.config.output_dir,
                &spec.output_prefix,
                frame.index + 1,
            )?;
            debug!(path = %path.display(), "frame written");
            *frames_saved += 1;
        }

        Ok(())
    }
}
