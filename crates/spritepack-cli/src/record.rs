//! Telemetry recording for CLI runs.

use std::{
    fs::File,
    io::{self, BufWriter, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use spritepack_search::{IterationRecord, TelemetrySink};

/// The CLI's telemetry sink: optionally streams the per-iteration score CSV
/// and always collects what the end-of-run summary needs.
///
/// The sink interface is infallible, so a CSV write failure is remembered and
/// surfaced by [`finish`](Self::finish) instead of aborting the run midway.
#[derive(Debug)]
pub struct RunRecorder {
    csv: Option<BufWriter<File>>,
    csv_error: Option<io::Error>,
    scores: Vec<f64>,
    feasible: u64,
}

impl RunRecorder {
    pub fn new(csv_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let csv = match csv_path {
            Some(path) => {
                let file = File::create(&path).with_context(|| {
                    format!("Failed to create score file: {}", path.display())
                })?;
                let mut writer = BufWriter::new(file);
                writeln!(writer, "iteration,score,rawScore,overlap").with_context(|| {
                    format!("Failed to write score file header: {}", path.display())
                })?;
                Some(writer)
            }
            None => None,
        };
        Ok(Self {
            csv,
            csv_error: None,
            scores: Vec::new(),
            feasible: 0,
        })
    }

    /// Every evaluated score, in evaluation order.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// How many evaluations had zero overlap.
    pub fn feasible(&self) -> u64 {
        self.feasible
    }

    /// Flushes the CSV stream and surfaces any write error deferred during
    /// the run.
    pub fn finish(&mut self) -> anyhow::Result<()> {
        if let Some(error) = self.csv_error.take() {
            return Err(error).context("Failed to write score record");
        }
        if let Some(writer) = &mut self.csv {
            writer.flush().context("Failed to flush score file")?;
        }
        Ok(())
    }
}

impl TelemetrySink for RunRecorder {
    #[expect(clippy::cast_precision_loss)]
    fn record(&mut self, record: IterationRecord) {
        self.scores.push(record.score as f64);
        if record.overlap == 0 {
            self.feasible += 1;
        }
        if let Some(writer) = &mut self.csv
            && self.csv_error.is_none()
        {
            let result = writeln!(
                writer,
                "{},{},{},{}",
                record.iteration, record.score, record.raw_score, record.overlap
            );
            if let Err(error) = result {
                self.csv_error = Some(error);
            }
        }
    }
}
