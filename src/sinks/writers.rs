use std::fs::File;
use std::io::{self, BufWriter, Write};

use super::config::{SinkConfig, SinkFormat, SinkTarget};
use super::format::{ServiceMetrics, format_prometheus, format_zabbix};
use crate::error::SinkError;
use crate::metrics::MetricResult;

/// Destination for computed service metrics.
///
/// Zabbix lines are written as soon as a service is emitted; Prometheus
/// output is held until [`MetricSink::finish`] so each metric family stays
/// in one group.
pub struct MetricSink<W: Write> {
    writer: W,
    format: SinkFormat,
    target: String,
    pending: Vec<ServiceMetrics>,
}

impl MetricSink<Box<dyn Write + Send>> {
    /// Opens the configured target, truncating an existing output file.
    ///
    /// # Errors
    ///
    /// Returns an error when the output file cannot be created.
    pub fn open(config: &SinkConfig) -> Result<Self, SinkError> {
        let writer: Box<dyn Write + Send> = match &config.target {
            SinkTarget::Stdout => Box::new(io::stdout()),
            SinkTarget::File(path) => {
                let file = File::create(path).map_err(|err| SinkError::OpenOutput {
                    path: path.clone(),
                    source: err,
                })?;
                Box::new(BufWriter::new(file))
            }
        };
        Ok(Self::new(writer, config.format, config.target.describe()))
    }
}

impl<W: Write> MetricSink<W> {
    pub const fn new(writer: W, format: SinkFormat, target: String) -> Self {
        Self {
            writer,
            format,
            target,
            pending: Vec::new(),
        }
    }

    /// Emits one service's metrics.
    ///
    /// # Errors
    ///
    /// Returns an error when the metrics cannot be formatted or written.
    pub fn emit(
        &mut self,
        host_label: &str,
        service: &str,
        result: &MetricResult,
    ) -> Result<(), SinkError> {
        match self.format {
            SinkFormat::Zabbix => {
                let block = format_zabbix(host_label, service, result)?;
                self.write_block(&block)
            }
            SinkFormat::Prometheus => {
                self.pending.push(ServiceMetrics {
                    host_label: host_label.to_owned(),
                    service: service.to_owned(),
                    result: result.clone(),
                });
                Ok(())
            }
        }
    }

    /// Writes anything still buffered and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error when buffered output cannot be written.
    pub fn finish(mut self) -> Result<W, SinkError> {
        if self.format == SinkFormat::Prometheus {
            let exposition = format_prometheus(&self.pending)?;
            self.write_block(&exposition)?;
        }
        Ok(self.writer)
    }

    fn write_block(&mut self, block: &str) -> Result<(), SinkError> {
        self.writer
            .write_all(block.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|err| SinkError::WriteMetrics {
                target: self.target.clone(),
                source: err,
            })
    }
}

/// Delivers the six metrics of `service` to `sink`.
///
/// # Errors
///
/// Returns an error when the metrics cannot be formatted or written.
pub fn emit<W: Write>(
    sink: &mut MetricSink<W>,
    host_label: &str,
    service: &str,
    result: &MetricResult,
) -> Result<(), SinkError> {
    sink.emit(host_label, service, result)
}
