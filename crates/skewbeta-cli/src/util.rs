use std::{
    fmt,
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use skewbeta_sim::{config::SimulationConfig, table::ResultTable};

use crate::schema::result_table::ResultDocument;

/// File format of an exported result table.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed document with the configuration and a timestamp
    #[default]
    Json,
    /// One header line and one line per trial, missing values left empty
    Csv,
}

/// Destination of command output: a file when a path is given, stdout otherwise.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout(_) => f.write_str("stdout"),
            Output::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

impl Output {
    pub fn create(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Output::Stdout(io::stdout().lock()));
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// Writes the result table of a finished run in `format`.
    pub fn export(
        &mut self,
        format: ExportFormat,
        config: &SimulationConfig,
        table: &ResultTable,
    ) -> anyhow::Result<()> {
        match format {
            ExportFormat::Json => self.write_json(&ResultDocument::new(config, table)),
            ExportFormat::Csv => self.write_csv(table.rows()),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {self}"))?;
        writeln!(self).with_context(|| format!("Failed to terminate JSON in {self}"))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {self}"))
    }

    /// Writes `records` as CSV, taking the header from the record fields.
    pub fn write_csv<I, T>(&mut self, records: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: serde::Serialize,
    {
        let destination = self.to_string();
        let mut writer = csv::Writer::from_writer(&mut *self);
        for (line, record) in records.into_iter().enumerate() {
            writer
                .serialize(record)
                .with_context(|| format!("Failed to write CSV record {line} to {destination}"))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {destination}"))
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

fn read_json<T>(file_kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Read a simulation configuration; missing fields take their default values
pub fn read_config_file<P>(path: P) -> anyhow::Result<SimulationConfig>
where
    P: AsRef<Path>,
{
    read_json("simulation config", path.as_ref())
}

/// Read a result table exported as JSON by `simulate`
pub fn read_result_file<P>(path: P) -> anyhow::Result<ResultDocument>
where
    P: AsRef<Path>,
{
    read_json("result table", path.as_ref())
}
