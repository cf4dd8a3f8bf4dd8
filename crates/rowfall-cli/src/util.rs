use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::schema::{config::SessionConfig, record::RecordedSession};

/// Writes `value` as pretty JSON to `output_path`, or to stdout when no path is given.
pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let mut output = Output::create(output_path)?;
    let target = output.describe();
    serde_json::to_writer_pretty(&mut output, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(output)
        .and_then(|()| output.flush())
        .with_context(|| format!("Failed to finish writing {target}"))?;
    Ok(())
}

#[derive(Debug)]
enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    fn create(path: Option<PathBuf>) -> anyhow::Result<Self> {
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

    fn describe(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
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

fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Read a session configuration from a JSON file.
///
/// Missing fields fall back to their defaults.
pub fn read_config_file<P>(path: P) -> anyhow::Result<SessionConfig>
where
    P: AsRef<Path>,
{
    read_json_file("config", path)
}

/// Read a recorded play session from a JSON file.
pub fn read_recording_file<P>(path: P) -> anyhow::Result<RecordedSession>
where
    P: AsRef<Path>,
{
    read_json_file("recording", path)
}
