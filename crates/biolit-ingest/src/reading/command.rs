//! Reader back-end that runs an external program per document

use super::{ReadOptions, Reader, ReadingError, ReadingResult, Result};
use crate::config::ReaderConfig;
use async_trait::async_trait;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Argument placeholder replaced by the document path
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Runs `program args...` once per document and keeps its stdout.
///
/// If no argument contains `{input}`, the document path is appended as the
/// last argument. Documents whose run exits non-zero or prints non-UTF-8
/// output are skipped with a warning.
#[derive(Debug, Clone)]
pub struct CommandReader {
    name: String,
    program: String,
    args: Vec<String>,
    version: Option<String>,
    format: String,
}

impl CommandReader {
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            version: None,
            format: "txt".to_string(),
        }
    }

    pub fn from_config(config: &ReaderConfig) -> Self {
        Self {
            name: config.name.clone(),
            program: config.program.clone(),
            args: config.args.clone(),
            version: config.version.clone(),
            format: config.format.clone(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    fn args_for(&self, file: &Path) -> Vec<String> {
        let input = file.display().to_string();
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| arg.replace(INPUT_PLACEHOLDER, &input))
            .collect();

        if !self.args.iter().any(|arg| arg.contains(INPUT_PLACEHOLDER)) {
            args.push(input);
        }
        args
    }

    async fn read_one(&self, file: &Path) -> Result<Option<ReadingResult>> {
        let args = self.args_for(file);
        debug!(reader = %self.name, program = %self.program, ?args, "Running reader");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ReadingError::Spawn {
                reader: self.name.clone(),
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                reader = %self.name,
                file = %file.display(),
                status = %output.status,
                stderr = %stderr.trim(),
                "Reader failed on document"
            );
            return Ok(None);
        }

        let content = match String::from_utf8(output.stdout) {
            Ok(content) => content,
            Err(e) => {
                warn!(reader = %self.name, file = %file.display(), "Reader output is not UTF-8: {}", e);
                return Ok(None);
            },
        };

        Ok(Some(ReadingResult {
            content_id: file.display().to_string(),
            reader: self.name.clone(),
            reader_version: self.version.clone(),
            format: self.format.clone(),
            content,
            read_at: Utc::now(),
        }))
    }
}

fn progress_bar(len: usize, name: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{msg} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(format!("Reading with {}", name));
    pb
}

#[async_trait]
impl Reader for CommandReader {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(
        &self,
        files: &[PathBuf],
        options: &ReadOptions,
    ) -> Result<Option<Vec<ReadingResult>>> {
        let pb = progress_bar(files.len(), &self.name, options.verbose);

        let outcomes: Vec<Result<Option<ReadingResult>>> = stream::iter(files.iter().cloned())
            .map(|file| {
                let pb = pb.clone();
                async move {
                    let outcome = self.read_one(&file).await;
                    pb.inc(1);
                    outcome
                }
            })
            .buffered(options.n_proc.max(1))
            .collect()
            .await;

        pb.finish_and_clear();

        let mut results = Vec::new();
        for outcome in outcomes {
            if let Some(result) = outcome? {
                results.push(result);
            }
        }

        if results.is_empty() {
            Ok(None)
        } else {
            Ok(Some(results))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_substituted() {
        let reader = CommandReader::new("reach", "reach-cli").with_args(["--input", "{input}", "--json"]);
        assert_eq!(
            reader.args_for(Path::new("/data/PMC1.nxml")),
            vec!["--input", "/data/PMC1.nxml", "--json"]
        );
    }

    #[test]
    fn test_path_appended_without_placeholder() {
        let reader = CommandReader::new("sparser", "sparser").with_args(["-q"]);
        assert_eq!(reader.args_for(Path::new("a.txt")), vec!["-q", "a.txt"]);
    }

    #[test]
    fn test_from_config() {
        let config = ReaderConfig {
            name: "isi".to_string(),
            program: "isi-read".to_string(),
            args: vec!["{input}".to_string()],
            version: Some("2.1".to_string()),
            format: "json".to_string(),
        };
        let reader = CommandReader::from_config(&config);
        assert_eq!(reader.name(), "isi");
        assert_eq!(reader.version.as_deref(), Some("2.1"));
        assert_eq!(reader.format, "json");
    }
}
