//! Biolit Ingest - literature and pathway ingestion tool

use anyhow::{bail, Context, Result};
use biolit_common::logging::{init_logging, LogConfig, LogLevel};
use biolit_ingest::acsn;
use biolit_ingest::annotations::{load_annotations, AnnotationParser, Grounder, LexiconGrounder, NoGrounding};
use biolit_ingest::config::IngestConfig;
use biolit_ingest::reading::{
    self, load_file_list, log_file_types, parse_range, select_files, CommandReader, ReadOptions,
    Reader, READING_OUTPUTS_FILE,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "biolit-ingest")]
#[command(author, version, about = "Biomedical literature ingestion tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show warnings and errors (overrides --verbose)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (default: $BIOLIT_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read local documents with the configured readers
    ReadFiles {
        /// File with one document path per line
        #[arg(long)]
        file_list: PathBuf,

        /// Readers to run, by name (default: all configured readers)
        #[arg(long, value_delimiter = ',')]
        readers: Vec<String>,

        /// Read a random sample of this many documents (applied before --range)
        #[arg(long)]
        sample: Option<usize>,

        /// Read the documents in the half-open range <start>:<end>
        #[arg(long)]
        range: Option<String>,

        /// Documents processed at once by each reader
        #[arg(long)]
        n_proc: Option<usize>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract relations from an ACSN export
    Acsn {
        /// Binary relations table
        #[arg(long)]
        relations: PathBuf,

        /// HUGO correspondence file (GMT)
        #[arg(long)]
        correspondence: PathBuf,

        /// Output file (default: <output_dir>/acsn_relations.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse curator annotations
    Annotations {
        /// Exported annotation list (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Grounding lexicon (TSV: synonym, name, db refs)
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Output file (default: <output_dir>/annotations.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .level(LogLevel::from_flags(cli.verbose, cli.quiet))
        .log_file_prefix("biolit-ingest")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    let config = IngestConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::ReadFiles {
            file_list,
            readers,
            sample,
            range,
            n_proc,
            output,
        } => {
            let options = ReadOptions {
                n_proc: n_proc.unwrap_or(config.n_proc),
                verbose: cli.verbose && !cli.quiet,
            };
            let output_dir = output.unwrap_or_else(|| config.output_dir.clone());
            read_files(&config, &file_list, &readers, sample, range.as_deref(), &options, &output_dir)
                .await?;
        },
        Command::Acsn {
            relations,
            correspondence,
            output,
        } => {
            info!("Processing ACSN relations");
            let processor =
                acsn::process_files(&relations, &correspondence, config.acsn.delimiter_byte()?)?;
            info!(stats = ?processor.stats(), "ACSN processing finished");

            let output = output.unwrap_or_else(|| config.output_dir.join("acsn_relations.json"));
            write_json(&output, processor.relations())?;
        },
        Command::Annotations {
            input,
            lexicon,
            output,
        } => {
            info!("Parsing annotations");
            let annotations = load_annotations(&input)?;
            let grounder: Box<dyn Grounder> = match lexicon {
                Some(path) => Box::new(LexiconGrounder::from_file(path)?),
                None => Box::new(NoGrounding),
            };

            let parser = AnnotationParser::new(config.context_parser());
            let parsed = parser.parse_all(&annotations, grounder.as_ref());

            let output = output.unwrap_or_else(|| config.output_dir.join("annotations.json"));
            write_json(&output, &parsed)?;
        },
    }

    info!("Ingestion complete");
    Ok(())
}

async fn read_files(
    config: &IngestConfig,
    file_list: &Path,
    selected: &[String],
    sample: Option<usize>,
    range: Option<&str>,
    options: &ReadOptions,
    output_dir: &Path,
) -> Result<()> {
    let reader_configs = config.select_readers(selected);
    if reader_configs.is_empty() {
        bail!("No readers configured or selected; add [[readers]] entries to the config file");
    }
    for name in selected {
        if !reader_configs.iter().any(|r| r.name.eq_ignore_ascii_case(name)) {
            return Err(reading::ReadingError::UnknownReader(name.clone()).into());
        }
    }

    let range = range.map(parse_range).transpose()?;
    let files = select_files(load_file_list(file_list)?, sample, range, &mut rand::thread_rng());
    log_file_types(&files);

    let readers: Vec<Box<dyn Reader>> = reader_configs
        .into_iter()
        .map(|rc| Box::new(CommandReader::from_config(rc)) as Box<dyn Reader>)
        .collect();

    let outputs = reading::read_files(&files, &readers, options).await?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    reading::write_outputs(output_dir.join(READING_OUTPUTS_FILE), &outputs)?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)?;
    info!(path = %path.display(), "Output written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_and_range_together() {
        let cli = Cli::try_parse_from([
            "biolit-ingest",
            "read-files",
            "--file-list",
            "files.txt",
            "--sample",
            "100",
            "--range",
            "0:10",
        ])
        .unwrap();

        match cli.command {
            Command::ReadFiles { sample, range, .. } => {
                assert_eq!(sample, Some(100));
                assert_eq!(range.as_deref(), Some("0:10"));
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
