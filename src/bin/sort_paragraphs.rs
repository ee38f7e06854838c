//! Sort the paragraphs of a Word document by the Sorani alphabet
//!
//! Reads a `document.xml` part (or a whole `.docx` with the `docx` feature)
//! and writes the sorted copy next to it.
//!
//! Usage:
//!   cargo run --release --bin sort_paragraphs -- word/document.xml
//!   cargo run --release --bin sort_paragraphs -- input.xml -o sorted.xml --ascending
//!   cargo run --release --features docx --bin sort_paragraphs -- report.docx --json

use kurdish_sorter::config::{SortConfig, SortDirection};
use kurdish_sorter::io::{DocumentSink, DocumentSource, FileSink, FileSource};
use kurdish_sorter::pipeline::{LoggingObserver, Pipeline};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

struct CliArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    ascending: bool,
    no_verify: bool,
    json: bool,
    verbose: bool,
}

impl CliArgs {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut output = None;
        let mut config_path = None;
        let mut ascending = false;
        let mut no_verify = false;
        let mut json = false;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    i += 1;
                    let path = args.get(i).ok_or("--output needs a path")?;
                    output = Some(PathBuf::from(path));
                },
                "--config" => {
                    i += 1;
                    let path = args.get(i).ok_or("--config needs a path")?;
                    config_path = Some(PathBuf::from(path));
                },
                "--ascending" => ascending = true,
                "--no-verify" => no_verify = true,
                "--json" => json = true,
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => return Err(usage()),
                other if other.starts_with('-') => {
                    return Err(format!("unknown option {}\n\n{}", other, usage()));
                },
                other => {
                    if input.is_some() {
                        return Err(format!("unexpected argument {}\n\n{}", other, usage()));
                    }
                    input = Some(PathBuf::from(other));
                },
            }
            i += 1;
        }

        let input = input.ok_or_else(usage)?;
        Ok(Self {
            input,
            output,
            config_path,
            ascending,
            no_verify,
            json,
            verbose,
        })
    }

    fn sort_config(&self) -> Result<SortConfig, String> {
        let mut config = match &self.config_path {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .map_err(|e| format!("{}: {}", path.display(), e))?;
                SortConfig::from_json(&json).map_err(|e| e.to_string())?
            },
            None => SortConfig::default(),
        };
        if self.ascending {
            config = config.with_direction(SortDirection::Ascending);
        }
        if self.no_verify {
            config = config.with_verify_output(false);
        }
        Ok(config)
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

fn usage() -> String {
    "Usage: sort_paragraphs <input.xml|input.docx> [-o <output>] [--config <file.json>] \
     [--ascending] [--no-verify] [--json] [-v]"
        .to_string()
}

/// `dir/name.ext` becomes `dir/name.sorted.ext`.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.sorted.{}", stem, ext),
        None => format!("{}.sorted", stem),
    };
    input.with_file_name(name)
}

fn is_docx(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
}

#[cfg(feature = "docx")]
fn open_io(
    input: &Path,
    output: &Path,
) -> Result<(Box<dyn DocumentSource>, Box<dyn DocumentSink>), String> {
    use kurdish_sorter::io::docx::{DocxPackage, DocxSink, DocxSource};

    if is_docx(input) {
        let template = DocxPackage::open(input).map_err(|e| e.to_string())?;
        return Ok((
            Box::new(DocxSource::new(input)),
            Box::new(DocxSink::new(template, output)),
        ));
    }
    Ok((Box::new(FileSource::new(input)), Box::new(FileSink::new(output))))
}

#[cfg(not(feature = "docx"))]
fn open_io(
    input: &Path,
    output: &Path,
) -> Result<(Box<dyn DocumentSource>, Box<dyn DocumentSink>), String> {
    if is_docx(input) {
        return Err(format!(
            "{}: .docx input needs the `docx` feature; pass word/document.xml instead",
            input.display()
        ));
    }
    Ok((Box::new(FileSource::new(input)), Box::new(FileSink::new(output))))
}

fn main() -> ExitCode {
    let args = match CliArgs::from_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        },
    };

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match args.sort_config() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::from(2);
        },
    };

    let output = args.output_path();
    let (mut source, mut sink) = match open_io(&args.input, &output) {
        Ok(io) => io,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::FAILURE;
        },
    };

    let mut pipeline = Pipeline::with_observer(config, LoggingObserver);
    let result = pipeline.run(source.as_mut(), sink.as_mut());

    if args.json {
        match serde_json::to_string_pretty(&pipeline.state().summary()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    match result {
        Ok(()) => {
            log::info!("Sorted {} -> {}", args.input.display(), output.display());
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
