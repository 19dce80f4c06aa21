//! Loading `Value` trees from JSON and YAML sources.
//!
//! The format is chosen from the file extension, looking through a trailing
//! `.gz`. Readers without a name (stdin) are sniffed instead.

use crate::document::node::Value;
use crate::document::parser::{parse_json, parse_yaml};
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use log::debug;
use std::fs;
use std::io::Read;
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Source format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    /// Unrecognized extension: JSON is tried first, then YAML.
    Unknown,
}

impl Format {
    /// Picks the format from a path, ignoring a trailing `.gz`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        let base = name.strip_suffix(".gz").unwrap_or(&name);

        if base.ends_with(".json") {
            Format::Json
        } else if base.ends_with(".yaml") || base.ends_with(".yml") {
            Format::Yaml
        } else {
            Format::Unknown
        }
    }
}

/// Loads and parses a JSON or YAML file.
///
/// # Examples
///
/// ```no_run
/// use deepquill::file::loader::load_file;
///
/// let tree = load_file("fixtures/users.yaml.gz").unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read or decompressed, or if its
/// contents do not parse in the detected format.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let format = Format::from_path(path);
    debug!("loading {} as {:?}", path.display(), format);

    let content = if is_gzipped(path) {
        read_gzipped_file(path)?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?
    };

    parse_content(&content, format)
        .with_context(|| format!("Failed to load {}", path.display()))
}

/// Reads a whole document from `reader`, decompressing it if it starts with
/// the gzip magic bytes, then tries JSON and falls back to YAML.
pub fn load_from_reader<R: Read>(mut reader: R) -> Result<Value> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .context("Failed to read input")?;

    let content = if buffer.starts_with(&GZIP_MAGIC) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")?
    };

    parse_content(&content, Format::Unknown)
}

/// Reads a document from stdin. See [`load_from_reader`].
pub fn load_from_stdin() -> Result<Value> {
    load_from_reader(std::io::stdin().lock())
}

fn parse_content(content: &str, format: Format) -> Result<Value> {
    match format {
        Format::Json => parse_json(content),
        Format::Yaml => parse_yaml(content),
        Format::Unknown => parse_json(content).or_else(|_| {
            parse_yaml(content).context("Input is neither valid JSON nor valid YAML")
        }),
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

fn read_gzipped_file(path: &Path) -> Result<String> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open gzipped file {}", path.display()))?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}
