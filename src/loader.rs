use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use zstd::stream::read::Decoder as ZstdDecoder;

/// File formats supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextFileFormat {
    Plain,
    Gzip,
    Zstd,
}

impl FromStr for TextFileFormat {
    type Err = &'static str;

    fn from_str(fmt: &str) -> Result<Self, Self::Err> {
        match fmt {
            "plain" => Ok(Self::Plain),
            "gzip" => Ok(Self::Gzip),
            "zstd" => Ok(Self::Zstd),
            _ => Err("Invalid format"),
        }
    }
}

/// Reads a text file to index, decompressing it according to `format`.
pub fn load_text_file<P>(path: P, format: TextFileFormat) -> Result<Vec<u8>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    read_text(file, format).with_context(|| format!("cannot read {}", path.display()))
}

/// Reads a whole document from `reader` as one line of symbols.
///
/// Line breaks are dropped so that wrapped sequence files index as a single
/// text, and FASTA header lines (starting with `>`) are skipped.
pub fn read_text<R>(reader: R, format: TextFileFormat) -> Result<Vec<u8>>
where
    R: Read,
{
    match format {
        TextFileFormat::Plain => join_lines(BufReader::new(reader)),
        TextFileFormat::Gzip => join_lines(BufReader::new(GzDecoder::new(reader))),
        TextFileFormat::Zstd => join_lines(BufReader::new(ZstdDecoder::new(reader)?)),
    }
}

fn join_lines<R: BufRead>(reader: R) -> Result<Vec<u8>> {
    let mut text = Vec::new();
    for line in reader.split(b'\n') {
        let line = line?;
        if line.first() == Some(&b'>') {
            continue;
        }
        text.extend(line.iter().filter(|&&b| b != b'\r'));
    }
    Ok(text)
}
