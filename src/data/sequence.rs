// sequence.rs - Named sequence record and streaming FASTA reader

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data::symbol;
use crate::error::DistError;

/// A named nucleotide sequence, encoded to canonical symbol codes.
/// Immutable after construction; the name is used verbatim as the output label.
#[derive(Debug, Clone)]
pub struct Seq {
    name: String,
    codes: Vec<u8>,
}

impl Seq {
    /// Build a sequence from its raw string, case-folding before encoding.
    pub fn new(name: String, raw: &str) -> Self {
        let codes = raw.bytes().map(symbol::encode).collect();
        Self { name, codes }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Fraction of positions holding a degenerate code (mask popcount > 1).
    /// Gaps and unambiguous bases do not count toward the fraction.
    pub fn ambiguous_fraction(&self) -> f64 {
        if self.codes.is_empty() {
            return 0.0;
        }
        let ambigs = self
            .codes
            .iter()
            .filter(|&&c| symbol::is_ambiguous(c))
            .count();
        ambigs as f64 / self.codes.len() as f64
    }
}

/// Parse FASTA records from a line-oriented reader.
///
/// A `>` line starts a record; its trimmed remainder is the name. All
/// following non-blank lines are concatenated into the sequence body until
/// the next header. Blank lines are ignored anywhere. Data lines seen before
/// the first header have no record to attach to and are dropped.
pub fn read_seqs<R: BufRead>(reader: R) -> Result<Vec<Seq>, String> {
    let mut seqs = Vec::new();
    let mut name = String::new();
    let mut body = String::new();

    for line in reader.lines() {
        let line = line.map_err(|e| format!("Failed to read input line: {}", e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            if !name.is_empty() {
                seqs.push(Seq::new(std::mem::take(&mut name), &body));
            }
            name = header.trim().to_string();
            body.clear();
        } else if !name.is_empty() {
            body.push_str(line);
        }
        // Data before the first header is dropped: no record has started yet.
    }
    if !name.is_empty() {
        seqs.push(Seq::new(name, &body));
    }
    Ok(seqs)
}

/// Read all sequences from a FASTA file, preserving file order.
pub fn read_fasta(path: &Path) -> Result<Vec<Seq>, DistError> {
    let file = File::open(path).map_err(|e| {
        DistError::Input(format!("Failed to open input file '{}': {}", path.display(), e))
    })?;
    let seqs = read_seqs(BufReader::new(file)).map_err(DistError::Input)?;
    if seqs.is_empty() {
        return Err(DistError::Input(format!(
            "No FASTA records found in '{}'",
            path.display()
        )));
    }
    Ok(seqs)
}
