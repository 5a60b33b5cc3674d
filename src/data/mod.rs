// mod.rs - Data types module

pub mod sequence;
pub mod symbol;

pub use sequence::{read_fasta, read_seqs, Seq};
