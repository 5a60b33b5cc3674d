// mod.rs - Edge-list output writer

use std::io::Write;

/// Streaming CSV writer for the edge list.
///
/// Emits the `Source,Target,Distance` header on construction and one row per
/// surviving pair. Distances are formatted to a fixed 6 decimal digits so
/// output is deterministic and round-trippable.
pub struct EdgeWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> EdgeWriter<W> {
    pub fn new(out: W) -> Result<Self, String> {
        let mut inner = csv::Writer::from_writer(out);
        inner
            .write_record(["Source", "Target", "Distance"])
            .map_err(|e| format!("Failed to write output header: {}", e))?;
        Ok(Self { inner })
    }

    pub fn write_edge(&mut self, source: &str, target: &str, distance: f64) -> Result<(), String> {
        let distance = format!("{:.6}", distance);
        self.inner
            .write_record([source, target, distance.as_str()])
            .map_err(|e| format!("Failed to write edge row: {}", e))
    }

    pub fn flush(&mut self) -> Result<(), String> {
        self.inner
            .flush()
            .map_err(|e| format!("Failed to flush output: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_fixed_precision_rows() {
        let mut buf = Vec::new();
        {
            let mut writer = EdgeWriter::new(&mut buf).unwrap();
            writer.write_edge("a", "b", 0.015).unwrap();
            writer.write_edge("c", "d", 0.0).unwrap();
            writer.flush().unwrap();
        }
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Source,Target,Distance");
        assert_eq!(lines[1], "a,b,0.015000");
        assert_eq!(lines[2], "c,d,0.000000");
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let mut buf = Vec::new();
        {
            let mut writer = EdgeWriter::new(&mut buf).unwrap();
            writer.write_edge("isolate, 2021", "b", 0.5).unwrap();
            writer.flush().unwrap();
        }
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\"isolate, 2021\",b,0.500000"));
    }
}
