//! # Normalization Runner
//!
//! Feeds raw barcodes through the normalizer and writes one JSON record per
//! input.
//!
//! ```text
//! input line ──► classify ──► ProductIdentifiers ──► {"input", "result", "identifiers"}
//!                   │
//!                   └──► tracing: debug (synthesized), warn (rejected)
//! ```

use std::borrow::Cow;
use std::io::{self, Write};

use anyhow::Context;
use gtin_core::{GtinNormalizer, Normalization, NoResultReason, ProductIdentifiers};
use serde::Serialize;
use tracing::{debug, warn};

/// One output line.
#[derive(Debug, Clone, Serialize)]
pub struct Record<'a> {
    /// The raw barcode, `null` when absent.
    pub input: Option<&'a str>,
    pub result: Normalization,
    pub identifiers: ProductIdentifiers,
}

/// Counts per classification for the end-of-run log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub passthrough: usize,
    pub synthesized: usize,
    pub no_result: usize,
}

impl Summary {
    fn record(&mut self, result: &Normalization) {
        match result {
            Normalization::Passthrough { .. } => self.passthrough += 1,
            Normalization::Synthesized { .. } => self.synthesized += 1,
            Normalization::NoResult { .. } => self.no_result += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.passthrough + self.synthesized + self.no_result
    }
}

/// Classifies one raw barcode and builds its output record.
pub fn process<'a>(
    normalizer: &GtinNormalizer,
    raw: Option<&'a str>,
    mpn: Option<&str>,
) -> Record<'a> {
    let result = normalizer.classify(raw);

    match &result {
        Normalization::Synthesized { source, gtin } => {
            debug!(
                %source,
                %gtin,
                prefix = %normalizer.config().prefix,
                "Barcode converted to GTIN-14"
            );
        }
        Normalization::NoResult {
            reason: NoResultReason::Absent,
        } => {
            debug!("No barcode, declaring identifier absent");
        }
        Normalization::NoResult { reason } => {
            warn!(raw = ?raw, %reason, "Invalid barcode ignored");
        }
        Normalization::Passthrough { .. } => {}
    }

    let identifiers = ProductIdentifiers::from_normalization(&result, mpn);

    Record {
        input: raw,
        result,
        identifiers,
    }
}

/// Processes every input line, writing JSON lines to `out`.
///
/// Lines are raw bytes. Invalid UTF-8 is decoded lossily and the line is still
/// classified, so a bad line becomes a record rather than ending the run. An
/// empty line (after stripping a trailing `\r`) is an absent barcode.
pub fn run<I, W>(
    normalizer: &GtinNormalizer,
    inputs: I,
    mpn: Option<&str>,
    out: &mut W,
) -> anyhow::Result<Summary>
where
    I: IntoIterator<Item = io::Result<Vec<u8>>>,
    W: Write,
{
    let mut summary = Summary::default();

    for (index, line) in inputs.into_iter().enumerate() {
        let bytes = line.with_context(|| format!("reading input line {}", index + 1))?;
        let line = String::from_utf8_lossy(&bytes);
        if matches!(line, Cow::Owned(_)) {
            warn!(line = index + 1, "Input line is not valid UTF-8, decoding lossily");
        }
        let raw = line.strip_suffix('\r').unwrap_or(&*line);
        let raw = if raw.is_empty() { None } else { Some(raw) };

        let record = process(normalizer, raw, mpn);
        summary.record(&record.result);

        serde_json::to_writer(&mut *out, &record)
            .with_context(|| format!("writing record for input line {}", index + 1))?;
        out.write_all(b"\n")?;
    }

    out.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtin_core::{GtinPrefix, NormalizerConfig, PassthroughPolicy};
    use serde_json::{json, Value};

    fn lines(inputs: &[&str]) -> Vec<io::Result<Vec<u8>>> {
        inputs.iter().map(|s| Ok(s.as_bytes().to_vec())).collect()
    }

    fn run_to_values(normalizer: &GtinNormalizer, inputs: &[&str]) -> (Summary, Vec<Value>) {
        let mut out = Vec::new();
        let summary = run(normalizer, lines(inputs), None, &mut out).unwrap();
        let values = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (summary, values)
    }

    #[test]
    fn test_run_writes_one_record_per_line() {
        let normalizer = GtinNormalizer::default();
        let (summary, values) = run_to_values(
            &normalizer,
            &["12345678901", "4006381333931\r", "", "0000000", "123"],
        );

        assert_eq!(
            summary,
            Summary {
                passthrough: 1,
                synthesized: 1,
                no_result: 3,
            }
        );
        assert_eq!(summary.total(), 5);
        assert_eq!(values.len(), 5);

        assert_eq!(
            values[0],
            json!({
                "input": "12345678901",
                "result": {
                    "kind": "synthesized",
                    "source": "12345678901",
                    "gtin": "74823456789016"
                },
                "identifiers": { "gtins": ["74823456789016"] }
            })
        );
        assert_eq!(values[1]["input"], json!("4006381333931"));
        assert_eq!(values[1]["result"]["kind"], json!("passthrough"));
        assert_eq!(
            values[2],
            json!({
                "input": null,
                "result": { "kind": "no_result", "reason": { "code": "absent" } },
                "identifiers": { "identifierExists": false }
            })
        );
        assert_eq!(values[3]["result"]["reason"]["code"], json!("all_zero"));
        assert_eq!(values[4]["identifiers"], json!({ "identifierExists": false }));
    }

    #[test]
    fn test_run_respects_configured_prefix_and_policy() {
        let normalizer = GtinNormalizer::new(NormalizerConfig {
            prefix: GtinPrefix::new("840").unwrap(),
            passthrough: PassthroughPolicy::Verify,
        });
        let (summary, values) = run_to_values(&normalizer, &["12345678901", "4006381333932"]);

        assert_eq!(values[0]["result"]["gtin"], json!("84023456789017"));
        assert_eq!(
            values[1]["result"]["reason"],
            json!({ "code": "check_digit_mismatch", "expected": 1, "found": 2 })
        );
        assert_eq!(summary.no_result, 1);
    }

    #[test]
    fn test_process_attaches_mpn() {
        let normalizer = GtinNormalizer::default();
        let record = process(&normalizer, Some("96385074"), Some("KLV-100"));
        assert_eq!(record.identifiers.mpn.as_deref(), Some("KLV-100"));
        assert!(record.identifiers.has_gtin());
    }

    #[test]
    fn test_run_continues_past_invalid_utf8() {
        let normalizer = GtinNormalizer::default();
        let inputs: Vec<io::Result<Vec<u8>>> = vec![
            Ok(b"12345678901".to_vec()),
            Ok(b"\xff\xfe".to_vec()),
            Ok(b"\xff\xfe4006381333931".to_vec()),
            Ok(b"4006381333931".to_vec()),
        ];
        let mut out = Vec::new();
        let summary = run(&normalizer, inputs, None, &mut out).unwrap();

        let values: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(values.len(), 4);
        assert_eq!(values[1]["result"]["reason"]["code"], json!("no_digits"));
        assert_eq!(values[1]["identifiers"], json!({ "identifierExists": false }));
        assert_eq!(values[2]["result"]["gtin"], json!("4006381333931"));
        assert_eq!(values[3]["result"]["kind"], json!("passthrough"));
        assert_eq!(
            summary,
            Summary {
                passthrough: 2,
                synthesized: 1,
                no_result: 1,
            }
        );
    }

    #[test]
    fn test_run_propagates_io_errors() {
        let normalizer = GtinNormalizer::default();
        let inputs = vec![
            Ok(b"12345678901".to_vec()),
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed")),
        ];
        let mut out = Vec::new();
        let err = run(&normalizer, inputs, None, &mut out).unwrap_err();
        assert!(err.to_string().contains("reading input line 2"));
    }
}
