//! Command-line argument parsing.

use crate::config::ConfigError;

pub const USAGE: &str = "\
Normalize catalog barcodes into GTINs.

Usage:
  gtin [OPTIONS] [BARCODE]...

With no BARCODE arguments, reads one barcode per line from stdin.
An empty line means the product has no barcode.

Options:
  -p, --prefix <DDD>   3-digit prefix for 11-digit codes (env: GTIN_PREFIX, default 748)
      --verify         Reject 8/12/13/14-digit codes with a wrong check digit
                       (env: GTIN_PASSTHROUGH=verify)
  -m, --mpn <CODE>     Reference code attached to every output record
  -h, --help           Print this help
      --               Treat every following argument as a barcode

Output: one JSON object per input line on stdout. Logs go to stderr (RUST_LOG).
";

/// Parsed command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub prefix: Option<String>,
    pub verify: bool,
    pub mpn: Option<String>,
    pub help: bool,
    pub barcodes: Vec<String>,
}

impl CliArgs {
    /// Parses arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--prefix" | "-p" => {
                    let value = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    parsed.prefix = Some(value);
                }
                "--mpn" | "-m" => {
                    let value = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    parsed.mpn = Some(value);
                }
                "--verify" => parsed.verify = true,
                "--help" | "-h" => parsed.help = true,
                // Everything after `--` is a barcode, even if it starts with '-'
                "--" => parsed.barcodes.extend(args.by_ref()),
                flag if flag.len() > 1 && flag.starts_with('-') => {
                    return Err(ConfigError::UnknownArgument(flag.to_string()));
                }
                _ => parsed.barcodes.push(arg),
            }
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, ConfigError> {
        CliArgs::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_flags_and_barcodes() {
        let args = parse(&["-p", "840", "--verify", "12345678901", "4006381333931"]).unwrap();
        assert_eq!(args.prefix.as_deref(), Some("840"));
        assert!(args.verify);
        assert_eq!(args.barcodes, vec!["12345678901", "4006381333931"]);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_parse_double_dash() {
        let args = parse(&["--", "-123-456-", "--verify"]).unwrap();
        assert!(!args.verify);
        assert_eq!(args.barcodes, vec!["-123-456-", "--verify"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse(&["--prefix"]), Err(ConfigError::MissingValue(_))));
        assert!(matches!(parse(&["--bogus"]), Err(ConfigError::UnknownArgument(_))));
    }

    #[test]
    fn test_parse_rejects_unknown_short_flags() {
        assert!(matches!(
            parse(&["-v", "12345678901"]),
            Err(ConfigError::UnknownArgument(ref flag)) if flag == "-v"
        ));
        assert!(matches!(parse(&["-123-456-"]), Err(ConfigError::UnknownArgument(_))));

        let args = parse(&["-"]).unwrap();
        assert_eq!(args.barcodes, vec!["-"]);
    }
}
