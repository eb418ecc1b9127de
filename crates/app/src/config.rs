//! Command-line configuration for the a85 filter.
//!
//! Arguments are parsed by hand into a [`Config`], which wraps the core
//! [`CodecConfig`] plus the options that only matter to the binary
//! (where bytes come from and go to, and what gets reported).
//!
//! # Philosophy
//!
//! With no arguments the tool encodes stdin to stdout with the default
//! alphabet and 76-symbol lines, like other base-N filters.

use std::path::PathBuf;

use a85_core::config::{AlphabetSource, CodecConfig, Mode};
use a85_core::error::ConfigError;

/// Line width used when `--wrap` is not given.
pub const DEFAULT_WRAP: usize = 76;

/// Complete configuration for one run of the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // === Files ===
    /// Input file path (None = stdin)
    pub input: Option<PathBuf>,

    /// Output file path (None = stdout)
    pub output: Option<PathBuf>,

    // === Codec ===
    pub codec: CodecConfig,

    // === Behavior ===
    /// Print run statistics to stderr when done
    pub stats: bool,

    /// Print the resolved configuration to stderr before running
    pub print_config: bool,

    /// Raise the default log level to `debug`
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (without the program
    /// name).
    ///
    /// `--z85` wins over `--alphabet` when both are given. A lone `-` names
    /// stdin.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let mut input: Option<PathBuf> = None;
        let mut output: Option<PathBuf> = None;
        let mut mode = Mode::Encode;
        let mut wrap_width = DEFAULT_WRAP;
        let mut z85 = false;
        let mut custom: Option<PathBuf> = None;
        let mut disable_zero_abbrev = false;
        let mut disable_space_abbrev = false;
        let mut stats = false;
        let mut print_config = false;
        let mut verbose = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "-d" | "--decode" => {
                    mode = Mode::Decode;
                }
                "-w" | "--wrap" => {
                    let value = value_for(args, &mut i, "a number")?;
                    wrap_width = value
                        .parse()
                        .map_err(|_| ConfigError::InvalidWrap(value.to_string()))?;
                }
                "--z85" => {
                    z85 = true;
                }
                "-a" | "--alphabet" => {
                    custom = Some(PathBuf::from(value_for(args, &mut i, "a path")?));
                }
                "--no-zero-abbrev" => {
                    disable_zero_abbrev = true;
                }
                "--no-space-abbrev" => {
                    disable_space_abbrev = true;
                }
                "-o" | "--output" => {
                    output = Some(PathBuf::from(value_for(args, &mut i, "a path")?));
                }
                "--stats" => {
                    stats = true;
                }
                "--print-config" => {
                    print_config = true;
                }
                "-v" | "--verbose" => {
                    verbose = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-V" => {
                    println!("a85 {}", env!("CARGO_PKG_VERSION"));
                    std::process::exit(0);
                }
                "-" => {
                    set_input(&mut input, "-")?;
                }
                flag if flag.starts_with('-') => {
                    return Err(ConfigError::InvalidArgument(format!(
                        "unknown argument: {}",
                        flag
                    )));
                }
                path => {
                    set_input(&mut input, path)?;
                }
            }
            i += 1;
        }

        let alphabet = match (z85, custom) {
            (true, _) => AlphabetSource::Z85,
            (false, Some(path)) => AlphabetSource::Custom(path),
            (false, None) => AlphabetSource::Default,
        };

        // "-" only marks stdin explicitly
        let input = input.filter(|path| path.to_str() != Some("-"));

        Ok(Config {
            input,
            output,
            codec: CodecConfig {
                mode,
                wrap_width,
                alphabet,
                disable_zero_abbrev,
                disable_space_abbrev,
            },
            stats,
            print_config,
            verbose,
        })
    }

    /// Print the configuration in human-readable form.
    ///
    /// Goes to stderr because stdout may be carrying data.
    pub fn print(&self) {
        let describe = |path: &Option<PathBuf>, fallback: &str| {
            path.as_ref()
                .map_or_else(|| fallback.to_string(), |p| p.display().to_string())
        };

        eprintln!("=== Configuration ===");
        eprintln!("Input:  {}", describe(&self.input, "(stdin)"));
        eprintln!("Output: {}", describe(&self.output, "(stdout)"));
        eprintln!();
        eprintln!("Mode: {:?}", self.codec.mode);
        match &self.codec.alphabet {
            AlphabetSource::Default => eprintln!("Alphabet: ascii85 (! to u)"),
            AlphabetSource::Z85 => eprintln!("Alphabet: z85"),
            AlphabetSource::Custom(path) => eprintln!("Alphabet: {}", path.display()),
        }
        if self.codec.wrap_width == 0 {
            eprintln!("Wrap: off");
        } else {
            eprintln!("Wrap: {} symbols", self.codec.wrap_width);
        }
        eprintln!(
            "Zero abbreviation: {}",
            if self.codec.disable_zero_abbrev { "off" } else { "on" }
        );
        eprintln!(
            "Space abbreviation: {}",
            if self.codec.disable_space_abbrev { "off" } else { "on" }
        );
        eprintln!();
    }
}

/// Step past a flag and return its value.
fn value_for<'a>(args: &'a [String], i: &mut usize, what: &str) -> Result<&'a str, ConfigError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::InvalidArgument(format!("{} requires {}", flag, what)))
}

fn set_input(input: &mut Option<PathBuf>, path: &str) -> Result<(), ConfigError> {
    if let Some(first) = input {
        return Err(ConfigError::InvalidArgument(format!(
            "more than one input given: {} and {}",
            first.display(),
            path
        )));
    }
    *input = Some(PathBuf::from(path));
    Ok(())
}

fn print_help() {
    println!("a85: Base85/Ascii85 encode or decode a stream");
    println!();
    println!("USAGE:");
    println!("    a85 [OPTIONS] [INPUT]");
    println!();
    println!("INPUT is a file path, or - (the default) for stdin.");
    println!();
    println!("OPTIONS:");
    println!("    -d, --decode            Decode text back to binary");
    println!("    -w, --wrap <N>          Symbols per line, 0 = no wrapping (default: 76)");
    println!("    -o, --output <PATH>     Write to a file instead of stdout");
    println!();
    println!("    --z85                   Use the Z85 alphabet (no abbreviations)");
    println!("    -a, --alphabet <PATH>   Read 85-87 alphabet bytes from a file");
    println!("    --no-zero-abbrev        Never write z for four zero bytes");
    println!("    --no-space-abbrev       Never write y for four spaces");
    println!();
    println!("    --stats                 Print run statistics to stderr");
    println!("    --print-config          Print resolved configuration to stderr");
    println!("    -v, --verbose           Debug logging (RUST_LOG overrides)");
    println!("    -h, --help              Print this help");
    println!("    -V, --version           Print version");
    println!();
    println!("EXAMPLES:");
    println!("    a85 file.bin > file.a85          # Encode a file");
    println!("    a85 -d file.a85 -o file.bin      # Decode it again");
    println!("    a85 --z85 -w 0 < key.bin         # Z85 on one line");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(&[]).unwrap();
        assert_eq!(config.input, None);
        assert_eq!(config.output, None);
        assert_eq!(config.codec.mode, Mode::Encode);
        assert_eq!(config.codec.wrap_width, DEFAULT_WRAP);
        assert_eq!(config.codec.alphabet, AlphabetSource::Default);
        assert!(!config.codec.disable_zero_abbrev);
        assert!(!config.codec.disable_space_abbrev);
        assert!(!config.stats && !config.print_config && !config.verbose);
    }

    #[test]
    fn test_full_argument_set() {
        let config = Config::from_args(&args(&[
            "-d",
            "--wrap",
            "0",
            "-a",
            "alpha.txt",
            "--no-zero-abbrev",
            "--no-space-abbrev",
            "-o",
            "out.bin",
            "--stats",
            "--print-config",
            "-v",
            "in.a85",
        ]))
        .unwrap();

        assert_eq!(config.input, Some(PathBuf::from("in.a85")));
        assert_eq!(config.output, Some(PathBuf::from("out.bin")));
        assert_eq!(
            config.codec,
            CodecConfig {
                mode: Mode::Decode,
                wrap_width: 0,
                alphabet: AlphabetSource::Custom(PathBuf::from("alpha.txt")),
                disable_zero_abbrev: true,
                disable_space_abbrev: true,
            }
        );
        assert!(config.stats && config.print_config && config.verbose);
    }

    #[test]
    fn test_z85_overrides_custom_alphabet() {
        let config = Config::from_args(&args(&["--alphabet", "alpha.txt", "--z85"])).unwrap();
        assert_eq!(config.codec.alphabet, AlphabetSource::Z85);
    }

    #[test]
    fn test_dash_means_stdin() {
        let config = Config::from_args(&args(&["-"])).unwrap();
        assert_eq!(config.input, None);
    }

    #[test]
    fn test_invalid_wrap() {
        let result = Config::from_args(&args(&["-w", "wide"]));
        assert!(matches!(result, Err(ConfigError::InvalidWrap(v)) if v == "wide"));

        let result = Config::from_args(&args(&["-w", "-3"]));
        assert!(matches!(result, Err(ConfigError::InvalidWrap(_))));
    }

    #[test]
    fn test_argument_errors() {
        for bad in [
            &["--bogus"][..],
            &["--wrap"][..],
            &["-o"][..],
            &["--alphabet"][..],
            &["a.bin", "b.bin"][..],
        ] {
            let result = Config::from_args(&args(bad));
            assert!(
                matches!(result, Err(ConfigError::InvalidArgument(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }
}
