use crate::services::config::{DEFAULT_ITERATIONS, DEFAULT_TRIALS, ITERATIONS_ENV, LIBRARY_PATH_ENV};
use crate::ffi::Signature;
use crate::services::DefaultBenchConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ffi_dispatch_bench")]
#[command(about = "Measure native call overhead of a bound function stub versus a dynamic invoker")]
#[command(version)]
pub struct Cli {
    /// Path to the native library exposing the benchmark symbol
    #[arg(short, long, env = LIBRARY_PATH_ENV)]
    pub library: Option<PathBuf>,

    /// Function signature shared by both paths, e.g. "int, int -> int"
    #[arg(long, default_value = "int, int, int -> void")]
    pub signature: Signature,

    /// Symbol to resolve (defaults to the bench_* name derived from --signature)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Number of calls per trial
    #[arg(short, long, env = ITERATIONS_ENV, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u64,

    /// Number of trials per dispatch path
    #[arg(short, long, default_value_t = DEFAULT_TRIALS)]
    pub trials: usize,

    /// Do not measure the dynamic invoker path
    #[arg(long)]
    pub skip_invoker: bool,

    /// Write a JSON report to this path after the run
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Print diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 引数からベンチマーク設定を組み立てる
    pub fn to_config(&self) -> DefaultBenchConfig {
        let mut config = DefaultBenchConfig::default()
            .with_iterations(self.iterations)
            .with_trials(self.trials)
            .with_signature(self.signature.clone())
            .with_invoker(!self.skip_invoker);

        if let Some(library) = &self.library {
            config = config.with_library_path(library);
        }
        if let Some(symbol) = &self.symbol {
            config = config.with_symbol(symbol);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BenchConfig;

    #[test]
    fn test_parse_full_arguments() {
        let cli = Cli::try_parse_from([
            "ffi_dispatch_bench",
            "--library",
            "/tmp/libtest.so",
            "--symbol",
            "bench_s32_v",
            "--iterations",
            "42",
            "--trials",
            "3",
            "--skip-invoker",
            "--json",
            "report.json",
            "-v",
        ])
        .unwrap();

        let config = cli.to_config();
        assert_eq!(config.library_path(), PathBuf::from("/tmp/libtest.so"));
        assert_eq!(config.symbol(), "bench_s32_v");
        assert_eq!(config.iterations(), 42);
        assert_eq!(config.trials(), 3);
        assert!(!config.invoker_enabled());
        assert_eq!(cli.json, Some(PathBuf::from("report.json")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_negative_iterations() {
        let result = Cli::try_parse_from(["ffi_dispatch_bench", "--iterations", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_symbol_defaults_to_signature_name() {
        let cli = Cli::try_parse_from(["ffi_dispatch_bench", "--trials", "1"]).unwrap();

        assert_eq!(cli.to_config().symbol(), "bench_s32s32s32_v");
        assert_eq!(cli.to_config().trials(), 1);
    }

    #[test]
    fn test_signature_option_derives_symbol() {
        let cli = Cli::try_parse_from(["ffi_dispatch_bench", "--signature", "int -> int"]).unwrap();
        let config = cli.to_config();

        assert_eq!(config.signature().to_string(), "[ :int ], :int");
        assert_eq!(config.symbol(), "bench_s32_s32");
    }

    #[test]
    fn test_explicit_symbol_overrides_signature_name() {
        let cli = Cli::try_parse_from([
            "ffi_dispatch_bench",
            "--signature",
            "int, int -> void",
            "--symbol",
            "custom_entry",
        ])
        .unwrap();

        assert_eq!(cli.to_config().symbol(), "custom_entry");
    }

    #[test]
    fn test_rejects_malformed_signature() {
        for input in ["int,int,int:void", "void -> int", "int, text -> void"] {
            let result = Cli::try_parse_from(["ffi_dispatch_bench", "--signature", input]);
            assert!(result.is_err(), "accepted {input}");
        }
    }
}
