use super::args::Cli;
use crate::benchmarks::DispatchBenchmark;
use crate::core::BenchConfig;
use crate::services::{export_json_report, ConsoleReporter};
use anyhow::{Context, Result};

/// ベンチマークを実行し、必要ならJSONレポートを書き出す
pub fn execute_benchmark(cli: Cli) -> Result<()> {
    let config = cli.to_config();
    let reporter = if cli.verbose {
        ConsoleReporter::verbose()
    } else {
        ConsoleReporter::new()
    };

    let library_path = config.library_path();
    let bench = DispatchBenchmark::new(config, reporter);
    let report = bench
        .run()
        .with_context(|| format!("ベンチマーク失敗: {}", library_path.display()))?;

    if let Some(path) = &cli.json {
        export_json_report(&report, path)?;
        eprintln!("📄 レポートを出力しました: {}", path.display());
    }

    Ok(())
}
