// 計測結果報告の具象実装

use crate::core::{BenchError, BenchReporter, BenchResult, BenchmarkReport, DispatchPath, Measurement};
use std::path::Path;

/// コンソール出力による報告実装
///
/// 見出しと計測値は標準出力、それ以外は標準エラー出力に書く
#[derive(Debug, Default, Clone)]
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl BenchReporter for ConsoleReporter {
    fn report_heading(&self, heading: &str) {
        println!("{heading}");
    }

    fn report_measurement(&self, _trial: usize, measurement: &Measurement) {
        println!("{measurement}");
    }

    fn report_skipped(&self, path: DispatchPath, reason: &str) {
        eprintln!("⏭️  {} をスキップしました: {reason}", path.as_str());
    }

    fn report_diagnostic(&self, message: &str) {
        if self.verbose {
            eprintln!("🔧 {message}");
        }
    }
}

/// 何もしない報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpReporter;

impl NoOpReporter {
    pub fn new() -> Self {
        Self
    }
}

impl BenchReporter for NoOpReporter {
    fn report_heading(&self, _heading: &str) {}

    fn report_measurement(&self, _trial: usize, _measurement: &Measurement) {}

    fn report_skipped(&self, _path: DispatchPath, _reason: &str) {}

    fn report_diagnostic(&self, _message: &str) {}
}

/// JSON形式でのレポート出力
pub fn export_json_report(report: &BenchmarkReport, path: &Path) -> BenchResult<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| BenchError::report(anyhow::Error::new(e)))?;

    std::fs::write(path, json).map_err(|e| {
        BenchError::report(anyhow::Error::new(e).context(format!("{}", path.display())))
    })
}
