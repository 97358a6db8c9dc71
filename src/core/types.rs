// 計測結果の型定義

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// ディスパッチ経路
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPath {
    /// 宣言的バインディングによる型付きスタブ
    Binding,
    /// 実行時に構築したインボーカー
    Invoker,
}

impl DispatchPath {
    /// セクション見出しを生成
    pub fn heading(self, signature: &str, iterations: u64) -> String {
        match self {
            Self::Binding => {
                format!("Benchmark {signature} performance, {iterations}x calls")
            }
            Self::Invoker => {
                format!("Benchmark Invoker.call {signature} performance, {iterations}x calls")
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binding => "binding",
            Self::Invoker => "invoker",
        }
    }
}

/// 1トライアル分の計測値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Measurement {
    /// ユーザーCPU時間
    pub user: Duration,
    /// システムCPU時間
    pub system: Duration,
    /// 経過時間（ウォールクロック）
    pub real: Duration,
}

impl Measurement {
    pub fn total(&self) -> Duration {
        self.user + self.system
    }
}

impl fmt::Display for Measurement {
    /// `user system total (real)` 形式で出力
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:10.6} {:10.6} {:10.6} ({:10.6})",
            self.user.as_secs_f64(),
            self.system.as_secs_f64(),
            self.total().as_secs_f64(),
            self.real.as_secs_f64()
        )
    }
}

/// 1つのディスパッチ経路の計測結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSection {
    pub path: DispatchPath,
    pub heading: String,
    pub measurements: Vec<Measurement>,
}

impl BenchmarkSection {
    pub fn new(path: DispatchPath, heading: impl Into<String>) -> Self {
        Self {
            path,
            heading: heading.into(),
            measurements: Vec::new(),
        }
    }

    /// 最速トライアルの経過時間
    pub fn fastest(&self) -> Option<Duration> {
        self.measurements.iter().map(|m| m.real).min()
    }
}

/// 実行全体のレポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub timestamp: String,
    pub library: PathBuf,
    pub symbol: String,
    pub signature: String,
    pub iterations: u64,
    pub trials: usize,
    pub sections: Vec<BenchmarkSection>,
    /// スキップされた経路とその理由
    pub skipped: Vec<(DispatchPath, String)>,
}

impl BenchmarkReport {
    pub fn section(&self, path: DispatchPath) -> Option<&BenchmarkSection> {
        self.sections.iter().find(|s| s.path == path)
    }
}
