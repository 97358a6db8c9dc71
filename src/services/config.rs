// 設定管理の具象実装

use crate::core::BenchConfig;
use crate::ffi::{fixture_library_filename, locate_fixture_library, Signature};
use std::path::PathBuf;

/// 既定の呼び出し回数
pub const DEFAULT_ITERATIONS: u64 = 100_000;

/// 既定のトライアル数
pub const DEFAULT_TRIALS: usize = 10;

/// 呼び出し回数を上書きする環境変数
pub const ITERATIONS_ENV: &str = "ITER";

/// ライブラリパスを上書きする環境変数
pub const LIBRARY_PATH_ENV: &str = "LIBTEST_PATH";

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultBenchConfig {
    iterations: u64,
    trials: usize,
    library_path: PathBuf,
    signature: Signature,
    // 未指定ならシグネチャから導出する
    symbol: Option<String>,
    invoker_enabled: bool,
}

impl DefaultBenchConfig {
    pub fn new(library_path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: library_path.into(),
            ..Self::default()
        }
    }

    /// 環境変数 `ITER` / `LIBTEST_PATH` を反映した設定を作成
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から設定を作成
    ///
    /// `ITER` が数値として解釈できない場合は既定値のまま
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(iterations) = lookup(ITERATIONS_ENV).and_then(|v| v.trim().parse().ok()) {
            config.iterations = iterations;
        }
        if let Some(path) = lookup(LIBRARY_PATH_ENV).filter(|v| !v.is_empty()) {
            config.library_path = PathBuf::from(path);
        }
        config
    }

    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_path = path.into();
        self
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = signature;
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_invoker(mut self, enable: bool) -> Self {
        self.invoker_enabled = enable;
        self
    }
}

impl Default for DefaultBenchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            trials: DEFAULT_TRIALS,
            library_path: locate_fixture_library()
                .unwrap_or_else(|| PathBuf::from(fixture_library_filename())),
            signature: Signature::s32x3_void(),
            symbol: None,
            invoker_enabled: true,
        }
    }
}

impl BenchConfig for DefaultBenchConfig {
    fn iterations(&self) -> u64 {
        self.iterations
    }

    fn trials(&self) -> usize {
        self.trials
    }

    fn library_path(&self) -> PathBuf {
        self.library_path.clone()
    }

    fn signature(&self) -> Signature {
        self.signature.clone()
    }

    fn symbol(&self) -> String {
        self.symbol
            .clone()
            .unwrap_or_else(|| self.signature.bench_symbol())
    }

    fn invoker_enabled(&self) -> bool {
        self.invoker_enabled
    }
}
