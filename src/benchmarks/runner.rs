//! バインディング経路とインボーカー経路の呼び出しオーバーヘッド比較
//!
//! ライブラリを一度だけ読み込み、同じシンボルを2つの経路で解決してから
//! それぞれの計測ループを実行する。解決はどちらも計測出力より前に行う。

use super::timing::run_section;
use crate::core::{
    BenchConfig, BenchReporter, BenchResult, BenchmarkReport, BenchmarkSection, DispatchPath,
};
use crate::ffi::{BoundStub, Invoker, NativeLibrary, Signature};
use std::hint::black_box;

/// 計測に使う固定引数
///
/// 引数が3個未満のシグネチャでは先頭から必要な数だけ使う
pub const CALL_ARGS: (i32, i32, i32) = (0, 1, 2);

/// 解決済みの計測対象
pub struct ResolvedTargets {
    pub library: NativeLibrary,
    pub binding: BoundStub,
    pub invoker: Option<Invoker>,
    /// インボーカーを使わない理由
    pub invoker_skip_reason: Option<String>,
}

/// ディスパッチ経路比較ベンチマーク
pub struct DispatchBenchmark<C, R>
where
    C: BenchConfig,
    R: BenchReporter,
{
    config: C,
    reporter: R,
    signature: Signature,
}

impl<C, R> DispatchBenchmark<C, R>
where
    C: BenchConfig,
    R: BenchReporter,
{
    pub fn new(config: C, reporter: R) -> Self {
        let signature = config.signature();
        Self {
            config,
            reporter,
            signature,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// ライブラリを読み込み、シンボルを2つの経路で解決する
    pub fn resolve(&self) -> BenchResult<ResolvedTargets> {
        let library_path = self.config.library_path();
        let symbol = self.config.symbol();

        let library = NativeLibrary::open(&library_path)?;
        self.reporter
            .report_diagnostic(&format!("📚 ライブラリ読み込み: {}", library_path.display()));

        let binding = BoundStub::attach(&library, &symbol, &self.signature)?;
        self.reporter
            .report_diagnostic(&format!("🔗 バインディング解決: {symbol}"));

        let (invoker, invoker_skip_reason) = if !self.config.invoker_enabled() {
            (None, Some("設定で無効化されています".to_string()))
        } else if !Invoker::supports(&self.signature) {
            (
                None,
                Some(format!(
                    "このシグネチャのインボーカーは利用できません: {}",
                    self.signature
                )),
            )
        } else {
            let invoker = Invoker::build(&library, &symbol, self.signature.clone())?;
            self.reporter
                .report_diagnostic(&format!("⚙️  インボーカー構築: {symbol}"));
            (Some(invoker), None)
        };

        Ok(ResolvedTargets {
            library,
            binding,
            invoker,
            invoker_skip_reason,
        })
    }

    /// 全経路の計測を実行
    pub fn run(&self) -> BenchResult<BenchmarkReport> {
        let targets = self.resolve()?;
        self.run_resolved(&targets)
    }

    /// 解決済みの対象に対して計測を実行
    pub fn run_resolved(&self, targets: &ResolvedTargets) -> BenchResult<BenchmarkReport> {
        let iterations = self.config.iterations();
        let trials = self.config.trials();
        let signature = self.signature.to_string();

        let mut sections = vec![self.run_binding(&targets.binding)?];
        let mut skipped = Vec::new();

        match &targets.invoker {
            Some(invoker) => sections.push(self.run_invoker(invoker)?),
            None => {
                let reason = targets
                    .invoker_skip_reason
                    .clone()
                    .unwrap_or_else(|| "理由不明".to_string());
                self.reporter.report_skipped(DispatchPath::Invoker, &reason);
                skipped.push((DispatchPath::Invoker, reason));
            }
        }

        let report = BenchmarkReport {
            timestamp: chrono::Utc::now().to_rfc3339(),
            library: targets.library.path().to_path_buf(),
            symbol: targets.binding.name().to_string(),
            signature,
            iterations,
            trials,
            sections,
            skipped,
        };
        self.report_summary(&report);
        Ok(report)
    }

    fn measure_path<F>(&self, path: DispatchPath, call: F) -> BenchResult<BenchmarkSection>
    where
        F: FnMut() -> BenchResult<()>,
    {
        let iterations = self.config.iterations();
        run_section(
            path,
            path.heading(&self.signature.to_string(), iterations),
            iterations,
            self.config.trials(),
            &self.reporter,
            call,
        )
    }

    fn run_binding(&self, stub: &BoundStub) -> BenchResult<BenchmarkSection> {
        let (a, b, c) = CALL_ARGS;
        let path = DispatchPath::Binding;

        match stub {
            BoundStub::Void1(f) => self.measure_path(path, || {
                f.call(black_box(a));
                Ok(())
            }),
            BoundStub::Void2(f) => self.measure_path(path, || {
                f.call(black_box(a), black_box(b));
                Ok(())
            }),
            BoundStub::Void3(f) => self.measure_path(path, || {
                f.call(black_box(a), black_box(b), black_box(c));
                Ok(())
            }),
            BoundStub::Int1(f) => self.measure_path(path, || {
                black_box(f.call(black_box(a)));
                Ok(())
            }),
            BoundStub::Int2(f) => self.measure_path(path, || {
                black_box(f.call(black_box(a), black_box(b)));
                Ok(())
            }),
            BoundStub::Int3(f) => self.measure_path(path, || {
                black_box(f.call(black_box(a), black_box(b), black_box(c)));
                Ok(())
            }),
        }
    }

    fn run_invoker(&self, invoker: &Invoker) -> BenchResult<BenchmarkSection> {
        let (a, b, c) = CALL_ARGS;
        let path = DispatchPath::Invoker;

        match invoker.arity() {
            0 => self.measure_path(path, || {
                black_box(invoker.call0()?);
                Ok(())
            }),
            1 => self.measure_path(path, || {
                black_box(invoker.call1(black_box(a))?);
                Ok(())
            }),
            2 => self.measure_path(path, || {
                black_box(invoker.call2(black_box(a), black_box(b))?);
                Ok(())
            }),
            _ => self.measure_path(path, || {
                black_box(invoker.call3(black_box(a), black_box(b), black_box(c))?);
                Ok(())
            }),
        }
    }

    /// 経路ごとの最速トライアルを診断として出力
    fn report_summary(&self, report: &BenchmarkReport) {
        let fastest = |path: DispatchPath| {
            report
                .section(path)
                .and_then(BenchmarkSection::fastest)
        };

        for path in [DispatchPath::Binding, DispatchPath::Invoker] {
            if let Some(real) = fastest(path) {
                self.reporter.report_diagnostic(&format!(
                    "🏁 {} 最速トライアル: {:.6}s",
                    path.as_str(),
                    real.as_secs_f64()
                ));
            }
        }

        if let (Some(binding), Some(invoker)) =
            (fastest(DispatchPath::Binding), fastest(DispatchPath::Invoker))
        {
            if !binding.is_zero() {
                self.reporter.report_diagnostic(&format!(
                    "📊 invoker/binding 比: {:.2}x",
                    invoker.as_secs_f64() / binding.as_secs_f64()
                ));
            }
        }
    }
}
