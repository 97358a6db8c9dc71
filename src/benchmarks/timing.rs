//! 計測ループとCPU時間の取得

use crate::core::{BenchReporter, BenchResult, BenchmarkSection, DispatchPath, Measurement};
use std::time::{Duration, Instant};

/// プロセスのCPU時間のスナップショット
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: Duration,
    pub system: Duration,
}

impl CpuTimes {
    #[cfg(unix)]
    pub fn now() -> Self {
        let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
        // SAFETY: getrusageは渡したバッファのみを書き換える
        let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
        if rc != 0 {
            return Self::default();
        }
        // SAFETY: 成功時はバッファ全体が初期化済み
        let usage = unsafe { usage.assume_init() };

        Self {
            user: timeval_to_duration(usage.ru_utime),
            system: timeval_to_duration(usage.ru_stime),
        }
    }

    // CPU時間を取得できない環境では常にゼロ
    #[cfg(not(unix))]
    pub fn now() -> Self {
        Self::default()
    }

    fn elapsed_since(&self, earlier: &Self) -> Self {
        Self {
            user: self.user.saturating_sub(earlier.user),
            system: self.system.saturating_sub(earlier.system),
        }
    }
}

#[cfg(unix)]
fn timeval_to_duration(tv: libc::timeval) -> Duration {
    Duration::from_secs(tv.tv_sec.max(0) as u64) + Duration::from_micros(tv.tv_usec.max(0) as u64)
}

/// 処理全体のCPU時間と経過時間を計測
pub fn measure<F>(f: F) -> BenchResult<Measurement>
where
    F: FnOnce() -> BenchResult<()>,
{
    let cpu_start = CpuTimes::now();
    let start = Instant::now();

    f()?;

    let real = start.elapsed();
    let cpu = CpuTimes::now().elapsed_since(&cpu_start);

    Ok(Measurement {
        user: cpu.user,
        system: cpu.system,
        real,
    })
}

/// 固定回数の呼び出しをトライアル数だけ繰り返し、1トライアルごとに報告する
///
/// ウォームアップや統計処理は行わない
pub fn run_section<R, F>(
    path: DispatchPath,
    heading: String,
    iterations: u64,
    trials: usize,
    reporter: &R,
    mut call: F,
) -> BenchResult<BenchmarkSection>
where
    R: BenchReporter + ?Sized,
    F: FnMut() -> BenchResult<()>,
{
    reporter.report_heading(&heading);
    let mut section = BenchmarkSection::new(path, heading);

    for trial in 0..trials {
        let measurement = measure(|| {
            for _ in 0..iterations {
                call()?;
            }
            Ok(())
        })?;

        reporter.report_measurement(trial, &measurement);
        section.measurements.push(measurement);
    }

    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::MockBenchReporter;
    use crate::core::BenchError;
    use mockall::predicate::*;
    use mockall::Sequence;

    #[test]
    fn test_cpu_times_are_monotonic() {
        let first = CpuTimes::now();
        let mut acc = 0u64;
        for i in 0..100_000u64 {
            acc = std::hint::black_box(acc.wrapping_add(i));
        }
        let second = CpuTimes::now();

        assert!(second.user >= first.user);
        assert!(second.system >= first.system);
    }

    #[test]
    fn test_measure_propagates_error() {
        let result = measure(|| Err(BenchError::arity_mismatch(3, 0)));
        assert!(result.is_err());
    }

    #[test]
    fn test_run_section_counts_calls_and_reports() {
        let mut reporter = MockBenchReporter::new();
        let mut seq = Sequence::new();

        reporter
            .expect_report_heading()
            .with(eq("heading"))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        reporter
            .expect_report_measurement()
            .times(10)
            .in_sequence(&mut seq)
            .return_const(());

        let mut calls = 0u64;
        let section = run_section(
            DispatchPath::Binding,
            "heading".to_string(),
            25,
            10,
            &reporter,
            || {
                calls += 1;
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(calls, 250);
        assert_eq!(section.measurements.len(), 10);
        assert_eq!(section.heading, "heading");
    }

    #[test]
    fn test_run_section_with_zero_iterations() {
        let mut reporter = MockBenchReporter::new();
        reporter.expect_report_heading().times(1).return_const(());
        reporter.expect_report_measurement().times(10).return_const(());

        let mut calls = 0u64;
        let section = run_section(
            DispatchPath::Invoker,
            "heading".to_string(),
            0,
            10,
            &reporter,
            || {
                calls += 1;
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(calls, 0);
        assert_eq!(section.measurements.len(), 10);
        for measurement in &section.measurements {
            assert!(measurement.real < Duration::from_secs(1));
        }
    }

    #[test]
    fn test_run_section_stops_on_call_error() {
        let mut reporter = MockBenchReporter::new();
        reporter.expect_report_heading().times(1).return_const(());
        reporter.expect_report_measurement().times(0);

        let result = run_section(
            DispatchPath::Invoker,
            "heading".to_string(),
            5,
            10,
            &reporter,
            || Err(BenchError::arity_mismatch(3, 2)),
        );

        assert!(matches!(result, Err(BenchError::ArityMismatch { .. })));
    }
}
