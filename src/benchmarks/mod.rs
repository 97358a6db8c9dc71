//! 呼び出しオーバーヘッドの計測
//!
//! 宣言的バインディングと動的インボーカーのディスパッチ比較を提供

pub mod runner;
pub mod timing;

pub use runner::{DispatchBenchmark, ResolvedTargets, CALL_ARGS};
pub use timing::{measure, run_section, CpuTimes};
