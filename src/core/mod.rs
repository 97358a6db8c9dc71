// コアレイヤー - 基盤となるトレイト、型、エラー定義

pub mod error;
pub mod traits;
pub mod types;

// 公開API
pub use error::{BenchError, BenchResult};
pub use traits::{BenchConfig, BenchReporter};
pub use types::{BenchmarkReport, BenchmarkSection, DispatchPath, Measurement};
