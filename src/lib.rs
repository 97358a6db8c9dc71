pub mod benchmarks;
pub mod cli;
pub mod core;
pub mod ffi;
pub mod services;

// よく使う型の再エクスポート
pub use crate::benchmarks::DispatchBenchmark;
pub use crate::core::{BenchError, BenchResult, BenchmarkReport, DispatchPath, Measurement};
pub use crate::ffi::{Invoker, NativeLibrary, Signature};
