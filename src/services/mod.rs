// サービス層 - コアトレイトの具象実装
// 設定と結果報告の実装を提供

pub mod config;
pub mod reporting;

// 公開API
pub use config::DefaultBenchConfig;
pub use reporting::{export_json_report, ConsoleReporter, NoOpReporter};
