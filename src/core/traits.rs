// ベンチマークハーネスのトレイト定義

use super::types::{DispatchPath, Measurement};
use crate::ffi::Signature;
use mockall::automock;
use std::path::PathBuf;

/// ベンチマーク設定を抽象化するトレイト
#[automock]
pub trait BenchConfig {
    /// 1トライアルあたりの呼び出し回数
    fn iterations(&self) -> u64;

    /// トライアル数
    fn trials(&self) -> usize;

    /// 読み込むネイティブライブラリのパス
    fn library_path(&self) -> PathBuf;

    /// 両経路で使う関数シグネチャ
    fn signature(&self) -> Signature;

    /// 解決するシンボル名
    fn symbol(&self) -> String;

    /// 動的インボーカー経路を計測するかどうか
    fn invoker_enabled(&self) -> bool;
}

/// 計測結果の報告を抽象化するトレイト
#[automock]
pub trait BenchReporter {
    /// セクション見出しの報告
    fn report_heading(&self, heading: &str);

    /// トライアル1件分の計測値の報告
    fn report_measurement(&self, trial: usize, measurement: &Measurement);

    /// 経路がスキップされたことの報告
    fn report_skipped(&self, path: DispatchPath, reason: &str);

    /// 診断メッセージ
    fn report_diagnostic(&self, message: &str);
}
