// 統合テスト用のヘルパー
// ビルド済みのフィクスチャライブラリとバイナリの場所を解決する

use std::path::PathBuf;
use std::process::{Command, Output};

/// ビルド済みの `bench_native` ライブラリ
///
/// 見つからない場合はテストをスキップできるよう `None` を返す
pub fn fixture_library() -> Option<PathBuf> {
    ffi_dispatch_bench::ffi::locate_fixture_library()
}

pub fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ffi_dispatch_bench"))
}

/// 環境変数の影響を受けないようにバイナリを実行
pub fn run_binary(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .env_remove("ITER")
        .env_remove("LIBTEST_PATH")
        .output()
        .expect("Failed to execute binary")
}

/// `user system total (real)` 形式の行を秒数の配列に分解
pub fn parse_measurement_line(line: &str) -> Option<[f64; 4]> {
    let cleaned = line.replace(['(', ')'], " ");
    let values: Vec<f64> = cleaned
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    values.try_into().ok()
}
