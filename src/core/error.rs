// FFIベンチマーク用のカスタムエラー型定義

use std::path::PathBuf;
use thiserror::Error;

/// ベンチマーク固有のエラー型
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("ライブラリ読み込みエラー: {} - {source}", .path.display())]
    LibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("シンボル解決エラー: {symbol} - {source}")]
    SymbolResolution {
        symbol: String,
        #[source]
        source: libloading::Error,
    },

    #[error("シンボル解決エラー: {symbol} のアドレスがnullです")]
    NullSymbol { symbol: String },

    #[error("シグネチャ不一致: {symbol} (宣言: {declared}, 型: {actual})")]
    SignatureMismatch {
        symbol: String,
        declared: String,
        actual: String,
    },

    #[error("未対応のシグネチャ: {signature}")]
    UnsupportedSignature { signature: String },

    #[error("引数の数が一致しません: 期待値 {expected}, 実際 {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("シグネチャ解析エラー: '{input}' - {reason}")]
    InvalidSignature { input: String, reason: String },

    #[error("レポート出力エラー: {source}")]
    Report {
        #[source]
        source: anyhow::Error,
    },
}

impl BenchError {
    /// ライブラリ読み込みエラーの作成
    pub fn library_load(path: impl Into<PathBuf>, source: libloading::Error) -> Self {
        Self::LibraryLoad {
            path: path.into(),
            source,
        }
    }

    /// シンボル解決エラーの作成
    pub fn symbol_resolution(symbol: impl Into<String>, source: libloading::Error) -> Self {
        Self::SymbolResolution {
            symbol: symbol.into(),
            source,
        }
    }

    pub fn null_symbol(symbol: impl Into<String>) -> Self {
        Self::NullSymbol {
            symbol: symbol.into(),
        }
    }

    /// シグネチャ不一致エラーの作成
    pub fn signature_mismatch(
        symbol: impl Into<String>,
        declared: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::SignatureMismatch {
            symbol: symbol.into(),
            declared: declared.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn unsupported_signature(signature: impl ToString) -> Self {
        Self::UnsupportedSignature {
            signature: signature.to_string(),
        }
    }

    pub fn arity_mismatch(expected: usize, actual: usize) -> Self {
        Self::ArityMismatch { expected, actual }
    }

    /// シグネチャ解析エラーの作成
    pub fn invalid_signature(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSignature {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn report(source: anyhow::Error) -> Self {
        Self::Report { source }
    }

    /// ライブラリ・シンボルの解決に失敗したかどうか
    ///
    /// 解決失敗は起動時の致命的エラーで、再試行はしない
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Self::LibraryLoad { .. } | Self::SymbolResolution { .. } | Self::NullSymbol { .. }
        )
    }
}

/// ベンチマーク処理の結果型
pub type BenchResult<T> = Result<T, BenchError>;
