// 共有ライブラリのハンドル管理

use crate::core::{BenchError, BenchResult};
use libloading::Library;
use std::ffi::{c_void, OsString};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// フィクスチャライブラリのクレート名
pub const FIXTURE_LIBRARY_NAME: &str = "bench_native";

/// 読み込み済みネイティブライブラリ
///
/// ハンドルは `Arc` で共有し、バインディングとインボーカーが
/// 生存している間はアンロードされない
#[derive(Debug, Clone)]
pub struct NativeLibrary {
    path: PathBuf,
    inner: Arc<Library>,
}

impl NativeLibrary {
    /// ライブラリを読み込む
    ///
    /// 読み込みに失敗した場合は起動時の致命的エラーとなる
    pub fn open(path: impl AsRef<Path>) -> BenchResult<Self> {
        let path = path.as_ref();
        // SAFETY: 読み込むライブラリの初期化処理は信頼できるものとして扱う
        let inner = unsafe { Library::new(path) }
            .map_err(|e| BenchError::library_load(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            inner: Arc::new(inner),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn handle(&self) -> &Library {
        &self.inner
    }

    pub(crate) fn shared_handle(&self) -> Arc<Library> {
        Arc::clone(&self.inner)
    }

    /// シンボルのアドレスを解決
    pub fn resolve_address(&self, symbol: &str) -> BenchResult<*const c_void> {
        // SAFETY: アドレスとして取り出すだけで、ここでは呼び出さない
        let address = unsafe {
            let resolved = self
                .inner
                .get::<*const c_void>(symbol.as_bytes())
                .map_err(|e| BenchError::symbol_resolution(symbol, e))?;
            *resolved
        };

        if address.is_null() {
            return Err(BenchError::null_symbol(symbol));
        }
        Ok(address)
    }
}

/// プラットフォーム固有のライブラリファイル名 (`libbench_native.so` など)
pub fn fixture_library_filename() -> OsString {
    libloading::library_filename(FIXTURE_LIBRARY_NAME)
}

/// 実行ファイルの隣（またはその親ディレクトリ）にあるフィクスチャライブラリを探す
///
/// テスト・ベンチマークのバイナリは `target/<profile>/deps` に置かれるため、
/// 親ディレクトリも候補にする
pub fn locate_fixture_library() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let filename = fixture_library_filename();

    let dir = exe.parent()?;
    let candidates: Vec<PathBuf> = [Some(dir), dir.parent()]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(&filename))
        .collect();

    candidates.into_iter().find(|candidate| candidate.is_file())
}
