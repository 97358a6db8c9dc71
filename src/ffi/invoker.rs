//! 動的インボーカー
//!
//! 実行時に与えられた `Signature` からトランポリンを一度だけ選択し、
//! 型付きバインディングを経由せずにネイティブ関数を呼び出す。

use super::library::NativeLibrary;
use super::signature::{NativeType, Signature};
use crate::core::{BenchError, BenchResult};
use libloading::Library;
use std::ffi::c_void;
use std::sync::Arc;

/// インボーカー呼び出しの戻り値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeValue {
    Void,
    Int32(i32),
}

/// シグネチャの形ごとの呼び出し口
#[derive(Debug, Clone, Copy)]
enum Trampoline {
    Void0(unsafe extern "C" fn()),
    Void1(unsafe extern "C" fn(i32)),
    Void2(unsafe extern "C" fn(i32, i32)),
    Void3(unsafe extern "C" fn(i32, i32, i32)),
    Int0(unsafe extern "C" fn() -> i32),
    Int1(unsafe extern "C" fn(i32) -> i32),
    Int2(unsafe extern "C" fn(i32, i32) -> i32),
    Int3(unsafe extern "C" fn(i32, i32, i32) -> i32),
}

impl Trampoline {
    /// # Safety
    /// `address` は `signature` のABIを持つ関数を指していること
    unsafe fn select(signature: &Signature, address: *const c_void) -> Option<Self> {
        use std::mem::transmute;

        if signature.params().iter().any(|p| *p != NativeType::Int32) {
            return None;
        }

        let trampoline = match (signature.arity(), signature.return_type()) {
            (0, NativeType::Void) => Self::Void0(transmute::<*const c_void, _>(address)),
            (1, NativeType::Void) => Self::Void1(transmute::<*const c_void, _>(address)),
            (2, NativeType::Void) => Self::Void2(transmute::<*const c_void, _>(address)),
            (3, NativeType::Void) => Self::Void3(transmute::<*const c_void, _>(address)),
            (0, NativeType::Int32) => Self::Int0(transmute::<*const c_void, _>(address)),
            (1, NativeType::Int32) => Self::Int1(transmute::<*const c_void, _>(address)),
            (2, NativeType::Int32) => Self::Int2(transmute::<*const c_void, _>(address)),
            (3, NativeType::Int32) => Self::Int3(transmute::<*const c_void, _>(address)),
            _ => return None,
        };
        Some(trampoline)
    }
}

/// 呼び出し専用の動的インボーカー
#[derive(Debug, Clone)]
pub struct Invoker {
    _library: Option<Arc<Library>>,
    name: String,
    signature: Signature,
    trampoline: Trampoline,
}

impl Invoker {
    /// このシグネチャに対してインボーカーを構築できるかを調べる
    ///
    /// 対応するのは `:int` 引数0〜3個、戻り値 `:void` または `:int` の形のみ
    pub fn supports(signature: &Signature) -> bool {
        signature.arity() <= 3
            && signature.params().iter().all(|p| *p == NativeType::Int32)
            && matches!(
                signature.return_type(),
                NativeType::Void | NativeType::Int32
            )
    }

    /// ライブラリ・シンボル名・シグネチャからインボーカーを構築
    pub fn build(library: &NativeLibrary, name: &str, signature: Signature) -> BenchResult<Self> {
        if !Self::supports(&signature) {
            return Err(BenchError::unsupported_signature(&signature));
        }

        let address = library.resolve_address(name)?;
        // SAFETY: シンボルのABIが `signature` と一致することは呼び出し側の責任
        let mut invoker = unsafe { Self::from_raw(name, signature, address)? };
        invoker._library = Some(library.shared_handle());
        Ok(invoker)
    }

    /// 関数アドレスから直接インボーカーを構築
    ///
    /// # Safety
    /// `address` は `signature` のABIを持つ関数を指し、
    /// インボーカーが生存する間は有効であること
    pub unsafe fn from_raw(
        name: &str,
        signature: Signature,
        address: *const c_void,
    ) -> BenchResult<Self> {
        if address.is_null() {
            return Err(BenchError::null_symbol(name));
        }
        let trampoline = Trampoline::select(&signature, address)
            .ok_or_else(|| BenchError::unsupported_signature(&signature))?;

        Ok(Self {
            _library: None,
            name: name.to_string(),
            signature,
            trampoline,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn arity(&self) -> usize {
        self.signature.arity()
    }

    fn arity_error(&self, actual: usize) -> BenchError {
        BenchError::arity_mismatch(self.arity(), actual)
    }

    pub fn call0(&self) -> BenchResult<NativeValue> {
        // SAFETY: トランポリンは構築時にシグネチャから選択済み
        unsafe {
            match self.trampoline {
                Trampoline::Void0(f) => {
                    f();
                    Ok(NativeValue::Void)
                }
                Trampoline::Int0(f) => Ok(NativeValue::Int32(f())),
                _ => Err(self.arity_error(0)),
            }
        }
    }

    pub fn call1(&self, a: i32) -> BenchResult<NativeValue> {
        // SAFETY: トランポリンは構築時にシグネチャから選択済み
        unsafe {
            match self.trampoline {
                Trampoline::Void1(f) => {
                    f(a);
                    Ok(NativeValue::Void)
                }
                Trampoline::Int1(f) => Ok(NativeValue::Int32(f(a))),
                _ => Err(self.arity_error(1)),
            }
        }
    }

    pub fn call2(&self, a: i32, b: i32) -> BenchResult<NativeValue> {
        // SAFETY: トランポリンは構築時にシグネチャから選択済み
        unsafe {
            match self.trampoline {
                Trampoline::Void2(f) => {
                    f(a, b);
                    Ok(NativeValue::Void)
                }
                Trampoline::Int2(f) => Ok(NativeValue::Int32(f(a, b))),
                _ => Err(self.arity_error(2)),
            }
        }
    }

    pub fn call3(&self, a: i32, b: i32, c: i32) -> BenchResult<NativeValue> {
        // SAFETY: トランポリンは構築時にシグネチャから選択済み
        unsafe {
            match self.trampoline {
                Trampoline::Void3(f) => {
                    f(a, b, c);
                    Ok(NativeValue::Void)
                }
                Trampoline::Int3(f) => Ok(NativeValue::Int32(f(a, b, c))),
                _ => Err(self.arity_error(3)),
            }
        }
    }

    /// 引数の数を実行時に検査する汎用呼び出し
    pub fn call(&self, args: &[i32]) -> BenchResult<NativeValue> {
        if args.len() != self.arity() {
            return Err(self.arity_error(args.len()));
        }
        match *args {
            [] => self.call0(),
            [a] => self.call1(a),
            [a, b] => self.call2(a, b),
            [a, b, c] => self.call3(a, b, c),
            _ => Err(self.arity_error(args.len())),
        }
    }
}
