//! 宣言的バインディング
//!
//! Rustの関数ポインタ型でシグネチャを宣言し、ライブラリのシンボルに
//! 静的に型付けされたスタブとして結び付ける。呼び出し時の検査は行わない。

use super::library::NativeLibrary;
use super::signature::{NativeType, Signature};
use crate::core::{BenchError, BenchResult};
use libloading::Library;
use std::sync::Arc;

/// 引数として渡せるRust型
pub trait NativeArg: Copy {
    const KIND: NativeType;
}

/// 戻り値として受け取れるRust型
pub trait NativeReturn {
    const KIND: NativeType;
}

impl NativeArg for i32 {
    const KIND: NativeType = NativeType::Int32;
}

impl NativeArg for i64 {
    const KIND: NativeType = NativeType::Int64;
}

impl NativeArg for f64 {
    const KIND: NativeType = NativeType::Float64;
}

impl NativeReturn for () {
    const KIND: NativeType = NativeType::Void;
}

impl NativeReturn for i32 {
    const KIND: NativeType = NativeType::Int32;
}

impl NativeReturn for i64 {
    const KIND: NativeType = NativeType::Int64;
}

impl NativeReturn for f64 {
    const KIND: NativeType = NativeType::Float64;
}

/// C ABIの関数ポインタ型とそのシグネチャの対応
pub trait NativeFn: Copy {
    fn signature() -> Signature;
}

impl<R: NativeReturn> NativeFn for unsafe extern "C" fn() -> R {
    fn signature() -> Signature {
        Signature::new(Vec::new(), R::KIND)
    }
}

impl<A: NativeArg, R: NativeReturn> NativeFn for unsafe extern "C" fn(A) -> R {
    fn signature() -> Signature {
        Signature::new(vec![A::KIND], R::KIND)
    }
}

impl<A: NativeArg, B: NativeArg, R: NativeReturn> NativeFn for unsafe extern "C" fn(A, B) -> R {
    fn signature() -> Signature {
        Signature::new(vec![A::KIND, B::KIND], R::KIND)
    }
}

impl<A: NativeArg, B: NativeArg, C: NativeArg, R: NativeReturn> NativeFn
    for unsafe extern "C" fn(A, B, C) -> R
{
    fn signature() -> Signature {
        Signature::new(vec![A::KIND, B::KIND, C::KIND], R::KIND)
    }
}

/// ライブラリに結び付けられた型付きスタブ
pub struct AttachedFunction<F: NativeFn> {
    // 関数ポインタより先にライブラリが解放されないよう保持する
    _library: Arc<Library>,
    name: String,
    func: F,
}

impl<F: NativeFn> AttachedFunction<F> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> Signature {
        F::signature()
    }
}

impl<R: NativeReturn> AttachedFunction<unsafe extern "C" fn() -> R> {
    pub fn call(&self) -> R {
        // SAFETY: シグネチャは宣言時に検査済み
        unsafe { (self.func)() }
    }
}

impl<A: NativeArg, R: NativeReturn> AttachedFunction<unsafe extern "C" fn(A) -> R> {
    pub fn call(&self, a: A) -> R {
        // SAFETY: シグネチャは宣言時に検査済み
        unsafe { (self.func)(a) }
    }
}

impl<A: NativeArg, B: NativeArg, R: NativeReturn>
    AttachedFunction<unsafe extern "C" fn(A, B) -> R>
{
    pub fn call(&self, a: A, b: B) -> R {
        // SAFETY: シグネチャは宣言時に検査済み
        unsafe { (self.func)(a, b) }
    }
}

impl<A: NativeArg, B: NativeArg, C: NativeArg, R: NativeReturn>
    AttachedFunction<unsafe extern "C" fn(A, B, C) -> R>
{
    pub fn call(&self, a: A, b: B, c: C) -> R {
        // SAFETY: シグネチャは宣言時に検査済み
        unsafe { (self.func)(a, b, c) }
    }
}

impl NativeLibrary {
    /// シンボルを型付きスタブとして宣言する
    ///
    /// `F` の型と `signature` が一致しない場合、またはシンボルが
    /// 見つからない場合は宣言時点でエラーとなる
    pub fn attach_function<F: NativeFn>(
        &self,
        name: &str,
        signature: &Signature,
    ) -> BenchResult<AttachedFunction<F>> {
        let actual = F::signature();
        if actual != *signature {
            return Err(BenchError::signature_mismatch(name, signature, actual));
        }

        // SAFETY: 関数ポインタ型は宣言されたシグネチャと一致している
        let func = unsafe {
            let symbol = self
                .handle()
                .get::<F>(name.as_bytes())
                .map_err(|e| BenchError::symbol_resolution(name, e))?;
            *symbol
        };

        Ok(AttachedFunction {
            _library: self.shared_handle(),
            name: name.to_string(),
            func,
        })
    }
}

/// 計測対象のスタブ型
pub type BenchS32x3Void = unsafe extern "C" fn(i32, i32, i32);

/// 実行時のシグネチャに応じて選ぶ宣言済みスタブ
///
/// `:int` 引数1〜3個、戻り値 `:void` または `:int` の形を宣言している
pub enum BoundStub {
    Void1(AttachedFunction<unsafe extern "C" fn(i32)>),
    Void2(AttachedFunction<unsafe extern "C" fn(i32, i32)>),
    Void3(AttachedFunction<BenchS32x3Void>),
    Int1(AttachedFunction<unsafe extern "C" fn(i32) -> i32>),
    Int2(AttachedFunction<unsafe extern "C" fn(i32, i32) -> i32>),
    Int3(AttachedFunction<unsafe extern "C" fn(i32, i32, i32) -> i32>),
}

impl BoundStub {
    /// シグネチャに一致する宣言でシンボルを結び付ける
    pub fn attach(library: &NativeLibrary, name: &str, signature: &Signature) -> BenchResult<Self> {
        if signature.params().iter().any(|p| *p != NativeType::Int32) {
            return Err(BenchError::unsupported_signature(signature));
        }

        let stub = match (signature.arity(), signature.return_type()) {
            (1, NativeType::Void) => Self::Void1(library.attach_function(name, signature)?),
            (2, NativeType::Void) => Self::Void2(library.attach_function(name, signature)?),
            (3, NativeType::Void) => Self::Void3(library.attach_function(name, signature)?),
            (1, NativeType::Int32) => Self::Int1(library.attach_function(name, signature)?),
            (2, NativeType::Int32) => Self::Int2(library.attach_function(name, signature)?),
            (3, NativeType::Int32) => Self::Int3(library.attach_function(name, signature)?),
            _ => return Err(BenchError::unsupported_signature(signature)),
        };
        Ok(stub)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Void1(f) => f.name(),
            Self::Void2(f) => f.name(),
            Self::Void3(f) => f.name(),
            Self::Int1(f) => f.name(),
            Self::Int2(f) => f.name(),
            Self::Int3(f) => f.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::library::locate_fixture_library;

    #[test]
    fn test_native_fn_signatures() {
        assert_eq!(<BenchS32x3Void as NativeFn>::signature(), Signature::s32x3_void());

        type Sum2 = unsafe extern "C" fn(i32, i32) -> i32;
        assert_eq!(
            <Sum2 as NativeFn>::signature(),
            Signature::new(vec![NativeType::Int32; 2], NativeType::Int32)
        );

        type Mixed = unsafe extern "C" fn(i64, f64) -> f64;
        assert_eq!(
            <Mixed as NativeFn>::signature().to_string(),
            "[ :int64, :double ], :double"
        );
    }

    fn fixture() -> Option<NativeLibrary> {
        let path = locate_fixture_library()?;
        NativeLibrary::open(path).ok()
    }

    #[test]
    fn test_attach_and_call_fixture() {
        let Some(library) = fixture() else {
            println!("Skipping binding test - fixture library not found");
            return;
        };

        let bench = library
            .attach_function::<BenchS32x3Void>("bench_s32s32s32_v", &Signature::s32x3_void())
            .unwrap();
        bench.call(0, 1, 2);
        assert_eq!(bench.name(), "bench_s32s32s32_v");

        let sum_signature = Signature::new(vec![NativeType::Int32; 3], NativeType::Int32);
        let sum = library
            .attach_function::<unsafe extern "C" fn(i32, i32, i32) -> i32>(
                "bench_s32s32s32_s32",
                &sum_signature,
            )
            .unwrap();
        assert_eq!(sum.call(0, 1, 2), 3);
    }

    #[test]
    fn test_attach_rejects_mismatched_declaration() {
        let Some(library) = fixture() else {
            println!("Skipping binding test - fixture library not found");
            return;
        };

        let declared = Signature::new(vec![NativeType::Int32; 2], NativeType::Void);
        let result = library.attach_function::<BenchS32x3Void>("bench_s32s32s32_v", &declared);

        assert!(matches!(
            result,
            Err(BenchError::SignatureMismatch { .. })
        ));
    }

    #[test]
    fn test_bound_stub_follows_signature() {
        let Some(library) = fixture() else {
            println!("Skipping binding test - fixture library not found");
            return;
        };

        let signature: Signature = "int, int -> int".parse().unwrap();
        let stub = BoundStub::attach(&library, &signature.bench_symbol(), &signature).unwrap();

        assert_eq!(stub.name(), "bench_s32s32_s32");
        match stub {
            BoundStub::Int2(f) => assert_eq!(f.call(40, 2), 42),
            _ => panic!("unexpected stub shape"),
        }
    }

    #[test]
    fn test_bound_stub_rejects_undeclared_shape() {
        let Some(library) = fixture() else {
            println!("Skipping binding test - fixture library not found");
            return;
        };

        let signature: Signature = "double -> void".parse().unwrap();
        let result = BoundStub::attach(&library, "bench_f64_v", &signature);

        assert!(matches!(
            result,
            Err(BenchError::UnsupportedSignature { .. })
        ));
    }

    #[test]
    fn test_attach_missing_symbol_fails() {
        let Some(library) = fixture() else {
            println!("Skipping binding test - fixture library not found");
            return;
        };

        let result =
            library.attach_function::<BenchS32x3Void>("bench_missing_v", &Signature::s32x3_void());

        let error = result.err().unwrap();
        assert!(error.is_resolution_failure());
        assert!(error.to_string().contains("bench_missing_v"));
    }
}
