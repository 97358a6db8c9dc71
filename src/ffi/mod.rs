// FFIレイヤー - ライブラリ読み込みと2種類のディスパッチ経路
// 宣言的バインディング（静的な型付きスタブ）と動的インボーカーを提供

pub mod binding;
pub mod invoker;
pub mod library;
pub mod signature;

// 公開API
pub use binding::{AttachedFunction, BenchS32x3Void, BoundStub, NativeArg, NativeFn, NativeReturn};
pub use invoker::{Invoker, NativeValue};
pub use library::{fixture_library_filename, locate_fixture_library, NativeLibrary};
pub use signature::{NativeType, Signature};
