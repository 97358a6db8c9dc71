// ベンチマーク対象のネイティブ関数群
// シンボル名は `bench_<引数コード>_<戻り値コード>` の規則に従う

/// 引数1個・戻り値なし
#[no_mangle]
pub extern "C" fn bench_s32_v(_a: i32) {}

/// 引数2個・戻り値なし
#[no_mangle]
pub extern "C" fn bench_s32s32_v(_a: i32, _b: i32) {}

/// 引数3個・戻り値なし（計測の主対象）
#[no_mangle]
pub extern "C" fn bench_s32s32s32_v(_a: i32, _b: i32, _c: i32) {}

#[no_mangle]
pub extern "C" fn bench_s32_s32(a: i32) -> i32 {
    a
}

#[no_mangle]
pub extern "C" fn bench_s32s32_s32(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

#[no_mangle]
pub extern "C" fn bench_s32s32s32_s32(a: i32, b: i32, c: i32) -> i32 {
    a.wrapping_add(b).wrapping_add(c)
}
