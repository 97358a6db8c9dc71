//! ネイティブ関数シグネチャの型定義
//!
//! 引数・戻り値の種類を実行時の値として表現し、
//! バインディングと動的インボーカーの両方で共有する

use crate::core::{BenchError, BenchResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ネイティブ型の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeType {
    Void,
    Int32,
    Int64,
    Float64,
}

impl NativeType {
    /// 表示用の名前 (`:int` 形式)
    pub fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Int32 => "int",
            Self::Int64 => "int64",
            Self::Float64 => "double",
        }
    }

    /// シンボル名に埋め込む短縮コード
    pub fn symbol_code(self) -> &'static str {
        match self {
            Self::Void => "v",
            Self::Int32 => "s32",
            Self::Int64 => "s64",
            Self::Float64 => "f64",
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name())
    }
}

impl FromStr for NativeType {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().trim_start_matches(':');
        match token {
            "void" | "v" => Ok(Self::Void),
            "int" | "i32" | "s32" | "int32" => Ok(Self::Int32),
            "int64" | "i64" | "s64" | "long_long" => Ok(Self::Int64),
            "double" | "f64" | "float64" => Ok(Self::Float64),
            _ => Err(BenchError::invalid_signature(s, "未知の型です")),
        }
    }
}

/// 関数シグネチャ（引数の並び + 戻り値）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    params: Vec<NativeType>,
    ret: NativeType,
}

impl Signature {
    pub fn new(params: Vec<NativeType>, ret: NativeType) -> Self {
        Self { params, ret }
    }

    /// 計測対象の標準シグネチャ `[ :int, :int, :int ], :void`
    pub fn s32x3_void() -> Self {
        Self::new(vec![NativeType::Int32; 3], NativeType::Void)
    }

    pub fn params(&self) -> &[NativeType] {
        &self.params
    }

    pub fn return_type(&self) -> NativeType {
        self.ret
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// シグネチャから命名規則に従ったシンボル名を導出
    ///
    /// 例: `[ :int, :int, :int ], :void` → `bench_s32s32s32_v`
    pub fn bench_symbol(&self) -> String {
        let params: String = if self.params.is_empty() {
            NativeType::Void.symbol_code().to_string()
        } else {
            self.params.iter().map(|p| p.symbol_code()).collect()
        };
        format!("bench_{params}_{}", self.ret.symbol_code())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        if params.is_empty() {
            write!(f, "[ ], {}", self.ret)
        } else {
            write!(f, "[ {} ], {}", params.join(", "), self.ret)
        }
    }
}

impl FromStr for Signature {
    type Err = BenchError;

    /// `int,int,int -> void` 形式の文字列を解析
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (params, ret) = s
            .split_once("->")
            .ok_or_else(|| BenchError::invalid_signature(s, "'->' が見つかりません"))?;

        let ret: NativeType = ret.parse()?;

        let params = params.trim();
        let params = if params.is_empty() {
            Vec::new()
        } else {
            params
                .split(',')
                .map(str::parse)
                .collect::<BenchResult<Vec<NativeType>>>()?
        };

        if params.contains(&NativeType::Void) {
            return Err(BenchError::invalid_signature(s, "引数にvoidは使用できません"));
        }

        Ok(Self::new(params, ret))
    }
}
