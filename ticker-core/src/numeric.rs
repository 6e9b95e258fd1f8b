//! # Numeric 模块
//!
//! 调用方传入的目标值。
//!
//! 调用方可以用任意原生数值类型指定目标值，进入会话后立即转换为 `f64`，
//! 所有插值运算都在 `f64` 上进行。需要把结果回显给调用方时，
//! 通过 [`NumericValue::coerce`] 转回调用方原本的数值种类。

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::format::natural_string;

/// 数值（整数或浮点）
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    /// 有符号整数
    Signed(i64),
    /// 无符号整数
    Unsigned(u64),
    /// 浮点数
    Float(f64),
}

impl NumericValue {
    /// 转换为 `f64`
    pub fn to_f64(self) -> f64 {
        match self {
            NumericValue::Signed(v) => v as f64,
            NumericValue::Unsigned(v) => v as f64,
            NumericValue::Float(v) => v,
        }
    }

    /// 按当前值的种类构造新值
    ///
    /// 整数种类向零截断并饱和到类型范围（NaN 变为 0）。
    pub fn coerce(self, value: f64) -> NumericValue {
        match self {
            NumericValue::Signed(_) => NumericValue::Signed(value as i64),
            NumericValue::Unsigned(_) => NumericValue::Unsigned(value as u64),
            NumericValue::Float(_) => NumericValue::Float(value),
        }
    }

    /// 是否为整数种类
    pub fn is_integer(&self) -> bool {
        !matches!(self, NumericValue::Float(_))
    }
}

impl Default for NumericValue {
    fn default() -> Self {
        NumericValue::Signed(0)
    }
}

impl PartialEq for NumericValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NumericValue::Signed(a), NumericValue::Signed(b)) => a == b,
            (NumericValue::Unsigned(a), NumericValue::Unsigned(b)) => a == b,
            _ => self.to_f64() == other.to_f64(),
        }
    }
}

impl PartialOrd for NumericValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (NumericValue::Signed(a), NumericValue::Signed(b)) => a.partial_cmp(b),
            (NumericValue::Unsigned(a), NumericValue::Unsigned(b)) => a.partial_cmp(b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Signed(v) => write!(f, "{v}"),
            NumericValue::Unsigned(v) => write!(f, "{v}"),
            NumericValue::Float(v) => f.write_str(&natural_string(*v)),
        }
    }
}

impl FromStr for NumericValue {
    type Err = ParseError;

    /// 整数字面量解析为整数种类，其余按有限浮点数解析
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(v) = s.parse::<i64>() {
            return Ok(NumericValue::Signed(v));
        }
        if let Ok(v) = s.parse::<u64>() {
            return Ok(NumericValue::Unsigned(v));
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(NumericValue::Float(v)),
            _ => Err(ParseError::InvalidNumber {
                input: s.to_string(),
            }),
        }
    }
}

macro_rules! impl_from_primitive {
    ($variant:ident, $target:ty, $($source:ty),+) => {
        $(
            impl From<$source> for NumericValue {
                fn from(value: $source) -> Self {
                    NumericValue::$variant(value as $target)
                }
            }
        )+
    };
}

impl_from_primitive!(Signed, i64, i8, i16, i32, i64, isize);
impl_from_primitive!(Unsigned, u64, u8, u16, u32, u64, usize);
impl_from_primitive!(Float, f64, f32, f64);
