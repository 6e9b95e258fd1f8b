//! # Format 模块
//!
//! 把数值渲染为显示字符串，并补齐所需的小数位。

/// 数值的自然字符串形式
///
/// 使用最短的可往返表示；整数值带一个 `.0` 后缀（`98.0` 而不是 `98`）。
pub fn natural_string(value: f64) -> String {
    let mut output = value.to_string();
    if value.is_finite() && !output.contains('.') {
        output.push_str(".0");
    }
    output
}

/// 是否等于自身的截断值
fn is_integral(value: f64) -> bool {
    value.trunc() == value
}

/// 推断数值的小数位数
///
/// 整数值返回 0，否则返回自然字符串中小数点之后的字符数。
pub fn infer_decimals(value: f64) -> u32 {
    if is_integral(value) {
        return 0;
    }

    let text = natural_string(value);
    match text.split_once('.') {
        Some((_, decimals)) => decimals.chars().count() as u32,
        None => 0,
    }
}

/// 补齐小数位
///
/// 在自然字符串后追加 `'0'`，直到小数点后恰好有 `required` 位。
/// 整数值的自然字符串已经带有一个 `0`，所以只追加 `required - 1` 个。
/// 已有位数超过 `required` 时不做截断。
pub fn pad_with_decimals(value: f64, required: u32) -> String {
    let mut output = natural_string(value);
    let present = infer_decimals(value);

    if required > present {
        let count = if is_integral(value) {
            required - 1
        } else {
            required - present
        };
        output.extend(std::iter::repeat_n('0', count as usize));
    }

    output
}

/// 按指定小数位渲染数值
///
/// 先四舍五入（远离零）到 `decimals` 位，`decimals == 0` 时输出整数，
/// 否则输出补齐后的小数。
pub fn format_value(value: f64, decimals: u32) -> String {
    let power = 10f64.powi(decimals as i32);
    let rounded = (value * power).round() / power;

    if decimals == 0 {
        (rounded as i64).to_string()
    } else {
        pad_with_decimals(rounded, decimals)
    }
}
