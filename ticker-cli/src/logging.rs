//! 日志初始化

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// 选择日志过滤规则
///
/// 优先级：命令行 `--log-level` > `RUST_LOG` > 配置文件。
pub fn build_filter(cli_level: Option<&str>, config_level: &str) -> anyhow::Result<EnvFilter> {
    if let Some(level) = cli_level {
        return EnvFilter::try_new(level).map_err(|e| anyhow!("无效的日志级别 {level}: {e}"));
    }
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(config_level)
            .map_err(|e| anyhow!("无效的日志级别 {config_level}: {e}")),
    }
}

/// 初始化全局日志，输出到 stderr
pub fn init(filter: EnvFilter) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("初始化日志失败: {e}"))
}
