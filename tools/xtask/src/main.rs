//! # xtask - 开发辅助工具
//!
//! ## 命令
//!
//! - `check-all`: fmt + clippy + test 门禁
//! - `cov-core`: ticker-core 覆盖率报告（需要 cargo-llvm-cov）
//! - `batch-check`: 检查 demos/ 下的任务文件和配置文件

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use ticker_cli::{BatchFile, CliConfig, LabelJob};
use ticker_core::{extract_start_value, locate};

/// `check-all` 依次执行的 cargo 子命令
const GATE_STEPS: &[&[&str]] = &[
    &["fmt", "--all", "--", "--check"],
    &["clippy", "--workspace", "--all-targets"],
    &["test", "--workspace"],
];

/// 默认检查目录（相对于 workspace root）
const DEFAULT_DEMOS_DIR: &str = "demos";

/// 按配置文件检查的文件名
const CONFIG_FILE_NAME: &str = "ticker.json";

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xtask error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => GATE_STEPS.iter().try_for_each(|step| cargo(step)),
        "cov-core" => {
            cargo(&["llvm-cov", "--version"]).map_err(|_| {
                anyhow::anyhow!(
                    "cargo llvm-cov 不可用，请先执行：\n  \
                     cargo install cargo-llvm-cov\n  \
                     rustup component add llvm-tools-preview"
                )
            })?;
            cargo(&["llvm-cov", "-p", "ticker-core", "--html"])?;
            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
            Ok(())
        }
        "batch-check" => batch_check(args.next().as_deref()),
        "help" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }
}

/// 运行一条 cargo 命令，失败时返回错误
fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let step = format!("cargo {}", args.join(" "));
    eprintln!("\n==> {step}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all             fmt、clippy、test 门禁检查
  cov-core              ticker-core 覆盖率报告
  batch-check [path]    检查 JSON 文件（默认 demos/）

  ticker.json 按配置文件检查，其余按任务文件检查。
  任务文件中的以下情况给出警告：
    - 文本中没有数字（按回退策略处理）
    - 小数位数为负（按 0 处理）
    - 动画经过负数（原文本中的 `-` 不会被替换）
"#
    );
}

//=============================================================================
// batch-check
//=============================================================================

#[derive(Default)]
struct CheckSummary {
    files: usize,
    labels: usize,
    errors: usize,
    warnings: usize,
}

impl CheckSummary {
    fn error(&mut self, id: &str, message: impl std::fmt::Display) {
        eprintln!("[ERROR] {id}: {message}");
        self.errors += 1;
    }

    fn warn(&mut self, id: &str, message: impl std::fmt::Display) {
        eprintln!("[WARN] {id}: {message}");
        self.warnings += 1;
    }
}

fn batch_check(path: Option<&str>) -> anyhow::Result<()> {
    let root = PathBuf::from(path.unwrap_or(DEFAULT_DEMOS_DIR));
    let files = if root.is_file() {
        vec![root]
    } else if root.is_dir() {
        let mut files = Vec::new();
        collect_json_files(&root, &mut files)?;
        files.sort();
        files
    } else {
        anyhow::bail!("路径不存在: {}（请在 workspace 根目录运行）", root.display());
    };

    let mut summary = CheckSummary::default();
    for file in &files {
        check_file(file, &mut summary);
    }

    eprintln!(
        "\n检查完成: {} 个文件, {} 个标签, {} 个错误, {} 个警告",
        summary.files, summary.labels, summary.errors, summary.warnings
    );
    if summary.errors > 0 {
        anyhow::bail!("检查发现错误");
    }
    Ok(())
}

fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_json_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    Ok(())
}

fn check_file(file: &Path, summary: &mut CheckSummary) {
    let id = file.display().to_string();
    summary.files += 1;

    if file.file_name().is_some_and(|name| name == CONFIG_FILE_NAME) {
        if let Err(e) = CliConfig::read(file) {
            summary.error(&id, e);
        }
        return;
    }

    match BatchFile::load(file) {
        Ok(batch) if batch.labels.is_empty() => summary.warn(&id, "没有任何标签"),
        Ok(batch) => {
            for (index, job) in batch.labels.iter().enumerate() {
                summary.labels += 1;
                check_job(&format!("{id} #{index}"), job, summary);
            }
        }
        Err(e) => summary.error(&id, e),
    }
}

fn check_job(id: &str, job: &LabelJob, summary: &mut CheckSummary) {
    if locate(&job.text).is_none() {
        summary.warn(id, format!("文本中没有数字，将按回退策略处理: {:?}", job.text));
    }
    if job.decimals.is_some_and(|d| d < 0) {
        summary.warn(id, "小数位数为负，按 0 处理");
    }

    // 数字段不含符号，写入负数时原有的 `-` 会保留
    if extract_start_value(&job.text) < 0.0 || job.to.to_f64() < 0.0 {
        summary.warn(id, "动画经过负数，文本中的负号会叠加");
    }
}
