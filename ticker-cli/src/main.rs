//! # Ticker
//!
//! 数字滚动动画演示 - 在终端中模拟逐帧更新。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p ticker-cli -- run --text "Temperature: 98 F" --to 23.5 --curve ease-out
//! cargo run -p ticker-cli -- run --text "Score: 0" --to 100 --duration 1 --fps 10 --realtime
//! cargo run -p ticker-cli -- batch demos/batch.json
//! cargo run -p ticker-cli -- locate "Balance: $1,250.50"
//! cargo run -p ticker-cli -- format 29.1 2
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use ticker_cli::config::validate_frame_rate;
use ticker_cli::{BatchFile, CliConfig, FrameUpdate, LabelJob, Simulation, logging};
use ticker_core::{AnimationCurve, NumericValue, extract_start_value, format_value, locate};
use tracing::warn;

#[derive(Parser)]
#[command(name = "ticker")]
#[command(about = "数字滚动动画演示 - 在终端中模拟逐帧更新")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件（默认：ticker.json）
    #[arg(short, long, default_value = "ticker.json", global = true)]
    config: PathBuf,

    /// 日志级别，覆盖 RUST_LOG 和配置文件
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行单个标签的动画
    Run {
        /// 初始文本
        #[arg(short, long)]
        text: String,

        /// 目标数值
        ///
        /// 文本中只定位数字，不含符号；动画经过负数时，
        /// 原文本里的 `-` 会保留，每帧写入的负数符号会叠加在前面。
        #[arg(long, allow_negative_numbers = true)]
        to: NumericValue,

        /// 时长（秒），默认使用配置
        #[arg(short, long, allow_negative_numbers = true)]
        duration: Option<f64>,

        /// 动画曲线：linear / ease-in / ease-out
        #[arg(long)]
        curve: Option<AnimationCurve>,

        /// 小数位数
        #[arg(long, allow_negative_numbers = true)]
        decimals: Option<i32>,

        /// 帧率，默认使用配置
        #[arg(long)]
        fps: Option<u32>,

        /// 按真实时间播放
        #[arg(long)]
        realtime: bool,
    },

    /// 从 JSON 文件批量运行
    Batch {
        /// 任务文件路径
        file: PathBuf,

        /// 帧率，默认使用配置
        #[arg(long)]
        fps: Option<u32>,

        /// 按真实时间播放
        #[arg(long)]
        realtime: bool,
    },

    /// 定位文本中的数字段
    Locate {
        /// 待分析的文本
        text: String,
    },

    /// 按小数位格式化数值
    Format {
        #[arg(allow_negative_numbers = true)]
        value: f64,

        #[arg(allow_negative_numbers = true)]
        decimals: i32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = CliConfig::read(&cli.config)
        .with_context(|| format!("加载配置失败: {}", cli.config.display()))?;
    let missing = loaded.is_none();
    let config = loaded.unwrap_or_default();

    logging::init(logging::build_filter(
        cli.log_level.as_deref(),
        &config.log_level,
    )?)?;
    if missing {
        warn!(path = %cli.config.display(), "配置文件不存在，使用默认配置");
    }

    match cli.command {
        Commands::Run {
            text,
            to,
            duration,
            curve,
            decimals,
            fps,
            realtime,
        } => {
            let job = LabelJob {
                text,
                to,
                duration,
                curve,
                decimals,
            };
            run_jobs(&config, vec![job], fps, realtime)
        }
        Commands::Batch {
            file,
            fps,
            realtime,
        } => {
            let batch = load_batch(&file)?;
            run_jobs(&config, batch.labels, fps, realtime)
        }
        Commands::Locate { text } => {
            match locate(&text) {
                Some(span) => {
                    println!(
                        "数字段: \"{}\" (字符 {}..={})",
                        span.as_str(&text),
                        span.start,
                        span.end
                    );
                }
                None => println!("未找到数字"),
            }
            println!("起始值: {}", extract_start_value(&text));
            Ok(())
        }
        Commands::Format { value, decimals } => {
            println!("{}", format_value(value, decimals.max(0) as u32));
            Ok(())
        }
    }
}

fn load_batch(path: &Path) -> anyhow::Result<BatchFile> {
    BatchFile::load(path).with_context(|| format!("读取任务文件失败: {}", path.display()))
}

/// 运行任务并打印每次文本变化
fn run_jobs(
    config: &CliConfig,
    jobs: Vec<LabelJob>,
    fps: Option<u32>,
    realtime: bool,
) -> anyhow::Result<()> {
    let frame_rate = fps.unwrap_or(config.frame_rate);
    validate_frame_rate(frame_rate)?;

    if jobs.is_empty() {
        println!("没有需要运行的任务");
        return Ok(());
    }

    let simulation = Simulation::new(frame_rate, config.ticker.clone())?.realtime(realtime);
    let multi = jobs.len() > 1;

    for (index, job) in jobs.iter().enumerate() {
        println!("[初始] {}", frame_body(multi, index, &job.text));
    }

    let report = simulation.run(&jobs, |update: &FrameUpdate| {
        let elapsed = update.elapsed.as_secs_f64();
        println!(
            "[{:>4} {:>6.3}s] {}",
            update.frame,
            elapsed,
            frame_body(multi, update.label, &update.text)
        );
    })?;

    println!();
    println!("✅ 完成，共 {} 帧 ({} fps)", report.frames, frame_rate);
    for (index, text) in report.final_texts.iter().enumerate() {
        println!("   {}", frame_body(multi, index, text));
    }
    Ok(())
}

fn frame_body(multi: bool, index: usize, text: &str) -> String {
    if multi {
        format!("#{index} {text}")
    } else {
        text.to_string()
    }
}
