//! 固定步长仿真命令行
//!
//! 用法：`fmusim <model> [t_end] [h] [logging] [separator] [results_file]`

use clap::Parser;
use fmusim_rs::models;
use fmusim_rs::output::OutputTarget;
use fmusim_rs::sim::{RunConfig, SimError, Simulator};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "fmusim",
    about = "Simulate a model with the forward Euler method (time, state and step events)"
)]
struct Args {
    /// 内置模型名称（见 --list）
    #[arg(required_unless_present = "list")]
    model: Option<String>,

    /// 仿真结束时间，默认 1.0
    t_end: Option<f64>,

    /// 固定步长，默认 0.1
    h: Option<f64>,

    /// 1 打开日志，0 关闭（默认）
    #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
    logging: Option<u8>,

    /// CSV 列分隔符（单个字符），默认 ';'
    #[arg(value_parser = parse_separator)]
    separator: Option<char>,

    /// 结果文件："-" 为标准输出（默认），空字符串为不输出（用于精确计时）
    results_file: Option<String>,

    /// 仿真开始时间，默认 0
    #[arg(long, allow_negative_numbers = true)]
    start_time: Option<f64>,

    /// 从 JSON 文件读取运行配置；命令行参数优先
    #[arg(long)]
    config: Option<PathBuf>,

    /// 把运行摘要写成 JSON 文件
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// 列出内置模型
    #[arg(long)]
    list: bool,
}

fn parse_separator(raw: &str) -> Result<char, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("the given CSV separator char ({raw}) is not valid")),
    }
}

fn init_tracing(logging: bool) {
    let default = if logging { "debug" } else { "info" };
    // 结果行占用 stdout，日志写到 stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn build_config(args: &Args) -> Result<RunConfig, SimError> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_json_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(start) = args.start_time {
        config.start_time = start;
    }
    if let Some(end) = args.t_end {
        config.end_time = end;
    }
    if let Some(h) = args.h {
        config.step_size = h;
    }
    if let Some(logging) = args.logging {
        config.logging = logging == 1;
    }
    if let Some(separator) = args.separator {
        config.separator = separator;
    }
    if let Some(file) = &args.results_file {
        config.output = OutputTarget::from_arg(file);
    }
    Ok(config)
}

fn run(args: &Args, config: RunConfig) -> Result<(), SimError> {
    let name = args.model.as_deref().unwrap_or_default();
    let sim = Simulator::new(config)?;
    let config = sim.config();

    let mut model = models::instantiate(name, config.logging)?;
    let mut sink = config.output.open(config.separator)?;
    let report = sim.run(model.as_mut(), sink.as_mut())?;

    eprintln!("{report}");
    if let OutputTarget::File(path) = &config.output {
        eprintln!("CSV file '{}' written.", path.display());
    }

    if let Some(path) = &args.summary_json {
        let write = || -> io::Result<()> {
            let raw = serde_json::to_string_pretty(&report)?;
            fs::write(path, raw)
        };
        write().map_err(|source| SimError::OpenOutput {
            path: path.clone(),
            source,
        })?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.list {
        for name in models::NAMES {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.logging);

    match run(&args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
