//! RouteGraph CLI 工具
//!
//! 交互式命令行界面

use clap::Parser;
use routegraph::cli::{PrintMode, Session, SessionConfig};
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "routegraph-cli")]
#[command(about = "RouteGraph 命令行工具")]
struct Args {
    /// 使用有向图
    #[arg(short, long)]
    directed: bool,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = PrintMode::Table)]
    mode: PrintMode,

    /// 权重显示的小数位数
    #[arg(short, long, default_value = "2")]
    precision: usize,

    /// 执行命令后退出，多条命令用 ';' 分隔
    #[arg(short = 'e', long)]
    execute: Option<String>,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = SessionConfig::new()
        .with_directed(args.directed)
        .with_print_mode(args.mode)
        .with_precision(args.precision);
    let mut session = Session::new(config);

    // 批处理模式
    if let Some(script) = args.execute {
        let script = script.replace(';', "\n");
        session.run(script.as_bytes(), io::stdout().lock(), None)?;
        return Ok(());
    }

    println!("RouteGraph CLI - 动态带权图与最短路径引擎 v{}", routegraph::VERSION);
    println!("=============================================");
    println!("图类型: {}", if args.directed { "有向" } else { "无向" });

    // 交互模式
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    session.run(io::stdin().lock(), io::stdout().lock(), Some("routegraph> "))?;

    println!("再见！");
    Ok(())
}
