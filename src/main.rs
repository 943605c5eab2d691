//! 帖子查看器主程序

mod app;
mod cli;
mod core;

use clap::Parser;

use app::error::types::Result;
use app::logging::setup::init_logging;
use cli::args::CliArgs;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // 初始化日志系统
    init_logging(args.verbose);

    // 运行命令行界面
    cli::run_cli(args)
}
