//! 命令行参数定义

use clap::Parser;
use std::path::PathBuf;

use crate::app::config::settings::Settings;
use crate::core::viewer::render::ViewMode;

/// 帖子查看器 - 加载帖子列表并分页浏览
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// 帖子接口地址（默认取配置文件或内置地址）
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// 初始视图模式: flex 或 card
    #[arg(long = "view", value_name = "MODE")]
    pub view: Option<ViewMode>,

    /// 初始页码 (默认: 1)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// 请求超时秒数
    #[arg(short = 't', long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// 配置文件路径
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 将当前页面导出为 HTML 文件
    #[arg(short, long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// 只输出当前页，不进入交互模式
    #[arg(long)]
    pub print: bool,

    /// 禁用颜色输出
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// 详细模式 - 输出调试日志
    #[arg(short, long)]
    pub verbose: bool,
}

/// 合并命令行与配置文件后的运行参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerOptions {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub view: ViewMode,
    pub start_page: usize,
    pub use_color: bool,
    pub export: Option<PathBuf>,
    pub print_only: bool,
}

impl ViewerOptions {
    /// 命令行参数优先于配置文件
    pub fn resolve(args: &CliArgs, settings: &Settings) -> Self {
        Self {
            endpoint: args
                .url
                .clone()
                .unwrap_or_else(|| settings.endpoint.clone()),
            timeout_secs: args.timeout_secs.unwrap_or(settings.timeout_secs),
            view: args.view.unwrap_or(settings.view),
            start_page: args.page,
            use_color: settings.color && !args.no_color,
            export: args.export.clone(),
            print_only: args.print,
        }
    }
}
