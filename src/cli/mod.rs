//! 命令行界面模块

pub mod args;
pub mod post_viewer;

use colored::*;
use std::time::Duration;

use crate::app::config::settings::Settings;
use crate::app::error::types::{PostViewerError, Result};
use crate::core::posts::fetcher::HttpPostSource;

use self::args::{CliArgs, ViewerOptions};
use self::post_viewer::PostViewer;

/// 运行命令行界面
pub fn run_cli(args: CliArgs) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())?;
    let options = ViewerOptions::resolve(&args, &settings);

    if !options.use_color {
        colored::control::set_override(false);
    }

    // 创建数据源
    let source = HttpPostSource::new(
        options.endpoint.clone(),
        Duration::from_secs(options.timeout_secs),
    )?;

    let print_only = options.print_only;
    let mut viewer = PostViewer::new(options);

    if !print_only {
        eprintln!("{} {}", "正在加载".bright_black(), source.url());
    }

    // 唯一一次挂起：启动时加载帖子
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let loaded = runtime.block_on(viewer.load(&source));

    viewer.export_html()?;

    match loaded {
        Err(e) if print_only => {
            eprintln!("{} {}", "错误".red().bold(), e);
            Err(PostViewerError::Fetch(e).into())
        }
        _ => viewer.run(),
    }
}
