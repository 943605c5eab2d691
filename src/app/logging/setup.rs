//! 日志系统初始化

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化日志系统
///
/// 日志写到 stderr，避免干扰 `--print` 的标准输出；`RUST_LOG` 优先。
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "post_viewer=debug"
    } else {
        "post_viewer=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
