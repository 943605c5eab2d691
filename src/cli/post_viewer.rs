//! 帖子查看器

use colored::*;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::io::{self, Write};
use tracing::{info, warn};

use crate::app::error::types::{FetchError, Result};
use crate::cli::args::ViewerOptions;
use crate::core::input::keyboard::{Clickable, KeyAction, KeyboardHandler};
use crate::core::navigation::controller::{NavEvent, NavigationController};
use crate::core::posts::fetcher::PostSource;
use crate::core::viewer::display_utils::{format_pagination_bar, format_post};
use crate::core::viewer::document::{Document, MountPoint};
use crate::core::viewer::terminal::TerminalManager;

/// 帖子查看器
pub struct PostViewer {
    options: ViewerOptions,
    controller: NavigationController,
    document: Document,
    // 模块化组件
    terminal_manager: TerminalManager,
    keyboard_handler: KeyboardHandler,
    // 当前页内的行滚动偏移
    scroll_offset: usize,
}

impl PostViewer {
    /// 创建新的帖子查看器
    pub fn new(options: ViewerOptions) -> Self {
        let terminal_manager = TerminalManager::new();
        let document = Document::new(terminal_manager.viewport_rows());
        let controller = NavigationController::new(options.view);

        Self {
            options,
            controller,
            document,
            terminal_manager,
            keyboard_handler: KeyboardHandler::default(),
            scroll_offset: 0,
        }
    }

    /// 加载帖子并跳到初始页
    pub async fn load<S: PostSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> std::result::Result<usize, FetchError> {
        let count = self
            .controller
            .initialize(source, &mut self.document)
            .await?;

        let start_page = self.options.start_page;
        if start_page != 1
            && !self.controller.goto_page(start_page, &mut self.document)
        {
            warn!(
                "Start page {} is out of range (1..={}), staying on page 1",
                start_page,
                self.controller.total_pages()
            );
        }

        Ok(count)
    }

    /// 导出当前文档
    pub fn export_html(&mut self) -> Result<()> {
        if let Some(path) = self.options.export.clone() {
            self.document.stamp(chrono::Local::now());
            std::fs::write(&path, self.document.to_html())?;
            info!("Exported page to {}", path.display());
        }
        Ok(())
    }

    /// 运行查看器
    pub fn run(&mut self) -> Result<()> {
        if self.options.print_only {
            return self.print_page();
        }

        self.interactive_mode()
    }

    /// 非交互模式：输出当前页
    fn print_page(&self) -> Result<()> {
        let mut out = io::stdout().lock();
        for line in self.frame_header() {
            writeln!(out, "{line}")?;
        }
        for line in self.content_lines() {
            writeln!(out, "{line}")?;
        }
        for line in self.frame_footer(false) {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }

    /// 交互模式
    fn interactive_mode(&mut self) -> Result<()> {
        self.terminal_manager.enter_raw_mode()?;
        self.sync_viewport();

        let mut needs_redraw = true;

        loop {
            if needs_redraw {
                self.draw()?;
                needs_redraw = false;
            }

            match event::read()? {
                Event::Key(KeyEvent { code, kind, .. }) => {
                    if kind != KeyEventKind::Press
                        || !self.keyboard_handler.should_process_key(&code)
                    {
                        continue;
                    }

                    let clickable = Clickable {
                        controls: self.document.controls(),
                        prev_visible: !self
                            .document
                            .is_hidden(MountPoint::PrevFloating),
                        next_visible: !self
                            .document
                            .is_hidden(MountPoint::NextFloating),
                    };
                    let action = self.keyboard_handler.map_key(
                        code,
                        self.controller.state().view_mode(),
                        clickable,
                    );

                    match action {
                        Some(KeyAction::Quit) => break,
                        Some(KeyAction::Redraw) => {
                            self.sync_viewport();
                            needs_redraw = true;
                        }
                        Some(KeyAction::ScrollUp) => {
                            needs_redraw = self.scroll_by(-1);
                        }
                        Some(KeyAction::ScrollDown) => {
                            needs_redraw = self.scroll_by(1);
                        }
                        Some(KeyAction::Dispatch(nav_event)) => {
                            needs_redraw = self.dispatch(nav_event);
                        }
                        None => {}
                    }
                }
                Event::Resize(_, _) => {
                    self.sync_viewport();
                    needs_redraw = true;
                }
                _ => continue,
            }
        }

        // 恢复终端（由 TerminalManager 的 Drop trait 自动处理）
        Ok(())
    }

    /// 分发导航事件，返回是否需要重绘
    ///
    /// 视图切换总是重绘，加载失败时状态栏里的视图名也要更新。
    fn dispatch(&mut self, nav_event: NavEvent) -> bool {
        let view_changed = matches!(nav_event, NavEvent::ViewModeChanged(_));
        if self.controller.handle(nav_event, &mut self.document) {
            self.scroll_offset = 0;
            return true;
        }
        view_changed
    }

    /// 视口尺寸变化
    fn sync_viewport(&mut self) {
        self.document.resize(self.terminal_manager.viewport_rows());
        self.controller
            .handle(NavEvent::ViewportResized, &mut self.document);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        self.content_lines()
            .len()
            .saturating_sub(self.document.viewport_rows())
    }

    fn scroll_by(&mut self, delta: isize) -> bool {
        let next = self
            .scroll_offset
            .saturating_add_signed(delta)
            .min(self.max_scroll());
        let changed = next != self.scroll_offset;
        self.scroll_offset = next;
        changed
    }

    /// 绘制整屏
    fn draw(&self) -> Result<()> {
        self.terminal_manager.clear_screen()?;

        let mut out = io::stdout().lock();
        for line in self.frame_header() {
            write!(out, "{line}\r\n")?;
        }
        for line in self
            .content_lines()
            .into_iter()
            .skip(self.scroll_offset)
            .take(self.document.viewport_rows())
        {
            write!(out, "{line}\r\n")?;
        }
        for line in self.frame_footer(true) {
            write!(out, "{line}\r\n")?;
        }
        out.flush()?;
        Ok(())
    }

    /// 状态栏和错误横幅
    fn frame_header(&self) -> Vec<String> {
        let state = self.controller.state();
        let loaded_at = self
            .controller
            .loaded_at()
            .map(|at| at.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut lines = vec![format!(
            "共 {} 条 | 第 {} 页 / 共 {} 页 | 视图: {} | 加载于 {}",
            self.controller.post_count(),
            state.current_page(),
            self.controller.total_pages(),
            state.view_mode(),
            loaded_at
        )
        .bright_white()
        .bold()
        .to_string()];

        if !self.document.is_hidden(MountPoint::Error) {
            lines.push(
                self.error_text().bright_red().bold().to_string(),
            );
        }
        lines.push("=".repeat(self.terminal_manager.width().min(80)));
        lines
    }

    /// 当前页内容行；加载失败时为空
    fn content_lines(&self) -> Vec<String> {
        if self.controller.loaded_at().is_none() {
            return Vec::new();
        }

        let width = self.terminal_manager.width().min(100);
        self.controller
            .visible_posts()
            .iter()
            .flat_map(|post| {
                let mut lines = format_post(
                    post,
                    self.controller.state().view_mode(),
                    width,
                    self.options.use_color,
                );
                lines.push(String::new());
                lines
            })
            .collect()
    }

    /// 分页栏、悬浮按钮和帮助
    fn frame_footer(&self, interactive: bool) -> Vec<String> {
        let mut lines = vec!["=".repeat(self.terminal_manager.width().min(80))];

        let bar = format_pagination_bar(
            self.document.controls(),
            self.options.use_color,
        );
        if !bar.is_empty() {
            lines.push(bar);
        }

        let prev = if self.document.is_hidden(MountPoint::PrevFloating) {
            String::new()
        } else {
            "‹ 上一页 (←)".bright_cyan().to_string()
        };
        let next = if self.document.is_hidden(MountPoint::NextFloating) {
            String::new()
        } else {
            "下一页 (→) ›".bright_cyan().to_string()
        };
        if !prev.is_empty() || !next.is_empty() {
            lines.push(format!("{prev}    {next}"));
        }

        if interactive {
            lines.push(
                "导航: ←→ 上/下一页 | 1-9,0 页码 | Home/PgUp/PgDn/End « ‹ › » | ↑↓ 滚动 | v 切换视图 | r 刷新 | ESC/q 退出"
                    .bright_black()
                    .to_string(),
            );
        }
        lines
    }

    /// 错误横幅的纯文本
    fn error_text(&self) -> String {
        self.document
            .element(MountPoint::Error)
            .markup
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#039;", "'")
            .replace("&amp;", "&")
    }
}
