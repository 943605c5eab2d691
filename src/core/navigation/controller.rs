//! 导航控制器
//!
//! 持有帖子集合与分页状态，把用户事件转换为状态迁移并触发重绘。
//! 所有事件在同一个执行上下文中依次处理，只有启动时的一次加载会挂起。

use chrono::{DateTime, Local};
use tracing::{error, info};

use crate::app::error::types::FetchError;
use crate::core::posts::fetcher::PostSource;
use crate::core::posts::model::Post;
use crate::core::viewer::document::{MountPoint, RenderTarget};
use crate::core::viewer::pagination::{
    compute_controls, compute_slice, total_pages, PageState,
    CONTROL_WINDOW,
};
use crate::core::viewer::render::{render, ViewMode};

/// 导航事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    ViewModeChanged(ViewMode),
    PageButtonClicked(usize),
    FloatingPrevClicked,
    FloatingNextClicked,
    ViewportResized,
}

/// 加载状态
#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadState {
    Pending,
    Loaded { at: DateTime<Local> },
    Failed,
}

/// 导航控制器
pub struct NavigationController {
    posts: Vec<Post>,
    state: PageState,
    load_state: LoadState,
}

impl NavigationController {
    /// 创建新的控制器
    pub fn new(view_mode: ViewMode) -> Self {
        Self {
            posts: Vec::new(),
            state: PageState::new(view_mode),
            load_state: LoadState::Pending,
        }
    }

    /// 加载帖子并完成首次渲染
    ///
    /// 加载指示器在成功和失败两条路径上都会被隐藏。
    pub async fn initialize<S, T>(
        &mut self,
        source: &S,
        target: &mut T,
    ) -> Result<usize, FetchError>
    where
        S: PostSource + ?Sized,
        T: RenderTarget,
    {
        target.set_selected_view(self.state.view_mode());
        target.set_hidden(MountPoint::Loader, false);

        let outcome = source.load().await;

        let result = match outcome {
            Ok(posts) => {
                info!("Loaded {} posts", posts.len());
                self.posts = posts;
                self.load_state = LoadState::Loaded { at: Local::now() };
                self.render(target);
                Ok(self.posts.len())
            }
            Err(e) => {
                error!("Failed to load posts: {}", e);
                self.load_state = LoadState::Failed;
                target.set_text(
                    MountPoint::Error,
                    &format!("加载数据时发生错误: {e}"),
                );
                target.set_hidden(MountPoint::Error, false);
                Err(e)
            }
        };

        target.set_hidden(MountPoint::Loader, true);
        result
    }

    /// 处理一个导航事件，返回是否发生了重绘
    pub fn handle<T: RenderTarget>(
        &mut self,
        event: NavEvent,
        target: &mut T,
    ) -> bool {
        match event {
            NavEvent::ViewModeChanged(mode) => {
                self.state.set_view_mode(mode);
                target.set_selected_view(mode);
                self.render(target)
            }
            NavEvent::PageButtonClicked(page) => {
                self.goto_page(page, target)
            }
            NavEvent::FloatingPrevClicked => {
                let page = self.state.current_page().saturating_sub(1);
                self.goto_page(page, target)
            }
            NavEvent::FloatingNextClicked => {
                let page = self.state.current_page() + 1;
                self.goto_page(page, target)
            }
            NavEvent::ViewportResized => {
                self.update_floating_visibility(target);
                false
            }
        }
    }

    /// 跳转到指定页，越界时保持不变
    pub fn goto_page<T: RenderTarget>(
        &mut self,
        page: usize,
        target: &mut T,
    ) -> bool {
        if !self.state.goto_page(page, self.total_pages()) {
            return false;
        }
        self.render(target)
    }

    /// 当前分页状态
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// 总页数
    pub fn total_pages(&self) -> usize {
        total_pages(&self.posts, self.state.page_size())
    }

    /// 当前页的帖子
    pub fn visible_posts(&self) -> &[Post] {
        compute_slice(
            &self.posts,
            self.state.page_size(),
            self.state.current_page(),
        )
    }

    /// 已加载的帖子数
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// 加载完成时间
    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        match self.load_state {
            LoadState::Loaded { at } => Some(at),
            _ => None,
        }
    }

    /// 渲染列表、分页栏和悬浮按钮；加载成功前不写入任何列表
    fn render<T: RenderTarget>(&self, target: &mut T) -> bool {
        if !matches!(self.load_state, LoadState::Loaded { .. }) {
            return false;
        }

        self.render_list(target);
        self.render_pagination(target);
        self.update_floating_visibility(target);
        true
    }

    fn render_list<T: RenderTarget>(&self, target: &mut T) {
        let view_mode = self.state.view_mode();
        let page = render(self.visible_posts(), view_mode);
        let shown = MountPoint::list_for(page.view_mode);
        let other = MountPoint::list_for(page.view_mode.toggled());

        target.set_hidden(other, true);
        target.set_markup(shown, &page.markup);
        target.set_hidden(shown, false);
    }

    fn render_pagination<T: RenderTarget>(&self, target: &mut T) {
        let controls = compute_controls(
            self.state.current_page(),
            self.total_pages(),
            CONTROL_WINDOW,
        );
        target.set_controls(&controls);
    }

    fn update_floating_visibility<T: RenderTarget>(&self, target: &mut T) {
        let total = self.total_pages();
        let need_paging = total > 1 || target.content_overflows();

        if !need_paging {
            target.set_hidden(MountPoint::PrevFloating, true);
            target.set_hidden(MountPoint::NextFloating, true);
            return;
        }

        let current = self.state.current_page();
        target.set_hidden(MountPoint::PrevFloating, current == 1);
        target.set_hidden(MountPoint::NextFloating, current == total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewer::document::Document;
    use crate::core::viewer::pagination::PageControl;
    use async_trait::async_trait;

    struct FixedSource(Vec<Post>);

    #[async_trait]
    impl PostSource for FixedSource {
        async fn load(&self) -> Result<Vec<Post>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource(FetchError);

    #[async_trait]
    impl PostSource for FailingSource {
        async fn load(&self) -> Result<Vec<Post>, FetchError> {
            Err(self.0.clone())
        }
    }

    /// 记录加载指示器的每次切换
    struct RecordingTarget {
        doc: Document,
        loader_log: Vec<bool>,
    }

    impl RenderTarget for RecordingTarget {
        fn set_markup(&mut self, mount: MountPoint, markup: &str) {
            self.doc.set_markup(mount, markup);
        }

        fn set_text(&mut self, mount: MountPoint, text: &str) {
            self.doc.set_text(mount, text);
        }

        fn set_hidden(&mut self, mount: MountPoint, hidden: bool) {
            if mount == MountPoint::Loader {
                self.loader_log.push(hidden);
            }
            self.doc.set_hidden(mount, hidden);
        }

        fn set_controls(&mut self, controls: &[PageControl]) {
            self.doc.set_controls(controls);
        }

        fn set_selected_view(&mut self, view_mode: ViewMode) {
            self.doc.set_selected_view(view_mode);
        }

        fn content_overflows(&self) -> bool {
            self.doc.content_overflows()
        }
    }

    fn posts(n: u64) -> Vec<Post> {
        (1..=n)
            .map(|id| Post {
                id,
                user_id: (id - 1) / 10 + 1,
                title: format!("title {id}"),
                body: format!("body {id}"),
            })
            .collect()
    }

    async fn loaded(n: u64) -> (NavigationController, Document) {
        let mut controller = NavigationController::new(ViewMode::List);
        let mut doc = Document::new(1000);
        controller
            .initialize(&FixedSource(posts(n)), &mut doc)
            .await
            .unwrap();
        (controller, doc)
    }

    fn visible_ids(controller: &NavigationController) -> Vec<u64> {
        controller.visible_posts().iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn twenty_five_posts_make_three_pages() {
        let (mut controller, mut doc) = loaded(25).await;

        assert_eq!(controller.total_pages(), 3);
        assert_eq!(visible_ids(&controller), (1..=10).collect::<Vec<_>>());
        assert!(!doc.is_hidden(MountPoint::FlexList));
        assert!(doc.is_hidden(MountPoint::CardList));
        assert!(doc.is_hidden(MountPoint::Loader));
        assert!(controller.loaded_at().is_some());

        assert!(controller.handle(NavEvent::PageButtonClicked(3), &mut doc));
        assert_eq!(visible_ids(&controller), (21..=25).collect::<Vec<_>>());
        assert!(doc
            .element(MountPoint::FlexList)
            .markup
            .contains("#21 · user 3"));
    }

    #[tokio::test]
    async fn empty_collection_renders_without_controls() {
        let (controller, doc) = loaded(0).await;

        assert_eq!(controller.total_pages(), 1);
        assert!(controller.visible_posts().is_empty());
        assert!(doc.controls().is_empty());
        assert!(doc.is_hidden(MountPoint::PrevFloating));
        assert!(doc.is_hidden(MountPoint::NextFloating));
    }

    #[tokio::test]
    async fn prev_on_first_page_is_a_no_op() {
        let (mut controller, mut doc) = loaded(25).await;
        let before = controller.state().clone();
        let markup = doc.element(MountPoint::FlexList).markup.clone();

        assert!(!controller.handle(NavEvent::FloatingPrevClicked, &mut doc));
        assert_eq!(controller.state(), &before);
        assert_eq!(doc.element(MountPoint::FlexList).markup, markup);
    }

    #[tokio::test]
    async fn next_on_last_page_is_a_no_op() {
        let (mut controller, mut doc) = loaded(25).await;
        controller.handle(NavEvent::PageButtonClicked(3), &mut doc);
        let before = controller.state().clone();

        assert!(!controller.handle(NavEvent::FloatingNextClicked, &mut doc));
        assert!(!controller.handle(NavEvent::PageButtonClicked(4), &mut doc));
        assert!(!controller.handle(NavEvent::PageButtonClicked(0), &mut doc));
        assert_eq!(controller.state(), &before);
    }

    #[tokio::test]
    async fn floating_controls_follow_current_page() {
        let (mut controller, mut doc) = loaded(25).await;
        assert!(doc.is_hidden(MountPoint::PrevFloating));
        assert!(!doc.is_hidden(MountPoint::NextFloating));

        controller.handle(NavEvent::FloatingNextClicked, &mut doc);
        assert_eq!(controller.state().current_page(), 2);
        assert!(!doc.is_hidden(MountPoint::PrevFloating));
        assert!(!doc.is_hidden(MountPoint::NextFloating));

        controller.handle(NavEvent::FloatingNextClicked, &mut doc);
        assert!(!doc.is_hidden(MountPoint::PrevFloating));
        assert!(doc.is_hidden(MountPoint::NextFloating));
    }

    #[tokio::test]
    async fn single_page_keeps_floating_hidden_after_resize() {
        let (mut controller, mut doc) = loaded(5).await;
        assert!(doc.is_hidden(MountPoint::PrevFloating));
        assert!(doc.is_hidden(MountPoint::NextFloating));

        doc.resize(3);
        assert!(!controller.handle(NavEvent::ViewportResized, &mut doc));
        assert_eq!(controller.state().current_page(), 1);
        // 只有一页时，当前页既是首页也是末页
        assert!(doc.is_hidden(MountPoint::PrevFloating));
        assert!(doc.is_hidden(MountPoint::NextFloating));
    }

    #[tokio::test]
    async fn view_switch_keeps_page_and_shows_one_container() {
        let (mut controller, mut doc) = loaded(25).await;
        controller.handle(NavEvent::PageButtonClicked(2), &mut doc);

        assert!(controller
            .handle(NavEvent::ViewModeChanged(ViewMode::Card), &mut doc));
        assert_eq!(controller.state().current_page(), 2);
        assert!(doc.is_hidden(MountPoint::FlexList));
        assert!(!doc.is_hidden(MountPoint::CardList));
        assert!(doc
            .element(MountPoint::CardList)
            .markup
            .contains("post-card__title"));
        assert_eq!(doc.selected_view(), ViewMode::Card);

        controller.handle(NavEvent::ViewModeChanged(ViewMode::List), &mut doc);
        assert!(!doc.is_hidden(MountPoint::FlexList));
        assert!(doc.is_hidden(MountPoint::CardList));
    }

    #[tokio::test]
    async fn network_failure_surfaces_message_and_clears_loader() {
        let mut controller = NavigationController::new(ViewMode::List);
        let mut doc = Document::new(24);
        let source = FailingSource(FetchError::Transport {
            cause: "network unreachable".to_string(),
        });

        let err = controller.initialize(&source, &mut doc).await.unwrap_err();
        assert_eq!(err.to_string(), "network unreachable");

        assert!(doc.is_hidden(MountPoint::Loader));
        assert!(!doc.is_hidden(MountPoint::Error));
        assert!(doc
            .element(MountPoint::Error)
            .markup
            .contains("network unreachable"));
        assert!(doc.element(MountPoint::FlexList).markup.is_empty());
        assert!(doc.element(MountPoint::CardList).markup.is_empty());
        assert_eq!(controller.post_count(), 0);
        assert!(controller.loaded_at().is_none());
    }

    #[tokio::test]
    async fn no_list_is_rendered_after_a_failed_load() {
        let mut controller = NavigationController::new(ViewMode::List);
        let mut doc = Document::new(24);
        let source = FailingSource(FetchError::Status { status: 500 });

        assert!(controller.initialize(&source, &mut doc).await.is_err());
        assert!(doc.element(MountPoint::Error).markup.contains("HTTP 500"));

        assert!(!controller
            .handle(NavEvent::ViewModeChanged(ViewMode::Card), &mut doc));
        assert_eq!(controller.state().view_mode(), ViewMode::Card);
        assert!(doc.element(MountPoint::FlexList).markup.is_empty());
        assert!(doc.element(MountPoint::CardList).markup.is_empty());
    }

    #[tokio::test]
    async fn loader_is_shown_then_hidden_on_both_paths() {
        let mut controller = NavigationController::new(ViewMode::List);
        let mut target = RecordingTarget {
            doc: Document::new(24),
            loader_log: Vec::new(),
        };
        controller
            .initialize(&FixedSource(posts(3)), &mut target)
            .await
            .unwrap();
        assert_eq!(target.loader_log, vec![false, true]);

        let mut controller = NavigationController::new(ViewMode::List);
        let mut target = RecordingTarget {
            doc: Document::new(24),
            loader_log: Vec::new(),
        };
        let source = FailingSource(FetchError::Status { status: 404 });
        assert!(controller.initialize(&source, &mut target).await.is_err());
        assert_eq!(target.loader_log, vec![false, true]);
        assert!(target.doc.is_hidden(MountPoint::Loader));
    }
}
