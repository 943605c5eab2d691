//! 分页逻辑模块

use tracing::debug;

use crate::core::viewer::render::ViewMode;

/// 每页帖子数
pub const PAGE_SIZE: usize = 10;

/// 分页栏一组显示的页码按钮数
pub const CONTROL_WINDOW: usize = 10;

/// 计算总页数，空集合也返回 1
pub fn total_pages<T>(items: &[T], page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    items.len().div_ceil(page_size).max(1)
}

/// 截取第 `page` 页（从1开始）的记录
pub fn compute_slice<T>(
    items: &[T],
    page_size: usize,
    page: usize,
) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// 分页控件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    First,
    Previous,
    Page,
    Next,
    Last,
}

/// 分页控件描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControl {
    pub kind: ControlKind,
    pub label: String,
    /// 点击后跳转的页码
    pub target: usize,
    pub active: bool,
}

impl PageControl {
    fn jump(kind: ControlKind, label: &str, target: usize) -> Self {
        Self {
            kind,
            label: label.to_string(),
            target,
            active: false,
        }
    }

    fn page(number: usize, current_page: usize) -> Self {
        Self {
            kind: ControlKind::Page,
            label: number.to_string(),
            target: number,
            active: number == current_page,
        }
    }
}

/// 生成分页栏控件
///
/// 页码按 `window_size` 个一组，当前页所在的组为 `(current_page - 1) / window_size`。
pub fn compute_controls(
    current_page: usize,
    total_pages: usize,
    window_size: usize,
) -> Vec<PageControl> {
    if total_pages <= 1 || window_size == 0 {
        return Vec::new();
    }

    let group = current_page.saturating_sub(1) / window_size;
    let window_start = group * window_size + 1;
    let window_end =
        (window_start + window_size - 1).min(total_pages);

    let mut controls = Vec::with_capacity(window_size + 4);

    if window_start > 1 {
        controls.push(PageControl::jump(ControlKind::First, "«", 1));
    }
    if current_page > 1 {
        controls.push(PageControl::jump(
            ControlKind::Previous,
            "‹",
            current_page - 1,
        ));
    }

    controls.extend(
        (window_start..=window_end)
            .map(|n| PageControl::page(n, current_page)),
    );

    if current_page < total_pages {
        controls.push(PageControl::jump(
            ControlKind::Next,
            "›",
            current_page + 1,
        ));
    }
    if window_end < total_pages {
        controls.push(PageControl::jump(
            ControlKind::Last,
            "»",
            total_pages,
        ));
    }

    controls
}

/// 分页状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
    view_mode: ViewMode,
}

impl PageState {
    /// 创建新的分页状态，从第1页开始
    pub fn new(view_mode: ViewMode) -> Self {
        Self {
            current_page: 1,
            page_size: PAGE_SIZE,
            view_mode,
        }
    }

    /// 获取当前页码（从1开始）
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// 获取每页条数
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// 获取当前视图模式
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// 切换视图模式
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    /// 跳转到指定页
    ///
    /// 越界请求不改变状态，返回是否需要重绘。
    pub fn goto_page(
        &mut self,
        requested_page: usize,
        total_pages: usize,
    ) -> bool {
        if requested_page < 1 || requested_page > total_pages {
            debug!(
                "Ignoring page {} (valid range 1..={})",
                requested_page, total_pages
            );
            return false;
        }
        self.current_page = requested_page;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    fn labels(controls: &[PageControl]) -> Vec<&str> {
        controls.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn total_pages_never_below_one() {
        assert_eq!(total_pages::<usize>(&[], PAGE_SIZE), 1);
        assert_eq!(total_pages(&numbers(1), PAGE_SIZE), 1);
        assert_eq!(total_pages(&numbers(10), PAGE_SIZE), 1);
        assert_eq!(total_pages(&numbers(11), PAGE_SIZE), 2);
        assert_eq!(total_pages(&numbers(100), PAGE_SIZE), 10);
    }

    #[test]
    fn slices_of_twenty_five_records() {
        let items = numbers(25);
        assert_eq!(total_pages(&items, 10), 3);
        assert_eq!(compute_slice(&items, 10, 1), &numbers(10)[..]);
        assert_eq!(compute_slice(&items, 10, 3), &[21usize, 22, 23, 24, 25]);
    }

    #[test]
    fn every_page_is_full_except_the_last() {
        for len in [1usize, 9, 10, 11, 37, 100] {
            let items = numbers(len);
            let pages = total_pages(&items, PAGE_SIZE);
            for page in 1..=pages {
                let slice = compute_slice(&items, PAGE_SIZE, page);
                if page < pages {
                    assert_eq!(slice.len(), PAGE_SIZE);
                } else {
                    let rem = len % PAGE_SIZE;
                    let expected = if rem == 0 { PAGE_SIZE } else { rem };
                    assert_eq!(slice.len(), expected, "len={len}");
                }
            }
        }
    }

    #[test]
    fn empty_collection_has_empty_slice_and_no_controls() {
        let items: Vec<usize> = Vec::new();
        let pages = total_pages(&items, PAGE_SIZE);
        assert!(compute_slice(&items, PAGE_SIZE, 1).is_empty());
        assert!(compute_controls(1, pages, CONTROL_WINDOW).is_empty());
    }

    #[test]
    fn out_of_range_slice_is_empty() {
        let items = numbers(5);
        assert!(compute_slice(&items, 10, 0).is_empty());
        assert!(compute_slice(&items, 10, 4).is_empty());
    }

    #[test]
    fn controls_on_first_page() {
        let controls = compute_controls(1, 3, CONTROL_WINDOW);
        assert_eq!(labels(&controls), vec!["1", "2", "3", "›"]);
        assert!(controls[0].active);
        assert_eq!(controls[3].kind, ControlKind::Next);
        assert_eq!(controls[3].target, 2);
    }

    #[test]
    fn controls_on_middle_page_of_second_window() {
        let controls = compute_controls(15, 25, CONTROL_WINDOW);
        assert_eq!(
            labels(&controls),
            vec![
                "«", "‹", "11", "12", "13", "14", "15", "16", "17", "18",
                "19", "20", "›", "»"
            ]
        );
        let active: Vec<&PageControl> =
            controls.iter().filter(|c| c.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].target, 15);
        assert_eq!(controls[0].target, 1);
        assert_eq!(controls[1].target, 14);
        assert_eq!(controls.last().unwrap().target, 25);
    }

    #[test]
    fn last_window_has_no_jump_to_last() {
        let controls = compute_controls(25, 25, CONTROL_WINDOW);
        assert_eq!(
            labels(&controls),
            vec!["«", "‹", "21", "22", "23", "24", "25"]
        );
    }

    #[test]
    fn first_window_never_has_jump_to_first() {
        for current in 1..=10 {
            let controls = compute_controls(current, 30, CONTROL_WINDOW);
            assert!(controls.iter().all(|c| c.kind != ControlKind::First));
        }
        for current in 21..=30 {
            let controls = compute_controls(current, 30, CONTROL_WINDOW);
            assert!(controls.iter().all(|c| c.kind != ControlKind::Last));
        }
    }

    #[test]
    fn goto_page_ignores_out_of_range() {
        let mut state = PageState::new(ViewMode::List);
        let before = state.clone();

        assert!(!state.goto_page(0, 3));
        assert!(!state.goto_page(4, 3));
        assert_eq!(state, before);

        assert!(state.goto_page(3, 3));
        assert_eq!(state.current_page(), 3);
    }
}
