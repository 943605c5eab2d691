//! 渲染目标（文档挂载点）

use chrono::{DateTime, Local};

use crate::core::viewer::pagination::PageControl;
use crate::core::viewer::render::{escape_html, ViewMode};

/// 文档中的挂载点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountPoint {
    FlexList,
    CardList,
    ViewSelect,
    Pagination,
    Loader,
    Error,
    PrevFloating,
    NextFloating,
}

impl MountPoint {
    /// 元素 id
    pub fn element_id(&self) -> &'static str {
        match self {
            MountPoint::FlexList => "flex-list",
            MountPoint::CardList => "card-list",
            MountPoint::ViewSelect => "view-select",
            MountPoint::Pagination => "pagination",
            MountPoint::Loader => "loader",
            MountPoint::Error => "error",
            MountPoint::PrevFloating => "prev-floating",
            MountPoint::NextFloating => "next-floating",
        }
    }

    /// 视图模式对应的列表容器
    pub fn list_for(view_mode: ViewMode) -> Self {
        match view_mode {
            ViewMode::List => MountPoint::FlexList,
            ViewMode::Card => MountPoint::CardList,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// 渲染目标
///
/// 导航控制器只通过该接口写入内容和可见性，不关心样式。
pub trait RenderTarget {
    /// 写入标记（innerHTML）
    fn set_markup(&mut self, mount: MountPoint, markup: &str);

    /// 写入纯文本（textContent）
    fn set_text(&mut self, mount: MountPoint, text: &str);

    /// 设置是否隐藏
    fn set_hidden(&mut self, mount: MountPoint, hidden: bool);

    /// 替换分页栏控件
    fn set_controls(&mut self, controls: &[PageControl]);

    /// 同步视图选择器的当前值
    fn set_selected_view(&mut self, view_mode: ViewMode);

    /// 内容高度是否超出视口
    fn content_overflows(&self) -> bool;
}

/// 单个元素
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// 已转义的内部标记
    pub markup: String,
    pub hidden: bool,
}

/// 内存中的文档
#[derive(Debug, Clone)]
pub struct Document {
    elements: [Element; 8],
    controls: Vec<PageControl>,
    selected_view: ViewMode,
    viewport_rows: usize,
    generated_at: Option<DateTime<Local>>,
}

impl Document {
    /// 创建新文档，初始状态与页面加载时一致
    pub fn new(viewport_rows: usize) -> Self {
        let mut elements: [Element; 8] = Default::default();
        for mount in [
            MountPoint::CardList,
            MountPoint::Loader,
            MountPoint::Error,
            MountPoint::PrevFloating,
            MountPoint::NextFloating,
        ] {
            elements[mount.index()].hidden = true;
        }

        Self {
            elements,
            controls: Vec::new(),
            selected_view: ViewMode::default(),
            viewport_rows,
            generated_at: None,
        }
    }

    /// 获取元素
    pub fn element(&self, mount: MountPoint) -> &Element {
        &self.elements[mount.index()]
    }

    /// 元素是否隐藏
    pub fn is_hidden(&self, mount: MountPoint) -> bool {
        self.element(mount).hidden
    }

    /// 当前分页栏控件
    pub fn controls(&self) -> &[PageControl] {
        &self.controls
    }

    /// 选择器当前值
    pub fn selected_view(&self) -> ViewMode {
        self.selected_view
    }

    /// 视口高度（行）
    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    /// 更新视口高度
    pub fn resize(&mut self, viewport_rows: usize) {
        self.viewport_rows = viewport_rows;
    }

    /// 估算内容高度：可见列表的非空行数，加上分页栏一行
    pub fn content_rows(&self) -> usize {
        let list_rows: usize = [MountPoint::FlexList, MountPoint::CardList]
            .iter()
            .map(|m| self.element(*m))
            .filter(|e| !e.hidden)
            .map(|e| {
                e.markup.lines().filter(|l| !l.trim().is_empty()).count()
            })
            .sum();

        let pagination_rows = usize::from(!self.controls.is_empty());
        list_rows + pagination_rows
    }

    /// 导出为完整的 HTML 页面
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"utf-8\">\n");
        html.push_str("  <title>Posts</title>\n");
        html.push_str("  <style>.hidden { display: none; } button.active { font-weight: bold; }</style>\n");
        html.push_str("</head>\n<body>\n");

        html.push_str(&self.open_tag("select", MountPoint::ViewSelect));
        for mode in [ViewMode::List, ViewMode::Card] {
            let selected = if mode == self.selected_view {
                " selected"
            } else {
                ""
            };
            html.push_str(&format!(
                "<option value=\"{mode}\"{selected}>{mode}</option>"
            ));
        }
        html.push_str("</select>\n");

        for (mount, tag) in [
            (MountPoint::Loader, "div"),
            (MountPoint::Error, "div"),
            (MountPoint::FlexList, "section"),
            (MountPoint::CardList, "section"),
        ] {
            html.push_str(&self.open_tag(tag, mount));
            html.push_str(&self.element(mount).markup);
            html.push_str(&format!("</{tag}>\n"));
        }

        html.push_str(&self.open_tag("nav", MountPoint::Pagination));
        html.push_str(&self.element(MountPoint::Pagination).markup);
        html.push_str("</nav>\n");

        for (mount, label) in [
            (MountPoint::PrevFloating, "‹"),
            (MountPoint::NextFloating, "›"),
        ] {
            html.push_str(&self.open_tag("button", mount));
            html.push_str(label);
            html.push_str("</button>\n");
        }

        if let Some(at) = self.generated_at {
            html.push_str(&format!(
                "<footer>{}</footer>\n",
                escape_html(&at.format("%Y-%m-%d %H:%M:%S").to_string())
            ));
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    /// 记录快照时间
    pub fn stamp(&mut self, at: DateTime<Local>) {
        self.generated_at = Some(at);
    }

    fn open_tag(&self, tag: &str, mount: MountPoint) -> String {
        let class = if self.is_hidden(mount) {
            " class=\"hidden\""
        } else {
            ""
        };
        format!("<{tag} id=\"{}\"{class}>", mount.element_id())
    }
}

/// 分页按钮标记
fn controls_markup(controls: &[PageControl]) -> String {
    controls
        .iter()
        .map(|c| {
            let class = if c.active { " class=\"active\"" } else { "" };
            format!(
                "<button data-page=\"{}\"{class}>{}</button>",
                c.target,
                escape_html(&c.label)
            )
        })
        .collect()
}

impl RenderTarget for Document {
    fn set_markup(&mut self, mount: MountPoint, markup: &str) {
        self.elements[mount.index()].markup = markup.to_string();
    }

    fn set_text(&mut self, mount: MountPoint, text: &str) {
        self.elements[mount.index()].markup = escape_html(text);
    }

    fn set_hidden(&mut self, mount: MountPoint, hidden: bool) {
        self.elements[mount.index()].hidden = hidden;
    }

    fn set_controls(&mut self, controls: &[PageControl]) {
        self.controls = controls.to_vec();
        self.elements[MountPoint::Pagination.index()].markup =
            controls_markup(controls);
    }

    fn set_selected_view(&mut self, view_mode: ViewMode) {
        self.selected_view = view_mode;
    }

    fn content_overflows(&self) -> bool {
        self.content_rows() > self.viewport_rows
    }
}
