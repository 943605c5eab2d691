//! 键盘输入处理

use crossterm::event::KeyCode;
use std::time::Instant;

use crate::core::navigation::controller::NavEvent;
use crate::core::viewer::pagination::{ControlKind, PageControl};
use crate::core::viewer::render::ViewMode;

/// 按键对应的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Redraw,
    ScrollUp,
    ScrollDown,
    Dispatch(NavEvent),
}

/// 当前可点击的控件
#[derive(Debug, Clone, Copy, Default)]
pub struct Clickable<'a> {
    pub controls: &'a [PageControl],
    pub prev_visible: bool,
    pub next_visible: bool,
}

/// 键盘输入处理器
pub struct KeyboardHandler {
    last_key_time: Instant,
    last_key_code: Option<KeyCode>,
    debounce_duration_ms: u64,
}

impl KeyboardHandler {
    /// 创建新的键盘处理器
    pub fn new(debounce_duration_ms: u64) -> Self {
        Self {
            last_key_time: Instant::now(),
            last_key_code: None,
            debounce_duration_ms,
        }
    }

    /// 判断是否应该处理按键（防抖处理）
    pub fn should_process_key(
        &mut self,
        code: &KeyCode,
    ) -> bool {
        let now = Instant::now();
        let time_since_last =
            now.duration_since(self.last_key_time);

        // 同一个键必须间隔指定时间
        let is_same_key =
            self.last_key_code.as_ref() == Some(code);
        if is_same_key
            && time_since_last.as_millis()
                < self.debounce_duration_ms as u128
        {
            return false;
        }

        self.last_key_code = Some(*code);
        self.last_key_time = now;

        true
    }

    /// 把按键映射为动作
    ///
    /// 只有当前显示的控件才能被"点击"；数字键选择当前页码组内的第 n 个按钮。
    pub fn map_key(
        &self,
        code: KeyCode,
        current_view: ViewMode,
        clickable: Clickable<'_>,
    ) -> Option<KeyAction> {
        let dispatch = |e| Some(KeyAction::Dispatch(e));

        match code {
            KeyCode::Esc | KeyCode::Char('q') => Some(KeyAction::Quit),
            KeyCode::Char('r') => Some(KeyAction::Redraw),
            KeyCode::Up => Some(KeyAction::ScrollUp),
            KeyCode::Down => Some(KeyAction::ScrollDown),
            KeyCode::Left if clickable.prev_visible => {
                dispatch(NavEvent::FloatingPrevClicked)
            }
            KeyCode::Right if clickable.next_visible => {
                dispatch(NavEvent::FloatingNextClicked)
            }
            KeyCode::Char('v') | KeyCode::Tab => {
                dispatch(NavEvent::ViewModeChanged(current_view.toggled()))
            }
            KeyCode::Char('f') => {
                dispatch(NavEvent::ViewModeChanged(ViewMode::List))
            }
            KeyCode::Char('c') => {
                dispatch(NavEvent::ViewModeChanged(ViewMode::Card))
            }
            KeyCode::Home => control_target(clickable.controls, ControlKind::First),
            KeyCode::PageUp => {
                control_target(clickable.controls, ControlKind::Previous)
            }
            KeyCode::PageDown => {
                control_target(clickable.controls, ControlKind::Next)
            }
            KeyCode::End => control_target(clickable.controls, ControlKind::Last),
            KeyCode::Char(ch @ '0'..='9') => {
                // '1'..'9' 对应第1到第9个，'0' 对应第10个
                let slot = match ch.to_digit(10) {
                    Some(0) => 9,
                    Some(d) => d as usize - 1,
                    None => return None,
                };
                clickable
                    .controls
                    .iter()
                    .filter(|c| c.kind == ControlKind::Page)
                    .nth(slot)
                    .and_then(|c| dispatch(NavEvent::PageButtonClicked(c.target)))
            }
            _ => None,
        }
    }
}

impl Default for KeyboardHandler {
    /// 默认 150ms 防抖
    fn default() -> Self {
        Self::new(150)
    }
}

fn control_target(
    controls: &[PageControl],
    kind: ControlKind,
) -> Option<KeyAction> {
    controls
        .iter()
        .find(|c| c.kind == kind)
        .map(|c| KeyAction::Dispatch(NavEvent::PageButtonClicked(c.target)))
}
