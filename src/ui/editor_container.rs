use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    draw,
    enums::{Align, Cursor, Event, Font, Key, Shortcut},
    group::{Flex, FlexType},
    menu::{MenuButton, MenuFlag},
    prelude::*,
    text::{TextBuffer, TextEditor},
    widget::Widget,
};

use super::theme::{Palette, palette, style_editor};
use crate::app::controllers::documents::DocumentId;
use crate::app::domain::geometry::Rect;
use crate::app::domain::layout::{Orientation, PaneId, PaneRegion};
use crate::app::domain::messages::Message;

pub const TAB_STRIP_HEIGHT: i32 = 30;

const SPLIT_BTN_WIDTH: i32 = 30;
const MIN_TAB_WIDTH: i32 = 60;
const MAX_TAB_WIDTH: i32 = 200;
const CLOSE_BTN_SIZE: i32 = 14;
const CLOSE_BTN_MARGIN: i32 = 6;
const TAB_H_PADDING: i32 = 10;
const CORNER_RADIUS: i32 = 6;
const TAB_GAP: i32 = 1;
/// Pointer travel before a press on a tab becomes a drag.
const DRAG_THRESHOLD: i32 = 6;

/// What a tab strip shows for one tab.
#[derive(Debug, Clone, PartialEq)]
pub struct TabInfo {
    pub title: String,
    pub dirty: bool,
}

#[derive(Clone, Copy)]
struct TabDrag {
    index: usize,
    origin: (i32, i32),
    moved: bool,
}

enum StripHit {
    Tab { index: usize, is_close: bool },
    None,
}

struct TabStripState {
    pane: PaneId,
    tabs: Vec<TabInfo>,
    active: Option<usize>,
    /// (x offset, width) per tab, relative to the strip.
    layout: Vec<(i32, i32)>,
    is_dark: bool,
    hover_tab: Option<usize>,
    hover_close: bool,
    drag: Option<TabDrag>,
    sender: Sender<Message>,
    widget_w: i32,
}

/// One pane of the split workspace: a tab strip, a split/close menu button
/// and a single `TextEditor` showing the active tab's buffer.
pub struct EditorContainer {
    pane: PaneId,
    strip: Widget,
    split_btn: MenuButton,
    editor: TextEditor,
    state: Rc<RefCell<TabStripState>>,
    read_only: Rc<Cell<bool>>,
    empty_buffer: TextBuffer,
    bound: Option<DocumentId>,
}

impl EditorContainer {
    /// Build the pane inside the current group.
    pub fn new(pane: PaneId, sender: Sender<Message>, is_dark: bool) -> Self {
        let mut flex = Flex::default();
        flex.set_type(FlexType::Column);

        let mut header = Flex::default();
        header.set_type(FlexType::Row);
        let mut strip = Widget::new(0, 0, 0, TAB_STRIP_HEIGHT, None);
        let mut split_btn = MenuButton::default().with_label("@menu");
        split_btn.set_tooltip("Split or close this pane");
        header.fixed(&split_btn, SPLIT_BTN_WIDTH);
        header.end();
        flex.fixed(&header, TAB_STRIP_HEIGHT);

        let mut editor = TextEditor::default();
        let empty_buffer = TextBuffer::default();
        editor.set_buffer(empty_buffer.clone());
        style_editor(&mut editor, is_dark);
        flex.end();

        let fl = MenuFlag::Normal;
        let sc = Shortcut::None;
        split_btn.add_emit("Split Horizontally", sc, fl, sender, Message::SplitPane(pane, Orientation::Horizontal));
        split_btn.add_emit("Split Vertically", sc, fl, sender, Message::SplitPane(pane, Orientation::Vertical));
        split_btn.add_emit("Close Pane", sc, fl, sender, Message::ClosePane(pane));

        let state = Rc::new(RefCell::new(TabStripState {
            pane,
            tabs: Vec::new(),
            active: None,
            layout: Vec::new(),
            is_dark,
            hover_tab: None,
            hover_close: false,
            drag: None,
            sender,
            widget_w: strip.w(),
        }));

        let draw_state = state.clone();
        strip.draw(move |wid| {
            let mut st = draw_state.borrow_mut();
            if st.widget_w != wid.w() {
                st.widget_w = wid.w();
                compute_layout(&mut st);
            }
            draw_tab_strip(wid, &st);
        });

        let handle_state = state.clone();
        strip.handle(move |wid, event| handle_tab_strip(wid, event, &handle_state));

        let read_only = Rc::new(Cell::new(false));
        let guard = read_only.clone();
        editor.handle(move |_, event| match event {
            Event::Focus => {
                sender.send(Message::EditorFocused(pane));
                false
            }
            Event::KeyDown if guard.get() => !is_navigation_key(),
            Event::Paste | Event::DndRelease if guard.get() => true,
            _ => false,
        });

        Self {
            pane,
            strip,
            split_btn,
            editor,
            state,
            read_only,
            empty_buffer,
            bound: None,
        }
    }

    pub fn pane(&self) -> PaneId {
        self.pane
    }

    pub fn editor(&self) -> &TextEditor {
        &self.editor
    }

    /// Update the strip. Redraws only when something visible changed.
    pub fn set_tabs(&mut self, tabs: Vec<TabInfo>, active: Option<usize>) {
        let mut st = self.state.borrow_mut();
        if st.tabs == tabs && st.active == active {
            return;
        }
        st.tabs = tabs;
        st.active = active;
        st.hover_tab = None;
        st.hover_close = false;
        st.widget_w = self.strip.w();
        compute_layout(&mut st);
        drop(st);
        self.strip.redraw();
    }

    /// Show a document's buffer in the editor, or an empty page when the
    /// pane has no tabs.
    pub fn bind(&mut self, document: Option<(DocumentId, &TextBuffer)>, read_only: bool) {
        let id = document.map(|(id, _)| id);
        if id != self.bound || id.is_none() {
            let buffer = document.map_or(&self.empty_buffer, |(_, buffer)| buffer);
            self.editor.set_buffer(buffer.clone());
            self.editor.set_insert_position(0);
            self.bound = id;
        }
        self.read_only.set(read_only || id.is_none());
        self.editor.redraw();
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only.get()
    }

    pub fn set_font(&mut self, font: Font, size: i32) {
        self.editor.set_text_font(font);
        self.editor.set_text_size(size);
        self.editor.redraw();
    }

    pub fn apply_theme(&mut self, is_dark: bool) {
        self.state.borrow_mut().is_dark = is_dark;
        style_editor(&mut self.editor, is_dark);
        let p = palette(is_dark);
        self.split_btn.set_color(p.strip_bg);
        self.split_btn.set_label_color(p.text);
        self.strip.redraw();
        self.split_btn.redraw();
    }

    /// Screen bounds for drop-target resolution.
    pub fn region(&self) -> PaneRegion {
        PaneRegion {
            pane: self.pane,
            tab_strip: widget_rect(&self.strip),
            content: widget_rect(&self.editor),
            visible: self.strip.visible_r() && self.editor.visible_r(),
        }
    }
}

fn widget_rect<W: WidgetExt>(w: &W) -> Rect {
    Rect::new(w.x(), w.y(), w.w(), w.h())
}

/// Keys a read-only page still accepts: movement, copy and select-all.
fn is_navigation_key() -> bool {
    let key = app::event_key();
    if app::is_event_ctrl() || app::is_event_command() {
        return key == Key::from_char('c') || key == Key::from_char('a');
    }
    matches!(
        key,
        Key::Left | Key::Right | Key::Up | Key::Down | Key::PageUp | Key::PageDown | Key::Home | Key::End
    )
}

// --- Layout ---

fn compute_layout(st: &mut TabStripState) {
    st.layout.clear();
    let count = st.tabs.len() as i32;
    if count == 0 {
        return;
    }
    let available = st.widget_w - TAB_GAP * (count - 1);
    let tab_width = (available / count).clamp(MIN_TAB_WIDTH, MAX_TAB_WIDTH);
    let mut cursor_x = 0;
    for _ in 0..count {
        st.layout.push((cursor_x, tab_width));
        cursor_x += tab_width + TAB_GAP;
    }
}

fn hit_test(layout: &[(i32, i32)], wy: i32, mx: i32, my: i32) -> StripHit {
    if my < wy || my >= wy + TAB_STRIP_HEIGHT {
        return StripHit::None;
    }
    for (index, &(x, width)) in layout.iter().enumerate() {
        if mx >= x && mx < x + width {
            let close_x = x + width - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE;
            let close_y = wy + (TAB_STRIP_HEIGHT - CLOSE_BTN_SIZE) / 2;
            let is_close = mx >= close_x
                && mx <= close_x + CLOSE_BTN_SIZE
                && my >= close_y
                && my <= close_y + CLOSE_BTN_SIZE;
            return StripHit::Tab { index, is_close };
        }
    }
    StripHit::None
}

// --- Drawing ---

fn truncate_to_fit(text: &str, max_width: i32) -> String {
    if max_width <= 0 {
        return String::new();
    }
    draw::set_font(Font::Helvetica, 12);
    let (tw, _) = draw::measure(text, true);
    if tw <= max_width {
        return text.to_string();
    }

    let ellipsis = "...";
    let chars: Vec<char> = text.chars().collect();
    for len in (1..chars.len()).rev() {
        let candidate: String = chars[..len].iter().collect();
        let full = format!("{candidate}{ellipsis}");
        let (fw, _) = draw::measure(&full, true);
        if fw <= max_width {
            return full;
        }
    }
    ellipsis.to_string()
}

fn draw_rounded_top_rect(x: i32, y: i32, w: i32, h: i32, r: i32, p: &Palette, active: bool) {
    draw::set_draw_color(if active { p.tab_active_bg } else { p.tab_inactive_bg });
    draw::draw_rectf(x, y + r, w, h - r);
    draw::draw_rectf(x + r, y, w - 2 * r, r);
    draw::draw_pie(x, y, 2 * r, 2 * r, 90.0, 180.0);
    draw::draw_pie(x + w - 2 * r, y, 2 * r, 2 * r, 0.0, 90.0);
}

fn draw_tab_strip(wid: &Widget, st: &TabStripState) {
    let (wx, wy, ww, wh) = (wid.x(), wid.y(), wid.w(), wid.h());
    let p = palette(st.is_dark);

    draw::push_clip(wx, wy, ww, wh);
    draw::set_draw_color(p.strip_bg);
    draw::draw_rectf(wx, wy, ww, wh);

    for (index, &(x, tab_width)) in st.layout.iter().enumerate() {
        let Some(tab) = st.tabs.get(index) else {
            continue;
        };
        let tx = wx + x;
        let is_active = st.active == Some(index);
        let dragged = st.drag.is_some_and(|d| d.moved && d.index == index);

        if is_active {
            draw_rounded_top_rect(tx, wy, tab_width, wh, CORNER_RADIUS, &p, true);
            draw::set_draw_color(p.accent);
            draw::draw_rectf(tx, wy + wh - 2, tab_width, 2);
        } else {
            draw_rounded_top_rect(tx, wy + 2, tab_width, wh - 2, CORNER_RADIUS, &p, false);
        }

        let text_color = if is_active && !dragged { p.highlight_text } else { p.inactive_text };
        let label = if tab.dirty {
            format!("\u{25cf} {}", tab.title)
        } else {
            tab.title.clone()
        };
        let text_area_width = tab_width - TAB_H_PADDING - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE - TAB_H_PADDING;
        let display_text = truncate_to_fit(&label, text_area_width);

        draw::set_draw_color(text_color);
        draw::set_font(Font::Helvetica, 12);
        draw::draw_text(&display_text, tx + TAB_H_PADDING, wy + (wh + 12) / 2);

        let close_x = tx + tab_width - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE;
        let close_y = wy + (wh - CLOSE_BTN_SIZE) / 2;
        let is_hovered = st.hover_tab == Some(index);
        if is_hovered && st.hover_close {
            draw::set_draw_color(p.close_hover_bg);
            draw::draw_rectf(close_x - 2, close_y - 2, CLOSE_BTN_SIZE + 4, CLOSE_BTN_SIZE + 4);
        }
        draw::set_draw_color(if is_active || is_hovered { text_color } else { p.inactive_text });
        draw::set_font(Font::HelveticaBold, 20);
        draw::draw_text2("\u{00d7}", close_x, close_y, CLOSE_BTN_SIZE, CLOSE_BTN_SIZE, Align::Center);
    }
    draw::pop_clip();
}

fn show_tab_menu(st: &TabStripState, index: usize) {
    let (pane, sender) = (st.pane, st.sender);
    let mut menu = MenuButton::new(app::event_x(), app::event_y(), 1, 1, None);
    let sc = Shortcut::None;
    let fl = MenuFlag::Normal;
    menu.add_emit("Close Tab", sc, fl, sender, Message::TabClose(pane, index));
    menu.add_emit("Split Horizontally", sc, fl, sender, Message::SplitPane(pane, Orientation::Horizontal));
    menu.add_emit("Split Vertically", sc, fl, sender, Message::SplitPane(pane, Orientation::Vertical));
    menu.popup();
}

fn set_cursor(wid: &Widget, cursor: Cursor) {
    if let Some(mut win) = wid.window() {
        win.set_cursor(cursor);
    }
}

// --- Event handling ---

fn handle_tab_strip(wid: &mut Widget, event: Event, state: &Rc<RefCell<TabStripState>>) -> bool {
    match event {
        Event::Push => {
            let mx = app::event_x() - wid.x();
            let my = app::event_y();
            let button = app::event_button();
            let hit = hit_test(&state.borrow().layout, wid.y(), mx, my);
            let (pane, sender) = {
                let st = state.borrow();
                (st.pane, st.sender)
            };

            match hit {
                StripHit::Tab { index, .. } if button == 3 => {
                    show_tab_menu(&state.borrow(), index);
                }
                StripHit::Tab { index, .. } if button == 2 => {
                    sender.send(Message::TabClose(pane, index));
                }
                StripHit::Tab { index, is_close: true } => {
                    sender.send(Message::TabClose(pane, index));
                }
                StripHit::Tab { index, is_close: false } => {
                    state.borrow_mut().drag = Some(TabDrag {
                        index,
                        origin: (app::event_x(), app::event_y()),
                        moved: false,
                    });
                    sender.send(Message::TabActivate(pane, index));
                }
                StripHit::None => {
                    sender.send(Message::EditorFocused(pane));
                }
            }
            true
        }
        Event::Drag => {
            let mut st = state.borrow_mut();
            let Some(mut drag) = st.drag else {
                return false;
            };
            if !drag.moved {
                let dx = app::event_x() - drag.origin.0;
                let dy = app::event_y() - drag.origin.1;
                if dx.abs() + dy.abs() < DRAG_THRESHOLD {
                    return true;
                }
                drag.moved = true;
                st.drag = Some(drag);
                drop(st);
                set_cursor(wid, Cursor::Move);
                wid.redraw();
            }
            true
        }
        Event::Released => {
            let mut st = state.borrow_mut();
            let drag = st.drag.take();
            let (pane, sender) = (st.pane, st.sender);
            drop(st);
            if let Some(drag) = drag
                && drag.moved
            {
                set_cursor(wid, Cursor::Default);
                wid.redraw();
                sender.send(Message::TabDropped {
                    pane,
                    index: drag.index,
                    x: app::event_x(),
                    y: app::event_y(),
                });
            }
            true
        }
        Event::Move => {
            let mut st = state.borrow_mut();
            let mx = app::event_x() - wid.x();
            let my = app::event_y();
            let (hover, close) = match hit_test(&st.layout, wid.y(), mx, my) {
                StripHit::Tab { index, is_close } => (Some(index), is_close),
                StripHit::None => (None, false),
            };
            if hover != st.hover_tab || close != st.hover_close {
                st.hover_tab = hover;
                st.hover_close = close;
                drop(st);
                wid.redraw();
            }
            true
        }
        Event::Enter => true,
        Event::Leave => {
            let mut st = state.borrow_mut();
            if st.hover_tab.is_some() || st.hover_close {
                st.hover_tab = None;
                st.hover_close = false;
                drop(st);
                wid.redraw();
            }
            false
        }
        _ => false,
    }
}
