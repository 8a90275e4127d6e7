use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    button::{Button, RadioButton},
    draw::{self, LineStyle},
    enums::{Align, Color, Event, Font, FrameType, Key, Shortcut},
    frame::Frame,
    group::{Flex, FlexType},
    menu::{Choice, MenuButton, MenuFlag},
    prelude::*,
    widget::Widget,
};

use super::theme::palette;
use crate::app::domain::geometry::Point;
use crate::app::domain::messages::Message;
use crate::app::domain::mindmap::node::{HEIGHT_PRESETS, WIDTH_PRESETS};
use crate::app::domain::mindmap::{
    ContextTarget, DragState, Hit, HandleRole, LineKind, MindMap, Mode, PressOutcome, Selection, ShapeKind,
    handle::{HANDLE_SIZE, handles_for},
    text::TEXT_HEIGHT,
};

const TOOLBAR_HEIGHT: i32 = 30;
const ELLIPSE_FILL: (u8, u8, u8) = (255, 255, 200);
const RECT_FILL: (u8, u8, u8) = (200, 255, 200);
const RESIZE_HANDLE: (u8, u8, u8) = (255, 0, 0);
const CONNECT_HANDLE: (u8, u8, u8) = (0, 0, 255);
const MODES: [Mode; 4] = [Mode::Select, Mode::CreateNode, Mode::CreateLine, Mode::CreateText];

/// Canvas position to widget position. The model origin sits at the centre
/// of the canvas, shifted by the pan offset.
fn to_screen(bounds: (i32, i32, i32, i32), pan: (i32, i32), p: Point) -> (i32, i32) {
    let (x, y, w, h) = bounds;
    let ox = x + w / 2 + pan.0;
    let oy = y + h / 2 + pan.1;
    (ox + p.x.round() as i32, oy + p.y.round() as i32)
}

fn to_model(bounds: (i32, i32, i32, i32), pan: (i32, i32), sx: i32, sy: i32) -> Point {
    let (x, y, w, h) = bounds;
    let ox = x + w / 2 + pan.0;
    let oy = y + h / 2 + pan.1;
    Point::new(f64::from(sx - ox), f64::from(sy - oy))
}

/// Index of the preset closest to `value`.
fn preset_index(presets: &[f64], value: f64) -> i32 {
    presets
        .iter()
        .enumerate()
        .min_by(|a, b| (a.1 - value).abs().total_cmp(&(b.1 - value).abs()))
        .map_or(0, |(i, _)| i as i32)
}

struct CanvasState {
    pan: (i32, i32),
    pan_anchor: Option<(i32, i32)>,
    is_dark: bool,
    sender: Sender<Message>,
}

/// The mind-map tab: a toolbar over a custom-drawn canvas. The model is
/// shared with the application state, which runs prompts and persistence.
pub struct MindMapView {
    model: Rc<RefCell<MindMap>>,
    canvas: Widget,
    state: Rc<RefCell<CanvasState>>,
    mode_buttons: Vec<RadioButton>,
    shape_choice: Choice,
    width_choice: Choice,
    height_choice: Choice,
    mode_label: Frame,
}

impl MindMapView {
    pub fn new(sender: Sender<Message>, model: Rc<RefCell<MindMap>>) -> Self {
        let mut flex = Flex::default();
        flex.set_type(FlexType::Column);

        let mut toolbar = Flex::default();
        toolbar.set_type(FlexType::Row);
        toolbar.set_margin(2);
        toolbar.set_pad(4);

        let mut mode_buttons = Vec::new();
        for mode in MODES {
            let mut btn = RadioButton::default().with_label(mode.label());
            btn.set_label_size(12);
            btn.emit(sender, Message::MindMapSetMode(mode));
            toolbar.fixed(&btn, 60);
            mode_buttons.push(btn);
        }

        let mut shape_choice = Choice::default();
        shape_choice.set_tooltip("Shape of new nodes");
        for shape in [ShapeKind::Ellipse, ShapeKind::Rect] {
            shape_choice.add_emit(shape.label(), Shortcut::None, MenuFlag::Normal, sender, Message::MindMapSetShape(shape));
        }
        toolbar.fixed(&shape_choice, 90);

        let mut width_choice = Choice::default();
        width_choice.set_tooltip("Width of new nodes");
        for w in WIDTH_PRESETS {
            width_choice.add_emit(&format!("W {w}"), Shortcut::None, MenuFlag::Normal, sender, Message::MindMapSetWidth(w));
        }
        toolbar.fixed(&width_choice, 70);

        let mut height_choice = Choice::default();
        height_choice.set_tooltip("Height of new nodes");
        for h in HEIGHT_PRESETS {
            height_choice.add_emit(&format!("H {h}"), Shortcut::None, MenuFlag::Normal, sender, Message::MindMapSetHeight(h));
        }
        toolbar.fixed(&height_choice, 70);

        let mut mode_label = Frame::default();
        mode_label.set_align(Align::Left | Align::Inside);
        mode_label.set_label_size(12);

        for (label, msg) in [
            ("New", Message::MindMapNew),
            ("Save...", Message::MindMapSave),
            ("Load...", Message::MindMapLoad),
        ] {
            let mut btn = Button::default().with_label(label);
            btn.set_label_size(12);
            btn.emit(sender, msg);
            toolbar.fixed(&btn, 60);
        }
        toolbar.end();
        flex.fixed(&toolbar, TOOLBAR_HEIGHT);

        let mut canvas = Widget::default();
        canvas.set_frame(FrameType::FlatBox);
        flex.end();

        let state = Rc::new(RefCell::new(CanvasState {
            pan: (0, 0),
            pan_anchor: None,
            is_dark: false,
            sender,
        }));

        let draw_model = model.clone();
        let draw_state = state.clone();
        canvas.draw(move |wid| {
            let map = draw_model.borrow();
            let st = draw_state.borrow();
            draw_canvas(wid, &map, &st);
        });

        let handle_model = model.clone();
        let handle_state = state.clone();
        canvas.handle(move |wid, event| handle_canvas(wid, event, &handle_model, &handle_state));

        let mut view = Self {
            model,
            canvas,
            state,
            mode_buttons,
            shape_choice,
            width_choice,
            height_choice,
            mode_label,
        };
        view.sync_toolbar();
        view
    }

    pub fn redraw(&mut self) {
        self.canvas.redraw();
    }

    /// Reset the pan so the root is centred again.
    pub fn reset_view(&mut self) {
        self.state.borrow_mut().pan = (0, 0);
        self.canvas.redraw();
    }

    /// Reflect the model's tool state in the toolbar.
    pub fn sync_toolbar(&mut self) {
        let map = self.model.borrow();
        let mode = map.mode();
        for (btn, m) in self.mode_buttons.iter_mut().zip(MODES) {
            btn.set_value(m == mode);
        }
        self.shape_choice.set_value(match map.shape() {
            ShapeKind::Ellipse => 0,
            ShapeKind::Rect => 1,
        });
        let (w, h) = map.node_size();
        self.width_choice.set_value(preset_index(&WIDTH_PRESETS, w));
        self.height_choice.set_value(preset_index(&HEIGHT_PRESETS, h));
        self.mode_label.set_label(&format!("Mode: {}", mode.label()));
        drop(map);
        self.mode_label.redraw();
        self.canvas.redraw();
    }

    pub fn apply_theme(&mut self, is_dark: bool) {
        self.state.borrow_mut().is_dark = is_dark;
        let p = palette(is_dark);
        self.mode_label.set_label_color(p.text);
        self.mode_label.redraw();
        self.canvas.redraw();
    }
}

// --- Drawing ---

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::from_rgb(r, g, b)
}

fn draw_canvas(wid: &Widget, map: &MindMap, st: &CanvasState) {
    let bounds = (wid.x(), wid.y(), wid.w(), wid.h());
    let p = palette(st.is_dark);

    draw::push_clip(wid.x(), wid.y(), wid.w(), wid.h());
    draw::set_draw_color(p.canvas_bg);
    draw::draw_rectf(wid.x(), wid.y(), wid.w(), wid.h());

    if map.is_empty() {
        draw::set_draw_color(p.inactive_text);
        draw::set_font(Font::Helvetica, 14);
        draw::draw_text2(
            "Right-click and choose New Mind Map",
            wid.x(),
            wid.y(),
            wid.w(),
            wid.h(),
            Align::Center,
        );
    }

    // Lines under nodes
    for line in map.lines() {
        let Some((a, b)) = map.line_endpoints(line.id) else {
            continue;
        };
        let (x1, y1) = to_screen(bounds, st.pan, a);
        let (x2, y2) = to_screen(bounds, st.pan, b);
        let selected = map.is_selected(Selection::Line(line.id));
        let color = match (selected, line.kind) {
            (true, _) => p.error,
            (false, LineKind::Branch) => p.text,
            (false, LineKind::Link) => p.accent,
        };
        draw::set_draw_color(color);
        draw::set_line_style(LineStyle::Solid, if selected { 3 } else { 2 });
        draw::draw_line(x1, y1, x2, y2);
    }

    // Rubber band while connecting
    if let Some(DragState::Connecting { start, pointer }) = map.drag_state()
        && let Some(node) = map.node(start)
    {
        let (x1, y1) = to_screen(bounds, st.pan, node.pos);
        let (x2, y2) = to_screen(bounds, st.pan, pointer);
        draw::set_draw_color(p.accent);
        draw::set_line_style(LineStyle::Dash, 1);
        draw::draw_line(x1, y1, x2, y2);
    }

    for node in map.nodes() {
        let (x, y) = to_screen(bounds, st.pan, node.top_left());
        let (w, h) = (node.width.round() as i32, node.height.round() as i32);
        let selected = map.is_selected(Selection::Node(node.id));

        draw::set_line_style(LineStyle::Solid, if selected { 3 } else { 2 });
        match node.shape {
            ShapeKind::Ellipse => {
                draw::set_draw_color(rgb(ELLIPSE_FILL));
                draw::draw_pie(x, y, w, h, 0.0, 360.0);
                draw::set_draw_color(if selected { p.accent } else { Color::Black });
                draw::draw_arc(x, y, w, h, 0.0, 360.0);
            }
            ShapeKind::Rect => {
                draw::set_draw_color(rgb(RECT_FILL));
                draw::draw_rectf(x, y, w, h);
                draw::set_draw_color(if selected { p.accent } else { Color::Black });
                draw::draw_rect(x, y, w, h);
            }
        }

        draw::set_draw_color(Color::Black);
        draw::set_font(Font::Helvetica, 12);
        draw::draw_text2(&node.text, x + 4, y, w - 8, h, Align::Center | Align::Wrap);

        draw::set_line_style(LineStyle::Solid, 1);
        let half = (HANDLE_SIZE / 2.0) as i32;
        let size = HANDLE_SIZE as i32;
        for handle in handles_for(node) {
            let (cx, cy) = to_screen(bounds, st.pan, handle.center(node));
            match handle.role() {
                HandleRole::Resize => {
                    draw::set_draw_color(rgb(RESIZE_HANDLE));
                    draw::draw_rectf(cx - half, cy - half, size, size);
                }
                HandleRole::Connect => {
                    draw::set_draw_color(rgb(CONNECT_HANDLE));
                    draw::draw_pie(cx - half, cy - half, size, size, 0.0, 360.0);
                }
            }
            draw::set_draw_color(Color::Black);
            draw::draw_rect(cx - half, cy - half, size, size);
        }
    }

    for text in map.texts() {
        let (x, y) = to_screen(bounds, st.pan, text.pos);
        let w = text.width().round() as i32;
        let h = TEXT_HEIGHT as i32;
        draw::set_draw_color(p.text);
        draw::set_font(Font::Helvetica, 12);
        draw::draw_text2(&text.text, x, y, w, h, Align::Left | Align::Inside);
        if map.is_selected(Selection::Text(text.id)) {
            draw::set_draw_color(p.accent);
            draw::set_line_style(LineStyle::Dot, 1);
            draw::draw_rect(x - 2, y, w + 4, h);
        }
    }

    if let Some(DragState::Marquee { origin, pointer }) = map.drag_state() {
        let (x1, y1) = to_screen(bounds, st.pan, origin);
        let (x2, y2) = to_screen(bounds, st.pan, pointer);
        draw::set_draw_color(p.accent);
        draw::set_line_style(LineStyle::Dash, 1);
        draw::draw_rect(x1.min(x2), y1.min(y2), (x2 - x1).abs() + 1, (y2 - y1).abs() + 1);
    }

    draw::set_line_style(LineStyle::Solid, 0);
    draw::pop_clip();
}

// --- Events ---

fn show_context_menu(sender: Sender<Message>, target: ContextTarget, at: Point) {
    let mut menu = MenuButton::new(app::event_x(), app::event_y(), 1, 1, None);
    let sc = Shortcut::None;
    let fl = MenuFlag::Normal;
    match target {
        ContextTarget::Empty => {
            menu.add_emit("New Mind Map", sc, MenuFlag::MenuDivider, sender, Message::MindMapNew);
            menu.add_emit("Add Node Here", sc, fl, sender, Message::MindMapPromptNode(at));
            menu.add_emit("Add Text Here", sc, fl, sender, Message::MindMapPromptText(at));
        }
        ContextTarget::RootNode(id) => {
            menu.add_emit("Add Child", sc, fl, sender, Message::MindMapAddChild(id));
            menu.add_emit("Edit Text", sc, fl, sender, Message::MindMapEditNode(id));
        }
        ContextTarget::Node(id) => {
            menu.add_emit("Add Child", sc, fl, sender, Message::MindMapAddChild(id));
            menu.add_emit("Edit Text", sc, fl, sender, Message::MindMapEditNode(id));
            menu.add_emit("Delete Node", sc, fl, sender, Message::MindMapDeleteNode(id));
        }
        ContextTarget::Text(id) => {
            menu.add_emit("Edit Text", sc, fl, sender, Message::MindMapEditText(id));
            menu.add_emit("Delete Text", sc, fl, sender, Message::MindMapDeleteText(id));
        }
        ContextTarget::Line(id) => {
            menu.add_emit("Delete Line", sc, fl, sender, Message::MindMapDeleteLine(id));
        }
    }
    menu.popup();
}

fn handle_canvas(
    wid: &mut Widget,
    event: Event,
    model: &Rc<RefCell<MindMap>>,
    state: &Rc<RefCell<CanvasState>>,
) -> bool {
    let bounds = (wid.x(), wid.y(), wid.w(), wid.h());
    match event {
        Event::Push => {
            let _ = wid.take_focus();
            let (pan, sender) = {
                let st = state.borrow();
                (st.pan, st.sender)
            };
            let p = to_model(bounds, pan, app::event_x(), app::event_y());

            match app::event_button() {
                2 => {
                    state.borrow_mut().pan_anchor = Some((app::event_x(), app::event_y()));
                }
                3 => {
                    let target = model.borrow().context_target(p);
                    show_context_menu(sender, target, p);
                }
                _ => {
                    if app::event_clicks() {
                        let hit = model.borrow().hit_test(p);
                        match hit {
                            Some(Hit::Node(id)) => sender.send(Message::MindMapEditNode(id)),
                            Some(Hit::Text(id)) => sender.send(Message::MindMapEditText(id)),
                            _ => {}
                        }
                        return true;
                    }
                    let outcome = model.borrow_mut().press(p);
                    match outcome {
                        PressOutcome::PromptFreeNode(at) => sender.send(Message::MindMapPromptNode(at)),
                        PressOutcome::PromptFreeText(at) => sender.send(Message::MindMapPromptText(at)),
                        PressOutcome::Nothing => {}
                        _ => wid.redraw(),
                    }
                }
            }
            true
        }
        Event::Drag => {
            let mut st = state.borrow_mut();
            if let Some((ax, ay)) = st.pan_anchor {
                let (ex, ey) = (app::event_x(), app::event_y());
                st.pan = (st.pan.0 + ex - ax, st.pan.1 + ey - ay);
                st.pan_anchor = Some((ex, ey));
                drop(st);
                wid.redraw();
                return true;
            }
            let p = to_model(bounds, st.pan, app::event_x(), app::event_y());
            drop(st);
            if model.borrow_mut().drag_to(p) {
                wid.redraw();
            }
            true
        }
        Event::Released => {
            let mut st = state.borrow_mut();
            if st.pan_anchor.take().is_some() {
                return true;
            }
            let p = to_model(bounds, st.pan, app::event_x(), app::event_y());
            drop(st);
            let had_gesture = model.borrow().drag_state().is_some();
            if let Some(line) = model.borrow_mut().release(p) {
                log::debug!("connected nodes with line {:?}", line);
            }
            if had_gesture {
                wid.redraw();
            }
            true
        }
        Event::KeyDown => {
            let key = app::event_key();
            if key == Key::Delete || key == Key::BackSpace {
                state.borrow().sender.send(Message::MindMapDeleteSelected);
                return true;
            }
            false
        }
        Event::Focus | Event::Unfocus => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_canvas_centre() {
        let bounds = (10, 20, 400, 300);
        assert_eq!(to_screen(bounds, (0, 0), Point::new(0.0, 0.0)), (210, 170));
        assert_eq!(to_model(bounds, (0, 0), 210, 170), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_pan_shifts_both_directions() {
        let bounds = (0, 0, 200, 200);
        let pan = (30, -10);
        let p = Point::new(150.0, -80.0);
        let (sx, sy) = to_screen(bounds, pan, p);
        assert_eq!((sx, sy), (280, 10));
        assert_eq!(to_model(bounds, pan, sx, sy), p);
    }

    #[test]
    fn test_preset_index_picks_nearest() {
        assert_eq!(preset_index(&WIDTH_PRESETS, 120.0), 2);
        assert_eq!(preset_index(&WIDTH_PRESETS, 190.0), 4);
        assert_eq!(preset_index(&HEIGHT_PRESETS, 10.0), 0);
    }
}
