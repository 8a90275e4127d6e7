use fltk::{
    app,
    enums::Color,
    frame::Frame,
    menu::MenuBar,
    prelude::*,
    text::TextEditor,
    window::Window,
};

/// Colours shared by the stock widgets and the custom-drawn ones.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub window_bg: Color,
    pub sidebar_bg: Color,
    pub menu_bg: Color,
    pub editor_bg: Color,
    pub text: Color,
    pub inactive_text: Color,
    pub highlight_text: Color,
    pub selection: Color,
    pub accent: Color,
    pub border: Color,
    pub line_number_fg: Color,
    pub line_number_bg: Color,
    pub strip_bg: Color,
    pub tab_active_bg: Color,
    pub tab_inactive_bg: Color,
    pub close_hover_bg: Color,
    pub canvas_bg: Color,
    pub error: Color,
    pub warning: Color,
    pub success: Color,
    pub info: Color,
}

pub fn palette(is_dark: bool) -> Palette {
    if is_dark {
        Palette {
            window_bg: Color::from_hex(0x1e1e1e),
            sidebar_bg: Color::from_hex(0x252526),
            menu_bg: Color::from_hex(0x333333),
            editor_bg: Color::from_hex(0x1e1e1e),
            text: Color::from_hex(0xcccccc),
            inactive_text: Color::from_hex(0x8c8c8c),
            highlight_text: Color::from_hex(0xffffff),
            selection: Color::from_hex(0x264f78),
            accent: Color::from_hex(0x007acc),
            border: Color::from_hex(0x3d3d3d),
            line_number_fg: Color::from_hex(0x858585),
            line_number_bg: Color::from_hex(0x252526),
            strip_bg: Color::from_rgb(25, 25, 25),
            tab_active_bg: Color::from_rgb(50, 50, 50),
            tab_inactive_bg: Color::from_rgb(35, 35, 35),
            close_hover_bg: Color::from_rgb(70, 70, 70),
            canvas_bg: Color::from_hex(0x1e1e1e),
            error: Color::from_hex(0xf48771),
            warning: Color::from_hex(0xcca700),
            success: Color::from_hex(0x89d185),
            info: Color::from_hex(0x75beff),
        }
    } else {
        Palette {
            window_bg: Color::from_rgb(240, 240, 240),
            sidebar_bg: Color::from_rgb(230, 230, 230),
            menu_bg: Color::from_rgb(240, 240, 240),
            editor_bg: Color::White,
            text: Color::Black,
            inactive_text: Color::from_rgb(80, 80, 80),
            highlight_text: Color::Black,
            selection: Color::from_rgb(173, 216, 230),
            accent: Color::from_hex(0x007acc),
            border: Color::from_rgb(200, 200, 200),
            line_number_fg: Color::from_rgb(100, 100, 100),
            line_number_bg: Color::from_rgb(240, 240, 240),
            strip_bg: Color::from_rgb(200, 200, 200),
            tab_active_bg: Color::from_rgb(255, 255, 255),
            tab_inactive_bg: Color::from_rgb(220, 220, 220),
            close_hover_bg: Color::from_rgb(190, 190, 190),
            canvas_bg: Color::White,
            error: Color::from_rgb(200, 40, 40),
            warning: Color::from_rgb(160, 120, 0),
            success: Color::from_rgb(30, 140, 30),
            info: Color::from_rgb(20, 100, 200),
        }
    }
}

/// Theme the window chrome and set the FLTK scheme colours that the stock
/// widgets (trees, browsers, inputs) pick up.
pub fn apply_theme(window: &mut Window, menu: &mut MenuBar, status_bar: &mut Frame, is_dark: bool) {
    let p = palette(is_dark);

    let (r, g, b) = p.window_bg.to_rgb();
    app::background(r, g, b);
    let (r, g, b) = p.sidebar_bg.to_rgb();
    app::background2(r, g, b);
    let (r, g, b) = p.text.to_rgb();
    app::foreground(r, g, b);
    let (r, g, b) = p.selection.to_rgb();
    app::set_color(Color::Selection, r, g, b);

    window.set_color(p.window_bg);
    window.set_label_color(p.text);
    menu.set_color(p.menu_bg);
    menu.set_text_color(p.text);
    menu.set_selection_color(if is_dark { Color::from_rgb(60, 60, 60) } else { Color::from_rgb(200, 200, 200) });
    status_bar.set_color(if is_dark { p.accent } else { p.border });
    status_bar.set_label_color(if is_dark { p.highlight_text } else { p.text });

    window.redraw();
    menu.redraw();
    status_bar.redraw();
}

pub fn style_editor(editor: &mut TextEditor, is_dark: bool) {
    let p = palette(is_dark);
    editor.set_color(p.editor_bg);
    editor.set_text_color(p.text);
    editor.set_cursor_color(if is_dark { Color::from_rgb(255, 255, 255) } else { Color::Black });
    editor.set_selection_color(p.selection);
    editor.set_linenumber_bgcolor(p.line_number_bg);
    editor.set_linenumber_fgcolor(p.line_number_fg);
    editor.redraw();
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmSetWindowAttribute};

    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);

        let on: i32 = if is_dark { 1 } else { 0 };

        // DWMWA_USE_IMMERSIVE_DARK_MODE, Windows 11 / Windows 10 2004+
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(20),
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );

        // Windows 10 1809-1903
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(19),
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );
    }
}
