use fltk::{
    app::Sender,
    browser::HoldBrowser,
    button::Button,
    enums::{Align, Color},
    frame::Frame,
    group::{Flex, FlexType},
    input::Input,
    prelude::*,
    text::{TextBuffer, TextDisplay, WrapMode},
};

use super::theme::{Palette, palette};
use crate::app::controllers::git_panel::GitPanelState;
use crate::app::domain::messages::Message;
use crate::app::services::git::FileState;

const ROW_HEIGHT: i32 = 26;

/// Sidebar view of [`GitPanelState`]: repository and branch labels, the
/// operation buttons, a commit message field, the file status list and the
/// command output log.
pub struct GitPanelView {
    repo_label: Frame,
    branch_label: Frame,
    busy_label: Frame,
    commit_input: Input,
    status_list: HoldBrowser,
    output: TextDisplay,
    output_buffer: TextBuffer,
    section_labels: Vec<Frame>,
    is_dark: bool,
}

fn button_row(sender: Sender<Message>, buttons: &[(&str, Message)]) -> Flex {
    let mut row = Flex::default();
    row.set_type(FlexType::Row);
    row.set_pad(4);
    for (label, msg) in buttons {
        let mut btn = Button::default().with_label(label);
        btn.set_label_size(12);
        btn.emit(sender, msg.clone());
    }
    row.end();
    row
}

fn section_label(text: &str) -> Frame {
    let mut frame = Frame::default().with_label(text);
    frame.set_align(Align::Left | Align::Inside);
    frame.set_label_size(12);
    frame
}

impl GitPanelView {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut flex = Flex::default();
        flex.set_type(FlexType::Column);
        flex.set_margin(4);
        flex.set_pad(4);

        let mut info = Flex::default();
        info.set_type(FlexType::Row);
        let branch_label = section_label("Branch: not selected");
        let repo_label = section_label("Repository: not selected");
        let mut busy_label = Frame::default();
        busy_label.set_label_size(12);
        info.fixed(&busy_label, 20);
        info.end();
        flex.fixed(&info, 20);

        let row1 = button_row(
            sender,
            &[
                ("Init", Message::GitInit),
                ("Status", Message::GitStatus),
                ("Add All", Message::GitStageAll),
                ("Commit", Message::GitCommit),
            ],
        );
        flex.fixed(&row1, ROW_HEIGHT);
        let row2 = button_row(
            sender,
            &[
                ("Push", Message::GitPush),
                ("Pull", Message::GitPull),
                ("Branches", Message::GitBranches),
                ("Log", Message::GitLog),
            ],
        );
        flex.fixed(&row2, ROW_HEIGHT);

        let mut commit_input = Input::default();
        commit_input.set_tooltip("Commit message (empty uses a default)");
        flex.fixed(&commit_input, ROW_HEIGHT);

        let status_title = section_label("File status:");
        flex.fixed(&status_title, 18);
        let status_list = HoldBrowser::default();

        let output_title = section_label("Command output:");
        flex.fixed(&output_title, 18);
        let mut output = TextDisplay::default();
        let output_buffer = TextBuffer::default();
        output.set_buffer(output_buffer.clone());
        output.set_text_size(12);
        output.wrap_mode(WrapMode::AtBounds, 0);
        flex.end();

        Self {
            repo_label,
            branch_label,
            busy_label,
            commit_input,
            status_list,
            output,
            output_buffer,
            section_labels: vec![status_title, output_title],
            is_dark: false,
        }
    }

    pub fn commit_message(&self) -> String {
        self.commit_input.value()
    }

    pub fn clear_commit_message(&mut self) {
        self.commit_input.set_value("");
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy_label.set_label(if busy { "@refresh" } else { "" });
        self.busy_label.redraw();
    }

    /// Copy everything the panel shows out of `state`.
    pub fn update(&mut self, state: &GitPanelState) {
        let repo = match state.repo() {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("Repository: {name}")
            }
            None => "Repository: not selected".to_string(),
        };
        self.repo_label.set_label(&repo);
        self.branch_label.set_label(&state.branch_label());
        self.set_busy(state.is_busy());

        let p = palette(self.is_dark);
        self.status_list.clear();
        for (file_state, path) in state.status().entries() {
            let color = state_color(&p, file_state);
            self.status_list
                .add(&format!("@C{}@.{} {}", color.bits(), file_state.label(), path));
        }

        self.output_buffer.set_text(&state.output().join("\n"));
        self.output.set_insert_position(self.output_buffer.length());
        self.output.show_insert_position();

        self.repo_label.redraw();
        self.branch_label.redraw();
        self.status_list.redraw();
        self.output.redraw();
    }

    pub fn apply_theme(&mut self, is_dark: bool) {
        self.is_dark = is_dark;
        let p = palette(is_dark);
        for frame in [&mut self.repo_label, &mut self.branch_label, &mut self.busy_label] {
            frame.set_label_color(p.text);
            frame.redraw();
        }
        for frame in &mut self.section_labels {
            frame.set_label_color(p.inactive_text);
            frame.redraw();
        }
        self.commit_input.set_color(p.editor_bg);
        self.commit_input.set_text_color(p.text);
        self.status_list.set_color(p.sidebar_bg);
        self.status_list.set_selection_color(p.selection);
        self.output.set_color(p.editor_bg);
        self.output.set_text_color(p.text);
        self.commit_input.redraw();
        self.status_list.redraw();
        self.output.redraw();
    }
}

fn state_color(p: &Palette, state: FileState) -> Color {
    match state {
        FileState::Staged => p.success,
        FileState::Modified => p.warning,
        FileState::Untracked => p.info,
    }
}
