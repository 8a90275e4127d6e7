use std::path::PathBuf;

use super::geometry::Point;
use super::layout::{Orientation, PaneId};
use super::mindmap::{LineId, Mode, NodeId, ShapeKind, TextId};

/// All messages that can be sent through the FLTK channel.
/// Each menu or widget callback sends one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // File
    FileNew,
    FileOpen,
    FileSave,
    FileSaveAs,
    OpenFolder,
    OpenFile(PathBuf),
    FileQuit,
    WindowClose,

    // Edit (applied to the focused editor)
    EditUndo,
    EditRedo,
    EditCut,
    EditCopy,
    EditPaste,
    SelectAll,

    // View
    ToggleSidebar,
    ToggleStatusBar,
    ToggleDarkMode,
    ShowEditor,
    ShowMindMap,
    ShowAbout,

    // Split panes
    SplitPane(PaneId, Orientation),
    ClosePane(PaneId),
    TabActivate(PaneId, usize),
    TabClose(PaneId, usize),
    /// A tab dragged out of its strip and released at window coordinates.
    TabDropped {
        pane: PaneId,
        index: usize,
        x: i32,
        y: i32,
    },
    EditorFocused(PaneId),
    /// Some editor buffer changed; tab titles may need a dirty marker.
    BufferModified,

    // File explorer
    ExplorerFilter(String),
    ExplorerRefresh,

    // Git
    GitInit,
    GitStatus,
    GitStageAll,
    GitCommit,
    GitPush,
    GitPull,
    GitBranches,
    GitLog,
    GitAutoRefresh,

    // Mind map
    MindMapNew,
    MindMapSave,
    MindMapLoad,
    MindMapSetMode(Mode),
    MindMapSetShape(ShapeKind),
    MindMapSetWidth(f64),
    MindMapSetHeight(f64),
    MindMapPromptNode(Point),
    MindMapPromptText(Point),
    MindMapAddChild(NodeId),
    MindMapEditNode(NodeId),
    MindMapEditText(TextId),
    MindMapDeleteNode(NodeId),
    MindMapDeleteText(TextId),
    MindMapDeleteLine(LineId),
    MindMapDeleteSelected,
}
