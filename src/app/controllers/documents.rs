use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fltk::text::TextBuffer;

use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::files::{display_name, write_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

pub const WELCOME_TITLE: &str = "Welcome";

const WELCOME_TEXT: &str = "Welcome to Lingxi\n\n\
Open a file from the explorer on the left, or use File > New.\n\
Split the editor with the button at the right of each tab strip\n\
and drag tabs between panes to rearrange them.\n\
The Mind Map tab holds a diagram canvas; right-click it to begin.\n";

pub struct EditorDocument {
    pub id: DocumentId,
    pub file_path: Option<PathBuf>,
    pub display_name: String,
    pub buffer: TextBuffer,
    /// The welcome page is never saved.
    pub read_only: bool,
    has_unsaved_changes: Rc<Cell<bool>>,
}

impl EditorDocument {
    fn new(id: DocumentId, display_name: String, file_path: Option<PathBuf>) -> Self {
        let mut buffer = TextBuffer::default();
        let has_unsaved_changes = Rc::new(Cell::new(false));

        let changes = has_unsaved_changes.clone();
        buffer.add_modify_callback(move |_pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted > 0 || deleted > 0 {
                changes.set(true);
            }
        });

        Self {
            id,
            file_path,
            display_name,
            buffer,
            read_only: false,
            has_unsaved_changes,
        }
    }

    /// Replace the whole text. The document counts as unmodified afterwards.
    pub fn set_content(&mut self, content: &str) {
        self.buffer.set_text(content);
        self.mark_clean();
    }

    pub fn content(&self) -> String {
        self.buffer.text()
    }

    pub fn is_dirty(&self) -> bool {
        self.has_unsaved_changes.get()
    }

    pub fn mark_clean(&self) {
        self.has_unsaved_changes.set(false);
    }

    /// Title shown on the tab, with a marker for unsaved edits.
    pub fn tab_title(&self) -> String {
        if self.is_dirty() && !self.read_only {
            format!("{}*", self.display_name)
        } else {
            self.display_name.clone()
        }
    }
}

pub struct DocumentStore {
    documents: Vec<EditorDocument>,
    next_id: u64,
    untitled_counter: u32,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            next_id: 1,
            untitled_counter: 0,
        }
    }

    fn next_document_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_untitled(&mut self) -> DocumentId {
        self.untitled_counter += 1;
        let display_name = if self.untitled_counter == 1 {
            "Untitled".to_string()
        } else {
            format!("Untitled {}", self.untitled_counter)
        };
        let id = self.next_document_id();
        self.documents.push(EditorDocument::new(id, display_name, None));
        id
    }

    pub fn add_from_file(&mut self, path: PathBuf, content: &str) -> DocumentId {
        let id = self.next_document_id();
        let mut doc = EditorDocument::new(id, display_name(&path), Some(path));
        doc.set_content(content);
        self.documents.push(doc);
        id
    }

    pub fn add_welcome(&mut self) -> DocumentId {
        let id = self.next_document_id();
        let mut doc = EditorDocument::new(id, WELCOME_TITLE.to_string(), None);
        doc.set_content(WELCOME_TEXT);
        doc.read_only = true;
        self.documents.push(doc);
        id
    }

    pub fn get(&self, id: DocumentId) -> Option<&EditorDocument> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn get_mut(&mut self, id: DocumentId) -> Option<&mut EditorDocument> {
        self.documents.iter_mut().find(|d| d.id == id)
    }

    pub fn remove(&mut self, id: DocumentId) -> Option<EditorDocument> {
        let idx = self.documents.iter().position(|d| d.id == id)?;
        Some(self.documents.remove(idx))
    }

    /// Find a document by file path
    pub fn find_by_path(&self, path: &Path) -> Option<DocumentId> {
        self.documents
            .iter()
            .find(|d| d.file_path.as_deref() == Some(path))
            .map(|d| d.id)
    }

    pub fn documents(&self) -> &[EditorDocument] {
        &self.documents
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn has_unsaved(&self) -> bool {
        self.documents.iter().any(|d| d.is_dirty() && !d.read_only)
    }

    /// Write a document to its own path.
    pub fn save(&mut self, id: DocumentId) -> Result<()> {
        let doc = self
            .get(id)
            .ok_or_else(|| AppError::Document(format!("document {} is not open", id.0)))?;
        if doc.read_only {
            return Err(AppError::Document(format!("{} cannot be saved", doc.display_name)));
        }
        let path = doc
            .file_path
            .clone()
            .ok_or_else(|| AppError::Document(format!("{} has no file name yet", doc.display_name)))?;
        write_text(&path, &doc.content())?;
        doc.mark_clean();
        log::info!("saved {}", path.display());
        Ok(())
    }

    /// Write a document to `path` and adopt it as the document's file.
    pub fn save_as(&mut self, id: DocumentId, path: PathBuf) -> Result<()> {
        let doc = self
            .get_mut(id)
            .ok_or_else(|| AppError::Document(format!("document {} is not open", id.0)))?;
        if doc.read_only {
            return Err(AppError::Document(format!("{} cannot be saved", doc.display_name)));
        }
        write_text(&path, &doc.content())?;
        doc.display_name = display_name(&path);
        doc.file_path = Some(path);
        doc.mark_clean();
        Ok(())
    }
}
