//! Manages multiple open documents (tabs)

use crate::constants::errors;
use crate::document::{DocumentId, TextDocument};
use crate::error::{ErrorType, JotterError, Result};
use std::collections::HashMap;

pub struct DocumentManager {
    /// Active documents mapped by ID
    documents: HashMap<DocumentId, TextDocument>,
    /// Order of documents in tabs
    tab_order: Vec<DocumentId>,
    /// Index of current active tab
    current_tab: usize,
    /// Next available document ID
    next_document_id: DocumentId,
}

impl DocumentManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
            tab_order: Vec::new(),
            current_tab: 0,
            next_document_id: 1,
        }
    }

    /// Add a document and make it active
    pub fn add_document(&mut self, document: TextDocument) {
        let id = document.id;
        // Ensure we advance next ID if we're adding one manually
        if id >= self.next_document_id {
            self.next_document_id = id + 1;
        }

        self.documents.insert(id, document);
        self.tab_order.push(id);
        self.current_tab = self.tab_order.len() - 1;
    }

    /// Get next available document ID
    #[must_use]
    pub fn next_id(&self) -> DocumentId {
        self.next_document_id
    }

    /// Get ID of the active document
    #[must_use]
    pub fn active_document_id(&self) -> Option<DocumentId> {
        self.tab_order.get(self.current_tab).copied()
    }

    /// Get reference to active document
    #[must_use]
    pub fn active_document(&self) -> Option<&TextDocument> {
        let id = self.active_document_id()?;
        self.documents.get(&id)
    }

    /// Get mutable reference to active document
    pub fn active_document_mut(&mut self) -> Option<&mut TextDocument> {
        let id = self.active_document_id()?;
        self.documents.get_mut(&id)
    }

    /// Get document by ID
    #[must_use]
    pub fn get_document(&self, id: DocumentId) -> Option<&TextDocument> {
        self.documents.get(&id)
    }

    /// Get mutable document by ID
    pub fn get_document_mut(&mut self, id: DocumentId) -> Option<&mut TextDocument> {
        self.documents.get_mut(&id)
    }

    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.tab_order.len()
    }

    #[must_use]
    pub fn active_tab_index(&self) -> usize {
        self.current_tab
    }

    /// Switch active tab to specific document ID
    pub fn switch_to_document(&mut self, id: DocumentId) -> Result<()> {
        if let Some(pos) = self.tab_order.iter().position(|&x| x == id) {
            self.current_tab = pos;
            Ok(())
        } else {
            Err(JotterError::new(
                ErrorType::Internal,
                errors::INTERNAL_ERROR,
                format!("Document {} not found in tabs", id),
            ))
        }
    }

    /// Switch to the next tab, wrapping
    pub fn switch_next_tab(&mut self) {
        if !self.tab_order.is_empty() {
            self.current_tab = (self.current_tab + 1) % self.tab_order.len();
        }
    }

    /// Switch to the previous tab, wrapping
    pub fn switch_prev_tab(&mut self) {
        if !self.tab_order.is_empty() {
            self.current_tab = (self.current_tab + self.tab_order.len() - 1) % self.tab_order.len();
        }
    }

    /// Close a document tab. Refuses to discard unsaved changes.
    pub fn remove_document(&mut self, id: DocumentId) -> Result<()> {
        if !self.documents.contains_key(&id) {
            return Ok(());
        }

        if self.documents.get(&id).is_some_and(TextDocument::is_dirty) {
            return Err(JotterError::warning(
                ErrorType::Document,
                errors::UNSAVED_CHANGES,
                errors::MSG_UNSAVED_CHANGES,
            ));
        }

        self.remove_document_inner(id)
    }

    /// Close a document tab, discarding unsaved changes
    pub fn remove_document_force(&mut self, id: DocumentId) -> Result<()> {
        if !self.documents.contains_key(&id) {
            return Ok(());
        }
        self.remove_document_inner(id)
    }

    fn remove_document_inner(&mut self, id: DocumentId) -> Result<()> {
        // Auto-create a new empty document if closing the last tab
        if self.tab_order.len() == 1 {
            let new_id = self.next_document_id;
            self.add_document(TextDocument::new(new_id));
        }

        self.documents.remove(&id);
        if let Some(pos) = self.tab_order.iter().position(|&x| x == id) {
            self.tab_order.remove(pos);
            // Removing a tab before the active one shifts its index down;
            // the active document itself must not change
            if pos < self.current_tab {
                self.current_tab -= 1;
            } else if self.current_tab >= self.tab_order.len() {
                self.current_tab = self.tab_order.len().saturating_sub(1);
            }
        }
        Ok(())
    }

    /// IDs of all dirty documents, in tab order
    #[must_use]
    pub fn dirty_documents(&self) -> Vec<DocumentId> {
        self.tab_order
            .iter()
            .copied()
            .filter(|id| {
                self.documents
                    .get(id)
                    .is_some_and(TextDocument::is_dirty)
            })
            .collect()
    }
}

impl Default for DocumentManager {
    fn default() -> Self {
        Self::new()
    }
}
