use crate::types::errors::TabError;
use crate::types::tab::{Tab, TabId};

/// Trait defining the tab registry interface.
pub trait TabManagerTrait {
    fn create_tab(&mut self) -> &mut Tab;
    fn close_tab(&mut self, tab_id: TabId) -> Result<Tab, TabError>;
    fn switch_to(&mut self, tab_id: TabId) -> bool;
    fn find(&self, tab_id: TabId) -> Option<&Tab>;
    fn find_mut(&mut self, tab_id: TabId) -> Option<&mut Tab>;
    fn get_all_tabs(&self) -> &[Tab];
    fn get_active_tab(&self) -> Option<&Tab>;
    fn get_active_tab_mut(&mut self) -> Option<&mut Tab>;
    fn active_tab_id(&self) -> Option<TabId>;
    fn tab_count(&self) -> usize;
}

/// In-memory registry of tabs, kept in creation order, plus the active pointer.
pub struct TabManager {
    tabs: Vec<Tab>,
    active_tab_id: Option<TabId>,
    next_id: TabId,
}

impl TabManager {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            active_tab_id: None,
            next_id: 1,
        }
    }

    fn find_tab_index(&self, tab_id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TabManagerTrait for TabManager {
    /// Create a new empty tab at the end of the strip and make it active.
    fn create_tab(&mut self) -> &mut Tab {
        let id = self.next_id;
        self.next_id += 1;
        self.tabs.push(Tab::new(id));
        self.active_tab_id = Some(id);
        log::debug!("[TAB] created {}", id);
        let last = self.tabs.len() - 1;
        &mut self.tabs[last]
    }

    /// Close a tab and return it.
    ///
    /// Refuses to close the sole remaining tab. If the closed tab was active,
    /// the tab just before it becomes active, or the new first tab when the
    /// closed one was first.
    fn close_tab(&mut self, tab_id: TabId) -> Result<Tab, TabError> {
        if self.tabs.len() <= 1 {
            return Err(TabError::LastTab);
        }
        let idx = self
            .find_tab_index(tab_id)
            .ok_or(TabError::NotFound(tab_id))?;

        let removed = self.tabs.remove(idx);

        if self.active_tab_id == Some(tab_id) {
            let new_idx = idx.saturating_sub(1);
            self.active_tab_id = Some(self.tabs[new_idx].id);
        }

        log::debug!("[TAB] closed {}", tab_id);
        Ok(removed)
    }

    /// Make `tab_id` active. Unknown ids are ignored; returns whether it switched.
    fn switch_to(&mut self, tab_id: TabId) -> bool {
        if self.find_tab_index(tab_id).is_none() {
            return false;
        }
        self.active_tab_id = Some(tab_id);
        true
    }

    fn find(&self, tab_id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    fn find_mut(&mut self, tab_id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == tab_id)
    }

    fn get_all_tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn get_active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.and_then(|id| self.find(id))
    }

    fn get_active_tab_mut(&mut self) -> Option<&mut Tab> {
        let id = self.active_tab_id?;
        self.find_mut(id)
    }

    fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab_id
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }
}
