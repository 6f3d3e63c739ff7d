//! In-memory dashboard page.

use std::sync::{Mutex, PoisonError};

use groupboard_domain::error::GroupBoardError;

use crate::ports::DashboardView;

/// Content of the three dashboard slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlots {
    /// Human-readable time of the last successful poll.
    pub update_time: String,
    /// Number of groups in the last successful poll.
    pub total_groups: usize,
    /// Markup of the groups container.
    pub groups_html: String,
}

impl Default for PageSlots {
    fn default() -> Self {
        Self {
            update_time: "--".to_string(),
            total_groups: 0,
            groups_html: String::new(),
        }
    }
}

/// A [`DashboardView`] that keeps its slots in memory.
#[derive(Debug, Default)]
pub struct InMemoryPage {
    slots: Mutex<PageSlots>,
}

impl InMemoryPage {
    /// Create an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current slot contents.
    #[must_use]
    pub fn slots(&self) -> PageSlots {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update(&self, edit: impl FnOnce(&mut PageSlots)) {
        edit(&mut self.slots.lock().unwrap_or_else(PoisonError::into_inner));
    }
}

impl DashboardView for InMemoryPage {
    fn set_update_time(&self, text: &str) -> Result<(), GroupBoardError> {
        self.update(|slots| slots.update_time = text.to_string());
        Ok(())
    }

    fn set_total_groups(&self, count: usize) -> Result<(), GroupBoardError> {
        self.update(|slots| slots.total_groups = count);
        Ok(())
    }

    fn replace_groups(&self, html: String) -> Result<(), GroupBoardError> {
        self.update(|slots| slots.groups_html = html);
        Ok(())
    }

    fn apply(&self, slots: PageSlots) -> Result<(), GroupBoardError> {
        self.update(|current| *current = slots);
        Ok(())
    }
}
