//! View port — the rendering target of the dashboard.

use groupboard_domain::error::GroupBoardError;

use crate::page::PageSlots;

/// A page exposing the three addressable dashboard slots.
///
/// Each call replaces the whole content of its slot(s).
pub trait DashboardView {
    /// Replace the "last update" display.
    ///
    /// # Errors
    ///
    /// Returns [`GroupBoardError::View`] if the target cannot be written.
    fn set_update_time(&self, text: &str) -> Result<(), GroupBoardError>;

    /// Replace the total group count display.
    ///
    /// # Errors
    ///
    /// Returns [`GroupBoardError::View`] if the target cannot be written.
    fn set_total_groups(&self, count: usize) -> Result<(), GroupBoardError>;

    /// Replace the groups container markup in a single write.
    ///
    /// # Errors
    ///
    /// Returns [`GroupBoardError::View`] if the target cannot be written.
    fn replace_groups(&self, html: String) -> Result<(), GroupBoardError>;

    /// Replace all three slots as one update.
    ///
    /// Readers never observe a mix of the previous and the new slots, and on
    /// error the view keeps the previous slots.
    ///
    /// # Errors
    ///
    /// Returns [`GroupBoardError::View`] if the target cannot be written.
    fn apply(&self, slots: PageSlots) -> Result<(), GroupBoardError>;
}

impl<T: DashboardView + ?Sized> DashboardView for std::sync::Arc<T> {
    fn set_update_time(&self, text: &str) -> Result<(), GroupBoardError> {
        (**self).set_update_time(text)
    }

    fn set_total_groups(&self, count: usize) -> Result<(), GroupBoardError> {
        (**self).set_total_groups(count)
    }

    fn replace_groups(&self, html: String) -> Result<(), GroupBoardError> {
        (**self).replace_groups(html)
    }

    fn apply(&self, slots: PageSlots) -> Result<(), GroupBoardError> {
        (**self).apply(slots)
    }
}
