//! # groupboard-adapter-page-file
//!
//! [`DashboardView`] that keeps the three dashboard slots in memory and
//! publishes them as a complete HTML document on disk.
//!
//! Every update, whether a single slot or a whole poll through
//! [`DashboardView::apply`], produces exactly one document. It is written to
//! a sibling temporary file that is then renamed over the target, so readers
//! only ever see a whole, consistent document. When writing fails, both the
//! file and the in-memory slots keep their previous content.
//!
//! ## Dependency rule
//! Depends on `groupboard-app` (port trait, page rendering) and
//! `groupboard-domain`.

use std::fs;
use std::path::{Path, PathBuf};

use groupboard_app::page::{InMemoryPage, PageSlots};
use groupboard_app::ports::DashboardView;
use groupboard_app::render::render_page;
use groupboard_domain::error::GroupBoardError;

/// Errors specific to the file page adapter.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Writing or renaming the page file failed.
    #[error("failed to write dashboard page {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<PageError> for GroupBoardError {
    fn from(err: PageError) -> Self {
        Self::View(Box::new(err))
    }
}

/// A dashboard page persisted as an HTML file.
#[derive(Debug)]
pub struct FilePage {
    path: PathBuf,
    refresh_secs: Option<u32>,
    page: InMemoryPage,
}

impl FilePage {
    /// Create a page backed by `path`.
    ///
    /// With `refresh_secs` set, the document asks browsers to reload it at
    /// that cadence so an open tab follows the poller.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, refresh_secs: Option<u32>) -> Self {
        Self {
            path: path.into(),
            refresh_secs,
            page: InMemoryPage::new(),
        }
    }

    /// Write the current (initial) slots so the file exists before the
    /// first successful poll.
    ///
    /// # Errors
    ///
    /// Returns [`GroupBoardError::View`] if the file cannot be written.
    pub fn initialize(&self) -> Result<(), GroupBoardError> {
        self.publish(&self.page.slots())
    }

    /// Path of the HTML file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `slots` to disk, then adopt them in memory.
    fn commit(&self, slots: PageSlots) -> Result<(), GroupBoardError> {
        self.publish(&slots)?;
        self.page.apply(slots)
    }

    fn edit(&self, change: impl FnOnce(&mut PageSlots)) -> Result<(), GroupBoardError> {
        let mut slots = self.page.slots();
        change(&mut slots);
        self.commit(slots)
    }

    fn publish(&self, slots: &PageSlots) -> Result<(), GroupBoardError> {
        let html = render_page(slots, self.refresh_secs)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, html).map_err(|source| PageError::Io {
            path: tmp.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(PageError::Io {
                path: self.path.clone(),
                source,
            }
            .into());
        }
        tracing::trace!(path = %self.path.display(), "dashboard page written");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DashboardView for FilePage {
    fn set_update_time(&self, text: &str) -> Result<(), GroupBoardError> {
        self.edit(|slots| slots.update_time = text.to_string())
    }

    fn set_total_groups(&self, count: usize) -> Result<(), GroupBoardError> {
        self.edit(|slots| slots.total_groups = count)
    }

    fn replace_groups(&self, html: String) -> Result<(), GroupBoardError> {
        self.edit(|slots| slots.groups_html = html)
    }

    fn apply(&self, slots: PageSlots) -> Result<(), GroupBoardError> {
        self.commit(slots)
    }
}
