//! The fixed set of document categories.
//!
//! Each category owns one source folder under the data root and one index
//! directory under the index root. The mapping is static and not
//! configurable at runtime; only the two roots are.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Hr,
    OfflineReports,
    OnlineReports,
}

impl Category {
    /// All categories in the order they are listed and built.
    pub const ALL: [Category; 3] = [Category::Hr, Category::OfflineReports, Category::OnlineReports];

    /// Human-facing label, as shown in the category selector.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Hr => "HR",
            Category::OfflineReports => "Offline Reports",
            Category::OnlineReports => "Online Reports",
        }
    }

    /// Filesystem-safe key used for the source folder and index directory.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Hr => "hr",
            Category::OfflineReports => "offline_reports",
            Category::OnlineReports => "online_reports",
        }
    }

    pub fn source_dir(self, data_root: &Path) -> PathBuf {
        data_root.join(self.slug())
    }

    pub fn index_dir(self, index_root: &Path) -> PathBuf {
        index_root.join(format!("index_{}", self.slug()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Accepts either the display name or the slug, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(wanted) || c.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::NotFound(format!("unknown category '{wanted}'")))
    }
}
