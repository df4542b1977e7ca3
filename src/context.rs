use std::path::{Path, PathBuf};

use crate::data::filter::Category;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application context
// ---------------------------------------------------------------------------

/// Everything loaded at startup. Built once in `main` (or on File → Open)
/// and handed to the controller; read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppContext {
    dataset: Dataset,
    source: Option<PathBuf>,
}

impl AppContext {
    pub fn new(dataset: Dataset, source: Option<PathBuf>) -> Self {
        AppContext { dataset, source }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Dropdown entries: the "All" sentinel first, then manufacturers in
    /// first-appearance order.
    pub fn category_options(&self) -> Vec<Category> {
        std::iter::once(Category::All)
            .chain(
                self.dataset
                    .manufacturers()
                    .iter()
                    .cloned()
                    .map(Category::Manufacturer),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::showroom;

    #[test]
    fn all_sentinel_leads_the_options() {
        let ctx = AppContext::new(showroom(), None);
        let options = ctx.category_options();
        assert_eq!(options[0], Category::All);
        assert_eq!(options[0].to_string(), "All Manufacturers");
        assert_eq!(options.len(), 4);
        assert_eq!(options[1], Category::Manufacturer("Ford".to_string()));
    }
}
