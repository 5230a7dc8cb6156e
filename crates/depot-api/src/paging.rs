// Page numbering at the API boundary.
//
// The server counts pages from 1; table widgets count from 0. Both are
// newtypes so a page number can only cross the boundary through
// `to_grid_page` / `to_api_page`.

use serde::{Deserialize, Serialize};

/// A 1-based page number as the server understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ApiPage(u32);

/// A 0-based page index as table/grid widgets use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GridPage(pub u32);

impl ApiPage {
    pub const FIRST: Self = Self(1);

    /// Returns `None` for page 0, which the server does not accept.
    pub fn new(page: u32) -> Option<Self> {
        (page >= 1).then_some(Self(page))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The previous page, or `None` on the first page.
    pub fn prev(self) -> Option<Self> {
        Self::new(self.0 - 1)
    }
}

impl Default for ApiPage {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for ApiPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<u32> for ApiPage {
    type Error = String;

    fn try_from(page: u32) -> Result<Self, Self::Error> {
        Self::new(page).ok_or_else(|| "page numbers start at 1".to_owned())
    }
}

impl From<ApiPage> for u32 {
    fn from(page: ApiPage) -> Self {
        page.0
    }
}

/// Server page → widget page index.
pub fn to_grid_page(page: ApiPage) -> GridPage {
    GridPage(page.0 - 1)
}

/// Widget page index → server page. `None` for `GridPage(u32::MAX)`, which
/// has no 1-based counterpart.
pub fn to_api_page(page: GridPage) -> Option<ApiPage> {
    page.0.checked_add(1).map(ApiPage)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn page_zero_is_rejected() {
        assert!(ApiPage::new(0).is_none());
        assert!(ApiPage::try_from(0).is_err());
        assert_eq!(ApiPage::new(1), Some(ApiPage::FIRST));
    }

    #[test]
    fn conversions_are_inverse() {
        for p in [1, 2, 3, 10, 999, u32::MAX] {
            let page = ApiPage::new(p).unwrap();
            assert_eq!(to_api_page(to_grid_page(page)), Some(page));
        }
        for g in [0, 1, 41, u32::MAX - 1] {
            let api = to_api_page(GridPage(g)).unwrap();
            assert_eq!(to_grid_page(api), GridPage(g));
        }
    }

    #[test]
    fn last_grid_index_has_no_api_page() {
        assert_eq!(to_api_page(GridPage(u32::MAX)), None);
    }

    #[test]
    fn first_page_maps_to_grid_zero() {
        assert_eq!(to_grid_page(ApiPage::FIRST), GridPage(0));
        assert_eq!(ApiPage::FIRST.prev(), None);
        assert_eq!(ApiPage::FIRST.next().get(), 2);
    }

    #[test]
    fn deserializes_from_number() {
        let page: ApiPage = serde_json::from_str("3").unwrap();
        assert_eq!(page.get(), 3);
        assert!(serde_json::from_str::<ApiPage>("0").is_err());
    }
}
