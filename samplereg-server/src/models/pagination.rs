//! skip/limit paging for list endpoints

use serde::Deserialize;

/// Maximum rows per request
const MAX_LIMIT: u32 = 100;

/// Default rows per request
const DEFAULT_LIMIT: u32 = 100;

/// Clamped paging window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    /// Limit is clamped to 1..=100
    pub fn new(skip: u32, limit: u32) -> Self {
        Self {
            skip,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIMIT)
    }
}

/// Query parameters: `?skip=0&limit=100`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl From<ListParams> for Page {
    fn from(params: ListParams) -> Self {
        Self::new(
            params.skip.unwrap_or(0),
            params.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let page = Page::from(ListParams::default());
        assert_eq!(page, Page { skip: 0, limit: 100 });
    }

    #[test]
    fn clamps_limit() {
        assert_eq!(Page::new(5, 0).limit, 1);
        assert_eq!(Page::new(5, 1000).limit, 100);
        assert_eq!(Page::new(5, 10).skip, 5);
    }
}
