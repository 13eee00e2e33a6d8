//! Offset pagination shared by every store backend.

use serde::Serialize;

/// Which slice of a table to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    /// Items per page; always at least 1.
    pub size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 0;
    pub const DEFAULT_SIZE: u32 = 10;
    pub const MAX_SIZE: u32 = 2000;

    /// Build a request, clamping `size` into `1..=MAX_SIZE`.
    pub fn new(page: u32, size: u32) -> Self {
        let size = if size == 0 {
            Self::DEFAULT_SIZE
        } else {
            size.min(Self::MAX_SIZE)
        };
        Self { page, size }
    }

    /// Number of rows to skip before this page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_SIZE)
    }
}

/// A bounded slice of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = if request.size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(request.size))
        };
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
        }
    }

    /// Convert every item while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    /// Like [`Page::map`], stopping at the first conversion error.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let content = self.content.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Page {
            content,
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        })
    }
}
