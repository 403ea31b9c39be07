use crate::error::DomainError;

/// Number of posts per listing page.
pub const PAGE_SIZE: u64 = 10;

/// Highest page number accepted; its offset still fits a signed 64-bit `OFFSET`.
pub const MAX_PAGE: i64 = i64::MAX / PAGE_SIZE as i64;

/// A validated, 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u64,
}

impl PageRequest {
    pub fn new(number: i64) -> Result<Self, DomainError> {
        if !(1..=MAX_PAGE).contains(&number) {
            return Err(DomainError::invalid_field("page"));
        }
        Ok(Self {
            number: number as u64,
        })
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    /// Rows skipped before this page starts.
    pub fn offset(&self) -> u64 {
        (self.number - 1) * PAGE_SIZE
    }

    pub fn limit(&self) -> u64 {
        PAGE_SIZE
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { number: 1 }
    }
}

/// Total number of pages for `total` matching posts.
pub fn last_page(total: u64) -> u64 {
    total.div_ceil(PAGE_SIZE)
}
