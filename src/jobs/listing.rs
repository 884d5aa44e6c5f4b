// src/jobs/listing.rs
use std::ops::Range;

use super::JobDescription;

pub const JOBS_PER_PAGE: usize = 6;

/// Newest first, archived offers removed
pub fn active_offers(mut offers: Vec<JobDescription>) -> Vec<JobDescription> {
    offers.reverse();
    offers.retain(|offer| !offer.archived);
    offers
}

/// Page cursor over a job list; prev/next wrap around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobPager {
    current: usize,
    per_page: usize,
    total: usize,
}

impl JobPager {
    pub fn new(total: usize) -> Self {
        Self::with_page_size(total, JOBS_PER_PAGE)
    }

    pub fn with_page_size(total: usize, per_page: usize) -> Self {
        Self {
            current: 0,
            per_page: per_page.max(1),
            total,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn max_pages(&self) -> usize {
        self.total.div_ceil(self.per_page)
    }

    pub fn next(&mut self) {
        let pages = self.max_pages();
        if pages > 0 {
            self.current = (self.current + 1) % pages;
        }
    }

    pub fn prev(&mut self) {
        let pages = self.max_pages();
        if pages > 0 {
            self.current = if self.current == 0 {
                pages - 1
            } else {
                self.current - 1
            };
        }
    }

    /// The list changed size (e.g. new filters): back to the first page
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.current = 0;
    }

    pub fn range(&self) -> Range<usize> {
        let start = (self.current * self.per_page).min(self.total);
        let end = (start + self.per_page).min(self.total);
        start..end
    }

    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        &items[range.start.min(items.len())..range.end.min(items.len())]
    }
}

// ===== Apply gating =====

/// Session of the person looking at a job offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub role: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyEligibility {
    Eligible,
    LoginRequired,
    /// Company accounts cannot apply
    NotATalent,
    UnverifiedAccount,
}

pub fn apply_eligibility(viewer: Option<&Viewer>) -> ApplyEligibility {
    match viewer {
        None => ApplyEligibility::LoginRequired,
        Some(v) if v.role != "user" => ApplyEligibility::NotATalent,
        Some(v) if !v.active => ApplyEligibility::UnverifiedAccount,
        Some(_) => ApplyEligibility::Eligible,
    }
}
