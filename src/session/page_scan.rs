use crate::admin_client::{ListingStatus, PageQuery};

pub const PAGE_SIZE: u64 = 10;

/// Status partitions queried for every page, in order.
pub const PARTITIONS: [ListingStatus; 2] = [ListingStatus::Live, ListingStatus::Draft];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    Pending { page: u64, partition: usize },
    Found(PageQuery),
    Exhausted,
}

/// Walks `ceil(count / 10)` pages, each split into the status partitions, until a hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageScan {
    pages: u64,
    state: ScanState,
}

impl PageScan {
    pub fn new(count: u64) -> Self {
        let pages = count.div_ceil(PAGE_SIZE);
        let state = if pages == 0 {
            ScanState::Exhausted
        } else {
            ScanState::Pending {
                page: 1,
                partition: 0,
            }
        };
        PageScan { pages, state }
    }

    pub fn pages(&self) -> u64 {
        self.pages
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Query to run next, or `None` once the scan has terminated.
    pub fn next_query(&self) -> Option<PageQuery> {
        match self.state {
            ScanState::Pending { page, partition } => Some(PageQuery {
                page,
                status: PARTITIONS[partition],
            }),
            ScanState::Found(_) | ScanState::Exhausted => None,
        }
    }

    /// Feeds back the outcome of the query returned by `next_query`.
    pub fn record(&mut self, hit: bool) {
        let (page, partition) = match self.state {
            ScanState::Pending { page, partition } => (page, partition),
            ScanState::Found(_) | ScanState::Exhausted => return,
        };
        self.state = if hit {
            ScanState::Found(PageQuery {
                page,
                status: PARTITIONS[partition],
            })
        } else if partition + 1 < PARTITIONS.len() {
            ScanState::Pending {
                page,
                partition: partition + 1,
            }
        } else if page < self.pages {
            ScanState::Pending {
                page: page + 1,
                partition: 0,
            }
        } else {
            ScanState::Exhausted
        };
    }

    pub fn is_found(&self) -> bool {
        matches!(self.state, ScanState::Found(_))
    }
}
