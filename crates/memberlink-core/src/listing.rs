//! User listing envelope and burst partitioning.
//!
//! The listing endpoint reports the total page count on every response;
//! the count from page 1 is authoritative for a whole scan and is never
//! re-derived mid-scan. Pages `2..=total_pages` are then partitioned into
//! contiguous [`BurstSpan`]s of at most `burst_size` pages each, fetched
//! concurrently span by span.

use serde::Deserialize;

use crate::user::DirectoryUser;

/// One page of the directory's user listing.
#[derive(Debug, Clone, Deserialize)]
pub struct UserListing {
    /// Envelope type tag ("user.list").
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Paging section; absent when the directory fits in one page on some
    /// remote versions, so total pages defaults to 1.
    pub pages: Option<PagingSection>,

    /// The users on this page.
    #[serde(default)]
    pub users: Vec<DirectoryUser>,

    /// Total number of users across all pages.
    pub total_count: Option<u64>,
}

impl UserListing {
    /// The authoritative total page count for a scan.
    pub fn total_pages(&self) -> u32 {
        self.pages.as_ref().map_or(1, |p| p.total_pages)
    }
}

/// Paging metadata of a listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct PagingSection {
    /// Envelope type tag ("pages").
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Opaque link to the next page, if any.
    pub next: Option<String>,

    /// 1-based index of this page.
    pub page: u32,

    /// Requested page size.
    pub per_page: u32,

    /// Total number of pages.
    pub total_pages: u32,
}

/// An inclusive span of pages fetched as one concurrent burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstSpan {
    /// First page of the span.
    pub first_page: u32,
    /// Last page of the span, inclusive.
    pub last_page: u32,
}

impl BurstSpan {
    /// Iterate over the page numbers in this span.
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.first_page..=self.last_page
    }

    /// Number of pages in this span.
    pub fn len(&self) -> u32 {
        self.last_page - self.first_page + 1
    }
}

/// Partition pages `2..=total_pages` into contiguous spans of at most
/// `burst_size` pages.
///
/// Page 1 is excluded: it has already been fetched to discover
/// `total_pages`. The spans are non-overlapping, cover the range exactly
/// once, and there are `ceil((total_pages - 1) / burst_size)` of them.
pub fn burst_spans(total_pages: u32, burst_size: u32) -> Vec<BurstSpan> {
    let burst_size = burst_size.max(1);
    let mut spans = Vec::new();
    let mut first_page = 2;

    while first_page <= total_pages {
        let last_page = (first_page + burst_size - 1).min(total_pages);
        spans.push(BurstSpan {
            first_page,
            last_page,
        });
        first_page = last_page + 1;
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_page_needs_no_bursts() {
        assert!(burst_spans(1, 50).is_empty());
        assert!(burst_spans(0, 50).is_empty());
    }

    #[test]
    fn two_pages_one_burst() {
        assert_eq!(
            burst_spans(2, 50),
            vec![BurstSpan {
                first_page: 2,
                last_page: 2
            }]
        );
    }

    #[test]
    fn thirty_seven_pages_burst_fifteen() {
        // 36 remaining pages in bursts of 15: [2,16], [17,31], [32,37].
        let spans = burst_spans(37, 15);
        assert_eq!(
            spans,
            vec![
                BurstSpan {
                    first_page: 2,
                    last_page: 16
                },
                BurstSpan {
                    first_page: 17,
                    last_page: 31
                },
                BurstSpan {
                    first_page: 32,
                    last_page: 37
                },
            ]
        );
    }

    #[test]
    fn spans_cover_pages_exactly_once() {
        for total_pages in 1..120u32 {
            for burst_size in 1..20u32 {
                let spans = burst_spans(total_pages, burst_size);

                let expected_count = (total_pages.saturating_sub(1)).div_ceil(burst_size);
                assert_eq!(spans.len() as u32, expected_count);

                let mut covered: Vec<u32> = spans.iter().flat_map(|s| s.pages()).collect();
                covered.sort_unstable();
                let expected: Vec<u32> = (2..=total_pages).collect();
                assert_eq!(covered, expected, "P={} B={}", total_pages, burst_size);

                assert!(spans.iter().all(|s| s.len() <= burst_size));
            }
        }
    }

    #[test]
    fn zero_burst_size_treated_as_one() {
        let spans = burst_spans(3, 0);
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn deserializes_listing_envelope() {
        let listing: UserListing = serde_json::from_value(json!({
            "type": "user.list",
            "pages": {
                "type": "pages",
                "next": "https://api.intercom.io/users?per_page=50&page=2",
                "page": 1,
                "per_page": 50,
                "total_pages": 37
            },
            "users": [{ "id": "1", "email": "a@x.com" }],
            "total_count": 1824
        }))
        .unwrap();

        assert_eq!(listing.total_pages(), 37);
        assert_eq!(listing.total_count, Some(1824));
        assert_eq!(listing.users.len(), 1);
    }

    #[test]
    fn listing_without_pages_is_one_page() {
        let listing: UserListing = serde_json::from_value(json!({
            "users": []
        }))
        .unwrap();
        assert_eq!(listing.total_pages(), 1);
    }
}
