//! Filter and pagination state for one bookings view.
//!
//! Every setter that touches a filter field sends the view back to page 1;
//! only `set_page` and its next/previous helpers move the page without
//! doing so. Whether an edit should hit the backend right away is decided
//! by [`FilterState::transition`], so callers never have to infer it from
//! which fields they happened to touch.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    #[default]
    None,
    Date,
    Doctor,
}

impl FilterKind {
    /// Value of the `filterType` query parameter; `None` is never sent.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            FilterKind::None => None,
            FilterKind::Date => Some("date"),
            FilterKind::Doctor => Some("doctor"),
        }
    }
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(FilterKind::None),
            "date" => Ok(FilterKind::Date),
            "doctor" => Ok(FilterKind::Doctor),
            other => Err(format!("unknown filter type {:?} (none, date, doctor)", other)),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param().unwrap_or("none"))
    }
}

/// When a filter edit reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefetchPolicy {
    /// Every filter edit re-queries (dashboards).
    Immediate,
    /// Filter edits wait for an explicit apply; page moves still re-query.
    Staged,
}

/// Outcome of moving from one filter state to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterTransition {
    pub should_refetch: bool,
    pub reset_page: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    filter_kind: FilterKind,
    doctor_name: Option<String>,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
    selected_date: Option<NaiveDate>,
    page: u32,
    total_pages: Option<u32>,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            filter_kind: FilterKind::None,
            doctor_name: None,
            from_date: None,
            to_date: None,
            selected_date: None,
            page: 1,
            total_pages: None,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting state of the single-date dashboard.
    pub fn for_date(date: NaiveDate) -> Self {
        FilterState {
            selected_date: Some(date),
            ..Self::default()
        }
    }

    pub fn filter_kind(&self) -> FilterKind {
        self.filter_kind
    }

    pub fn doctor_name(&self) -> Option<&str> {
        self.doctor_name.as_deref()
    }

    pub fn from_date(&self) -> Option<NaiveDate> {
        self.from_date
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        self.to_date
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    pub fn has_active_filter(&self) -> bool {
        self.filter_kind != FilterKind::None
            || self.doctor_name.is_some()
            || self.from_date.is_some()
            || self.to_date.is_some()
    }

    pub fn set_filter_kind(&mut self, kind: FilterKind) {
        self.filter_kind = kind;
        self.page = 1;
    }

    /// Blank names clear the filter rather than being sent as "".
    pub fn set_doctor_name(&mut self, name: Option<&str>) {
        self.doctor_name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        self.page = 1;
    }

    // No ordering check against to_date: an inverted range goes to the server as-is.
    pub fn set_from_date(&mut self, date: Option<NaiveDate>) {
        self.from_date = date;
        self.page = 1;
    }

    pub fn set_to_date(&mut self, date: Option<NaiveDate>) {
        self.to_date = date;
        self.page = 1;
    }

    pub fn set_selected_date(&mut self, date: Option<NaiveDate>) {
        self.selected_date = date;
        self.page = 1;
    }

    /// Clamps to `[1, total_pages]`; without a known total only the lower
    /// bound applies.
    pub fn set_page(&mut self, page: u32) {
        let upper = self.total_pages.unwrap_or(u32::MAX);
        self.page = page.clamp(1, upper);
    }

    /// Records the server's page count. An empty result reports 0 pages,
    /// which is kept as a single (empty) page.
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = Some(total_pages.max(1));
        self.set_page(self.page);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Clears the search filters. The selected date belongs to the
    /// dashboard and is left alone.
    pub fn reset(&mut self) {
        self.filter_kind = FilterKind::None;
        self.doctor_name = None;
        self.from_date = None;
        self.to_date = None;
        self.page = 1;
    }

    fn filters_differ(&self, other: &FilterState) -> bool {
        self.filter_kind != other.filter_kind
            || self.doctor_name != other.doctor_name
            || self.from_date != other.from_date
            || self.to_date != other.to_date
            || self.selected_date != other.selected_date
    }

    /// Decides what moving from `self` to `next` requires.
    ///
    /// A page move on its own always re-queries. A filter change resets
    /// the page (that reset is part of the edit, not a page move) and
    /// re-queries only under [`RefetchPolicy::Immediate`].
    pub fn transition(&self, next: &FilterState, policy: RefetchPolicy) -> FilterTransition {
        let filters_changed = self.filters_differ(next);
        let page_changed = self.page != next.page;

        FilterTransition {
            reset_page: filters_changed,
            should_refetch: if filters_changed {
                policy == RefetchPolicy::Immediate
            } else {
                page_changed
            },
        }
    }
}
