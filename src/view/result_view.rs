//! One bookings screen: its filters, the page on display, and the
//! `idle -> loading -> displaying | stale-with-error -> loading ...` cycle.
//!
//! Queries are stamped with a [`QueryTicket`]. Only the most recently
//! issued ticket may update the view; an older response that arrives late
//! is dropped, so pages never appear out of order.

use log::{debug, warn};

use crate::error::AdminError;
use crate::models::appointments::{Appointment, PageResult};
use crate::models::filter::{FilterState, FilterTransition};
use crate::services::appointment_service::{AppointmentQuery, BookingsView, QueryBuilder};
use crate::utils::DisplayFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Displaying,
    /// Last query failed; the previous rows are still shown.
    DisplayingStaleWithError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    pub page: u32,
    pub total_pages: u32,
    /// Page the rows on screen came from, when it differs from `page`.
    pub showing: Option<u32>,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationControls {
    /// The pager is hidden for single-page results.
    pub fn visible(&self) -> bool {
        self.total_pages > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Cancelled,
    Completed,
    Cancellable,
}

impl RowStatus {
    pub fn of(appointment: &Appointment) -> Self {
        if appointment.is_cancellable() {
            RowStatus::Cancellable
        } else if appointment.cancelled {
            RowStatus::Cancelled
        } else {
            RowStatus::Completed
        }
    }

    pub fn has_cancel_control(&self) -> bool {
        *self == RowStatus::Cancellable
    }
}

/// Display-ready projection of one appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub index: usize,
    pub id: String,
    pub patient: String,
    pub age: String,
    pub slot: String,
    pub doctor: String,
    pub fee: String,
    pub status: RowStatus,
}

pub struct ResultView {
    view: BookingsView,
    filters: FilterState,
    appointments: Vec<Appointment>,
    state: ViewState,
    issued: u64,
    requested_page: u32,
    shown_page: u32,
    notice: Option<String>,
}

impl ResultView {
    pub fn new(view: BookingsView, filters: FilterState) -> Self {
        ResultView {
            view,
            filters,
            appointments: Vec::new(),
            state: ViewState::Idle,
            issued: 0,
            requested_page: 1,
            shown_page: 1,
            notice: None,
        }
    }

    /// Replaces this screen with a fresh one. Tickets keep counting from
    /// where this screen stopped, so a response to a query it issued can
    /// never pass for one issued by the new screen.
    pub fn switch_to(&mut self, view: BookingsView, filters: FilterState) {
        let issued = self.issued;
        *self = ResultView::new(view, filters);
        self.issued = issued;
    }

    pub fn view(&self) -> BookingsView {
        self.view
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn is_loading(&self) -> bool {
        *self.state() == ViewState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewState::DisplayingStaleWithError(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Outcome of the last cancel, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Applies `edit` to the filters and reports whether it needs a query.
    pub fn update_filters<F>(&mut self, edit: F) -> FilterTransition
    where
        F: FnOnce(&mut FilterState),
    {
        let mut next = self.filters.clone();
        edit(&mut next);
        let transition = self.filters.transition(&next, self.view.refetch_policy());
        self.filters = next;
        transition
    }

    pub fn next_page(&mut self) -> FilterTransition {
        self.update_filters(FilterState::next_page)
    }

    pub fn previous_page(&mut self) -> FilterTransition {
        self.update_filters(FilterState::previous_page)
    }

    /// Starts a query for the current filters. Any query issued before
    /// this one is superseded.
    pub fn begin_query(&mut self) -> (QueryTicket, AppointmentQuery) {
        self.issued += 1;
        self.requested_page = self.filters.page();
        self.state = ViewState::Loading;
        (
            QueryTicket(self.issued),
            QueryBuilder::build(self.view, &self.filters),
        )
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Returns `false` when the response belongs to a superseded query and
    /// was discarded.
    pub fn apply_result(
        &mut self,
        ticket: QueryTicket,
        result: Result<PageResult, AdminError>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding response for superseded query {} (latest {})",
                ticket.0, self.issued
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.filters.set_total_pages(page.total_pages);
                self.appointments = page.appointments;
                self.shown_page = self.requested_page;
                self.state = ViewState::Displaying;
            }
            Err(e) => {
                warn!("Keeping previous {} rows after failed query: {}", self.appointments.len(), e);
                self.state = ViewState::DisplayingStaleWithError(e.to_string());
            }
        }
        true
    }

    pub fn pagination(&self) -> PaginationControls {
        let total_pages = self.filters.total_pages().unwrap_or(1);
        let page = self.filters.page();
        PaginationControls {
            page,
            total_pages,
            showing: (!self.appointments.is_empty() && self.shown_page != page)
                .then_some(self.shown_page),
            previous_enabled: page != 1,
            next_enabled: page != total_pages,
        }
    }

    /// Whether `id` is on screen and still offers a cancel control.
    pub fn can_cancel(&self, id: &str) -> bool {
        self.appointments
            .iter()
            .any(|a| a.id == id && RowStatus::of(a).has_cancel_control())
    }

    /// Folds a cancel response into the page. On success the row is marked
    /// cancelled in place; nothing is re-fetched. A row that has since
    /// scrolled off the page is simply not found.
    pub fn apply_cancel(&mut self, id: &str, result: Result<String, AdminError>) -> bool {
        match result {
            Ok(message) => {
                if let Some(appointment) = self.appointments.iter_mut().find(|a| a.id == id) {
                    appointment.mark_cancelled();
                }
                self.notice = Some(message);
                true
            }
            Err(e) => {
                self.notice = Some(format!("Could not cancel {}: {}", id, e));
                false
            }
        }
    }

    pub fn rows(&self, format: &DisplayFormat) -> Vec<RowView> {
        // numbering runs on across pages where the page size is fixed
        let offset = self
            .view
            .page_size()
            .map_or(0, |size| (self.shown_page as usize - 1) * size);
        self.appointments
            .iter()
            .enumerate()
            .map(|(i, a)| RowView {
                index: offset + i + 1,
                id: a.id.clone(),
                patient: a.user_data.name.clone(),
                age: format.age_label(&a.user_data.dob),
                slot: format!("{}, {}", format.slot_date(&a.slot_date), a.slot_time),
                doctor: a.doc_data.name.clone(),
                fee: format.fee(a.amount),
                status: RowStatus::of(a),
            })
            .collect()
    }
}
