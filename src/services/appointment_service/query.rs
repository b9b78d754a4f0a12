//! Maps a [`FilterState`] onto one of the paginated list endpoints.
//!
//! Only parameters that carry a value for the active filter are emitted.
//! An unset field is left out entirely: the backend reads `doctorName=`
//! as "filter by the empty name", which is never what the admin meant.

use chrono::NaiveDate;

use crate::models::filter::{FilterKind, FilterState, RefetchPolicy};

pub const FILTERED_APPOINTMENTS_PAGE: &str = "/api/admin/filtered-appointments-page";
pub const LATEST_BOOKINGS: &str = "/api/admin/latest-bookings";
pub const FILTERED_APPOINTMENTS: &str = "/api/admin/filtered-appointments";

const DATE_PARAM_FORMAT: &str = "%Y-%m-%d";
const ALL_APPOINTMENTS_PAGE_SIZE: usize = 20;

/// The three screens that page through appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingsView {
    /// Full table with the date/doctor filter panel.
    AllAppointments,
    /// Dashboard list for a single day.
    LatestBookings,
    /// Dashboard list narrowed to one doctor.
    DoctorBookings,
}

impl BookingsView {
    pub fn endpoint(&self) -> &'static str {
        match self {
            BookingsView::AllAppointments => FILTERED_APPOINTMENTS_PAGE,
            BookingsView::LatestBookings => LATEST_BOOKINGS,
            BookingsView::DoctorBookings => FILTERED_APPOINTMENTS,
        }
    }

    pub fn refetch_policy(&self) -> RefetchPolicy {
        match self {
            BookingsView::AllAppointments => RefetchPolicy::Staged,
            BookingsView::LatestBookings | BookingsView::DoctorBookings => {
                RefetchPolicy::Immediate
            }
        }
    }

    /// Rows per page, for the screen whose backend pages at a fixed size.
    pub fn page_size(&self) -> Option<usize> {
        match self {
            BookingsView::AllAppointments => Some(ALL_APPOINTMENTS_PAGE_SIZE),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BookingsView::AllAppointments => "All Appointments",
            BookingsView::LatestBookings => "Latest Bookings",
            BookingsView::DoctorBookings => "Bookings by Doctor",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            BookingsView::LatestBookings => "No appointments found for the selected date.",
            _ => "No appointments found for the selected criteria.",
        }
    }
}

/// A ready-to-send list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub path: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl AppointmentQuery {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn date_param(date: NaiveDate) -> String {
    date.format(DATE_PARAM_FORMAT).to_string()
}

pub struct QueryBuilder;

impl QueryBuilder {
    pub fn build(view: BookingsView, filters: &FilterState) -> AppointmentQuery {
        let mut params: Vec<(&'static str, String)> = vec![("page", filters.page().to_string())];

        match view {
            BookingsView::AllAppointments => Self::push_filter_params(&mut params, filters),
            BookingsView::LatestBookings => {
                if let Some(date) = filters.selected_date() {
                    params.push(("date", date_param(date)));
                }
            }
            BookingsView::DoctorBookings => {
                if let Some(name) = filters.doctor_name() {
                    params.push(("doctor", name.to_string()));
                }
            }
        }

        AppointmentQuery {
            path: view.endpoint(),
            params,
        }
    }

    fn push_filter_params(params: &mut Vec<(&'static str, String)>, filters: &FilterState) {
        let kind = filters.filter_kind();
        let Some(filter_type) = kind.as_param() else {
            return;
        };
        params.push(("filterType", filter_type.to_string()));

        if kind == FilterKind::Doctor {
            if let Some(name) = filters.doctor_name() {
                params.push(("doctorName", name.to_string()));
            }
        }
        // both filter cards carry a date range
        if let Some(from) = filters.from_date() {
            params.push(("fromDate", date_param(from)));
        }
        if let Some(to) = filters.to_date() {
            params.push(("toDate", date_param(to)));
        }
    }
}
