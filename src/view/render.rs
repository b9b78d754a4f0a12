use std::fmt::Write;

use crate::models::dashboard::DashData;
use crate::models::doctors::Doctor;
use crate::models::filter::FilterKind;
use crate::services::appointment_service::BookingsView;
use crate::utils::DisplayFormat;
use crate::view::result_view::{PaginationControls, ResultView, RowStatus, RowView};

fn status_cell(row: &RowView) -> String {
    match row.status {
        RowStatus::Cancelled => "Cancelled".to_string(),
        RowStatus::Completed => "Completed".to_string(),
        RowStatus::Cancellable => format!("[cancel {}]", row.id),
    }
}

fn filter_summary(view: &ResultView) -> String {
    let filters = view.filters();
    let date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
    };

    match view.view() {
        BookingsView::LatestBookings => format!("Date: {}", date(filters.selected_date())),
        BookingsView::DoctorBookings => {
            format!("Doctor: {}", filters.doctor_name().unwrap_or("all"))
        }
        BookingsView::AllAppointments => match filters.filter_kind() {
            FilterKind::None => "Filter: none".to_string(),
            FilterKind::Date => format!(
                "Filter: date {} .. {}",
                date(filters.from_date()),
                date(filters.to_date())
            ),
            FilterKind::Doctor => format!(
                "Filter: doctor {} ({} .. {})",
                filters.doctor_name().unwrap_or("-"),
                date(filters.from_date()),
                date(filters.to_date())
            ),
        },
    }
}

pub fn render_pager(pager: &PaginationControls) -> Option<String> {
    if !pager.visible() {
        return None;
    }
    let previous = if pager.previous_enabled { "< Previous" } else { "  (Previous)" };
    let next = if pager.next_enabled { "Next >" } else { "(Next)" };
    let mut line = format!("Page {} of {}", pager.page, pager.total_pages);
    if let Some(showing) = pager.showing {
        line.push_str(&format!(" (showing page {})", showing));
    }
    Some(format!("{}    {}  {}", line, previous, next))
}

/// Plain-text table for the console.
pub fn render_view(view: &ResultView, format: &DisplayFormat) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==  {}", view.view().title(), filter_summary(view));

    if let Some(error) = view.error() {
        let _ = writeln!(out, "! {}", error);
    }

    if view.appointments().is_empty() {
        let message = if view.is_loading() {
            "Loading appointments..."
        } else {
            view.view().empty_message()
        };
        let _ = writeln!(out, "{}", message);
    } else {
        let _ = writeln!(
            out,
            "{:<3} {:<22} {:<4} {:<24} {:<20} {:>8}  {}",
            "#", "Patient", "Age", "Date & Time", "Doctor", "Fees", "Action"
        );
        for row in &view.rows(format) {
            let _ = writeln!(
                out,
                "{:<3} {:<22} {:<4} {:<24} {:<20} {:>8}  {}",
                row.index,
                row.patient,
                row.age,
                row.slot,
                row.doctor,
                row.fee,
                status_cell(row)
            );
        }
        if view.is_loading() {
            let _ = writeln!(out, "Loading...");
        }
    }

    if let Some(pager) = render_pager(&view.pagination()) {
        let _ = writeln!(out, "{}", pager);
    }
    if let Some(notice) = view.notice() {
        let _ = writeln!(out, "* {}", notice);
    }
    out
}

pub fn render_dash(data: &DashData) -> String {
    format!(
        "Doctors: {}    Appointments: {}    Patients: {}",
        data.doctors, data.appointments, data.patients
    )
}

pub fn render_doctors(doctors: &[Doctor]) -> String {
    if doctors.is_empty() {
        return "No doctors loaded.".to_string();
    }
    doctors
        .iter()
        .map(|d| {
            let mut line = d.name.clone();
            if !d.speciality.is_empty() {
                line.push_str(&format!(" ({})", d.speciality));
            }
            if !d.available {
                line.push_str(" - unavailable");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
