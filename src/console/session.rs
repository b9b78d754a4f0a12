use anyhow::{Context, Result};
use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{channel, Receiver, Sender};
use tokio::task::JoinHandle;

use crate::api::AdminClient;
use crate::console::command::{parse_command, Command, HELP};
use crate::error::AdminError;
use crate::models::appointments::PageResult;
use crate::models::dashboard::DashData;
use crate::models::doctors::Doctor;
use crate::models::filter::{FilterState, FilterTransition};
use crate::services::appointment_service::{
    cancel_appointments, fetch_appointments_page, BookingsView,
};
use crate::services::dashboard_service::get_dash_data;
use crate::services::doctor_service::get_all_doctors;
use crate::utils::DisplayFormat;
use crate::view::{render_dash, render_doctors, render_view, QueryTicket, ResultView};

/// Completions of background requests, delivered back to the loop.
#[derive(Debug)]
pub enum SessionEvent {
    PageLoaded(QueryTicket, Result<PageResult, AdminError>),
    Cancelled(String, Result<String, AdminError>),
    DoctorsLoaded(Result<Vec<Doctor>, AdminError>),
    StatsLoaded(Result<DashData, AdminError>),
}

/// Owns the active screen. All state changes happen on the loop; requests
/// run as spawned tasks and report back through the event channel.
pub struct Session {
    client: AdminClient,
    format: DisplayFormat,
    view: ResultView,
    doctors: Vec<Doctor>,
    in_flight: Option<JoinHandle<()>>,
    events_tx: Sender<SessionEvent>,
    events_rx: Receiver<SessionEvent>,
}

impl Session {
    pub fn new(client: AdminClient, format: DisplayFormat, view: BookingsView) -> Self {
        let (events_tx, events_rx) = channel(32);
        let view = ResultView::new(view, Self::fresh_filters(view, &format));
        Session {
            client,
            format,
            view,
            doctors: Vec::new(),
            in_flight: None,
            events_tx,
            events_rx,
        }
    }

    fn fresh_filters(view: BookingsView, format: &DisplayFormat) -> FilterState {
        match view {
            BookingsView::LatestBookings => FilterState::for_date(format.today),
            _ => FilterState::new(),
        }
    }

    /// First load after opening the console.
    pub fn start(&mut self) {
        self.load_doctors();
        self.refresh();
    }

    /// Issues a query for the current filters. A query still in flight is
    /// aborted; should its response slip through anyway, the view drops it.
    fn refresh(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        let (ticket, query) = self.view.begin_query();
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = fetch_appointments_page(&client, &query).await;
            let _ = tx.send(SessionEvent::PageLoaded(ticket, result)).await;
        }));
    }

    fn load_doctors(&self) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = get_all_doctors(&client).await;
            let _ = tx.send(SessionEvent::DoctorsLoaded(result)).await;
        });
    }

    fn load_stats(&self) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = get_dash_data(&client).await;
            let _ = tx.send(SessionEvent::StatsLoaded(result)).await;
        });
    }

    fn cancel(&self, ids: Vec<String>) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            for (id, result) in cancel_appointments(&client, &ids).await {
                let _ = tx.send(SessionEvent::Cancelled(id, result)).await;
            }
        });
    }

    fn render(&self) -> String {
        render_view(&self.view, &self.format)
    }

    fn follow(&mut self, transition: FilterTransition) -> Option<String> {
        if transition.should_refetch {
            self.refresh();
            None
        } else if transition.reset_page {
            Some("Filter staged; run `apply` to search.".to_string())
        } else {
            Some(self.render())
        }
    }

    fn only_on(&self, view: BookingsView, command: &str) -> Option<String> {
        if self.view.view() == view {
            None
        } else {
            Some(format!(
                "`{}` applies to the {} screen only.",
                command,
                view.title()
            ))
        }
    }

    pub fn handle_command(&mut self, command: Command) -> Option<String> {
        match command {
            Command::View(view) => {
                let filters = Self::fresh_filters(view, &self.format);
                self.view.switch_to(view, filters);
                self.refresh();
                Some(self.render())
            }
            Command::FilterType(kind) => {
                if let Some(msg) = self.only_on(BookingsView::AllAppointments, "type") {
                    return Some(msg);
                }
                let transition = self.view.update_filters(|f| f.set_filter_kind(kind));
                self.follow(transition)
            }
            Command::Doctor(name) => {
                if self.view.view() == BookingsView::LatestBookings {
                    return Some("`doctor` does not apply to Latest Bookings.".to_string());
                }
                if let Some(name) = &name {
                    if !self.doctors.is_empty() && !self.doctors.iter().any(|d| &d.name == name)
                    {
                        warn!("Doctor {:?} is not in the loaded doctor list", name);
                    }
                }
                let transition = self.view.update_filters(|f| f.set_doctor_name(name.as_deref()));
                self.follow(transition)
            }
            Command::From(date) => {
                if let Some(msg) = self.only_on(BookingsView::AllAppointments, "from") {
                    return Some(msg);
                }
                let transition = self.view.update_filters(|f| f.set_from_date(date));
                self.follow(transition)
            }
            Command::To(date) => {
                if let Some(msg) = self.only_on(BookingsView::AllAppointments, "to") {
                    return Some(msg);
                }
                let transition = self.view.update_filters(|f| f.set_to_date(date));
                self.follow(transition)
            }
            Command::Date(date) => {
                if let Some(msg) = self.only_on(BookingsView::LatestBookings, "date") {
                    return Some(msg);
                }
                let transition = self.view.update_filters(|f| f.set_selected_date(Some(date)));
                self.follow(transition)
            }
            Command::Today => {
                if let Some(msg) = self.only_on(BookingsView::LatestBookings, "today") {
                    return Some(msg);
                }
                let today = self.format.today;
                let transition = self.view.update_filters(|f| f.set_selected_date(Some(today)));
                self.follow(transition)
            }
            Command::Apply => {
                self.view.update_filters(|f| f.set_page(1));
                self.refresh();
                None
            }
            Command::Reset => {
                if !self.view.filters().has_active_filter() {
                    return Some("No filter to reset.".to_string());
                }
                self.view.update_filters(FilterState::reset);
                self.refresh();
                None
            }
            Command::Next => {
                let transition = self.view.next_page();
                self.follow(transition)
            }
            Command::Previous => {
                let transition = self.view.previous_page();
                self.follow(transition)
            }
            Command::Page(page) => {
                let transition = self.view.update_filters(|f| f.set_page(page));
                self.follow(transition)
            }
            Command::Retry => {
                self.refresh();
                None
            }
            Command::Cancel(ids) => {
                let (allowed, refused): (Vec<String>, Vec<String>) =
                    ids.into_iter().partition(|id| self.view.can_cancel(id));
                if !allowed.is_empty() {
                    info!("Cancelling {:?}", allowed);
                    self.cancel(allowed);
                }
                if refused.is_empty() {
                    None
                } else {
                    Some(format!("No cancel action for: {}", refused.join(", ")))
                }
            }
            Command::Doctors => {
                if self.doctors.is_empty() {
                    self.load_doctors();
                    None
                } else {
                    Some(render_doctors(&self.doctors))
                }
            }
            Command::Stats => {
                self.load_stats();
                None
            }
            Command::Show => Some(self.render()),
            Command::Help => Some(HELP.to_string()),
            // the loop leaves before dispatching quit
            Command::Quit => None,
        }
    }

    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events_rx.recv().await
    }

    pub fn handle_event(&mut self, event: SessionEvent) -> Option<String> {
        match event {
            SessionEvent::PageLoaded(ticket, result) => {
                if self.view.apply_result(ticket, result) {
                    self.in_flight = None;
                    Some(self.render())
                } else {
                    None
                }
            }
            SessionEvent::Cancelled(id, result) => {
                self.view.apply_cancel(&id, result);
                Some(self.render())
            }
            SessionEvent::DoctorsLoaded(Ok(doctors)) => {
                self.doctors = doctors;
                Some(format!("{} doctors available.", self.doctors.len()))
            }
            SessionEvent::DoctorsLoaded(Err(e)) => Some(format!("! Could not load doctors: {}", e)),
            SessionEvent::StatsLoaded(Ok(data)) => Some(render_dash(&data)),
            SessionEvent::StatsLoaded(Err(e)) => {
                Some(format!("! Could not load dashboard counters: {}", e))
            }
        }
    }

    /// Reads commands from `input` until `quit` or end of input while
    /// printing whatever the background requests deliver.
    pub async fn run<R>(mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        self.start();
        println!("Type `help` for commands.");

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read command")? else {
                        break;
                    };
                    match parse_command(&line) {
                        Ok(Some(Command::Quit)) => break,
                        Ok(Some(command)) => {
                            if let Some(output) = self.handle_command(command) {
                                println!("{}", output);
                            }
                        }
                        Ok(None) => {}
                        Err(e) => println!("{}", e),
                    }
                }
                Some(event) = self.next_event() => {
                    if let Some(output) = self.handle_event(event) {
                        println!("{}", output);
                    }
                }
            }
        }

        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::app::AdminContext;
    use crate::models::filter::FilterKind;
    use crate::services::appointment_service::cancel::CANCEL_APPOINTMENT;
    use crate::services::appointment_service::query::LATEST_BOOKINGS;
    use crate::services::doctor_service::list::ALL_DOCTORS;
    use crate::test_support::{appointment_json, serve};
    use crate::view::result_view::ViewState;
    use axum::{
        extract::Query,
        routing::{get, post},
        Json, Router,
    };
    use chrono::NaiveDate;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn session(seen: Seen, fail_listing: bool) -> Session {
        let app = Router::new()
            .route(
                "/api/admin/filtered-appointments-page",
                get(move |Query(params): Query<HashMap<String, String>>| {
                    let seen = seen.clone();
                    async move {
                        let page = params.get("page").cloned().unwrap_or_default();
                        seen.lock().unwrap().push(params);
                        if fail_listing && page != "1" {
                            return Json(json!({ "success": false, "message": "Database unavailable" }));
                        }
                        Json(json!({
                            "success": true,
                            "appointments": [
                                appointment_json(&format!("p{}-1", page)),
                                appointment_json(&format!("p{}-2", page))
                            ],
                            "pagination": { "totalPages": 5 }
                        }))
                    }
                }),
            )
            .route(
                LATEST_BOOKINGS,
                get(|| async {
                    Json(json!({
                        "success": true,
                        "appointments": [appointment_json("latest-row")],
                        "pagination": { "totalPages": 7 }
                    }))
                }),
            )
            .route(
                ALL_DOCTORS,
                post(|| async {
                    Json(json!({ "success": true, "doctors": [{ "_id": "d1", "name": "Dr. Lee" }] }))
                }),
            )
            .route(
                CANCEL_APPOINTMENT,
                post(|| async { Json(json!({ "success": true, "message": "Appointment Cancelled" })) }),
            );
        let base = serve(app).await;
        let client =
            AdminClient::new(AdminContext::new(&base, "tok"), Duration::from_secs(5)).unwrap();
        let format = DisplayFormat::new("$", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        Session::new(client, format, BookingsView::AllAppointments)
    }

    async fn pump(session: &mut Session) {
        let event = tokio::time::timeout(Duration::from_secs(5), session.next_event())
            .await
            .expect("no event within 5s")
            .expect("channel closed");
        session.handle_event(event);
    }

    async fn settle(session: &mut Session) {
        while session.view.is_loading() {
            pump(session).await;
        }
    }

    fn ids(session: &Session) -> Vec<String> {
        session
            .view
            .appointments()
            .iter()
            .map(|a| a.id.clone())
            .collect()
    }

    #[tokio::test]
    async fn staged_filter_runs_on_apply_only() {
        let seen: Seen = Arc::default();
        let mut session = session(seen.clone(), false).await;
        session.refresh();
        settle(&mut session).await;
        assert_eq!(seen.lock().unwrap().len(), 1);

        let out = session.handle_command(Command::FilterType(FilterKind::Date));
        assert!(out.unwrap().contains("apply"));
        session.handle_command(Command::From(NaiveDate::from_ymd_opt(2024, 1, 1)));
        assert!(!session.view.is_loading());
        assert_eq!(seen.lock().unwrap().len(), 1);

        session.handle_command(Command::Apply);
        settle(&mut session).await;
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].get("filterType").map(String::as_str), Some("date"));
        assert_eq!(seen[1].get("fromDate").map(String::as_str), Some("2024-01-01"));
        assert!(!seen[1].contains_key("toDate"));
    }

    #[tokio::test]
    async fn rapid_page_moves_show_the_last_one() {
        let seen: Seen = Arc::default();
        let mut session = session(seen, false).await;
        session.refresh();
        settle(&mut session).await;

        session.handle_command(Command::Page(2));
        session.handle_command(Command::Page(3));
        settle(&mut session).await;

        assert_eq!(session.view.filters().page(), 3);
        assert_eq!(ids(&session), vec!["p3-1", "p3-2"]);
    }

    #[tokio::test]
    async fn failed_page_keeps_rows_and_reports() {
        let seen: Seen = Arc::default();
        let mut session = session(seen, true).await;
        session.refresh();
        settle(&mut session).await;
        assert_eq!(ids(&session), vec!["p1-1", "p1-2"]);

        session.handle_command(Command::Next);
        settle(&mut session).await;

        assert_eq!(ids(&session), vec!["p1-1", "p1-2"]);
        assert_eq!(
            session.view.state(),
            &ViewState::DisplayingStaleWithError("Database unavailable".into())
        );

        session.handle_command(Command::Previous);
        settle(&mut session).await;
        assert_eq!(session.view.state(), &ViewState::Displaying);
    }

    #[tokio::test]
    async fn cancel_marks_row_after_confirmation() {
        let seen: Seen = Arc::default();
        let mut session = session(seen, false).await;
        session.refresh();
        settle(&mut session).await;

        let out = session.handle_command(Command::Cancel(vec!["p1-1".into(), "nope".into()]));
        assert_eq!(out.as_deref(), Some("No cancel action for: nope"));
        assert!(!session.view.appointments()[0].cancelled);

        while !session.view.appointments()[0].cancelled {
            pump(&mut session).await;
        }
        assert!(!session.view.can_cancel("p1-1"));
        assert_eq!(session.view.notice(), Some("Appointment Cancelled"));
    }

    #[tokio::test]
    async fn commands_outside_their_screen_are_refused() {
        let seen: Seen = Arc::default();
        let mut session = session(seen, false).await;
        let out = session
            .handle_command(Command::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()))
            .unwrap();
        assert!(out.contains("Latest Bookings"));
        assert!(!session.view.is_loading());
    }

    #[tokio::test]
    async fn doctors_load_in_background() {
        let seen: Seen = Arc::default();
        let mut session = session(seen, false).await;
        session.start();
        while session.doctors.is_empty() || session.view.is_loading() {
            pump(&mut session).await;
        }
        assert_eq!(session.doctors[0].name, "Dr. Lee");
    }

    #[tokio::test]
    async fn response_from_previous_screen_is_dropped() {
        let seen: Seen = Arc::default();
        let mut session = session(seen, false).await;

        session.handle_command(Command::View(BookingsView::LatestBookings));
        // let the latest-bookings response reach the channel before switching
        tokio::time::sleep(Duration::from_millis(200)).await;
        session.handle_command(Command::View(BookingsView::AllAppointments));
        settle(&mut session).await;

        assert_eq!(session.view.view(), BookingsView::AllAppointments);
        assert_eq!(ids(&session), vec!["p1-1", "p1-2"]);
        assert_eq!(session.view.filters().total_pages(), Some(5));
    }
}
