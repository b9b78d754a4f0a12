use chrono::NaiveDate;

use crate::models::filter::FilterKind;
use crate::services::appointment_service::BookingsView;

pub const HELP: &str = "\
Commands:
  view all|latest|doctor   switch screen
  type none|date|doctor    choose the filter (all appointments)
  doctor [name]            set or clear the doctor
  from [YYYY-MM-DD]        set or clear the start date
  to [YYYY-MM-DD]          set or clear the end date
  date YYYY-MM-DD          pick the day (latest bookings)
  today                    back to today (latest bookings)
  apply                    run the staged filter
  reset                    clear the filter
  next | prev | page N     move between pages
  retry                    repeat the last search
  cancel ID [ID...]        cancel appointments
  doctors                  list doctors
  stats                    dashboard counters
  show                     redraw
  help                     this text
  quit                     leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    View(BookingsView),
    FilterType(FilterKind),
    Doctor(Option<String>),
    From(Option<NaiveDate>),
    To(Option<NaiveDate>),
    Date(NaiveDate),
    Today,
    Apply,
    Reset,
    Next,
    Previous,
    Page(u32),
    Retry,
    Cancel(Vec<String>),
    Doctors,
    Stats,
    Show,
    Help,
    Quit,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("expected a date like 2024-01-31, got {:?}", raw))
}

fn optional_date(rest: &str) -> Result<Option<NaiveDate>, String> {
    if rest.is_empty() {
        Ok(None)
    } else {
        parse_date(rest).map(Some)
    }
}

/// Blank input yields `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "view" => match rest {
            "all" => Command::View(BookingsView::AllAppointments),
            "latest" => Command::View(BookingsView::LatestBookings),
            "doctor" => Command::View(BookingsView::DoctorBookings),
            other => return Err(format!("unknown view {:?} (all, latest, doctor)", other)),
        },
        "type" => Command::FilterType(rest.parse()?),
        "doctor" => Command::Doctor(Some(rest.to_string()).filter(|n| !n.is_empty())),
        "from" => Command::From(optional_date(rest)?),
        "to" => Command::To(optional_date(rest)?),
        "date" => Command::Date(parse_date(rest)?),
        "today" => Command::Today,
        "apply" => Command::Apply,
        "reset" => Command::Reset,
        "next" | "n" => Command::Next,
        "prev" | "previous" | "p" => Command::Previous,
        "page" => Command::Page(
            rest.parse()
                .map_err(|_| format!("expected a page number, got {:?}", rest))?,
        ),
        "retry" | "r" => Command::Retry,
        "cancel" => {
            let ids: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
            if ids.is_empty() {
                return Err("cancel needs at least one appointment id".to_string());
            }
            Command::Cancel(ids)
        }
        "doctors" => Command::Doctors,
        "stats" => Command::Stats,
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command {:?}, try help", other)),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        parse_command(line).unwrap().unwrap()
    }

    #[test]
    fn doctor_name_keeps_spaces() {
        assert_eq!(parse("doctor Dr. Lee"), Command::Doctor(Some("Dr. Lee".into())));
        assert_eq!(parse("doctor"), Command::Doctor(None));
    }

    #[test]
    fn dates_are_iso() {
        assert_eq!(
            parse("from 2024-01-01"),
            Command::From(NaiveDate::from_ymd_opt(2024, 1, 1))
        );
        assert_eq!(parse("to"), Command::To(None));
        assert!(parse_command("date 01/02/2024").is_err());
    }

    #[test]
    fn cancel_takes_many_ids() {
        assert_eq!(
            parse("cancel a1 a2"),
            Command::Cancel(vec!["a1".into(), "a2".into()])
        );
        assert!(parse_command("cancel").is_err());
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn unknown_words_are_errors() {
        assert!(parse_command("delete a1").is_err());
        assert!(parse_command("view weekly").is_err());
        assert!(parse_command("page two").is_err());
    }

    #[test]
    fn view_and_type_words() {
        assert_eq!(parse("view latest"), Command::View(BookingsView::LatestBookings));
        assert_eq!(parse("TYPE date"), Command::FilterType(FilterKind::Date));
    }
}
