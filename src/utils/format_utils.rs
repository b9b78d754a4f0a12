use chrono::{NaiveDate, Utc};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Display helpers handed to the views instead of living in global state.
#[derive(Debug, Clone)]
pub struct DisplayFormat {
    pub currency: String,
    pub today: NaiveDate,
}

impl DisplayFormat {
    pub fn new(currency: &str, today: NaiveDate) -> Self {
        DisplayFormat {
            currency: currency.to_string(),
            today,
        }
    }

    pub fn for_today(currency: &str) -> Self {
        Self::new(currency, Utc::now().date_naive())
    }

    /// `20_1_2024` (day_month_year, month 1-based) -> `20 Jan 2024`.
    /// Anything else is shown as stored.
    pub fn slot_date(&self, slot_date: &str) -> String {
        let parts: Vec<&str> = slot_date.split('_').collect();
        if let [day, month, year] = parts.as_slice() {
            if let Ok(month) = month.parse::<usize>() {
                if (1..=12).contains(&month) {
                    return format!("{} {} {}", day, MONTHS[month - 1], year);
                }
            }
        }
        slot_date.to_string()
    }

    /// Whole years since `dob`, or `None` when the patient never set it.
    pub fn age(&self, dob: &str) -> Option<u32> {
        let birth = NaiveDate::parse_from_str(dob.trim(), "%Y-%m-%d").ok()?;
        self.today.years_since(birth)
    }

    pub fn age_label(&self, dob: &str) -> String {
        self.age(dob)
            .map(|age| age.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn fee(&self, amount: f64) -> String {
        if amount.fract() == 0.0 {
            format!("{}{}", self.currency, amount as i64)
        } else {
            format!("{}{:.2}", self.currency, amount)
        }
    }
}
