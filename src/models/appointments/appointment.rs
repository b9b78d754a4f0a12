use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientData {
    pub name: String,
    #[serde(default)]
    pub image: String,
    // "Not Selected" when the patient never filled it in
    #[serde(default)]
    pub dob: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocData {
    pub name: String,
    #[serde(default)]
    pub image: String,
}

/// A booked slot as the admin endpoints return it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_data: PatientData,
    pub doc_data: DocData,
    pub slot_date: String,
    pub slot_time: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub is_completed: bool,
}

impl Appointment {
    pub fn is_cancellable(&self) -> bool {
        !self.cancelled && !self.is_completed
    }

    /// One-way: a cancelled appointment never becomes active again.
    pub fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// One page of appointments plus the server-reported page count.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub appointments: Vec<Appointment>,
    pub total_pages: u32,
}

impl From<AppointmentsResponse> for PageResult {
    fn from(response: AppointmentsResponse) -> Self {
        PageResult {
            appointments: response.appointments,
            total_pages: response.pagination.map(|p| p.total_pages).unwrap_or(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_wire_names() {
        let raw = json!({
            "_id": "66a1",
            "userData": { "name": "Ana Ruiz", "image": "a.png", "dob": "1990-04-12" },
            "docData": { "name": "Dr. Lee", "image": "d.png" },
            "slotDate": "20_1_2024",
            "slotTime": "10:30 AM",
            "amount": 50,
            "cancelled": false,
            "isCompleted": true
        });
        let appointment: Appointment = serde_json::from_value(raw).unwrap();
        assert_eq!(appointment.id, "66a1");
        assert_eq!(appointment.doc_data.name, "Dr. Lee");
        assert_eq!(appointment.amount, 50.0);
        assert!(appointment.is_completed);
        assert!(!appointment.is_cancellable());
    }

    #[test]
    fn missing_pagination_counts_as_single_page() {
        let response: AppointmentsResponse =
            serde_json::from_value(json!({ "success": true, "appointments": [] })).unwrap();
        let page = PageResult::from(response);
        assert_eq!(page.total_pages, 1);
        assert!(page.appointments.is_empty());
    }
}
