//! Fake backend and fixtures shared by the unit tests.

use axum::Router;
use serde_json::{json, Value};

use crate::models::appointments::appointment::{Appointment, DocData, PageResult, PatientData};

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn appointment(id: &str) -> Appointment {
    Appointment {
        id: id.to_string(),
        user_data: PatientData {
            name: format!("Patient {}", id),
            image: String::new(),
            dob: "1990-04-12".to_string(),
        },
        doc_data: DocData {
            name: "Dr. Lee".to_string(),
            image: String::new(),
        },
        slot_date: "20_1_2024".to_string(),
        slot_time: "10:30 AM".to_string(),
        amount: 50.0,
        cancelled: false,
        is_completed: false,
    }
}

pub fn page_of(ids: &[&str], total_pages: u32) -> PageResult {
    PageResult {
        appointments: ids.iter().map(|id| appointment(id)).collect(),
        total_pages,
    }
}

/// Wire form of [`appointment`], as the backend would send it.
pub fn appointment_json(id: &str) -> Value {
    json!({
        "_id": id,
        "userData": { "name": format!("Patient {}", id), "image": "", "dob": "1990-04-12" },
        "docData": { "name": "Dr. Lee", "image": "" },
        "slotDate": "20_1_2024",
        "slotTime": "10:30 AM",
        "amount": 50,
        "cancelled": false,
        "isCompleted": false
    })
}

pub fn page_json(ids: &[&str], total_pages: u32) -> Value {
    json!({
        "success": true,
        "appointments": ids.iter().map(|id| appointment_json(id)).collect::<Vec<_>>(),
        "pagination": { "totalPages": total_pages }
    })
}
