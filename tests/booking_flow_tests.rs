mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::json;

use common::{body_json, login, request, test_app, test_app_with_settings, test_settings, MemoryDb};
use inf_backend::auth::Role;

/// Fixed wall-clock instants on a future event day, so availability
/// listings see the slots and warning copy is predictable.
fn at(hour: u32, min: u32) -> DateTime<Utc> {
    chrono::NaiveDate::from_ymd_opt(2027, 3, 14)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
        .and_utc()
}

#[tokio::test]
async fn test_student_booking_flow_end_to_end() {
    let db = MemoryDb::new();
    let (_, company_id) =
        db.seed_company_account("acme@example.org", "Abcdefgh123!", "Acme Robotics", true);
    let event_id = db.seed_event("Spring Recruiting Day", 1, 3, 5);
    let offer_id = db.seed_offer(company_id, event_id, "Backend Internship");
    let slot_id = db.seed_slot(event_id, company_id, at(10, 0), at(10, 30), None);
    db.seed_account("nora@example.org", "Abcdefgh123!", Role::Student);
    let app = test_app(&db);

    let cookie = login(&app, "nora@example.org", "Abcdefgh123!").await;

    // Browse the catalog
    let response = request(&app, "GET", "/api/offers", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let offers = body_json(response).await;
    assert_eq!(offers.as_array().unwrap().len(), 1);
    assert_eq!(offers[0]["title"], "Backend Internship");
    assert_eq!(offers[0]["company_name"], "Acme Robotics");

    // Check availability for the company
    let response = request(
        &app,
        "GET",
        &format!("/api/slots?company_id={company_id}&event_id={event_id}"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let availability = body_json(response).await;
    assert_eq!(availability["includes_past"], false);
    assert_eq!(availability["slots"].as_array().unwrap().len(), 1);
    assert_eq!(availability["slots"][0]["remaining"], 1);

    // The quota gate is open
    let response = request(
        &app,
        "GET",
        &format!("/api/events/{event_id}/booking-limit"),
        Some(&cookie),
        None,
    )
    .await;
    let limit = body_json(response).await;
    assert_eq!(limit["can_book"], true);
    assert_eq!(limit["current_count"], 0);
    assert_eq!(limit["max_allowed"], 3);

    // Book
    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&cookie),
        Some(json!({"slot_id": slot_id, "offer_id": offer_id})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let submission = body_json(response).await;
    assert_eq!(submission["success"], true);
    assert!(submission["booking_id"].is_string());
    assert!(submission["warning"].is_null());
    let booking_id = submission["booking_id"].as_str().unwrap().to_string();

    // The booking shows up with its joined names
    let response = request(&app, "GET", "/api/bookings/mine", Some(&cookie), None).await;
    let bookings = body_json(response).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
    assert_eq!(bookings[0]["company_name"], "Acme Robotics");
    assert_eq!(bookings[0]["offer_title"], "Backend Internship");
    assert_eq!(bookings[0]["status"], "confirmed");

    // The slot is now full and drops out of availability
    let response = request(
        &app,
        "GET",
        &format!("/api/slots?company_id={company_id}"),
        Some(&cookie),
        None,
    )
    .await;
    let availability = body_json(response).await;
    assert!(availability["slots"].as_array().unwrap().is_empty());

    // Cancel and the capacity comes back
    let response = request(
        &app,
        "POST",
        &format!("/api/bookings/{booking_id}/cancel"),
        Some(&cookie),
        None,
    )
    .await;
    let outcome = body_json(response).await;
    assert_eq!(outcome["success"], true);

    let response = request(&app, "GET", "/api/bookings/mine", Some(&cookie), None).await;
    let bookings = body_json(response).await;
    assert!(bookings.as_array().unwrap().is_empty());

    let response = request(
        &app,
        "GET",
        "/api/bookings/mine?include_cancelled=true",
        Some(&cookie),
        None,
    )
    .await;
    let bookings = body_json(response).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
    assert_eq!(bookings[0]["status"], "cancelled");

    let response = request(
        &app,
        "GET",
        &format!("/api/slots?company_id={company_id}"),
        Some(&cookie),
        None,
    )
    .await;
    let availability = body_json(response).await;
    assert_eq!(availability["slots"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_overlap_warns_and_the_procedure_rejects() {
    let db = MemoryDb::new();
    let (_, acme_id) =
        db.seed_company_account("acme@example.org", "Abcdefgh123!", "Acme Robotics", true);
    let (_, orbit_id) =
        db.seed_company_account("orbit@example.org", "Abcdefgh123!", "Orbit Labs", true);
    let event_id = db.seed_event("Spring Recruiting Day", 1, 3, 5);
    let slot_a = db.seed_slot(event_id, acme_id, at(10, 0), at(10, 30), None);
    let slot_b = db.seed_slot(event_id, orbit_id, at(10, 15), at(10, 45), None);
    let slot_c = db.seed_slot(event_id, orbit_id, at(10, 30), at(11, 0), None);
    let student_id = db.seed_account("nora@example.org", "Abcdefgh123!", Role::Student);
    db.seed_booking(student_id, slot_a);
    let app = test_app(&db);

    let cookie = login(&app, "nora@example.org", "Abcdefgh123!").await;

    // The advisory check names the clashing company and time
    let response = request(
        &app,
        "GET",
        &format!("/api/slots/{slot_b}/conflict"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let check = body_json(response).await;
    assert_eq!(check["conflict"], true);
    assert_eq!(check["warning"]["company_name"], "Acme Robotics");
    let message = check["warning"]["message"].as_str().unwrap();
    assert!(message.contains("Acme Robotics"));
    assert!(message.contains("10:00"));

    // The submission still reaches the procedure, which rejects it.
    // The response carries both the warning and the rejection.
    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&cookie),
        Some(json!({"slot_id": slot_b})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let submission = body_json(response).await;
    assert_eq!(submission["success"], false);
    assert!(submission["message"]
        .as_str()
        .unwrap()
        .contains("You already have an interview with Acme Robotics"));
    assert_eq!(submission["warning"]["company_name"], "Acme Robotics");
    assert!(submission["booking_id"].is_null());

    // Nothing was written
    let response = request(&app, "GET", "/api/bookings/mine", Some(&cookie), None).await;
    let bookings = body_json(response).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);

    // Back-to-back is fine: slot C starts exactly when slot A ends
    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&cookie),
        Some(json!({"slot_id": slot_c})),
    )
    .await;
    let submission = body_json(response).await;
    assert_eq!(submission["success"], true);
    assert!(submission["warning"].is_null());
}

#[tokio::test]
async fn test_full_slot_rejects_and_leaves_availability() {
    let db = MemoryDb::new();
    let (_, company_id) =
        db.seed_company_account("acme@example.org", "Abcdefgh123!", "Acme Robotics", true);
    let event_id = db.seed_event("Spring Recruiting Day", 1, 3, 5);
    let full_slot = db.seed_slot(event_id, company_id, at(10, 0), at(10, 30), Some(2));
    let open_slot = db.seed_slot(event_id, company_id, at(11, 0), at(11, 30), Some(2));
    let rival_a = db.seed_account("rival-a@example.org", "Abcdefgh123!", Role::Student);
    let rival_b = db.seed_account("rival-b@example.org", "Abcdefgh123!", Role::Student);
    db.seed_booking(rival_a, full_slot);
    db.seed_booking(rival_b, full_slot);
    db.seed_booking(rival_a, open_slot);
    db.seed_account("nora@example.org", "Abcdefgh123!", Role::Student);
    let app = test_app(&db);

    let cookie = login(&app, "nora@example.org", "Abcdefgh123!").await;

    // capacity - 1 stays listed, capacity == bookings does not
    let response = request(
        &app,
        "GET",
        &format!("/api/slots?company_id={company_id}"),
        Some(&cookie),
        None,
    )
    .await;
    let availability = body_json(response).await;
    let slots = availability["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["id"], open_slot.to_string());
    assert_eq!(slots[0]["bookings_count"], 1);
    assert_eq!(slots[0]["remaining"], 1);

    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&cookie),
        Some(json!({"slot_id": full_slot})),
    )
    .await;
    let submission = body_json(response).await;
    assert_eq!(submission["success"], false);
    assert_eq!(submission["message"], "Slot is fully booked");
}

#[tokio::test]
async fn test_rebooking_the_same_slot_is_rejected() {
    let db = MemoryDb::new();
    let (_, company_id) =
        db.seed_company_account("acme@example.org", "Abcdefgh123!", "Acme Robotics", true);
    let event_id = db.seed_event("Spring Recruiting Day", 1, 3, 5);
    let slot_id = db.seed_slot(event_id, company_id, at(10, 0), at(10, 30), Some(3));
    db.seed_account("nora@example.org", "Abcdefgh123!", Role::Student);
    let app = test_app(&db);

    let cookie = login(&app, "nora@example.org", "Abcdefgh123!").await;

    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&cookie),
        Some(json!({"slot_id": slot_id})),
    )
    .await;
    assert_eq!(body_json(response).await["success"], true);

    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&cookie),
        Some(json!({"slot_id": slot_id})),
    )
    .await;
    let submission = body_json(response).await;
    assert_eq!(submission["success"], false);
    assert_eq!(submission["message"], "You already booked this slot");
}

#[tokio::test]
async fn test_phase_quota_gates_and_rejects() {
    let db = MemoryDb::new();
    db.seed_account("admin@example.org", "Abcdefgh123!", Role::Admin);
    let (_, acme_id) =
        db.seed_company_account("acme@example.org", "Abcdefgh123!", "Acme Robotics", true);
    let (_, orbit_id) =
        db.seed_company_account("orbit@example.org", "Abcdefgh123!", "Orbit Labs", true);
    let event_id = db.seed_event("Spring Recruiting Day", 1, 1, 5);
    let slot_a = db.seed_slot(event_id, acme_id, at(10, 0), at(10, 30), None);
    let slot_b = db.seed_slot(event_id, orbit_id, at(11, 0), at(11, 30), None);
    db.seed_account("nora@example.org", "Abcdefgh123!", Role::Student);
    let app = test_app(&db);

    let cookie = login(&app, "nora@example.org", "Abcdefgh123!").await;

    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&cookie),
        Some(json!({"slot_id": slot_a})),
    )
    .await;
    assert_eq!(body_json(response).await["success"], true);

    // Gate closes at the phase 1 quota
    let response = request(
        &app,
        "GET",
        &format!("/api/events/{event_id}/booking-limit"),
        Some(&cookie),
        None,
    )
    .await;
    let limit = body_json(response).await;
    assert_eq!(limit["can_book"], false);
    assert_eq!(limit["current_count"], 1);
    assert_eq!(limit["max_allowed"], 1);
    assert_eq!(limit["current_phase"], 1);

    // And the procedure enforces it
    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&cookie),
        Some(json!({"slot_id": slot_b})),
    )
    .await;
    let submission = body_json(response).await;
    assert_eq!(submission["success"], false);
    assert!(submission["message"]
        .as_str()
        .unwrap()
        .starts_with("Booking limit reached: 1 of 1"));

    // Advancing the event to phase 2 reopens the gate
    let admin = login(&app, "admin@example.org", "Abcdefgh123!").await;
    let response = request(
        &app,
        "PATCH",
        &format!("/api/admin/events/{event_id}"),
        Some(&admin),
        Some(json!({"current_phase": 2})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = request(
        &app,
        "GET",
        &format!("/api/events/{event_id}/booking-limit"),
        Some(&cookie),
        None,
    )
    .await;
    let limit = body_json(response).await;
    assert_eq!(limit["can_book"], true);
    assert_eq!(limit["max_allowed"], 5);

    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&cookie),
        Some(json!({"slot_id": slot_b})),
    )
    .await;
    assert_eq!(body_json(response).await["success"], true);
}

#[tokio::test]
async fn test_deprioritized_student_keeps_phase_one_quota() {
    let db = MemoryDb::new();
    db.seed_account("admin@example.org", "Abcdefgh123!", Role::Admin);
    let (_, company_id) =
        db.seed_company_account("acme@example.org", "Abcdefgh123!", "Acme Robotics", true);
    let event_id = db.seed_event("Spring Recruiting Day", 2, 1, 3);
    let slot_a = db.seed_slot(event_id, company_id, at(10, 0), at(10, 30), None);
    let slot_b = db.seed_slot(event_id, company_id, at(11, 0), at(11, 30), None);
    let student_id = db.seed_account("nora@example.org", "Abcdefgh123!", Role::Student);
    db.seed_booking(student_id, slot_a);
    let app = test_app(&db);

    let admin = login(&app, "admin@example.org", "Abcdefgh123!").await;
    let response = request(
        &app,
        "PATCH",
        &format!("/api/admin/users/{student_id}"),
        Some(&admin),
        Some(json!({"is_deprioritized": true})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = login(&app, "nora@example.org", "Abcdefgh123!").await;

    // Phase 2 is active but the deprioritized student stays on the
    // phase 1 quota
    let response = request(
        &app,
        "GET",
        &format!("/api/events/{event_id}/booking-limit"),
        Some(&cookie),
        None,
    )
    .await;
    let limit = body_json(response).await;
    assert_eq!(limit["current_phase"], 2);
    assert_eq!(limit["max_allowed"], 1);
    assert_eq!(limit["can_book"], false);

    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&cookie),
        Some(json!({"slot_id": slot_b})),
    )
    .await;
    let submission = body_json(response).await;
    assert_eq!(submission["success"], false);
    assert!(submission["message"]
        .as_str()
        .unwrap()
        .starts_with("Booking limit reached: 1 of 1"));
}

#[tokio::test]
async fn test_unapproved_student_cannot_book() {
    let db = MemoryDb::new();
    db.seed_account("admin@example.org", "Abcdefgh123!", Role::Admin);
    let (_, company_id) =
        db.seed_company_account("acme@example.org", "Abcdefgh123!", "Acme Robotics", true);
    let event_id = db.seed_event("Spring Recruiting Day", 1, 3, 5);
    let slot_id = db.seed_slot(event_id, company_id, at(10, 0), at(10, 30), None);
    let student_id = db.seed_account("nora@example.org", "Abcdefgh123!", Role::Student);
    let app = test_app(&db);

    let admin = login(&app, "admin@example.org", "Abcdefgh123!").await;
    let response = request(
        &app,
        "PATCH",
        &format!("/api/admin/users/{student_id}"),
        Some(&admin),
        Some(json!({"account_approved": false})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = login(&app, "nora@example.org", "Abcdefgh123!").await;
    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&cookie),
        Some(json!({"slot_id": slot_id})),
    )
    .await;
    let submission = body_json(response).await;
    assert_eq!(submission["success"], false);
    assert_eq!(submission["message"], "Your account is awaiting approval");
}

#[tokio::test]
async fn test_deactivated_event_blocks_booking() {
    let db = MemoryDb::new();
    db.seed_account("admin@example.org", "Abcdefgh123!", Role::Admin);
    let (_, company_id) =
        db.seed_company_account("acme@example.org", "Abcdefgh123!", "Acme Robotics", true);
    let event_id = db.seed_event("Spring Recruiting Day", 1, 3, 5);
    let slot_id = db.seed_slot(event_id, company_id, at(10, 0), at(10, 30), None);
    db.seed_account("nora@example.org", "Abcdefgh123!", Role::Student);
    let app = test_app(&db);

    let admin = login(&app, "admin@example.org", "Abcdefgh123!").await;
    let response = request(
        &app,
        "PATCH",
        &format!("/api/admin/events/{event_id}"),
        Some(&admin),
        Some(json!({"is_active": false})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = login(&app, "nora@example.org", "Abcdefgh123!").await;
    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&cookie),
        Some(json!({"slot_id": slot_id})),
    )
    .await;
    let submission = body_json(response).await;
    assert_eq!(submission["success"], false);
    assert_eq!(submission["message"], "Event is not active");

    // The inactive event also disappears from the public listing
    let response = request(&app, "GET", "/api/events", Some(&cookie), None).await;
    let events = body_json(response).await;
    assert!(events.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cancellation_frees_slot_capacity() {
    let db = MemoryDb::new();
    let (_, company_id) =
        db.seed_company_account("acme@example.org", "Abcdefgh123!", "Acme Robotics", true);
    let event_id = db.seed_event("Spring Recruiting Day", 1, 3, 5);
    let slot_id = db.seed_slot(event_id, company_id, at(10, 0), at(10, 30), None);
    db.seed_account("nora@example.org", "Abcdefgh123!", Role::Student);
    db.seed_account("theo@example.org", "Abcdefgh123!", Role::Student);
    let app = test_app(&db);

    let nora = login(&app, "nora@example.org", "Abcdefgh123!").await;
    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&nora),
        Some(json!({"slot_id": slot_id})),
    )
    .await;
    let submission = body_json(response).await;
    assert_eq!(submission["success"], true);
    let booking_id = submission["booking_id"].as_str().unwrap().to_string();

    // Capacity 1 is taken
    let theo = login(&app, "theo@example.org", "Abcdefgh123!").await;
    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&theo),
        Some(json!({"slot_id": slot_id})),
    )
    .await;
    assert_eq!(body_json(response).await["message"], "Slot is fully booked");

    // A second student cannot cancel someone else's booking
    let response = request(
        &app,
        "POST",
        &format!("/api/bookings/{booking_id}/cancel"),
        Some(&theo),
        None,
    )
    .await;
    let outcome = body_json(response).await;
    assert_eq!(outcome["success"], false);

    let response = request(
        &app,
        "POST",
        &format!("/api/bookings/{booking_id}/cancel"),
        Some(&nora),
        None,
    )
    .await;
    assert_eq!(body_json(response).await["success"], true);

    let response = request(
        &app,
        "POST",
        "/api/bookings",
        Some(&theo),
        Some(json!({"slot_id": slot_id})),
    )
    .await;
    assert_eq!(body_json(response).await["success"], true);
}

#[tokio::test]
async fn test_availability_falls_back_to_past_slots() {
    let db = MemoryDb::new();
    let (_, company_id) =
        db.seed_company_account("acme@example.org", "Abcdefgh123!", "Acme Robotics", true);
    let event_id = db.seed_event("Spring Recruiting Day", 1, 3, 5);
    let started = Utc::now() - chrono::Duration::hours(2);
    db.seed_slot(event_id, company_id, started, started + chrono::Duration::minutes(30), None);
    db.seed_account("nora@example.org", "Abcdefgh123!", Role::Student);

    let app = test_app(&db);
    let cookie = login(&app, "nora@example.org", "Abcdefgh123!").await;

    let response = request(
        &app,
        "GET",
        &format!("/api/slots?company_id={company_id}"),
        Some(&cookie),
        None,
    )
    .await;
    let availability = body_json(response).await;
    assert_eq!(availability["includes_past"], true);
    assert_eq!(availability["slots"].as_array().unwrap().len(), 1);

    // With the fallback disabled the listing stays empty
    let mut settings = test_settings();
    settings.slot_past_fallback_enabled = false;
    let strict_app = test_app_with_settings(&db, settings);

    // Same signing key, so the session carries over
    let response = request(
        &strict_app,
        "GET",
        &format!("/api/slots?company_id={company_id}"),
        Some(&cookie),
        None,
    )
    .await;
    let availability = body_json(response).await;
    assert_eq!(availability["includes_past"], false);
    assert!(availability["slots"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_company_slot_management_rules() {
    let db = MemoryDb::new();
    db.seed_company_account("acme@example.org", "Abcdefgh123!", "Acme Robotics", true);
    db.seed_company_account("newco@example.org", "Abcdefgh123!", "NewCo", false);
    let event_id = db.seed_event("Spring Recruiting Day", 1, 3, 5);
    let student_id = db.seed_account("nora@example.org", "Abcdefgh123!", Role::Student);
    let app = test_app(&db);

    // A verified company publishes a slot
    let acme = login(&app, "acme@example.org", "Abcdefgh123!").await;
    let response = request(
        &app,
        "POST",
        "/api/slots",
        Some(&acme),
        Some(json!({
            "event_id": event_id,
            "start_time": at(10, 0),
            "end_time": at(10, 30),
            "capacity": 2
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let slot = body_json(response).await;
    assert_eq!(slot["capacity"], 2);
    let slot_id = slot["id"].as_str().unwrap().to_string();

    // An unverified company may not
    let newco = login(&app, "newco@example.org", "Abcdefgh123!").await;
    let response = request(
        &app,
        "POST",
        "/api/slots",
        Some(&newco),
        Some(json!({
            "event_id": event_id,
            "start_time": at(11, 0),
            "end_time": at(11, 30)
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"]["message"]
        .as_str()
        .unwrap()
        .contains("verified"));

    // Students have no company context at all
    let nora = login(&app, "nora@example.org", "Abcdefgh123!").await;
    let response = request(
        &app,
        "POST",
        "/api/slots",
        Some(&nora),
        Some(json!({
            "event_id": event_id,
            "start_time": at(12, 0),
            "end_time": at(12, 30)
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Another company cannot touch Acme's slot
    let response = request(
        &app,
        "PATCH",
        &format!("/api/slots/{slot_id}"),
        Some(&newco),
        Some(json!({"is_active": false})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A slot with a confirmed booking cannot be deleted
    db.seed_booking(student_id, slot_id.parse().unwrap());
    let response = request(
        &app,
        "DELETE",
        &format!("/api/slots/{slot_id}"),
        Some(&acme),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The company sees the booking against its slot
    let response = request(
        &app,
        "GET",
        "/api/companies/me/bookings",
        Some(&acme),
        None,
    )
    .await;
    let bookings = body_json(response).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
    assert_eq!(bookings[0]["student_name"], "Test Person");

    // ... while the slot list reflects the confirmed count
    let response = request(&app, "GET", "/api/slots/mine", Some(&acme), None).await;
    let slots = body_json(response).await;
    assert_eq!(slots.as_array().unwrap().len(), 1);
    assert_eq!(slots[0]["bookings_count"], 1);
}

#[tokio::test]
async fn test_conflict_check_is_student_only() {
    let db = MemoryDb::new();
    let (_, company_id) =
        db.seed_company_account("acme@example.org", "Abcdefgh123!", "Acme Robotics", true);
    let event_id = db.seed_event("Spring Recruiting Day", 1, 3, 5);
    let slot_id = db.seed_slot(event_id, company_id, at(10, 0), at(10, 30), None);
    let app = test_app(&db);

    let cookie = login(&app, "acme@example.org", "Abcdefgh123!").await;
    let response = request(
        &app,
        "GET",
        &format!("/api/slots/{slot_id}/conflict"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
