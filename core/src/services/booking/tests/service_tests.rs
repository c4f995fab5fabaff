//! Unit tests for booking service

use uuid::Uuid;

use crate::errors::{BookingError, DomainError};
use crate::repositories::AppointmentRepository;

use super::mocks::{build_harness, seed_doctor, seed_user};

#[tokio::test]
async fn test_booking_requires_a_time_slot() {
    let harness = build_harness();
    let user = seed_user(&harness);
    let doctor = seed_doctor(&harness, true);

    let result = harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "  ")
        .await;
    match result {
        Err(DomainError::Booking(BookingError::MissingSlotTime)) => {}
        other => panic!("expected missing-slot decline, got {:?}", other),
    }
}

#[tokio::test]
async fn test_booking_unknown_doctor() {
    let harness = build_harness();
    let user = seed_user(&harness);

    let result = harness
        .service
        .book_appointment(user.id, Uuid::new_v4(), "15_03_2025", "10:00")
        .await;
    match result {
        Err(DomainError::Booking(BookingError::DoctorNotFound)) => {}
        other => panic!("expected doctor-not-found, got {:?}", other),
    }
}

#[tokio::test]
async fn test_booking_unavailable_doctor() {
    let harness = build_harness();
    let user = seed_user(&harness);
    let doctor = seed_doctor(&harness, false);

    let result = harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "10:00")
        .await;
    match result {
        Err(DomainError::Booking(BookingError::DoctorUnavailable)) => {}
        other => panic!("expected unavailable decline, got {:?}", other),
    }
    assert_eq!(harness.appointments.count(), 0);
}

#[tokio::test]
async fn test_booking_happy_path_updates_calendar_and_snapshots() {
    let harness = build_harness();
    let user = seed_user(&harness);
    let doctor = seed_doctor(&harness, true);

    let appointment = harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "10:00")
        .await
        .unwrap();

    assert_eq!(appointment.amount, 50, "fee captured at booking time");
    assert_eq!(appointment.patient.name, "Asha Rao");
    assert_eq!(appointment.doctor.name, "Dr. Richard James");
    assert_eq!(appointment.slot_date, "15_03_2025");

    let stored_doctor = harness.doctors.get(doctor.id).unwrap();
    assert!(stored_doctor.is_slot_booked("15_03_2025", "10:00"));
    assert_eq!(harness.appointments.count(), 1);
}

#[tokio::test]
async fn test_booking_taken_slot_is_declined() {
    let harness = build_harness();
    let user = seed_user(&harness);
    let other = seed_user(&harness);
    let doctor = seed_doctor(&harness, true);

    harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "10:00")
        .await
        .unwrap();

    let result = harness
        .service
        .book_appointment(other.id, doctor.id, "15_03_2025", "10:00")
        .await;
    match result {
        Err(DomainError::Booking(BookingError::SlotTaken)) => {}
        other => panic!("expected slot-taken decline, got {:?}", other),
    }
    assert_eq!(harness.appointments.count(), 1, "only one booking holds the slot");
}

#[tokio::test]
async fn test_concurrent_bookings_of_one_slot_yield_one_success() {
    let harness = build_harness();
    let first = seed_user(&harness);
    let second = seed_user(&harness);
    let doctor = seed_doctor(&harness, true);

    let service_a = harness.service.clone();
    let service_b = harness.service.clone();
    let doctor_id = doctor.id;

    let task_a = tokio::spawn(async move {
        service_a
            .book_appointment(first.id, doctor_id, "15_03_2025", "10:00")
            .await
    });
    let task_b = tokio::spawn(async move {
        service_b
            .book_appointment(second.id, doctor_id, "15_03_2025", "10:00")
            .await
    });

    let outcomes = [task_a.await.unwrap(), task_b.await.unwrap()];
    let successes = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one booking may win the slot");
    assert_eq!(harness.appointments.count(), 1);

    let stored_doctor = harness.doctors.get(doctor_id).unwrap();
    assert_eq!(stored_doctor.slots_booked["15_03_2025"].len(), 1);
}

#[tokio::test]
async fn test_booking_unknown_user_leaves_calendar_untouched() {
    let harness = build_harness();
    let doctor = seed_doctor(&harness, true);

    let result = harness
        .service
        .book_appointment(Uuid::new_v4(), doctor.id, "15_03_2025", "10:00")
        .await;
    match result {
        Err(DomainError::Booking(BookingError::UserDataNotFound)) => {}
        other => panic!("expected user-data decline, got {:?}", other),
    }

    let stored_doctor = harness.doctors.get(doctor.id).unwrap();
    assert!(
        stored_doctor.slots_booked.is_empty(),
        "nothing was persisted for a declined booking"
    );
}

#[tokio::test]
async fn test_booking_create_failure_releases_the_slot() {
    let harness = build_harness();
    let user = seed_user(&harness);
    let doctor = seed_doctor(&harness, true);
    harness.appointments.set_fail_on_create(true);

    let result = harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "10:00")
        .await;
    assert!(matches!(result, Err(DomainError::Database { .. })));

    let stored_doctor = harness.doctors.get(doctor.id).unwrap();
    assert!(
        stored_doctor.slots_booked.is_empty(),
        "compensation must release the reserved slot"
    );
}

#[tokio::test]
async fn test_cancel_restores_the_calendar() {
    let harness = build_harness();
    let user = seed_user(&harness);
    let doctor = seed_doctor(&harness, true);

    let first = harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "10:00")
        .await
        .unwrap();
    let second = harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "11:00")
        .await
        .unwrap();

    harness
        .service
        .cancel_appointment(user.id, first.id)
        .await
        .unwrap();
    let stored = harness.doctors.get(doctor.id).unwrap();
    assert_eq!(
        stored.slots_booked["15_03_2025"],
        vec!["11:00"],
        "only the cancelled time is released"
    );

    harness
        .service
        .cancel_appointment(user.id, second.id)
        .await
        .unwrap();
    let stored = harness.doctors.get(doctor.id).unwrap();
    assert!(
        !stored.slots_booked.contains_key("15_03_2025"),
        "emptied date keys are dropped"
    );
    assert_eq!(harness.appointments.count(), 0);
}

#[tokio::test]
async fn test_cancel_by_a_stranger_is_declined() {
    let harness = build_harness();
    let user = seed_user(&harness);
    let stranger = seed_user(&harness);
    let doctor = seed_doctor(&harness, true);

    let appointment = harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "10:00")
        .await
        .unwrap();

    let result = harness
        .service
        .cancel_appointment(stranger.id, appointment.id)
        .await;
    match result {
        Err(DomainError::Booking(BookingError::NotFoundOrUnauthorized)) => {}
        other => panic!("expected unauthorized decline, got {:?}", other),
    }
    assert_eq!(harness.appointments.count(), 1, "the booking survives");
}

#[tokio::test]
async fn test_cancel_twice_declines_the_second_attempt() {
    let harness = build_harness();
    let user = seed_user(&harness);
    let doctor = seed_doctor(&harness, true);

    let appointment = harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "10:00")
        .await
        .unwrap();

    harness
        .service
        .cancel_appointment(user.id, appointment.id)
        .await
        .unwrap();
    let result = harness
        .service
        .cancel_appointment(user.id, appointment.id)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Booking(BookingError::NotFoundOrUnauthorized))
    ));
}

#[tokio::test]
async fn test_history_delete_only_for_finished_appointments() {
    let harness = build_harness();
    let user = seed_user(&harness);
    let doctor = seed_doctor(&harness, true);

    let pending = harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "10:00")
        .await
        .unwrap();

    let result = harness
        .service
        .delete_appointment_history(user.id, pending.id)
        .await;
    match result {
        Err(DomainError::Booking(BookingError::HistoryDeleteNotAllowed)) => {}
        other => panic!("expected history-delete decline, got {:?}", other),
    }

    // Completed records may be removed; the calendar keeps the slot.
    let mut completed = harness.appointments.get(pending.id).unwrap();
    completed.complete(true);
    harness.appointments.update(&completed).await.unwrap();

    harness
        .service
        .delete_appointment_history(user.id, pending.id)
        .await
        .unwrap();
    assert_eq!(harness.appointments.count(), 0);

    let stored_doctor = harness.doctors.get(doctor.id).unwrap();
    assert!(
        stored_doctor.is_slot_booked("15_03_2025", "10:00"),
        "history delete never touches the slot map"
    );
}

#[tokio::test]
async fn test_history_delete_accepts_doctor_cancelled_records() {
    let harness = build_harness();
    let user = seed_user(&harness);
    let doctor = seed_doctor(&harness, true);

    let appointment = harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "10:00")
        .await
        .unwrap();

    let mut cancelled = harness.appointments.get(appointment.id).unwrap();
    cancelled.cancel();
    harness.appointments.update(&cancelled).await.unwrap();

    harness
        .service
        .delete_appointment_history(user.id, appointment.id)
        .await
        .unwrap();
    assert_eq!(harness.appointments.count(), 0);
}

#[tokio::test]
async fn test_list_appointments_newest_first() {
    let harness = build_harness();
    let user = seed_user(&harness);
    let doctor = seed_doctor(&harness, true);

    let first = harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "10:00")
        .await
        .unwrap();
    let second = harness
        .service
        .book_appointment(user.id, doctor.id, "16_03_2025", "09:00")
        .await
        .unwrap();

    let listed = harness.service.list_appointments(user.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed[0].booked_at >= listed[1].booked_at);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
async fn test_pay_cash_records_the_payment() {
    let harness = build_harness();
    let user = seed_user(&harness);
    let doctor = seed_doctor(&harness, true);

    let appointment = harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "10:00")
        .await
        .unwrap();

    harness.service.pay_cash(user.id, appointment.id).await.unwrap();

    let stored = harness.appointments.get(appointment.id).unwrap();
    assert!(stored.payment);
    assert_eq!(stored.payment_method.as_deref(), Some("cash"));
    assert_eq!(stored.payment_info.unwrap().recorded_by, "user");
}

#[tokio::test]
async fn test_pay_cash_treats_cancelled_like_missing() {
    let harness = build_harness();
    let user = seed_user(&harness);
    let doctor = seed_doctor(&harness, true);

    let appointment = harness
        .service
        .book_appointment(user.id, doctor.id, "15_03_2025", "10:00")
        .await
        .unwrap();
    let mut cancelled = harness.appointments.get(appointment.id).unwrap();
    cancelled.cancel();
    harness.appointments.update(&cancelled).await.unwrap();

    let on_cancelled = harness.service.pay_cash(user.id, appointment.id).await;
    let on_missing = harness.service.pay_cash(user.id, Uuid::new_v4()).await;
    let by_stranger = harness
        .service
        .pay_cash(Uuid::new_v4(), appointment.id)
        .await;

    for result in [on_cancelled, on_missing, by_stranger] {
        match result {
            Err(DomainError::Booking(BookingError::NotFoundOrUnauthorized)) => {}
            other => panic!("expected unauthorized decline, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_directory_reads() {
    let harness = build_harness();
    let available = seed_doctor(&harness, true);
    let unavailable = seed_doctor(&harness, false);

    let all = harness.service.list_doctors().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|doctor| doctor.id == available.id));
    assert!(all.iter().any(|doctor| doctor.id == unavailable.id));

    let fetched = harness.service.get_doctor(unavailable.id).await.unwrap();
    assert_eq!(fetched.id, unavailable.id);

    match harness.service.get_doctor(Uuid::new_v4()).await {
        Err(DomainError::Booking(BookingError::DoctorNotFound)) => {}
        other => panic!("expected doctor-not-found, got {:?}", other),
    }
}
