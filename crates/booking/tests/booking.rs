use dietdesk_booking::{
    AppointmentStatus, Command, Occupancy, Query, RequestAppointmentInput, day_schedule,
};
use dietdesk_shared::{Error, parse_date, utc_offset};
use temp_dir::TempDir;

mod helpers;

const DATE: &str = "2099-03-02";

async fn setup(dir: &TempDir) -> anyhow::Result<(Command, Query)> {
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let query = Query(state.read_db.clone());

    Ok((Command::new(state, utc_offset(3)?), query))
}

#[tokio::test]
async fn test_request_books_a_pending_slot() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, query) = setup(&dir).await?;
    let owner_id = helpers::create_owner(&command, "elif-kaya").await?;

    let id = command
        .request("elif-kaya", helpers::request(DATE, "10:30"))
        .await?;

    let appointments = query
        .appointments_on(&owner_id, parse_date(DATE)?, command.offset())
        .await?;

    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].id, id);
    assert_eq!(appointments[0].status.0, AppointmentStatus::Pending);
    assert_eq!(
        appointments[0].time_of_day(command.offset())?.to_string(),
        "10:30"
    );

    Ok(())
}

#[tokio::test]
async fn test_same_slot_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, _) = setup(&dir).await?;
    helpers::create_owner(&command, "elif-kaya").await?;

    command
        .request("elif-kaya", helpers::request(DATE, "09:45"))
        .await?;

    let err = command
        .request("elif-kaya", helpers::request(DATE, "09:45"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::SlotTaken), "{err}");

    Ok(())
}

#[tokio::test]
async fn test_other_owner_or_date_stays_free() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, _) = setup(&dir).await?;
    helpers::create_owner(&command, "elif-kaya").await?;
    helpers::create_owner(&command, "mert-demir").await?;

    command
        .request("elif-kaya", helpers::request(DATE, "12:00"))
        .await?;
    command
        .request("mert-demir", helpers::request(DATE, "12:00"))
        .await?;
    command
        .request("elif-kaya", helpers::request("2099-03-03", "12:00"))
        .await?;
    command
        .request("elif-kaya", helpers::request(DATE, "12:45"))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_released_slot_can_be_booked_again() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, _) = setup(&dir).await?;
    helpers::create_owner(&command, "elif-kaya").await?;

    let first = command
        .request("elif-kaya", helpers::request(DATE, "13:30"))
        .await?;
    command
        .set_status(&first, AppointmentStatus::Rejected)
        .await?;

    command
        .request("elif-kaya", helpers::request(DATE, "13:30"))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_approved_appointments_block_their_slots() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, _) = setup(&dir).await?;
    let window = dietdesk_booking::BookingWindow {
        start_hour: 10,
        end_hour: 17,
        session_duration: 45,
    };
    let mut owner_ids = vec![];
    for slug in ["elif-kaya", "mert-demir"] {
        owner_ids.push(
            command
                .create_owner(dietdesk_booking::CreateOwnerInput {
                    full_name: "Dyt. Elif Kaya".to_owned(),
                    public_slug: slug.to_owned(),
                    window,
                })
                .await?,
        );
    }

    for time in ["10:00", "10:45"] {
        let id = command
            .request("elif-kaya", helpers::request(DATE, time))
            .await?;
        command.set_status(&id, AppointmentStatus::Approved).await?;
    }

    let err = command
        .request("elif-kaya", helpers::request(DATE, "10:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::SlotTaken), "{err}");

    let occupancy =
        Occupancy::load(&command.read_db, &owner_ids[0], parse_date(DATE)?, command.offset())
            .await?;
    assert_eq!(
        occupancy,
        ["10:00", "10:45"]
            .iter()
            .map(|t| t.parse().unwrap())
            .collect::<Occupancy>()
    );

    command
        .request("mert-demir", helpers::request(DATE, "10:00"))
        .await?;
    command
        .request("elif-kaya", helpers::request("2099-03-03", "10:00"))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_concurrent_requests_claim_a_slot_once() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, query) = setup(&dir).await?;
    let owner_id = helpers::create_owner(&command, "elif-kaya").await?;

    let results = futures::future::join_all((0..8).map(|_| {
        let command = command.clone();
        async move {
            command
                .request("elif-kaya", helpers::request(DATE, "15:00"))
                .await
        }
    }))
    .await;

    let booked = results.iter().filter(|r| r.is_ok()).count();
    let taken = results
        .iter()
        .filter(|r| matches!(r, Err(Error::SlotTaken)))
        .count();

    assert_eq!(booked, 1);
    assert_eq!(taken, 7);

    let appointments = query
        .appointments_on(&owner_id, parse_date(DATE)?, command.offset())
        .await?;
    assert_eq!(appointments.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_occupancy_failure_blocks_booking() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, _) = setup(&dir).await?;
    helpers::create_owner(&command, "elif-kaya").await?;

    sqlx::query("DROP TABLE appointment")
        .execute(&command.write_db)
        .await?;

    let err = command
        .request("elif-kaya", helpers::request(DATE, "09:00"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::BookingBlocked), "{err}");

    Ok(())
}

#[tokio::test]
async fn test_request_rejects_bad_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, _) = setup(&dir).await?;
    helpers::create_owner(&command, "elif-kaya").await?;

    let err = command
        .request("elif-kaya", helpers::request(DATE, "10:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Server(_)), "off-grid time: {err}");

    let err = command
        .request("elif-kaya", helpers::request("2001-03-05", "10:30"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Server(_)), "past date: {err}");

    let err = command
        .request("nobody", helpers::request(DATE, "10:30"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "unknown slug: {err}");

    let err = command
        .request(
            "elif-kaya",
            RequestAppointmentInput {
                client_phone: "123".to_owned(),
                ..helpers::request(DATE, "10:30")
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)), "short phone: {err}");

    let err = command
        .request(
            "elif-kaya",
            RequestAppointmentInput {
                client_name: String::new(),
                ..helpers::request(DATE, "10:30")
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)), "empty name: {err}");

    Ok(())
}

#[tokio::test]
async fn test_status_transitions() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, query) = setup(&dir).await?;
    helpers::create_owner(&command, "elif-kaya").await?;

    let id = command
        .request("elif-kaya", helpers::request(DATE, "11:15"))
        .await?;

    command.set_status(&id, AppointmentStatus::Approved).await?;

    let err = command
        .set_status(&id, AppointmentStatus::Rejected)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Server(_)), "{err}");

    command.set_status(&id, AppointmentStatus::Completed).await?;

    let err = command
        .set_status(&id, AppointmentStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Server(_)), "{err}");

    let appointment = query.find_appointment(&id).await?.unwrap();
    assert_eq!(appointment.status.0, AppointmentStatus::Completed);

    let err = command
        .set_status("missing", AppointmentStatus::Approved)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "{err}");

    Ok(())
}

#[tokio::test]
async fn test_day_schedule_reflects_active_appointments() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, query) = setup(&dir).await?;
    let owner_id = helpers::create_owner(&command, "elif-kaya").await?;

    command
        .request("elif-kaya", helpers::request(DATE, "09:00"))
        .await?;
    let cancelled = command
        .request("elif-kaya", helpers::request(DATE, "09:45"))
        .await?;
    command
        .set_status(&cancelled, AppointmentStatus::Cancelled)
        .await?;

    let owner = query.find(&owner_id).await?.unwrap();
    let occupancy =
        Occupancy::load(&command.read_db, &owner_id, parse_date(DATE)?, command.offset()).await?;
    let schedule = day_schedule(&owner.slots(), &occupancy);

    assert_eq!(schedule.len(), 10);
    assert!(!schedule[0].available);
    assert!(schedule[1].available);
    assert!(schedule[2..].iter().all(|slot| slot.available));

    Ok(())
}
