use std::{path::PathBuf, str::FromStr};

use dietdesk_shared::State;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    dietdesk_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State::single(pool))
}

pub async fn create_owner(
    command: &dietdesk_booking::Command,
    slug: &str,
) -> anyhow::Result<String> {
    Ok(command
        .create_owner(dietdesk_booking::CreateOwnerInput {
            full_name: "Dyt. Elif Kaya".to_owned(),
            public_slug: slug.to_owned(),
            window: dietdesk_booking::BookingWindow::default(),
        })
        .await?)
}

pub fn request(date: &str, time: &str) -> dietdesk_booking::RequestAppointmentInput {
    dietdesk_booking::RequestAppointmentInput {
        date: dietdesk_shared::parse_date(date).unwrap(),
        time: time.parse().unwrap(),
        client_name: "Ayşe Yılmaz".to_owned(),
        client_phone: "0532 111 22 33".to_owned(),
        note: String::new(),
    }
}
