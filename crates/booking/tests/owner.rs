use dietdesk_booking::{BookingWindow, Command, CreateOwnerInput, Query};
use dietdesk_shared::{Error, utc_offset};
use temp_dir::TempDir;

mod helpers;

async fn setup(dir: &TempDir) -> anyhow::Result<(Command, Query)> {
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let query = Query(state.read_db.clone());

    Ok((Command::new(state, utc_offset(3)?), query))
}

fn input(slug: &str, window: BookingWindow) -> CreateOwnerInput {
    CreateOwnerInput {
        full_name: "Dyt. Elif Kaya".to_owned(),
        public_slug: slug.to_owned(),
        window,
    }
}

#[tokio::test]
async fn test_create_owner() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, query) = setup(&dir).await?;

    let id = command
        .create_owner(input("elif-kaya", BookingWindow::default()))
        .await?;

    let owner = query.find_by_slug("elif-kaya").await?.unwrap();
    assert_eq!(owner.id, id);
    assert_eq!(owner.window(), Some(BookingWindow::default()));
    assert_eq!(owner.slots().len(), 10);

    assert!(query.find_by_slug("elif").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_slug_must_be_unique() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, _) = setup(&dir).await?;

    command
        .create_owner(input("elif-kaya", BookingWindow::default()))
        .await?;

    let err = command
        .create_owner(input("elif-kaya", BookingWindow::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Server(_)), "{err}");

    Ok(())
}

#[tokio::test]
async fn test_slug_format() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, _) = setup(&dir).await?;

    for slug in ["ab", "Elif", "elif kaya", "elif--kaya", "-elif", "elif-", "şule"] {
        let err = command
            .create_owner(input(slug, BookingWindow::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validate(_)), "{slug}: {err}");
    }

    for slug in ["elif", "dyt-elif-kaya", "klinik-34"] {
        command
            .create_owner(input(slug, BookingWindow::default()))
            .await?;
    }

    Ok(())
}

#[tokio::test]
async fn test_invalid_window_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, _) = setup(&dir).await?;

    let window = BookingWindow {
        start_hour: 18,
        end_hour: 9,
        session_duration: 45,
    };

    let err = command
        .create_owner(input("elif-kaya", window))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)), "{err}");

    Ok(())
}

#[tokio::test]
async fn test_update_window_changes_slots() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, query) = setup(&dir).await?;
    let id = helpers::create_owner(&command, "elif-kaya").await?;

    let window = BookingWindow {
        start_hour: 8,
        end_hour: 12,
        session_duration: 60,
    };
    command.update_window(&id, window).await?;

    let owner = query.find(&id).await?.unwrap();
    let slots = owner
        .slots()
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
    assert_eq!(slots, ["08:00", "09:00", "10:00", "11:00"]);

    let err = command
        .update_window(
            &id,
            BookingWindow {
                session_duration: 0,
                ..window
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)), "{err}");

    let err = command
        .update_window("missing", window)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "{err}");

    Ok(())
}

#[tokio::test]
async fn test_set_slug() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (command, query) = setup(&dir).await?;
    let elif = helpers::create_owner(&command, "elif-kaya").await?;
    helpers::create_owner(&command, "mert-demir").await?;

    command.set_slug(&elif, "elif-kaya").await?;
    command.set_slug(&elif, "dyt-elif").await?;

    assert_eq!(query.find_by_slug("dyt-elif").await?.unwrap().id, elif);
    assert!(query.find_by_slug("elif-kaya").await?.is_none());

    let err = command.set_slug(&elif, "mert-demir").await.unwrap_err();
    assert!(matches!(err, Error::Server(_)), "{err}");

    let err = command.set_slug("missing", "free-slug").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "{err}");

    Ok(())
}
