use dietdesk::Config;
use dietdesk_booking::{BookingWindow, Command, CreateOwnerInput, OwnerRow, Query};
use dietdesk_shared::State;

async fn command(config: &Config) -> anyhow::Result<Command> {
    let pool = dietdesk::create_pool(&config.database.url, 1).await?;
    dietdesk::migrate(&pool).await?;

    Ok(Command::new(State::single(pool), config.utc_offset()?))
}

async fn owner_by_slug(command: &Command, slug: &str) -> anyhow::Result<OwnerRow> {
    let Some(owner) = Query(command.read_db.clone()).find_by_slug(slug).await? else {
        anyhow::bail!("owner {slug} not found");
    };

    Ok(owner)
}

pub async fn create(
    config: Config,
    full_name: String,
    slug: String,
    window: BookingWindow,
) -> anyhow::Result<()> {
    let command = command(&config).await?;

    let id = command
        .create_owner(CreateOwnerInput {
            full_name,
            public_slug: slug.to_owned(),
            window,
        })
        .await?;

    tracing::info!("owner {slug} created with id {id}");

    Ok(())
}

pub async fn window(config: Config, slug: String, window: BookingWindow) -> anyhow::Result<()> {
    let command = command(&config).await?;

    let owner = owner_by_slug(&command, &slug).await?;

    command.update_window(owner.id, window).await?;

    let slots = window
        .slots()
        .iter()
        .map(|slot| slot.to_string())
        .collect::<Vec<_>>();
    tracing::info!("{slug} now books {}", slots.join(", "));

    Ok(())
}

pub async fn slug(config: Config, slug: String, new_slug: String) -> anyhow::Result<()> {
    let command = command(&config).await?;

    let owner = owner_by_slug(&command, &slug).await?;

    command.set_slug(owner.id, &new_slug).await?;

    tracing::info!("{slug} is now {new_slug}");

    Ok(())
}
