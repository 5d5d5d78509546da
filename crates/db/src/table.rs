use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Owner {
    Table,
    Id,
    FullName,
    PublicSlug,
    WorkStartHour,
    WorkEndHour,
    SessionDuration,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Appointment {
    Table,
    Id,
    OwnerId,
    ClientName,
    ClientPhone,
    Note,
    StartTime,
    Status,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum DietList {
    Table,
    Id,
    OwnerId,
    ClientName,
    Title,
    Content,
    Mode,
    CreatedAt,
    UpdatedAt,
}
