mod appointment;
mod diet_list;
mod owner;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "dietdesk",
    "m0001",
    vec_box![],
    vec_box![
        owner::CreateTable,
        owner::CreateUk1,
        appointment::CreateTable,
        appointment::CreateIdx1,
        appointment::CreateUk1,
        diet_list::CreateTable,
        diet_list::CreateIdx1
    ]
);
