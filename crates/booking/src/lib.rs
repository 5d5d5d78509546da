mod occupancy;
mod slot;
mod window;

pub use dietdesk_shared::booking::AppointmentStatus;
pub use occupancy::*;
pub use slot::*;
pub use window::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod command;
        mod query;

        pub use command::*;
        pub use query::*;
    }
}
