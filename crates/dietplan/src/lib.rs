mod codec;
mod keyword;
pub mod share;
mod token;
mod types;

pub use codec::*;
pub use dietdesk_shared::dietplan::PlanMode;
pub use types::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod command;
        mod query;

        pub use command::*;
        pub use query::*;
    }
}
