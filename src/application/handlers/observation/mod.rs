//! Weekly observation and diary handlers.

mod add_observation_for_user;
mod add_weekly_observation;
mod delete_weekly_observation;
mod list_diary;

pub use add_observation_for_user::{AddObservationForUserCommand, AddObservationForUserHandler};
pub use add_weekly_observation::{AddWeeklyObservationCommand, AddWeeklyObservationHandler};
pub use delete_weekly_observation::{
    DeleteWeeklyObservationCommand, DeleteWeeklyObservationHandler,
};
pub use list_diary::{ListDiaryHandler, ListDiaryQuery};
