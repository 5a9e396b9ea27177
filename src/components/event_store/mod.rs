mod actor;
pub mod models;
pub mod time;

pub use actor::{EventStoreActor, EventStoreHandle};
pub use models::ScheduleEvent;
