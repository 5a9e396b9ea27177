pub mod calendar_links;
pub mod classify;
pub mod countdown;
pub mod embed;
