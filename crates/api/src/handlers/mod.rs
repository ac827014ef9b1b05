pub mod auth;
pub mod history;
pub mod lands;
pub mod notifications;
pub mod owners;
pub mod profile;
pub mod users;
