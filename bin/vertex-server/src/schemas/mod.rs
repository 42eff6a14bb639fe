//! Request / response bodies for the `/api` routes.

pub mod chat;
pub mod contact;
