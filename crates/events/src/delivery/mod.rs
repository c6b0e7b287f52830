//! External delivery channels for relayed notifications.

pub mod gateway;
