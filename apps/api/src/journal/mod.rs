// Mood journal: one append-only table, a write endpoint, a listing page.

pub mod handlers;
pub mod models;
pub mod page;
pub mod store;
pub mod strategies;
