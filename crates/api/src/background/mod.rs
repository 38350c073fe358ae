//! Background maintenance tasks spawned at server start.

pub mod event_purge;
