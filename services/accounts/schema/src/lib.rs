//! sea-orm entities owned by the accounts service.

pub mod accounts;
