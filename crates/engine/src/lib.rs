//! Domain services: accounts, the search log, the address inventory and the
//! order allocator / lifecycle. Every service is a stateless unit struct
//! operating on a borrowed `PgPool`.

pub mod accounts;
pub mod allocator;
pub mod balance;
pub mod inventory;
pub mod orders;
pub mod password;
pub mod search;
pub mod throttle;
pub mod validation;
