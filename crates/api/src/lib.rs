//! BlockDesk HTTP API.
//!
//! Endpoints:
//! - POST /api/auth/register, /api/auth/login — password accounts, returns a JWT
//! - POST /api/auth/api-keys — issue an API key
//! - GET  /api/search/address/{address}, /api/search/transaction/{hash} — ledger lookups
//! - GET  /api/searches — past searches
//! - GET/POST/DELETE /api/addresses — owned addresses
//! - GET  /api/addresses/available — addresses free for a new order
//! - GET  /api/balance — aggregate balance of owned addresses
//! - GET/POST /api/orders, POST /api/orders/{id}/complete — orders

pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;
