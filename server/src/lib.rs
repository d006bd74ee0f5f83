pub mod app_state;
pub mod opener;
pub mod routes;
pub mod terminal;
