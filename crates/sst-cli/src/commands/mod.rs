pub mod aso;
pub mod auth;
pub mod dashboard;
pub mod dispatch;
pub mod ltcat;
pub mod nr17;
pub mod pgr;
pub mod shared;
