pub mod delivery;
pub mod merchant_type;
pub mod series;
pub mod session;
pub mod summary;
