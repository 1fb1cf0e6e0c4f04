pub mod database;
pub mod extract;
pub mod pagination;
pub mod rate_limit;
pub mod response;
pub mod validation;
