pub mod notice;
pub mod product;
pub mod row;
pub mod user;
