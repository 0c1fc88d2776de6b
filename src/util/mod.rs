pub mod database;
pub mod dify;
pub mod log;
pub mod string;
