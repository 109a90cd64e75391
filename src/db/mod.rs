pub mod books;
pub mod sqlite;
pub mod transit;

pub use sqlite::create_pool;
