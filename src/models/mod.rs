pub mod book;
pub mod transit;

pub use book::{BookListing, BookRow, RatingBookRow};
pub use transit::{BusLegRow, Cluster, FerryLegRow, RouteRow};
