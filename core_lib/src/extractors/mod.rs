pub mod body;
pub mod query;

pub use body::LenientBody;
pub use query::QueryParams;
