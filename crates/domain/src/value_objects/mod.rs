//! Value objects - Immutable objects defined by their attributes

mod dialog_mode;
mod notice;
mod perspective;
mod star_rating;

pub use dialog_mode::DialogMode;
pub use notice::{Notice, NoticeSeverity};
pub use perspective::Perspective;
pub use star_rating::StarRating;
