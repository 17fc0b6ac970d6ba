pub mod clock;
pub mod logger;
pub mod tag_color;
pub mod validation;

pub use tag_color::tag_color;
pub use validation::Validator;
