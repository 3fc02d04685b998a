mod circle;
mod line;
mod model;

pub use circle::Circle;
pub use line::BasicLine;
pub use model::{DefaultModelFitter, Model, ModelFitter};
