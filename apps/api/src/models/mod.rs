pub mod art;
pub mod font;

pub use art::{
    GenerationRequest, GenerationResult, Justify, DEFAULT_WIDTH, WIDTH_MAX, WIDTH_MIN, WIDTH_STEP,
};
pub use font::{FontCatalog, FontList, FontName};
