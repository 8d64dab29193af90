mod correlation;
mod interaction;
mod layout;
mod model;
mod policy;

pub use correlation::{CorrelationError, build_raw_model};
pub use interaction::{CursorHint, InteractionOutcome, InteractionState, PointerEvent};
pub use layout::{
    LABEL_FONT_SIZE, MAX_CHORD_WIDTH, OUTER_PADDING, VALUE_DRAW_LENGTH, compute_draw_model,
};
pub use model::{DrawModel, DrawModelCache, DrawNode, RawModel, SeriesDatum};
pub use policy::{ChordPolarity, DrawMode, ThresholdConfig, chord_polarity, chord_stroke_width};
