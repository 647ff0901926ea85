// Reference geometry for the rendered document: static font metrics and a
// greedy word-wrap layout that maps pointer coordinates to char offsets.
// A real rendering surface can supply its own CoordinateResolver instead.

pub mod font_metrics;
pub mod text_layout;

pub use text_layout::LayoutSpec;
