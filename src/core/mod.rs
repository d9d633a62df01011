//! Pure geometry pipeline: sanitize, scale, project, label.
//!
//! Everything here is a deterministic function of its inputs, so render
//! passes and tests consume the exact same output.

pub mod align;
pub mod axis;
pub mod format;
pub mod path;
pub mod range;
pub mod sanitize;
pub mod series;
pub mod types;

pub use align::IndexAxis;
pub use axis::{
    DEFAULT_DATE_LABEL_TARGET, DEFAULT_VALUE_LABEL_COUNT, IndexLabel, MAX_LABEL_COUNT, ValueLabel,
    index_label_stride, index_labels, value_labels,
};
pub use format::{
    NOT_AVAILABLE, format_currency, format_decimal, format_percent, format_short_date,
};
pub use path::{
    GapPolicy, PathDescriptor, PlotGeometry, PlotPoint, UnitVertex, build_plot_geometry,
    x_for_index,
};
pub use range::{MIN_VALUE_RANGE, RangeMapper};
pub use sanitize::{finite_count, is_plottable, sanitize_values};
pub use series::{Sample, Series};
pub use types::{PlotArea, PlotInsets, Viewport};
