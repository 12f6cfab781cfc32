pub mod formatter;

pub use formatter::{
    format_chart, format_factor_list, format_json, format_result, format_tsv, should_use_colors,
    style_for, DisplayStyle,
};
