pub mod formatter;

pub use formatter::{
    format_breakdown, format_brand_list, format_feature_list, format_model_list, format_price,
    format_result_card, format_tsv, format_valuation_table, should_use_colors,
};
