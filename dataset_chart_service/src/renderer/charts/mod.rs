pub mod bar;
pub mod box_plot;
pub mod heatmap;
pub mod histogram;
pub mod kde;
pub mod line;
pub mod pie;
pub mod scatter;
pub mod violin;
