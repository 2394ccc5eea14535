pub mod cell_value;
pub mod column;
pub mod dataset;
pub mod sample_dataset;
