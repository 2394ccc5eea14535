use crate::common::*;

use crate::enums::empty_policy::*;

#[derive(Debug, Deserialize, Serialize, Getters, Clone, Copy, new)]
#[getset(get = "pub")]
pub struct DatasetConfig {
    #[serde(default)]
    pub empty_policy: EmptyPolicy,
    /* Columns with fewer distinct values than this are offered as filters even when numeric */
    #[serde(default = "default_filter_distinct_threshold")]
    pub filter_distinct_threshold: usize,
}

fn default_filter_distinct_threshold() -> usize {
    10
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            empty_policy: EmptyPolicy::default(),
            filter_distinct_threshold: default_filter_distinct_threshold(),
        }
    }
}
