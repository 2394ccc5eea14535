use crate::common::*;

#[doc = r#"
    What the store serves before the first upload.

    * `Sample` - the built-in sample dataset stands in, so every endpoint works immediately.
    * `Strict` - nothing is served; chart requests fail with `NoDataset` until an upload succeeds.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyPolicy {
    #[default]
    Sample,
    Strict,
}
