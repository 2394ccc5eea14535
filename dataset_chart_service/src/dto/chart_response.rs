use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, Getters, new)]
#[getset(get = "pub")]
pub struct ChartResponse {
    pub success: bool,
    /* base64 (standard alphabet, padded) PNG */
    pub image: String,
}
