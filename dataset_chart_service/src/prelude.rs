pub use std::{
    collections::{HashMap, HashSet},
    env,
    fmt::{self, Display},
    net::SocketAddr,
    ops::Range,
    str::FromStr,
    sync::{Arc, RwLock},
    time::Instant,
};

pub use anyhow::{anyhow, Context};
pub use async_trait::async_trait;
pub use derive_new::new;
pub use dotenv::dotenv;
pub use getset::{Getters, Setters};
pub use log::{debug, error, info, warn};
pub use serde::{de::DeserializeOwned, Deserialize, Serialize};
pub use serde_json::{json, Map, Value};
