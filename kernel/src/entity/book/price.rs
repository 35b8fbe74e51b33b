use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Price in the smallest currency unit.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookPrice(i32);

impl BookPrice {
    pub fn new(price: impl Into<i32>) -> Self {
        Self(price.into())
    }
}
