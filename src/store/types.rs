use serde::{Serialize, Deserialize};
use std::fmt;

/// Dense node identifier. Ids are handed out sequentially from 0 and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self {
        debug_assert!(idx <= u32::MAX as usize, "node index {idx} does not fit a NodeId");
        Self(idx as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(idx: usize) -> Self { Self::new(idx) }
}
