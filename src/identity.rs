//! Nym root paths

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::types::{HdPath, NymId};

pub trait IdentityProvider: Send + Sync {
    /// Root HD path of `nym`, if the nym is known
    fn root_path(&self, nym: &NymId) -> Option<HdPath>;
}

/// In-memory nym registry
#[derive(Default)]
pub struct MemoryIdentity {
    paths: RwLock<HashMap<NymId, HdPath>>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, nym: NymId, path: HdPath) {
        self.paths.write().insert(nym, path);
    }
}

impl IdentityProvider for MemoryIdentity {
    fn root_path(&self, nym: &NymId) -> Option<HdPath> {
        self.paths.read().get(nym).cloned()
    }
}
