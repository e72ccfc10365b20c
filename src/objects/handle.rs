use std::fmt;

/// Stable identifier assigned to a body when it joins a world.
///
/// Ids are never reused within one world, so they double as the ordering
/// key for deterministic per-tick iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Non-owning reference from a collider (or index entry) to its slot in a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderHandle {
    pub body: BodyId,
    pub index: usize,
}

impl ColliderHandle {
    pub fn new(body: BodyId, index: usize) -> Self {
        Self { body, index }
    }
}

impl fmt::Display for ColliderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.body, self.index)
    }
}
