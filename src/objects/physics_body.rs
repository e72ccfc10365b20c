use crate::common::{Layers, PhysicsMaterial};
use crate::math::{Transform, Vec2};
use crate::objects::{BodyId, ColliderHandle};
use crate::shapes::Collider;

/// Whether a body moves under the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Never integrated and never moved by collision response.
    Static,
    /// Integrated every tick from its velocity.
    Dynamic,
}

/// How a body responds to being pushed during collision resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mobility {
    Static,
    /// Dynamic but not kinematic: follows its own velocity (moving platforms).
    Driven,
    /// Dynamic and kinematic: affected by gravity and pushed out of contacts.
    Kinematic,
}

/// A body owning zero or more colliders.
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    kind: BodyKind,
    transform: Transform,
    pub velocity: Vec2,
    pub is_kinematic: bool,
    pub is_trigger: bool,
    material: PhysicsMaterial,
    layers: Layers,
    colliders: Vec<Collider>,
    id: Option<BodyId>,
    next_slot: usize,
}

impl PhysicsBody {
    fn new(kind: BodyKind) -> Self {
        PhysicsBody {
            kind,
            transform: Transform::identity(),
            velocity: Vec2::ZERO,
            is_kinematic: false,
            is_trigger: false,
            material: PhysicsMaterial::default(),
            layers: Layers::DEFAULT,
            colliders: Vec::new(),
            id: None,
            next_slot: 0,
        }
    }

    /// Creates a static body at `position`.
    pub fn new_static(position: Vec2) -> Self {
        Self::new(BodyKind::Static).with_transform(Transform::from_position(position))
    }

    /// Creates a dynamic body at `position`. Call [`PhysicsBody::kinematic`]
    /// to make gravity apply to it.
    pub fn new_dynamic(position: Vec2) -> Self {
        Self::new(BodyKind::Dynamic).with_transform(Transform::from_position(position))
    }

    /// Places the body and every collider it already carries.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.set_transform(transform);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Marks a dynamic body as affected by gravity and contacts.
    pub fn kinematic(mut self) -> Self {
        self.is_kinematic = true;
        self
    }

    /// Marks the body as a trigger: it reports overlaps but is never resolved.
    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Material used by colliders that carry no override.
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn with_layers(mut self, layers: Layers) -> Self {
        self.layers = layers;
        self
    }

    /// Attaches a collider. Its handle is assigned when the body joins a world.
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.push_collider(collider);
        self
    }

    /// Id assigned by the world, `None` while detached.
    pub fn id(&self) -> Option<BodyId> {
        self.id
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    /// How the resolver is allowed to move this body.
    pub fn mobility(&self) -> Mobility {
        match (self.kind, self.is_kinematic) {
            (BodyKind::Static, _) => Mobility::Static,
            (BodyKind::Dynamic, false) => Mobility::Driven,
            (BodyKind::Dynamic, true) => Mobility::Kinematic,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn layers(&self) -> Layers {
        self.layers
    }

    pub fn set_layers(&mut self, layers: Layers) {
        self.layers = layers;
    }

    /// Layers a collider on this body participates in.
    pub fn effective_layers(&self, collider: &Collider) -> Layers {
        collider.layers_override().unwrap_or(self.layers)
    }

    pub fn material(&self) -> PhysicsMaterial {
        self.material
    }

    /// Replaces the body material. Collider overrides still take precedence.
    pub fn set_material(&mut self, material: PhysicsMaterial) {
        self.material = material;
    }

    /// Material used for contacts involving `collider`.
    pub fn effective_material(&self, collider: &Collider) -> PhysicsMaterial {
        collider.material_override().unwrap_or(self.material)
    }

    /// Replaces the transform and pushes it to every collider.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        for collider in &mut self.colliders {
            collider.set_transform(transform);
        }
    }

    /// Moves the body, keeping rotation and scale.
    pub fn set_position(&mut self, position: Vec2) {
        self.set_transform(Transform { position, ..self.transform });
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.set_position(self.transform.position + delta);
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// True when at least one collider can take part in the narrow phase.
    pub fn has_active_collider(&self) -> bool {
        self.colliders.iter().any(|c| !c.is_degenerate())
    }

    /// Looks up an attached collider by handle.
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        if self.id != Some(handle.body) {
            return None;
        }
        self.colliders.iter().find(|c| c.handle() == Some(handle))
    }

    pub(crate) fn collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        if self.id != Some(handle.body) {
            return None;
        }
        self.colliders.iter_mut().find(|c| c.handle() == Some(handle))
    }

    /// Handles of every attached collider, in insertion order.
    pub fn collider_handles(&self) -> Vec<ColliderHandle> {
        self.colliders.iter().filter_map(Collider::handle).collect()
    }

    /// Adds a collider and returns its slot index.
    pub(crate) fn push_collider(&mut self, mut collider: Collider) -> usize {
        let slot = self.next_slot;
        self.next_slot += 1;
        collider.set_transform(self.transform);
        if let Some(id) = self.id {
            collider.attach(ColliderHandle::new(id, slot));
        }
        self.colliders.push(collider);
        slot
    }

    pub(crate) fn remove_collider(&mut self, handle: ColliderHandle) -> Option<Collider> {
        let position = self.colliders.iter().position(|c| c.handle() == Some(handle))?;
        let mut collider = self.colliders.remove(position);
        collider.detach();
        Some(collider)
    }

    /// Assigns the world id and (re)numbers collider handles.
    pub(crate) fn attach(&mut self, id: BodyId) {
        self.id = Some(id);
        for (slot, collider) in self.colliders.iter_mut().enumerate() {
            collider.attach(ColliderHandle::new(id, slot));
        }
        self.next_slot = self.colliders.len();
    }

    pub(crate) fn detach(&mut self) {
        self.id = None;
        for collider in &mut self.colliders {
            collider.detach();
        }
    }
}
