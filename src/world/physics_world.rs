use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::{debug, debug_span, trace};

use crate::collision::{BoundingArea, Collision, CollisionEvent, Contact, RaycastHit, SpatialGrid};
use crate::common::{LayerTable, Layers};
use crate::error::{PhysicsError, Result};
use crate::integration::integrate;
use crate::math::{Transform, Vec2};
use crate::objects::{BodyId, ColliderHandle, PhysicsBody};
use crate::resolution::{
    BodyCorrection, BodyState, CollisionResolver, DefaultCollisionResolver, ResolutionContext,
};
use crate::shapes::{Collider, Polygon, Ray, Shape};
use crate::world::PhysicsSettings;

/// Configures and creates a [`PhysicsWorld`].
pub struct PhysicsWorldBuilder {
    settings: PhysicsSettings,
    layer_table: LayerTable,
    resolver: Option<Box<dyn CollisionResolver>>,
}

impl Default for PhysicsWorldBuilder {
    fn default() -> Self {
        PhysicsWorldBuilder {
            settings: PhysicsSettings::default(),
            layer_table: LayerTable::new(),
            resolver: Some(Box::new(DefaultCollisionResolver)),
        }
    }
}

impl PhysicsWorldBuilder {
    /// Starts from default settings, an all-colliding layer table and the
    /// default resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings used by the world. They are validated in [`PhysicsWorldBuilder::build`].
    pub fn settings(mut self, settings: PhysicsSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn layer_table(mut self, layer_table: LayerTable) -> Self {
        self.layer_table = layer_table;
        self
    }

    /// Replaces the default resolver.
    pub fn resolver(mut self, resolver: impl CollisionResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Builds a detection-only world. Such a world accepts static and
    /// trigger bodies only.
    pub fn without_resolver(mut self) -> Self {
        self.resolver = None;
        self
    }

    /// Validates the settings and allocates the broad-phase grid.
    ///
    /// # Errors
    /// Any error from [`PhysicsSettings::validate`], including
    /// `InvalidCellSize` for a grid that would be too large.
    pub fn build(self) -> Result<PhysicsWorld> {
        self.settings.validate()?;
        let grid = SpatialGrid::new(self.settings.grid())?;
        Ok(PhysicsWorld {
            bodies: BTreeMap::new(),
            next_id: 0,
            grid,
            settings: self.settings,
            layer_table: self.layer_table,
            resolver: self.resolver,
        })
    }
}

/// Owns every body, the broad-phase grid and the resolver.
///
/// Bodies are iterated in ascending [`BodyId`] order and colliders in
/// ascending slot order, so a tick is fully deterministic.
pub struct PhysicsWorld {
    bodies: BTreeMap<BodyId, PhysicsBody>,
    next_id: u64,
    grid: SpatialGrid,
    settings: PhysicsSettings,
    layer_table: LayerTable,
    resolver: Option<Box<dyn CollisionResolver>>,
}

impl fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("bodies", &self.bodies.len())
            .field("indexed_colliders", &self.grid.len())
            .field("settings", &self.settings)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

/// Unordered body pair key.
fn body_pair(a: BodyId, b: BodyId) -> (BodyId, BodyId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl PhysicsWorld {
    /// Creates a world with default settings and the default resolver.
    pub fn new() -> Result<Self> {
        PhysicsWorldBuilder::default().build()
    }

    /// Returns a builder for a customised world.
    pub fn builder() -> PhysicsWorldBuilder {
        PhysicsWorldBuilder::default()
    }

    // --- Configuration --- //

    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    /// Replaces the settings. A changed grid configuration re-indexes every
    /// collider.
    ///
    /// # Arguments
    /// * `settings` - The new settings. They are validated before anything changes.
    pub fn set_settings(&mut self, settings: PhysicsSettings) -> Result<()> {
        settings.validate()?;
        if settings.grid() != self.settings.grid() {
            let mut grid = SpatialGrid::new(settings.grid())?;
            for body in self.bodies.values() {
                for collider in body.colliders() {
                    if let Some(handle) = collider.handle() {
                        grid.insert(handle, collider.bounding_area());
                    }
                }
            }
            self.grid = grid;
        }
        self.settings = settings;
        Ok(())
    }

    pub fn layer_table(&self) -> &LayerTable {
        &self.layer_table
    }

    /// Layer table used by the narrow phase and raycasts, editable between ticks.
    pub fn layer_table_mut(&mut self) -> &mut LayerTable {
        &mut self.layer_table
    }

    /// Broad-phase index of every non-degenerate collider.
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    // --- Bodies --- //

    /// Registers a body and indexes its colliders. Returns the body's id.
    ///
    /// # Arguments
    /// * `body` - The body to add. Its colliders get handles `(id, 0..n)`.
    ///
    /// # Errors
    /// `MissingResolver` when a non-trigger dynamic body is added to a world
    /// built without a resolver.
    pub fn add_body(&mut self, mut body: PhysicsBody) -> Result<BodyId> {
        let id = BodyId(self.next_id);
        if body.is_dynamic() && !body.is_trigger && self.resolver.is_none() {
            return Err(PhysicsError::MissingResolver(id));
        }
        self.next_id += 1;

        body.attach(id);
        for collider in body.colliders() {
            if let Some(handle) = collider.handle() {
                self.grid.insert(handle, collider.bounding_area());
            }
        }
        debug!(body = %id, kind = ?body.kind(), colliders = body.colliders().len(), "added body");
        self.bodies.insert(id, body);
        Ok(id)
    }

    /// Unregisters a body and returns it detached from the world.
    pub fn remove_body(&mut self, id: BodyId) -> Result<PhysicsBody> {
        let mut body = self.bodies.remove(&id).ok_or(PhysicsError::UnknownBody(id))?;
        for handle in body.collider_handles() {
            self.grid.remove(handle);
        }
        body.detach();
        debug!(body = %id, "removed body");
        Ok(body)
    }

    /// Looks up a registered body.
    pub fn body(&self, id: BodyId) -> Option<&PhysicsBody> {
        self.bodies.get(&id)
    }

    /// All bodies in ascending id order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &PhysicsBody)> {
        self.bodies.iter().map(|(id, body)| (*id, body))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn body_mut(&mut self, id: BodyId) -> Result<&mut PhysicsBody> {
        self.bodies.get_mut(&id).ok_or(PhysicsError::UnknownBody(id))
    }

    /// Moves a body and re-indexes its colliders.
    ///
    /// # Arguments
    /// * `id` - The body to move.
    /// * `transform` - Its new position, rotation and scale.
    pub fn set_transform(&mut self, id: BodyId, transform: Transform) -> Result<()> {
        self.body_mut(id)?.set_transform(transform);
        self.sync_body(id);
        Ok(())
    }

    /// Moves a body to `position`, keeping its rotation and scale.
    pub fn set_position(&mut self, id: BodyId, position: Vec2) -> Result<()> {
        self.body_mut(id)?.set_position(position);
        self.sync_body(id);
        Ok(())
    }

    /// Moves a body by `delta`.
    pub fn translate(&mut self, id: BodyId, delta: Vec2) -> Result<()> {
        self.body_mut(id)?.translate(delta);
        self.sync_body(id);
        Ok(())
    }

    /// Sets a body's velocity, in units per second.
    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec2) -> Result<()> {
        self.body_mut(id)?.velocity = velocity;
        Ok(())
    }

    // --- Colliders --- //

    /// Attaches a collider to a registered body and indexes it.
    ///
    /// # Arguments
    /// * `id` - The owning body.
    /// * `collider` - The collider to attach. It takes the body's transform.
    pub fn add_collider(&mut self, id: BodyId, collider: Collider) -> Result<ColliderHandle> {
        let body = self.body_mut(id)?;
        let slot = body.push_collider(collider);
        let handle = ColliderHandle::new(id, slot);
        let bounds = body.collider(handle).map(Collider::bounding_area).unwrap_or(BoundingArea::EMPTY);
        self.grid.insert(handle, bounds);
        debug!(collider = %handle, "added collider");
        Ok(handle)
    }

    /// Detaches a collider and removes it from the broad phase.
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Result<Collider> {
        let collider = self
            .bodies
            .get_mut(&handle.body)
            .and_then(|body| body.remove_collider(handle))
            .ok_or(PhysicsError::UnknownCollider(handle))?;
        self.grid.remove(handle);
        debug!(collider = %handle, "removed collider");
        Ok(collider)
    }

    /// Looks up an attached collider.
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.bodies.get(&handle.body)?.collider(handle)
    }

    fn collider_mut(&mut self, handle: ColliderHandle) -> Result<&mut Collider> {
        self.bodies
            .get_mut(&handle.body)
            .and_then(|body| body.collider_mut(handle))
            .ok_or(PhysicsError::UnknownCollider(handle))
    }

    /// Moves a collider relative to its body and re-indexes it.
    ///
    /// # Arguments
    /// * `handle` - The collider to move.
    /// * `offset` - The new body-local offset.
    pub fn set_collider_offset(&mut self, handle: ColliderHandle, offset: Vec2) -> Result<()> {
        let collider = self.collider_mut(handle)?;
        collider.set_offset(offset);
        let bounds = collider.bounding_area();
        self.grid.update(handle, bounds);
        Ok(())
    }

    /// Replaces a collider's shape and re-indexes it. A degenerate shape
    /// leaves the collider attached but unindexed.
    pub fn set_collider_shape(&mut self, handle: ColliderHandle, shape: Shape) -> Result<()> {
        let collider = self.collider_mut(handle)?;
        collider.set_shape(shape);
        let bounds = collider.bounding_area();
        self.grid.update(handle, bounds);
        Ok(())
    }

    /// Re-indexes every collider of a body after it moved.
    fn sync_body(&mut self, id: BodyId) {
        let Some(body) = self.bodies.get(&id) else {
            return;
        };
        for collider in body.colliders() {
            if let Some(handle) = collider.handle() {
                self.grid.update(handle, collider.bounding_area());
            }
        }
    }

    // --- Simulation --- //

    /// Advances the world by one time step and returns the collisions seen
    /// during it. Every collision produces one event for each body involved.
    pub fn step(&mut self) -> Result<Vec<CollisionEvent>> {
        let span = debug_span!("physics_step", bodies = self.bodies.len());
        let _enter = span.enter();

        let dt = self.settings.time_step();
        let gravity = self.settings.gravity();
        let mut handled = BTreeSet::new();
        let mut events = Vec::new();

        let movers: Vec<BodyId> = self
            .bodies
            .iter()
            .filter(|(_, body)| body.is_dynamic() && body.has_active_collider())
            .map(|(id, _)| *id)
            .collect();

        for id in movers {
            let Some(body) = self.bodies.get_mut(&id) else {
                continue;
            };
            integrate(body, gravity, dt);
            self.sync_body(id);
            self.detect_collisions(id, dt, &mut handled, &mut events)?;
        }

        debug!(events = events.len(), "step finished");
        Ok(events)
    }

    fn detect_collisions(
        &mut self,
        id: BodyId,
        dt: f64,
        handled: &mut BTreeSet<(BodyId, BodyId)>,
        events: &mut Vec<CollisionEvent>,
    ) -> Result<()> {
        let handles = match self.bodies.get(&id) {
            Some(body) => body.collider_handles(),
            None => return Ok(()),
        };

        for handle in handles {
            for other in self.grid.retrieve_potential_collisions(handle) {
                if other.body == id {
                    continue;
                }
                let pair = body_pair(id, other.body);
                if handled.contains(&pair) {
                    continue;
                }
                let Some(contact) = self.narrow_phase(handle, other) else {
                    continue;
                };

                let collision = Collision { first: handle, second: other, contact };
                debug!(
                    first = %handle,
                    second = %other,
                    depth = contact.depth(),
                    "collision"
                );
                if !self.involves_trigger(id, other.body) {
                    self.resolve(&collision, dt)?;
                }
                events.push(CollisionEvent { body: id, collision });
                events.push(CollisionEvent { body: other.body, collision: collision.mirrored() });
                handled.insert(pair);
            }
        }
        Ok(())
    }

    fn involves_trigger(&self, a: BodyId, b: BodyId) -> bool {
        [a, b].iter().any(|id| self.bodies.get(id).map_or(false, |body| body.is_trigger))
    }

    /// Layer filter followed by SAT on the current geometry.
    fn narrow_phase(&self, first: ColliderHandle, second: ColliderHandle) -> Option<Contact> {
        let body_a = self.bodies.get(&first.body)?;
        let body_b = self.bodies.get(&second.body)?;
        let collider_a = body_a.collider(first)?;
        let collider_b = body_b.collider(second)?;

        let layers_a = body_a.effective_layers(collider_a);
        let layers_b = body_b.effective_layers(collider_b);
        if !self.layer_table.should_collide(layers_a, layers_b) {
            trace!(first = %first, second = %second, "filtered by layers");
            return None;
        }
        collider_a.collides_with(collider_b)
    }

    fn body_state(&self, handle: ColliderHandle) -> Result<BodyState> {
        let body = self.bodies.get(&handle.body).ok_or(PhysicsError::UnknownBody(handle.body))?;
        let collider = body.collider(handle).ok_or(PhysicsError::UnknownCollider(handle))?;
        Ok(BodyState {
            velocity: body.velocity,
            material: body.effective_material(collider),
            mobility: body.mobility(),
        })
    }

    fn resolve(&mut self, collision: &Collision, dt: f64) -> Result<()> {
        let resolution = {
            let resolver = self
                .resolver
                .as_deref()
                .ok_or(PhysicsError::MissingResolver(collision.first.body))?;
            let ctx = ResolutionContext {
                contact: &collision.contact,
                first: self.body_state(collision.first)?,
                second: self.body_state(collision.second)?,
                settings: &self.settings,
                dt,
            };
            resolver.resolve(&ctx)
        };
        self.apply_correction(collision.first.body, resolution.first);
        self.apply_correction(collision.second.body, resolution.second);
        Ok(())
    }

    /// Static bodies ignore corrections.
    fn apply_correction(&mut self, id: BodyId, correction: BodyCorrection) {
        let Some(body) = self.bodies.get_mut(&id) else {
            return;
        };
        if !body.is_dynamic() {
            return;
        }
        body.velocity = correction.velocity;
        if correction.translation != Vec2::ZERO {
            body.translate(correction.translation);
            self.sync_body(id);
        }
    }

    // --- Queries --- //

    /// Nearest collider hit by a ray whose layers intersect `layer_mask`.
    ///
    /// # Arguments
    /// * `origin` - Where the ray starts, in world space.
    /// * `direction` - Any non-zero vector; it is normalized.
    /// * `max_distance` - How far the ray reaches.
    /// * `layer_mask` - Colliders on none of these layers are skipped.
    ///
    /// Returns `None` for a zero direction, a non-positive or non-finite
    /// distance, or when nothing is hit.
    pub fn try_raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f64,
        layer_mask: Layers,
    ) -> Option<RaycastHit> {
        let ray = Ray::new(origin, direction, max_distance)?;
        let candidates = self.grid.query(&ray.bounding_area());
        trace!(candidates = candidates.len(), "raycast broad phase");

        candidates
            .into_iter()
            .filter_map(|handle| {
                let body = self.bodies.get(&handle.body)?;
                let collider = body.collider(handle)?;
                if !body.effective_layers(collider).intersects(layer_mask) {
                    return None;
                }
                collider.is_hit_by(&ray).map(|intersection| RaycastHit::new(handle, intersection))
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Colliders overlapping `area` (touching does not count), sorted by handle.
    pub fn query_area(&self, area: BoundingArea, layer_mask: Layers) -> Vec<ColliderHandle> {
        if area.is_empty() {
            return Vec::new();
        }
        let region = Collider::new(Shape::Polygon(Polygon::from_bounds(area.min, area.max)));
        self.grid
            .query(&area)
            .into_iter()
            .filter(|&handle| {
                self.filtered_collider(handle, layer_mask)
                    .map_or(false, |collider| region.collides_with(collider).is_some())
            })
            .collect()
    }

    /// Colliders whose interior strictly contains `point`, sorted by handle.
    pub fn query_point(&self, point: Vec2, layer_mask: Layers) -> Vec<ColliderHandle> {
        self.grid
            .query(&BoundingArea::new(point, point))
            .into_iter()
            .filter(|&handle| {
                self.filtered_collider(handle, layer_mask)
                    .map_or(false, |collider| collider.contains_point(point))
            })
            .collect()
    }

    fn filtered_collider(&self, handle: ColliderHandle, layer_mask: Layers) -> Option<&Collider> {
        let body = self.bodies.get(&handle.body)?;
        let collider = body.collider(handle)?;
        body.effective_layers(collider).intersects(layer_mask).then_some(collider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::Resolution;

    const EPSILON: f64 = 1e-9;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new().unwrap()
    }

    fn ground(world: &mut PhysicsWorld) -> BodyId {
        world
            .add_body(
                PhysicsBody::new_static(Vec2::new(0.0, -0.5))
                    .with_collider(Collider::rectangle(20.0, 1.0)),
            )
            .unwrap()
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut world = world();
        let a = world.add_body(PhysicsBody::new_static(Vec2::ZERO)).unwrap();
        let b = world.add_body(PhysicsBody::new_static(Vec2::ZERO)).unwrap();
        world.remove_body(a).unwrap();
        let c = world.add_body(PhysicsBody::new_static(Vec2::ZERO)).unwrap();
        assert!(a < b && b < c);
        assert_eq!(world.body_count(), 2);
        assert_eq!(world.remove_body(a).unwrap_err(), PhysicsError::UnknownBody(a));
    }

    #[test]
    fn test_add_and_remove_keep_grid_in_sync() {
        let mut world = world();
        let id = world
            .add_body(
                PhysicsBody::new_static(Vec2::ZERO)
                    .with_collider(Collider::circle(1.0))
                    .with_collider(Collider::circle(0.0)),
            )
            .unwrap();
        // Degenerate colliders are attached but never indexed.
        assert_eq!(world.body(id).unwrap().collider_handles().len(), 2);
        assert_eq!(world.grid().len(), 1);

        let handle = world.add_collider(id, Collider::rectangle(1.0, 1.0)).unwrap();
        assert_eq!(handle, ColliderHandle::new(id, 2));
        assert!(world.grid().contains(handle));

        world.remove_collider(handle).unwrap();
        assert!(!world.grid().contains(handle));
        assert_eq!(world.remove_collider(handle).unwrap_err(), PhysicsError::UnknownCollider(handle));

        let body = world.remove_body(id).unwrap();
        assert!(world.grid().is_empty());
        assert_eq!(body.id(), None);
    }

    #[test]
    fn test_moving_a_body_updates_the_grid() {
        let mut world = world();
        let id = world
            .add_body(PhysicsBody::new_static(Vec2::ZERO).with_collider(Collider::circle(1.0)))
            .unwrap();
        let handle = ColliderHandle::new(id, 0);

        world.set_position(id, Vec2::new(100.0, 0.0)).unwrap();
        let bounds = world.grid().bounds_of(handle).unwrap();
        assert!(bounds.center().approx_eq(Vec2::new(100.0, 0.0), EPSILON));

        world.set_collider_offset(handle, Vec2::new(0.0, 10.0)).unwrap();
        let bounds = world.grid().bounds_of(handle).unwrap();
        assert!(bounds.center().approx_eq(Vec2::new(100.0, 10.0), EPSILON));

        world.set_collider_shape(handle, Shape::Circle(crate::shapes::Circle::new(0.0))).unwrap();
        assert!(!world.grid().contains(handle));
    }

    #[test]
    fn test_without_resolver_rejects_dynamic_bodies() {
        let mut world = PhysicsWorld::builder().without_resolver().build().unwrap();
        let err = world.add_body(PhysicsBody::new_dynamic(Vec2::ZERO)).unwrap_err();
        assert_eq!(err, PhysicsError::MissingResolver(BodyId(0)));
        assert!(world.add_body(PhysicsBody::new_dynamic(Vec2::ZERO).trigger()).is_ok());
        assert!(world.add_body(PhysicsBody::new_static(Vec2::ZERO)).is_ok());
    }

    #[test]
    fn test_settings_are_applied() {
        let mut settings = PhysicsSettings::default();
        settings.set_time_step(0.5).unwrap();
        assert!(PhysicsWorld::builder().settings(settings).build().is_ok());

        let mut world = world();
        let mut grid = settings.grid();
        grid.cell_size = -1.0;
        assert!(settings.set_grid(grid).is_err());
        assert!(world.set_settings(settings).is_ok());
        assert_eq!(world.settings().time_step(), 0.5);
    }

    #[test]
    fn test_falling_body_lands_on_ground() {
        let mut world = world();
        let ground = ground(&mut world);
        let ball = world
            .add_body(
                PhysicsBody::new_dynamic(Vec2::new(0.0, 0.45))
                    .kinematic()
                    .with_velocity(Vec2::new(0.0, -1.0))
                    .with_collider(Collider::rectangle(1.0, 1.0)),
            )
            .unwrap();

        let events = world.step().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].body, ball);
        assert_eq!(events[1].body, ground);
        assert_eq!(events[1].collision, events[0].collision.mirrored());
        assert!(events[0].is_ground_contact(world.settings().gravity(), 0.7));

        let body = world.body(ball).unwrap();
        // Pushed back on top of the ground and stopped.
        assert!((body.position().y - 0.5).abs() < 1e-6);
        assert!(body.velocity.approx_eq(Vec2::ZERO, EPSILON));
        assert_eq!(world.body(ground).unwrap().position(), Vec2::new(0.0, -0.5));
    }

    #[test]
    fn test_trigger_reports_without_resolving() {
        let mut world = world();
        let zone = world
            .add_body(PhysicsBody::new_static(Vec2::ZERO).trigger().with_collider(Collider::circle(2.0)))
            .unwrap();
        let mover = world
            .add_body(
                PhysicsBody::new_dynamic(Vec2::new(0.5, 0.0))
                    .with_velocity(Vec2::new(1.0, 0.0))
                    .with_collider(Collider::circle(0.5)),
            )
            .unwrap();

        let events = world.step().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].body, mover);
        assert_eq!(events[1].body, zone);
        let body = world.body(mover).unwrap();
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
        assert!((body.position().x - (0.5 + 1.0 / 60.0)).abs() < EPSILON);
    }

    #[test]
    fn test_custom_resolver_is_used() {
        let mut world = PhysicsWorld::builder()
            .resolver(|ctx: &ResolutionContext<'_>| Resolution {
                first: BodyCorrection::unchanged(Vec2::new(0.0, 42.0)),
                second: BodyCorrection::unchanged(ctx.second.velocity),
            })
            .build()
            .unwrap();
        ground(&mut world);
        let id = world
            .add_body(PhysicsBody::new_dynamic(Vec2::ZERO).with_collider(Collider::circle(0.5)))
            .unwrap();

        world.step().unwrap();
        assert_eq!(world.body(id).unwrap().velocity, Vec2::new(0.0, 42.0));
    }

    #[test]
    fn test_layer_table_filters_pairs() {
        let mut world = world();
        world.layer_table_mut().set_should_collide(Layers::layer(1), Layers::layer(2), false);
        world
            .add_body(
                PhysicsBody::new_static(Vec2::ZERO)
                    .with_layers(Layers::layer(1))
                    .with_collider(Collider::rectangle(4.0, 4.0)),
            )
            .unwrap();
        world
            .add_body(
                PhysicsBody::new_dynamic(Vec2::ZERO)
                    .with_layers(Layers::layer(2))
                    .with_collider(Collider::circle(1.0)),
            )
            .unwrap();

        assert!(world.step().unwrap().is_empty());
    }

    #[test]
    fn test_raycast_and_queries() {
        let mut world = world();
        let near = world
            .add_body(PhysicsBody::new_static(Vec2::new(5.0, 0.0)).with_collider(Collider::rectangle(2.0, 2.0)))
            .unwrap();
        world
            .add_body(PhysicsBody::new_static(Vec2::new(10.0, 0.0)).with_collider(Collider::rectangle(2.0, 2.0)))
            .unwrap();

        let hit = world.try_raycast(Vec2::ZERO, Vec2::new(1.0, 0.0), 100.0, Layers::ALL).unwrap();
        assert_eq!(hit.collider, ColliderHandle::new(near, 0));
        assert!((hit.distance - 4.0).abs() < 1e-6);
        assert!(hit.normal.approx_eq(Vec2::new(-1.0, 0.0), 1e-6));

        assert!(world.try_raycast(Vec2::ZERO, Vec2::new(1.0, 0.0), 3.0, Layers::ALL).is_none());
        assert!(world.try_raycast(Vec2::ZERO, Vec2::ZERO, 100.0, Layers::ALL).is_none());
        assert!(world.try_raycast(Vec2::ZERO, Vec2::new(1.0, 0.0), 100.0, Layers::layer(7)).is_none());

        let area = BoundingArea::new(Vec2::new(3.0, -1.0), Vec2::new(12.0, 1.0));
        assert_eq!(world.query_area(area, Layers::ALL).len(), 2);
        // Touching the left edge only.
        let touching = BoundingArea::new(Vec2::new(0.0, -1.0), Vec2::new(4.0, 1.0));
        assert!(world.query_area(touching, Layers::ALL).is_empty());

        assert_eq!(world.query_point(Vec2::new(5.5, 0.5), Layers::ALL), vec![ColliderHandle::new(near, 0)]);
        assert!(world.query_point(Vec2::new(6.0, 0.0), Layers::ALL).is_empty());
    }
}
