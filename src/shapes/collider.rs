//! Colliders: a shape attached to a body, with lazily derived world geometry
//! and the narrow-phase operations (SAT, containment, raycasts).

use std::cell::OnceCell;

use super::{Circle, LineSegment, Polygon, Ray, Shape};
use crate::collision::{BoundingArea, Contact, Projection, RayIntersection};
use crate::common::{Layers, PhysicsMaterial};
use crate::math::{Transform, Vec2, EPSILON};
use crate::objects::ColliderHandle;

/// World-space geometry derived from a collider's shape, offset and transform.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldGeometry {
    /// Polygon vertices in clockwise order, or the two endpoints of a line.
    /// Empty for circles.
    pub points: Vec<Vec2>,
    /// Outward edge normals (one per non-degenerate edge; one for lines).
    pub normals: Vec<Vec2>,
    pub center: Vec2,
    /// World radius for circles, zero otherwise.
    pub radius: f64,
    pub bounding_area: BoundingArea,
    pub degenerate: bool,
}

impl WorldGeometry {
    fn inert(center: Vec2) -> Self {
        WorldGeometry {
            points: Vec::new(),
            normals: Vec::new(),
            center,
            radius: 0.0,
            bounding_area: BoundingArea::EMPTY,
            degenerate: true,
        }
    }

    fn compute(shape: &Shape, offset: Vec2, transform: Transform) -> Self {
        if !transform.is_finite() || !offset.is_finite() {
            return Self::inert(Vec2::ZERO);
        }
        match shape {
            Shape::Polygon(polygon) => {
                let world: Vec<Vec2> = polygon.vertices.iter().map(|&v| transform.apply(v + offset)).collect();
                let points = Polygon::clockwise(&world);
                let center = Polygon::centroid_of(&points);
                if points.len() < 3 || Polygon::signed_area(&points).abs() < EPSILON * EPSILON {
                    return Self::inert(center);
                }
                WorldGeometry {
                    normals: Polygon::edge_normals(&points),
                    bounding_area: BoundingArea::from_points(&points),
                    points,
                    center,
                    radius: 0.0,
                    degenerate: false,
                }
            }
            Shape::Line(segment) => {
                let start = transform.apply(segment.start + offset);
                let end = transform.apply(segment.end + offset);
                let world = LineSegment::new(start, end);
                if world.is_degenerate() {
                    return Self::inert(world.midpoint());
                }
                WorldGeometry {
                    points: vec![start, end],
                    normals: vec![world.direction().perpendicular().normalize()],
                    center: world.midpoint(),
                    radius: 0.0,
                    bounding_area: world.bounding_area(),
                    degenerate: false,
                }
            }
            Shape::Circle(circle) => {
                let center = transform.apply(offset);
                let radius = circle.radius * transform.uniform_scale();
                if Circle::new(radius).is_degenerate() {
                    return Self::inert(center);
                }
                WorldGeometry {
                    points: Vec::new(),
                    normals: Vec::new(),
                    center,
                    radius,
                    bounding_area: BoundingArea::from_center(center, Vec2::new(radius, radius)),
                    degenerate: false,
                }
            }
        }
    }

    /// Edges of a polygon (closed) or line (single edge), skipping zero-length ones.
    fn edges<'a>(&'a self, closed: bool) -> impl Iterator<Item = LineSegment> + 'a {
        let n = self.points.len();
        let count = if closed { n } else { n.saturating_sub(1) };
        (0..count)
            .map(move |i| LineSegment::new(self.points[i], self.points[(i + 1) % n]))
            .filter(|edge| !edge.is_degenerate())
    }
}

/// A shape attached to a physics body.
///
/// The collider keeps a snapshot of its body's transform; the body pushes a
/// new one through [`Collider::set_transform`] whenever it moves, which
/// clears the cached world geometry.
#[derive(Debug, Clone)]
pub struct Collider {
    shape: Shape,
    offset: Vec2,
    layers: Option<Layers>,
    material: Option<PhysicsMaterial>,
    handle: Option<ColliderHandle>,
    transform: Transform,
    geometry: OnceCell<WorldGeometry>,
}

impl Collider {
    /// Creates a detached collider with no offset, no overrides and an
    /// identity transform.
    pub fn new(shape: Shape) -> Self {
        Collider {
            shape,
            offset: Vec2::ZERO,
            layers: None,
            material: None,
            handle: None,
            transform: Transform::identity(),
            geometry: OnceCell::new(),
        }
    }

    /// Convex polygon collider. Vertices may be given in either winding order.
    pub fn polygon(vertices: Vec<Vec2>) -> Self {
        Self::new(Shape::Polygon(Polygon::new(vertices)))
    }

    /// Axis-aligned rectangle centered on the collider's origin.
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::new(Shape::Polygon(Polygon::rectangle(width, height)))
    }

    /// Circle centered on the collider's origin.
    pub fn circle(radius: f64) -> Self {
        Self::new(Shape::Circle(Circle::new(radius)))
    }

    /// Line segment between two body-local points.
    pub fn line(start: Vec2, end: Vec2) -> Self {
        Self::new(Shape::Line(LineSegment::new(start, end)))
    }

    /// Shifts the shape by `offset` in body-local space.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.set_offset(offset);
        self
    }

    /// Overrides the owning body's layers for this collider only.
    pub fn with_layers(mut self, layers: Layers) -> Self {
        self.layers = Some(layers);
        self
    }

    /// Overrides the owning body's material for this collider only.
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = Some(material);
        self
    }

    /// Places a standalone collider. Attached colliders take their body's transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.set_transform(transform);
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Layers set on this collider, if they replace the body's.
    pub fn layers_override(&self) -> Option<Layers> {
        self.layers
    }

    /// Material set on this collider, if it replaces the body's.
    pub fn material_override(&self) -> Option<PhysicsMaterial> {
        self.material
    }

    /// The slot this collider occupies in a world, if attached.
    pub fn handle(&self) -> Option<ColliderHandle> {
        self.handle
    }

    pub(crate) fn attach(&mut self, handle: ColliderHandle) {
        self.handle = Some(handle);
    }

    pub(crate) fn detach(&mut self) {
        self.handle = None;
    }

    /// Replaces the local shape and drops the cached world geometry.
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        self.invalidate();
    }

    /// Moves the shape relative to the body and drops the cached world geometry.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
        self.invalidate();
    }

    pub fn set_layers(&mut self, layers: Option<Layers>) {
        self.layers = layers;
    }

    pub fn set_material(&mut self, material: Option<PhysicsMaterial>) {
        self.material = material;
    }

    /// Takes a new snapshot of the body transform. An unchanged transform
    /// keeps the cached geometry.
    pub fn set_transform(&mut self, transform: Transform) {
        if self.transform != transform {
            self.transform = transform;
            self.invalidate();
        }
    }

    /// Drops the cached world geometry; it is re-derived on next read.
    pub fn invalidate(&mut self) {
        self.geometry.take();
    }

    /// World geometry, derived on first access after a change.
    pub fn geometry(&self) -> &WorldGeometry {
        self.geometry
            .get_or_init(|| WorldGeometry::compute(&self.shape, self.offset, self.transform))
    }

    /// World-space vertices, clockwise for polygons.
    pub fn world_points(&self) -> &[Vec2] {
        &self.geometry().points
    }

    /// Outward unit normals of the world shape. Empty for circles.
    pub fn normals(&self) -> &[Vec2] {
        &self.geometry().normals
    }

    pub fn center(&self) -> Vec2 {
        self.geometry().center
    }

    /// World bounding area; `EMPTY` for degenerate colliders.
    pub fn bounding_area(&self) -> BoundingArea {
        self.geometry().bounding_area
    }

    /// Degenerate colliders (too few points, zero radius, zero length,
    /// non-finite transform) never collide, contain or get hit.
    pub fn is_degenerate(&self) -> bool {
        self.geometry().degenerate
    }

    /// Projects the world shape onto `axis`.
    pub fn projection(&self, axis: Vec2) -> Projection {
        let geometry = self.geometry();
        match self.shape {
            Shape::Circle(_) => {
                let center = geometry.center.dot(axis);
                Projection::new(center - geometry.radius, center + geometry.radius)
            }
            Shape::Polygon(_) | Shape::Line(_) => {
                Projection::from_values(geometry.points.iter().map(|p| p.dot(axis)))
                    .unwrap_or_else(|| Projection::new(0.0, 0.0))
            }
        }
    }

    /// Candidate separating axes this collider contributes against `other`.
    pub fn axes_for_sat(&self, other: &Collider) -> Vec<Vec2> {
        let geometry = self.geometry();
        match self.shape {
            Shape::Polygon(_) | Shape::Line(_) => geometry.normals.clone(),
            Shape::Circle(_) => {
                let target = match other.shape {
                    Shape::Circle(_) => Some(other.center()),
                    Shape::Polygon(_) | Shape::Line(_) => other
                        .world_points()
                        .iter()
                        .copied()
                        .min_by(|a, b| {
                            a.distance_squared(geometry.center)
                                .total_cmp(&b.distance_squared(geometry.center))
                        }),
                };
                let axis = target.map(|t| (t - geometry.center).normalize()).unwrap_or(Vec2::ZERO);
                if axis == Vec2::ZERO {
                    // Concentric circles still need one axis to measure depth on.
                    if matches!(other.shape, Shape::Circle(_)) { vec![Vec2::UP] } else { Vec::new() }
                } else {
                    vec![axis]
                }
            }
        }
    }

    /// Separating Axis Theorem test. Returns the contact when both shapes
    /// overlap with strictly positive depth on every candidate axis.
    pub fn collides_with(&self, other: &Collider) -> Option<Contact> {
        if self.is_degenerate() || other.is_degenerate() {
            return None;
        }
        if !self.bounding_area().overlaps(&other.bounding_area()) {
            return None;
        }

        let mut axes = self.axes_for_sat(other);
        axes.extend(other.axes_for_sat(self));

        let mut best: Option<(f64, Vec2)> = None;
        for axis in axes {
            if axis.is_near_zero() {
                continue;
            }
            let mine = self.projection(axis);
            let theirs = other.projection(axis);
            if !mine.overlaps(&theirs) {
                return None;
            }

            // Direction in which this shape must move along the axis.
            let back = mine.push_back(&theirs);
            let forward = mine.push_forward(&theirs);
            let (depth, direction) = if forward < back { (forward, axis) } else { (back, -axis) };
            if best.map_or(true, |(smallest, _)| depth < smallest) {
                best = Some((depth, direction));
            }
        }

        let (depth, direction) = best?;
        Some(Contact {
            normal: -direction,
            minimum_translation: direction * depth,
            first_contains_second: self.contains(other),
            second_contains_first: other.contains(self),
        })
    }

    /// Strict point containment: points on the boundary are outside.
    pub fn contains_point(&self, point: Vec2) -> bool {
        if self.is_degenerate() || !self.bounding_area().contains(point) {
            return false;
        }
        let geometry = self.geometry();
        match self.shape {
            Shape::Circle(_) => geometry.center.distance(point) < geometry.radius - EPSILON,
            Shape::Polygon(_) => geometry.edges(true).all(|edge| signed_distance(&edge, point) < -EPSILON),
            Shape::Line(_) => false,
        }
    }

    /// Strict shape containment: every part of `other` lies in this shape's interior.
    pub fn contains(&self, other: &Collider) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        if !self.bounding_area().overlaps(&other.bounding_area()) {
            return false;
        }
        let mine = self.geometry();
        let theirs = other.geometry();
        match (&self.shape, &other.shape) {
            (Shape::Line(_), _) => false,
            (Shape::Circle(_), Shape::Circle(_)) => {
                mine.center.distance(theirs.center) + theirs.radius < mine.radius - EPSILON
            }
            (Shape::Polygon(_), Shape::Circle(_)) => {
                self.contains_point(theirs.center)
                    && mine
                        .edges(true)
                        .all(|edge| -signed_distance(&edge, theirs.center) > theirs.radius + EPSILON)
            }
            (_, Shape::Polygon(_) | Shape::Line(_)) => theirs.points.iter().all(|&p| self.contains_point(p)),
        }
    }

    /// Intersects `ray` with this collider and returns the nearest hit.
    pub fn is_hit_by(&self, ray: &Ray) -> Option<RayIntersection> {
        if self.is_degenerate() {
            return None;
        }
        let geometry = self.geometry();
        match self.shape {
            Shape::Circle(_) => raycast_circle(geometry.center, geometry.radius, ray),
            Shape::Polygon(_) => raycast_edges(geometry.edges(true), ray, false),
            Shape::Line(_) => raycast_edges(geometry.edges(false), ray, true),
        }
    }
}

/// Signed distance of `point` from the edge's line; negative on the
/// interior side of a clockwise polygon.
fn signed_distance(edge: &LineSegment, point: Vec2) -> f64 {
    let direction = edge.direction();
    direction.cross(point - edge.start) / direction.magnitude()
}

fn raycast_edges(edges: impl Iterator<Item = LineSegment>, ray: &Ray, face_ray: bool) -> Option<RayIntersection> {
    let path = ray.to_segment();
    let mut nearest: Option<RayIntersection> = None;
    for edge in edges {
        let Some(hit) = path.intersection(&edge) else {
            continue;
        };
        let distance = hit.t * ray.max_distance;
        if nearest.map_or(false, |n| n.distance <= distance) {
            continue;
        }
        let mut normal = edge.direction().perpendicular().normalize();
        if face_ray && normal.dot(ray.direction) > 0.0 {
            normal = -normal;
        }
        nearest = Some(RayIntersection { point: hit.point, normal, distance });
    }
    nearest
}

fn raycast_circle(center: Vec2, radius: f64, ray: &Ray) -> Option<RayIntersection> {
    let m = ray.origin - center;
    let b = m.dot(ray.direction);
    let c = m.magnitude_squared() - radius * radius;
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let mut discriminant = b * b - c;
    if discriminant < 0.0 {
        // Grazing rays within tolerance of the rim still count.
        if discriminant < -EPSILON * radius {
            return None;
        }
        discriminant = 0.0;
    }
    let root = discriminant.sqrt();
    let mut distance = -b - root;
    if distance < 0.0 {
        // Origin inside the circle: report where the ray leaves it.
        distance = -b + root;
    }
    if distance < -EPSILON || distance > ray.max_distance + EPSILON {
        return None;
    }

    let distance = distance.clamp(0.0, ray.max_distance);
    let point = ray.point_at(distance);
    Some(RayIntersection { point, normal: (point - center).normalize(), distance })
}
