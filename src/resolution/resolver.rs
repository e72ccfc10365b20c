use crate::collision::Contact;
use crate::common::PhysicsMaterial;
use crate::math::Vec2;
use crate::objects::Mobility;
use crate::world::PhysicsSettings;

/// Per-body inputs to a resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub velocity: Vec2,
    pub material: PhysicsMaterial,
    pub mobility: Mobility,
}

/// Everything a resolver sees about one confirmed contact.
///
/// `first` is the body whose collider produced `contact`; the contact normal
/// points from `first` towards `second` and the minimum translation moves
/// `first` out of `second`.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    pub contact: &'a Contact,
    pub first: BodyState,
    pub second: BodyState,
    pub settings: &'a PhysicsSettings,
    pub dt: f64,
}

/// Position and velocity to apply to one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyCorrection {
    pub translation: Vec2,
    pub velocity: Vec2,
}

impl BodyCorrection {
    /// Leaves the body where it is, moving at `velocity`.
    pub fn unchanged(velocity: Vec2) -> Self {
        BodyCorrection { translation: Vec2::ZERO, velocity }
    }
}

/// Output of a resolver: corrections for both bodies of the pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub first: BodyCorrection,
    pub second: BodyCorrection,
}

impl Resolution {
    /// A resolution that changes nothing.
    pub fn unchanged(ctx: &ResolutionContext<'_>) -> Self {
        Resolution {
            first: BodyCorrection::unchanged(ctx.first.velocity),
            second: BodyCorrection::unchanged(ctx.second.velocity),
        }
    }
}

/// Turns a contact into position and velocity corrections.
pub trait CollisionResolver {
    fn resolve(&self, ctx: &ResolutionContext<'_>) -> Resolution;
}

impl<F> CollisionResolver for F
where
    F: Fn(&ResolutionContext<'_>) -> Resolution,
{
    fn resolve(&self, ctx: &ResolutionContext<'_>) -> Resolution {
        self(ctx)
    }
}

/// Share of the separation (and of the velocity change) each body takes.
///
/// Static bodies never move. Against a static body the other one takes
/// everything. A kinematic body yields to a velocity-driven one so moving
/// platforms carry their riders instead of being shoved. Bodies of the same
/// class split the correction evenly.
pub fn separation_weights(first: Mobility, second: Mobility) -> (f64, f64) {
    match (first, second) {
        (Mobility::Static, Mobility::Static) => (0.0, 0.0),
        (Mobility::Static, _) => (0.0, 1.0),
        (_, Mobility::Static) => (1.0, 0.0),
        (Mobility::Kinematic, Mobility::Driven) => (1.0, 0.0),
        (Mobility::Driven, Mobility::Kinematic) => (0.0, 1.0),
        _ => (0.5, 0.5),
    }
}

/// Separates the pair, bounces along the normal and applies friction along
/// the surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCollisionResolver;

impl DefaultCollisionResolver {
    pub fn new() -> Self {
        DefaultCollisionResolver
    }

    /// True when either body rests on the other relative to gravity.
    fn is_grounded(normal: Vec2, settings: &PhysicsSettings) -> bool {
        let down = settings.gravity().normalize();
        if down == Vec2::ZERO {
            return false;
        }
        down.dot(normal) >= settings.groundedness() || down.dot(-normal) >= settings.groundedness()
    }

    /// Relative speed along the normal after the impact.
    fn normal_response(approach: f64, bounce: f64, grounded: bool, settings: &PhysicsSettings) -> f64 {
        if approach <= 0.0 {
            // Already separating.
            return approach;
        }
        if grounded || approach < settings.stickiness() {
            return 0.0;
        }
        let bounced = -approach * bounce;
        if bounced.abs() < settings.minimum_post_bounce_magnitude() {
            0.0
        } else {
            bounced
        }
    }

    /// Relative tangential velocity after friction for one tick.
    fn friction_response(tangent: Vec2, friction: f64, settings: &PhysicsSettings, dt: f64) -> Vec2 {
        let speed = tangent.magnitude();
        if speed == 0.0 {
            return Vec2::ZERO;
        }
        let slowed = (speed - friction * settings.deceleration_rate() * dt).max(0.0);
        if slowed < settings.minimum_post_friction_magnitude() {
            Vec2::ZERO
        } else {
            tangent * (slowed / speed)
        }
    }
}

impl CollisionResolver for DefaultCollisionResolver {
    fn resolve(&self, ctx: &ResolutionContext<'_>) -> Resolution {
        let (w1, w2) = separation_weights(ctx.first.mobility, ctx.second.mobility);
        if w1 == 0.0 && w2 == 0.0 {
            return Resolution::unchanged(ctx);
        }

        let normal = ctx.contact.normal;
        let mtv = ctx.contact.minimum_translation;
        let settings = ctx.settings;

        let relative = ctx.first.velocity - ctx.second.velocity;
        let approach = relative.dot(normal);
        let tangent = relative - normal * approach;

        let bounce = ctx.first.material.combined_bounce(&ctx.second.material);
        let friction = ctx.first.material.combined_friction(&ctx.second.material);
        let grounded = Self::is_grounded(normal, settings);

        let new_normal = Self::normal_response(approach, bounce, grounded, settings);
        let new_tangent = Self::friction_response(tangent, friction, settings, ctx.dt);
        let delta = normal * new_normal + new_tangent - relative;

        Resolution {
            first: BodyCorrection {
                translation: mtv * w1,
                velocity: ctx.first.velocity + delta * w1,
            },
            second: BodyCorrection {
                translation: -mtv * w2,
                velocity: ctx.second.velocity - delta * w2,
            },
        }
    }
}
