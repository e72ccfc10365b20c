pub mod resolver;

pub use resolver::{
    separation_weights, BodyCorrection, BodyState, CollisionResolver, DefaultCollisionResolver,
    Resolution, ResolutionContext,
};
