//! Resolvers for the prism-core types

use crate::registry::ResolverRegistry;
use crate::resolver::StructResolver;
use prism_core::{Entity, EntityReference, Transform, Vec3};

/// Register members of `Entity`, `EntityReference`, `Transform` and `Vec3`,
/// plus indexing of the entity's child list and `[f32; 3]`.
///
/// Member names are PascalCase, e.g. `Transform.Position.Y` or
/// `Children[0].Name`.
pub fn register_builtins(registry: &mut ResolverRegistry) {
    registry
        .register(
            StructResolver::<Vec3>::new()
                .member("X", |v| &v.x, |v| &mut v.x)
                .member("Y", |v| &v.y, |v| &mut v.y)
                .member("Z", |v| &v.z, |v| &mut v.z),
        )
        .register(
            StructResolver::<Transform>::new()
                .member("Position", |t| &t.position, |t| &mut t.position)
                .member("Rotation", |t| &t.rotation, |t| &mut t.rotation)
                .member("Scale", |t| &t.scale, |t| &mut t.scale),
        )
        .register(
            StructResolver::<EntityReference>::new()
                .member("Id", |r| &r.id, |r| &mut r.id)
                .member("Name", |r| &r.name, |r| &mut r.name),
        )
        .register(
            StructResolver::<Entity>::new()
                .member("Id", |e| &e.id, |e| &mut e.id)
                .member("Name", |e| &e.name, |e| &mut e.name)
                .member("Transform", |e| &e.transform, |e| &mut e.transform)
                .member("Children", |e| &e.children, |e| &mut e.children),
        )
        .register_list::<EntityReference>()
        .register_array::<f32, 3>();
}
