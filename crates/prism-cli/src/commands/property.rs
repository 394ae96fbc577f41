//! Property get/set commands

use anyhow::{anyhow, bail, Context, Result};
use prism_core::{Entity, EntityId, EntityReference, PrismError, Vec3};
use prism_hierarchy::{load_hierarchy, save_hierarchy};
use prism_updater::{PathResolver, PropertyAccessor};
use std::any::Any;

pub struct GetArgs {
    pub file: String,
    pub entity: String,
    pub path: String,
}

pub struct SetArgs {
    pub file: String,
    pub entity: String,
    pub path: String,
    pub value: String,
}

pub fn get(resolver: &PathResolver<'_>, args: GetArgs) -> Result<()> {
    let data = load_hierarchy(&args.file)?;
    let id = parse_entity_id(&args.entity)?;
    let design = data
        .entities
        .get(id)
        .ok_or_else(|| PrismError::EntityNotFound(args.entity.clone()))?;

    let accessor = resolver.resolve_for::<Entity>(&args.path)?;
    let value = accessor.get(&design.entity)?;
    let text = format_value(value).ok_or_else(|| {
        anyhow!(
            "Values of type `{}` cannot be displayed",
            accessor.target_type()
        )
    })?;

    println!("{}", text);
    Ok(())
}

pub fn set(resolver: &PathResolver<'_>, args: SetArgs) -> Result<()> {
    let mut data = load_hierarchy(&args.file)?;
    let id = parse_entity_id(&args.entity)?;
    let accessor = resolver.resolve_for::<Entity>(&args.path)?;

    data.entities
        .modify(id, |design| write_value(&accessor, &mut design.entity, &args.value))
        .map_err(|err| match err {
            PrismError::EntityNotFound(_) => PrismError::EntityNotFound(args.entity.clone()),
            other => other,
        })??;
    save_hierarchy(&args.file, &data)?;

    tracing::info!(entity = %id, path = accessor.path(), "Updated property");
    println!("{} {} = {}", id, accessor, args.value);
    Ok(())
}

fn parse_entity_id(text: &str) -> Result<EntityId> {
    text.parse::<EntityId>()
        .map_err(|e| anyhow!("Invalid entity id '{}': {}", text, e))
}

fn format_value(value: &dyn Any) -> Option<String> {
    if let Some(s) = value.downcast_ref::<String>() {
        return Some(s.clone());
    }
    if let Some(f) = value.downcast_ref::<f32>() {
        return Some(f.to_string());
    }
    if let Some(id) = value.downcast_ref::<EntityId>() {
        return Some(id.to_string());
    }
    if let Some(v) = value.downcast_ref::<Vec3>() {
        return Some(format!("({}, {}, {})", v.x, v.y, v.z));
    }
    if let Some(r) = value.downcast_ref::<EntityReference>() {
        return Some(format!("{} => {}", r.id, r.name));
    }
    None
}

fn write_value(accessor: &PropertyAccessor, entity: &mut Entity, raw: &str) -> Result<()> {
    let target = accessor.target_type();
    let slot = accessor.get_mut(entity)?;

    if let Some(s) = slot.downcast_mut::<String>() {
        *s = raw.to_string();
        return Ok(());
    }
    if let Some(f) = slot.downcast_mut::<f32>() {
        *f = raw
            .trim()
            .parse()
            .with_context(|| format!("'{}' is not a valid number", raw))?;
        return Ok(());
    }
    bail!("Values of type `{}` cannot be set from the command line", target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_hierarchy::EntityHierarchyData;
    use prism_updater::ResolverRegistry;
    use std::path::PathBuf;

    fn temp_hierarchy(data: &EntityHierarchyData) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("prism_property_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("hierarchy.toml");
        save_hierarchy(&path, data).unwrap();
        path
    }

    fn cleanup(path: &PathBuf) {
        std::fs::remove_file(path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&"door".to_string()), Some("door".to_string()));
        assert_eq!(format_value(&2.5f32), Some("2.5".to_string()));
        assert_eq!(
            format_value(&Vec3::new(1.0, -2.0, 0.5)),
            Some("(1, -2, 0.5)".to_string())
        );
        assert_eq!(
            format_value(&EntityId::from_u128(1)),
            Some("00000000-0000-0000-0000-000000000001".to_string())
        );
        assert_eq!(format_value(&42u64), None);
    }

    #[test]
    fn test_write_value() {
        let registry = ResolverRegistry::with_builtins();
        let resolver = PathResolver::new(&registry);
        let mut entity = Entity::new("lamp");

        let name = resolver.resolve_for::<Entity>("Name").unwrap();
        write_value(&name, &mut entity, "lantern").unwrap();
        assert_eq!(entity.name, "lantern");

        let y = resolver.resolve_for::<Entity>("Transform.Scale.Y").unwrap();
        write_value(&y, &mut entity, " 3.5 ").unwrap();
        assert_eq!(entity.transform.scale, Vec3::new(1.0, 3.5, 1.0));
        assert!(write_value(&y, &mut entity, "tall").is_err());

        let position = resolver.resolve_for::<Entity>("Transform.Position").unwrap();
        let err = write_value(&position, &mut entity, "1,2,3").unwrap_err();
        assert!(err.to_string().contains("cannot be set"));
    }

    #[test]
    fn test_set_saves_file() {
        let registry = ResolverRegistry::with_builtins();
        let resolver = PathResolver::new(&registry);

        let child = Entity::new("wheel");
        let parent = Entity::new("car").with_child(child.reference());
        let parent_id = parent.id;
        let mut data = EntityHierarchyData::new();
        data.add_root_entity(parent).unwrap();
        data.entities.add_entity(child).unwrap();
        let path = temp_hierarchy(&data);

        set(
            &resolver,
            SetArgs {
                file: path.to_string_lossy().into_owned(),
                entity: parent_id.to_string(),
                path: "Children[0].Name".to_string(),
                value: "front wheel".to_string(),
            },
        )
        .unwrap();
        set(
            &resolver,
            SetArgs {
                file: path.to_string_lossy().into_owned(),
                entity: parent_id.to_string(),
                path: "Transform.Position.X".to_string(),
                value: "-4".to_string(),
            },
        )
        .unwrap();

        let loaded = load_hierarchy(&path).unwrap();
        let car = &loaded.entities.get(parent_id).unwrap().entity;
        assert_eq!(car.children[0].name, "front wheel");
        assert_eq!(car.transform.position.x, -4.0);

        cleanup(&path);
    }

    #[test]
    fn test_unknown_entity_and_bad_id() {
        let registry = ResolverRegistry::with_builtins();
        let resolver = PathResolver::new(&registry);
        let path = temp_hierarchy(&EntityHierarchyData::new());
        let file = path.to_string_lossy().into_owned();

        let missing = EntityId::new().to_string();
        let err = get(
            &resolver,
            GetArgs {
                file: file.clone(),
                entity: missing.clone(),
                path: "Name".to_string(),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains(&missing));

        let err = set(
            &resolver,
            SetArgs {
                file,
                entity: "not-an-id".to_string(),
                path: "Name".to_string(),
                value: "x".to_string(),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid entity id"));

        cleanup(&path);
    }
}
