//! Turns the entity list of an [`AppConfig`] into a live [`World`] plus the
//! behaviours attached to it.

use std::collections::HashSet;

use glam::Vec3;
use log::debug;
use overview_behaviors::{Behavior, OverviewCamera, Rotator, SlowMove};
use overview_core::{ElementKind, Handle, Transform, World};

use crate::config::{AppConfig, BehaviorConfig};
use crate::error::SceneError;

/// A behaviour bound to the entity it drives.
pub struct Attachment {
    pub entity: Handle,
    pub behavior: Box<dyn Behavior>,
}

/// Spawn every configured entity, then resolve and attach behaviours.
///
/// Entities are spawned first so behaviours may reference entities declared
/// after them.
pub fn build_scene(config: &AppConfig) -> Result<(World, Vec<Attachment>), SceneError> {
    let mut world = World::new();
    let mut seen = HashSet::new();
    let mut handles = Vec::with_capacity(config.entities.len());

    for entity in &config.entities {
        if !seen.insert(entity.name.as_str()) {
            return Err(SceneError::DuplicateName(entity.name.clone()));
        }
        let transform =
            Transform::from_position_euler(Vec3::from_array(entity.position), entity.rotation);
        let handle = match entity.camera {
            Some(lens) => world.spawn_camera(entity.name.clone(), transform, lens),
            None => {
                let kind = if entity.behaviors.is_empty() {
                    ElementKind::Empty
                } else {
                    ElementKind::Marker
                };
                world
                    .spawn(entity.name.clone())
                    .with_transform(transform)
                    .with_kind(kind)
                    .build()
            }
        };
        handles.push(handle);
    }

    let mut attachments = Vec::new();
    for (entity, &handle) in config.entities.iter().zip(&handles) {
        for behavior in &entity.behaviors {
            validate(behavior, &entity.name)?;
            let behavior: Box<dyn Behavior> = match behavior {
                BehaviorConfig::OverviewCamera(c) => Box::new(OverviewCamera::new(c.clone())),
                BehaviorConfig::Rotator(c) => Box::new(Rotator::new(*c)),
                BehaviorConfig::SlowMove(c) => {
                    let target =
                        world
                            .find_by_name(&c.target)
                            .ok_or_else(|| SceneError::UnknownEntity {
                                behavior: "slow_move",
                                entity: entity.name.clone(),
                                target: c.target.clone(),
                            })?;
                    Box::new(SlowMove::new(target, c.speed))
                }
            };
            debug!("attached {} to `{}`", behavior.name(), entity.name);
            attachments.push(Attachment {
                entity: handle,
                behavior,
            });
        }
    }

    Ok((world, attachments))
}

/// Reject tuning values a behaviour cannot run with.
fn validate(behavior: &BehaviorConfig, entity: &str) -> Result<(), SceneError> {
    let invalid = |behavior, reason: String| SceneError::InvalidConfig {
        behavior,
        entity: entity.to_string(),
        reason,
    };
    match behavior {
        BehaviorConfig::OverviewCamera(c) if c.min_fov > c.max_fov => Err(invalid(
            "overview_camera",
            format!("min_fov {} is above max_fov {}", c.min_fov, c.max_fov),
        )),
        BehaviorConfig::SlowMove(c) if c.speed < 0.0 => Err(invalid(
            "slow_move",
            format!("speed {} is negative", c.speed),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EntityConfig;
    use overview_behaviors::{OverviewCameraConfig, SlowMoveConfig};
    use overview_core::Lens;

    fn entity(name: &str) -> EntityConfig {
        EntityConfig {
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn spawns_entities_and_camera() {
        let mut config = AppConfig::default();
        let mut cam = entity("Camera");
        cam.camera = Some(Lens::with_fov(50.0));
        cam.position = [1.0, 2.0, 3.0];
        config.entities = vec![cam, entity("Goal")];

        let (world, attachments) = build_scene(&config).unwrap();
        assert_eq!(world.len(), 2);
        assert!(attachments.is_empty());
        let camera = world.main_camera().unwrap();
        assert_eq!(world.get(camera).unwrap().name, "Camera");
        assert_eq!(world.position(camera), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(world.lens(camera).unwrap().fov, 50.0);
    }

    #[test]
    fn forward_references_resolve() {
        let mut config = AppConfig::default();
        let mut mover = entity("Mover");
        mover.behaviors.push(BehaviorConfig::SlowMove(SlowMoveConfig {
            target: "Goal".into(),
            speed: 1.0,
        }));
        config.entities = vec![mover, entity("Goal")];
        let (world, attachments) = build_scene(&config).unwrap();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].entity, world.find_by_name("Mover").unwrap());
        assert_eq!(attachments[0].behavior.name(), "slow_move");
    }

    #[test]
    fn unknown_target_is_an_error() {
        let mut config = AppConfig::default();
        let mut mover = entity("Mover");
        mover.behaviors.push(BehaviorConfig::SlowMove(SlowMoveConfig {
            target: "Nowhere".into(),
            speed: 1.0,
        }));
        config.entities = vec![mover];
        match build_scene(&config) {
            Err(SceneError::UnknownEntity { target, .. }) => assert_eq!(target, "Nowhere"),
            other => panic!("expected UnknownEntity, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn inverted_fov_limits_are_rejected() {
        let mut config = AppConfig::default();
        let mut cam = entity("Camera");
        cam.camera = Some(Lens::default());
        cam.behaviors
            .push(BehaviorConfig::OverviewCamera(OverviewCameraConfig {
                min_fov: 90.0,
                max_fov: 30.0,
                ..Default::default()
            }));
        config.entities = vec![cam];
        match build_scene(&config) {
            Err(SceneError::InvalidConfig { behavior, entity, .. }) => {
                assert_eq!(behavior, "overview_camera");
                assert_eq!(entity, "Camera");
            }
            other => panic!("expected InvalidConfig, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn negative_speed_is_rejected() {
        let mut config = AppConfig::default();
        let mut mover = entity("Mover");
        mover.behaviors.push(BehaviorConfig::SlowMove(SlowMoveConfig {
            target: "Goal".into(),
            speed: -2.0,
        }));
        config.entities = vec![mover, entity("Goal")];
        assert!(matches!(
            build_scene(&config),
            Err(SceneError::InvalidConfig { behavior: "slow_move", .. })
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut config = AppConfig::default();
        config.entities = vec![entity("Twin"), entity("Twin")];
        assert!(matches!(
            build_scene(&config),
            Err(SceneError::DuplicateName(name)) if name == "Twin"
        ));
    }
}
