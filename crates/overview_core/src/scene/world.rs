//! Scene world: the container for every object a behaviour can touch.
//!
//! `World` uses a `BTreeMap` keyed by a monotonically-increasing `u64` ID so
//! that handles remain stable across insertions and removals and iteration
//! follows spawn order.
//!
//! # Quick start
//! ```rust,ignore
//! use overview_core::{Lens, Transform, World};
//! use glam::Vec3;
//!
//! let mut world = World::new();
//! let cam = world.spawn_camera("Camera", Transform::default(), Lens::with_fov(60.0));
//! let goal = world.spawn("Goal").with_position(Vec3::new(5.0, 0.0, 0.0)).build();
//!
//! assert_eq!(world.main_camera(), Some(cam));
//! world.despawn(goal);
//! ```

use std::collections::BTreeMap;

use glam::Vec3;

use crate::scene::camera::{Lens, MAIN_CAMERA_TAG};
use crate::transform::Transform;

// ─── Handle ────────────────────────────────────────────────────────────────

/// Opaque handle referencing an entity inside a [`World`].
///
/// Handles are stable: removing other entities does not invalidate existing
/// handles.  A handle becomes invalid only after the entity it refers to is
/// despawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u64);

// ─── Element kinds ─────────────────────────────────────────────────────────

/// What an entity is, beyond its transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ElementKind {
    /// A viewpoint with its own projection parameters.
    Camera(Lens),
    /// A visible object (moved or spun by behaviours, targeted by others).
    Marker,
    /// An empty entity used as a logical group or waypoint.
    #[default]
    Empty,
}

// ─── Entity entry ──────────────────────────────────────────────────────────

/// Complete data for one scene entity.
#[derive(Debug, Clone)]
pub struct Element {
    /// Unique, stable identifier (mirrors the map key for convenience).
    pub id: u64,
    /// Human-readable label, used to wire behaviours together in configs.
    pub name: String,
    /// World-space transform (position, rotation, scale).
    pub transform: Transform,
    pub kind: ElementKind,
    /// Arbitrary string tags (e.g. [`MAIN_CAMERA_TAG`]).
    pub tags: Vec<String>,
}

impl Element {
    fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            transform: Transform::default(),
            kind: ElementKind::default(),
            tags: Vec::new(),
        }
    }

    pub fn lens(&self) -> Option<&Lens> {
        match &self.kind {
            ElementKind::Camera(lens) => Some(lens),
            _ => None,
        }
    }
}

// ─── Entity builder ────────────────────────────────────────────────────────

/// Fluent builder returned by [`World::spawn`].
///
/// Call `.build()` to insert the entity and receive its [`Handle`].
pub struct EntityBuilder<'a> {
    world: &'a mut World,
    element: Element,
}

impl<'a> EntityBuilder<'a> {
    pub fn with_position(mut self, pos: Vec3) -> Self {
        self.element.transform.position = pos;
        self
    }

    pub fn with_transform(mut self, t: Transform) -> Self {
        self.element.transform = t;
        self
    }

    pub fn with_kind(mut self, kind: ElementKind) -> Self {
        self.element.kind = kind;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.element.tags.push(tag.into());
        self
    }

    /// Finalise the builder, insert the entity, and return its handle.
    pub fn build(self) -> Handle {
        let id = self.element.id;
        self.world.entities.insert(id, self.element);
        Handle(id)
    }
}

// ─── World ─────────────────────────────────────────────────────────────────

/// The scene container shared by the runner and every behaviour.
#[derive(Debug)]
pub struct World {
    entities: BTreeMap<u64, Element>,
    next_id: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            next_id: 1,
        }
    }

    // ── Spawning ───────────────────────────────────────────────────────────

    /// Begin building a new entity with the given name.
    pub fn spawn(&mut self, name: impl Into<String>) -> EntityBuilder<'_> {
        let id = self.next_id;
        self.next_id += 1;
        EntityBuilder {
            world: self,
            element: Element::new(id, name),
        }
    }

    /// Convenience: spawn a camera tagged as the main camera.
    pub fn spawn_camera(&mut self, name: impl Into<String>, transform: Transform, lens: Lens) -> Handle {
        self.spawn(name)
            .with_transform(transform)
            .with_kind(ElementKind::Camera(lens))
            .with_tag(MAIN_CAMERA_TAG)
            .build()
    }

    // ── Despawn ────────────────────────────────────────────────────────────

    /// Remove the entity from the world.  Returns `true` if it existed.
    pub fn despawn(&mut self, handle: Handle) -> bool {
        self.entities.remove(&handle.0).is_some()
    }

    // ── Transform ──────────────────────────────────────────────────────────

    pub fn transform(&self, handle: Handle) -> Option<&Transform> {
        self.entities.get(&handle.0).map(|e| &e.transform)
    }

    pub fn transform_mut(&mut self, handle: Handle) -> Option<&mut Transform> {
        self.entities.get_mut(&handle.0).map(|e| &mut e.transform)
    }

    /// Overwrite the world-space position.
    pub fn set_position(&mut self, handle: Handle, pos: Vec3) {
        if let Some(t) = self.transform_mut(handle) {
            t.position = pos;
        }
    }

    /// Read the world-space position.
    pub fn position(&self, handle: Handle) -> Option<Vec3> {
        self.transform(handle).map(|t| t.position)
    }

    // ── Cameras ────────────────────────────────────────────────────────────

    /// The first (oldest) camera entity tagged [`MAIN_CAMERA_TAG`].
    pub fn main_camera(&self) -> Option<Handle> {
        self.entities
            .values()
            .find(|e| e.lens().is_some() && e.tags.iter().any(|t| t == MAIN_CAMERA_TAG))
            .map(|e| Handle(e.id))
    }

    pub fn lens(&self, handle: Handle) -> Option<&Lens> {
        self.entities.get(&handle.0).and_then(Element::lens)
    }

    pub fn lens_mut(&mut self, handle: Handle) -> Option<&mut Lens> {
        match self.entities.get_mut(&handle.0).map(|e| &mut e.kind) {
            Some(ElementKind::Camera(lens)) => Some(lens),
            _ => None,
        }
    }

    // ── Tags ───────────────────────────────────────────────────────────────

    /// Add a string tag to an entity.
    pub fn add_tag(&mut self, handle: Handle, tag: impl Into<String>) {
        if let Some(e) = self.entities.get_mut(&handle.0) {
            let tag = tag.into();
            if !e.tags.contains(&tag) {
                e.tags.push(tag);
            }
        }
    }

    /// Returns true if the entity has the given tag.
    pub fn has_tag(&self, handle: Handle, tag: &str) -> bool {
        self.entities
            .get(&handle.0)
            .map(|e| e.tags.iter().any(|t| t == tag))
            .unwrap_or(false)
    }

    // ── Lookup ─────────────────────────────────────────────────────────────

    /// Immutable reference to an entity.
    pub fn get(&self, handle: Handle) -> Option<&Element> {
        self.entities.get(&handle.0)
    }

    /// Returns `true` if the world contains this handle.
    pub fn contains(&self, handle: Handle) -> bool {
        self.entities.contains_key(&handle.0)
    }

    /// First entity (in spawn order) with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<Handle> {
        self.entities
            .values()
            .find(|e| e.name == name)
            .map(|e| Handle(e.id))
    }

    // ── Iteration ──────────────────────────────────────────────────────────

    /// Iterate over all entities in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.entities.values()
    }

    /// Total number of entities currently alive.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────
