/// Bounding volume of an entity.
///
/// Holds a volume linked in local space and the same volume moved to world
/// space. `World::update_bounding_volumes` refreshes the world volume when
/// the linked volume or the entity transform changed, then re-indexes it.

use glam::Mat4;
use crate::math::BoundingVolume;

/// Outcome of a bounding volume refresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum VolumeUpdate {
    /// Nothing changed since the last refresh
    Unchanged,
    /// The world volume must be (re)indexed
    Insert(BoundingVolume),
    /// The volume is gone and the entity must leave the index
    Remove,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundingVolumeComponent {
    linked_volume: Option<BoundingVolume>,
    volume: Option<BoundingVolume>,
    volume_changed: bool,
    transform_changed: bool,
    is_added: bool,
}

impl BoundingVolumeComponent {
    /// Component without any volume yet.
    pub fn new() -> Self {
        Self {
            linked_volume: None,
            volume: None,
            volume_changed: true,
            transform_changed: true,
            is_added: false,
        }
    }

    /// Component tracking `local` moved by the entity transform.
    pub fn with_volume(local: BoundingVolume) -> Self {
        let mut component = Self::new();
        component.link_volume(Some(local));
        component
    }

    /// Link a local-space volume, or unlink with `None`.
    ///
    /// Unlinking drops the world volume as well; the entity then leaves the
    /// spatial index at the next refresh.
    pub fn link_volume(&mut self, volume: Option<BoundingVolume>) {
        if volume.is_none() {
            self.volume = None;
        }
        self.linked_volume = volume;
        self.volume_changed = true;
    }

    /// Set the world volume directly. The owner keeps it current.
    pub fn set_world_volume(&mut self, volume: BoundingVolume) {
        self.linked_volume = None;
        self.volume = Some(volume);
        self.volume_changed = true;
    }

    /// World-space volume.
    pub fn volume(&self) -> Option<&BoundingVolume> {
        self.volume.as_ref()
    }

    /// Local-space volume.
    pub fn linked_volume(&self) -> Option<&BoundingVolume> {
        self.linked_volume.as_ref()
    }

    /// Whether the volume currently sits in a spatial index.
    pub fn is_added(&self) -> bool {
        self.is_added
    }

    pub fn needs_update(&self) -> bool {
        self.volume_changed || self.transform_changed
    }

    pub(crate) fn mark_transform_changed(&mut self) {
        self.transform_changed = true;
    }

    pub(crate) fn set_added(&mut self, added: bool) {
        self.is_added = added;
    }

    /// Move the linked volume to world space if anything changed.
    pub(crate) fn update(&mut self, world_transform: &Mat4) -> VolumeUpdate {
        if !self.needs_update() {
            return VolumeUpdate::Unchanged;
        }

        if let Some(local) = self.linked_volume {
            self.volume = Some(local.transformed(world_transform));
        }

        match self.volume {
            Some(volume) => {
                self.volume_changed = false;
                self.transform_changed = false;
                VolumeUpdate::Insert(volume)
            }
            // Reported once per change, whether or not the index tracks it
            None => {
                self.volume_changed = false;
                self.transform_changed = false;
                VolumeUpdate::Remove
            }
        }
    }
}

impl Default for BoundingVolumeComponent {
    fn default() -> Self {
        Self::new()
    }
}
