//! Viewport transform between device coordinates and scene coordinates.

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;

/// Pan/zoom state of the viewport. Scene content is anchored at the top-left,
/// so panning only ever reveals content down and to the right: both pan
/// components stay at or below zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan: [f32; 2],
    pub zoom: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            pan: [0.0, 0.0],
            zoom: 1.0,
        }
    }

    pub fn to_scene(&self, device_pos: [f32; 2]) -> [f32; 2] {
        [
            (device_pos[0] - self.pan[0]) / self.zoom,
            (device_pos[1] - self.pan[1]) / self.zoom,
        ]
    }

    pub fn to_device(&self, scene_pos: [f32; 2]) -> [f32; 2] {
        [
            scene_pos[0] * self.zoom + self.pan[0],
            scene_pos[1] * self.zoom + self.pan[1],
        ]
    }

    pub fn set_pan(&mut self, pan: [f32; 2]) {
        self.pan = [pan[0].min(0.0), pan[1].min(0.0)];
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Scales the view by `factor` while keeping the scene point under
    /// `device_pos` stationary on screen.
    pub fn zoom_at(&mut self, device_pos: [f32; 2], factor: f32) {
        let before = self.to_scene(device_pos);
        self.set_zoom(self.zoom * factor);
        let after = self.to_scene(device_pos);

        self.set_pan([
            self.pan[0] + (after[0] - before[0]) * self.zoom,
            self.pan[1] + (after[1] - before[1]) * self.zoom,
        ]);
    }

    pub fn reset(&mut self) {
        self.pan = [0.0, 0.0];
        self.zoom = 1.0;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
