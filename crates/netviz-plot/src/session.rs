//! Process-lifetime state shared with the render loop

use crate::core::{compose_frame, Camera, CameraState, DrawStats, EventHandler, Frame, PointerEvent};
use crate::network::NetworkModel;

/// Owns the network, the fixed camera and the orbit angles
#[derive(Debug, Clone)]
pub struct Session {
    network: NetworkModel,
    pub camera: Camera,
    pub camera_state: CameraState,
}

impl Session {
    pub fn new(network: NetworkModel) -> Self {
        log::info!(
            target: "netviz_plot",
            "session for '{}' with {} layers",
            network.name(),
            network.len()
        );
        Self {
            network,
            camera: Camera::new(),
            camera_state: CameraState::new(),
        }
    }

    /// The network is read-only once rendering starts
    pub fn network(&self) -> &NetworkModel {
        &self.network
    }

    /// Compose the current frame from the network and orbit state
    pub fn compose_frame(&self) -> Frame {
        compose_frame(&self.network, &self.camera, &self.camera_state)
    }

    pub fn frame_stats(&self) -> DrawStats {
        self.compose_frame().draw_list.stats()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.update_aspect_ratio(width as f32 / height as f32);
        }
    }
}

impl EventHandler for Session {
    fn handle_event(&mut self, event: PointerEvent) -> bool {
        self.camera_state.handle_event(event)
    }
}
