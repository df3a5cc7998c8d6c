use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::StandardView;
use crate::error::MeshViewError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera fit, zoom, pan and rotation parameters.
pub struct CameraOptions {
    /// Orientation of a fresh camera.
    #[schemars(title = "Default View")]
    pub default_view: StandardView,
    /// Fractional radius change per wheel notch.
    #[schemars(title = "Zoom Step", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_step: f32,
    /// Lower bound on the view radius.
    #[schemars(skip)]
    pub min_radius: f32,
    /// Pan drags shorter than this many pixels are ignored.
    #[schemars(title = "Pan Threshold", range(min = 0.0, max = 50.0), extend("step" = 1.0))]
    pub pan_threshold: f32,
    /// Pan distance per accepted drag, as a fraction of the radius.
    #[schemars(title = "Pan Step", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub pan_step: f32,
    /// Degrees of yaw or pitch per rotate gesture.
    #[schemars(title = "Rotate Step", range(min = 1.0, max = 90.0), extend("step" = 1.0))]
    pub rotate_step: f32,
    /// Margin factor applied to the bounding extent on fit.
    #[schemars(skip)]
    pub fit_scale: f32,
    /// Near/far plane distance as a multiple of the radius.
    #[schemars(skip)]
    pub depth_factor: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            default_view: StandardView::Isometric,
            zoom_step: 0.05,
            min_radius: 0.1,
            pan_threshold: 10.0,
            pan_step: 0.15,
            rotate_step: 15.0,
            fit_scale: 0.55,
            depth_factor: 100.0,
        }
    }
}

impl CameraOptions {
    /// Reject values that would collapse or invert the view.
    ///
    /// # Errors
    ///
    /// [`MeshViewError::OptionsParse`] naming the first offending field.
    pub fn validate(&self) -> Result<(), MeshViewError> {
        let checks = [
            ("min_radius", self.min_radius > 0.0 && self.min_radius.is_finite()),
            ("zoom_step", self.zoom_step > 0.0 && self.zoom_step < 1.0),
            ("pan_step", self.pan_step > 0.0 && self.pan_step.is_finite()),
            ("fit_scale", self.fit_scale > 0.0 && self.fit_scale.is_finite()),
            ("depth_factor", self.depth_factor >= 1.0 && self.depth_factor.is_finite()),
        ];
        match checks.iter().find(|(_, ok)| !ok) {
            Some((field, _)) => Err(MeshViewError::OptionsParse(format!(
                "camera.{field} is out of range"
            ))),
            None => Ok(()),
        }
    }
}
