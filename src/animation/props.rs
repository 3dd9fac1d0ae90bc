//! Animatable presentation properties

use serde::Deserialize;

/// A single animatable property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    X,
    Y,
    Z,
    Scale,
    Rotation,
    RotationX,
    RotationY,
    Opacity,
    ZIndex,
}

impl Property {
    pub const ALL: [Property; 9] = [
        Property::X,
        Property::Y,
        Property::Z,
        Property::Scale,
        Property::Rotation,
        Property::RotationX,
        Property::RotationY,
        Property::Opacity,
        Property::ZIndex,
    ];
}

/// Fully resolved presentation state of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub scale: f32,
    /// Degrees
    pub rotation: f32,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub opacity: f32,
    pub z_index: i32,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        scale: 1.0,
        rotation: 0.0,
        rotation_x: 0.0,
        rotation_y: 0.0,
        opacity: 1.0,
        z_index: 0,
    };

    pub fn get(&self, property: Property) -> f32 {
        match property {
            Property::X => self.x,
            Property::Y => self.y,
            Property::Z => self.z,
            Property::Scale => self.scale,
            Property::Rotation => self.rotation,
            Property::RotationX => self.rotation_x,
            Property::RotationY => self.rotation_y,
            Property::Opacity => self.opacity,
            Property::ZIndex => self.z_index as f32,
        }
    }

    pub fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::X => self.x = value,
            Property::Y => self.y = value,
            Property::Z => self.z = value,
            Property::Scale => self.scale = value,
            Property::Rotation => self.rotation = value,
            Property::RotationX => self.rotation_x = value,
            Property::RotationY => self.rotation_y = value,
            Property::Opacity => self.opacity = value,
            Property::ZIndex => self.z_index = value.round() as i32,
        }
    }

    /// Overwrite every property present in `props`
    pub fn apply(&mut self, props: &Props) {
        for (property, value) in props.iter() {
            self.set(property, value);
        }
    }

    /// CSS `transform` value for this pose
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d({}px, {}px, {}px) rotate({}deg) rotateX({}deg) rotateY({}deg) scale({})",
            self.x, self.y, self.z, self.rotation, self.rotation_x, self.rotation_y, self.scale
        )
    }
}

/// Sparse set of property values used as tween endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Props {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    pub scale: Option<f32>,
    pub rotation: Option<f32>,
    pub rotation_x: Option<f32>,
    pub rotation_y: Option<f32>,
    pub opacity: Option<f32>,
    pub z_index: Option<i32>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, v: f32) -> Self {
        self.x = Some(v);
        self
    }

    pub fn y(mut self, v: f32) -> Self {
        self.y = Some(v);
        self
    }

    pub fn z(mut self, v: f32) -> Self {
        self.z = Some(v);
        self
    }

    pub fn scale(mut self, v: f32) -> Self {
        self.scale = Some(v);
        self
    }

    pub fn rotation(mut self, v: f32) -> Self {
        self.rotation = Some(v);
        self
    }

    pub fn rotation_x(mut self, v: f32) -> Self {
        self.rotation_x = Some(v);
        self
    }

    pub fn rotation_y(mut self, v: f32) -> Self {
        self.rotation_y = Some(v);
        self
    }

    pub fn opacity(mut self, v: f32) -> Self {
        self.opacity = Some(v);
        self
    }

    pub fn z_index(mut self, v: i32) -> Self {
        self.z_index = Some(v);
        self
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        match property {
            Property::X => self.x,
            Property::Y => self.y,
            Property::Z => self.z,
            Property::Scale => self.scale,
            Property::Rotation => self.rotation,
            Property::RotationX => self.rotation_x,
            Property::RotationY => self.rotation_y,
            Property::Opacity => self.opacity,
            Property::ZIndex => self.z_index.map(|z| z as f32),
        }
    }

    pub fn clear(&mut self, property: Property) {
        match property {
            Property::X => self.x = None,
            Property::Y => self.y = None,
            Property::Z => self.z = None,
            Property::Scale => self.scale = None,
            Property::Rotation => self.rotation = None,
            Property::RotationX => self.rotation_x = None,
            Property::RotationY => self.rotation_y = None,
            Property::Opacity => self.opacity = None,
            Property::ZIndex => self.z_index = None,
        }
    }

    /// Present properties with their values
    pub fn iter(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        Property::ALL
            .into_iter()
            .filter_map(move |p| self.get(p).map(|v| (p, v)))
    }

    pub fn contains(&self, property: Property) -> bool {
        self.get(property).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Values of `other` win where both are present
    pub fn merged(mut self, other: &Props) -> Self {
        for (property, value) in other.iter() {
            self.set(property, value);
        }
        self
    }

    /// Builder form of `set`
    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: Property, value: f32) {
        let slot = match property {
            Property::X => &mut self.x,
            Property::Y => &mut self.y,
            Property::Z => &mut self.z,
            Property::Scale => &mut self.scale,
            Property::Rotation => &mut self.rotation,
            Property::RotationX => &mut self.rotation_x,
            Property::RotationY => &mut self.rotation_y,
            Property::Opacity => &mut self.opacity,
            Property::ZIndex => {
                self.z_index = Some(value.round() as i32);
                return;
            }
        };
        *slot = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_identity() {
        let pose = Pose::default();
        assert_eq!(pose.scale, 1.0);
        assert_eq!(pose.opacity, 1.0);
        assert_eq!(pose.x, 0.0);
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let mut pose = Pose::default();
        pose.apply(&Props::new().x(10.0).z_index(5));
        assert_eq!(pose.x, 10.0);
        assert_eq!(pose.z_index, 5);
        assert_eq!(pose.scale, 1.0);
    }

    #[test]
    fn test_merged_prefers_other() {
        let base = Props::new().x(1.0).y(2.0);
        let merged = base.merged(&Props::new().y(5.0).opacity(0.0));
        assert_eq!(merged.x, Some(1.0));
        assert_eq!(merged.y, Some(5.0));
        assert_eq!(merged.opacity, Some(0.0));
    }

    #[test]
    fn test_props_from_yaml_camel_case() {
        let props: Props = serde_yaml::from_str("{ opacity: 0, rotationX: 20, zIndex: 3 }").unwrap();
        assert_eq!(props.opacity, Some(0.0));
        assert_eq!(props.rotation_x, Some(20.0));
        assert_eq!(props.z_index, Some(3));
        assert!(props.x.is_none());
    }

    #[test]
    fn test_iter_and_clear() {
        let mut props = Props::new().x(1.0).rotation(2.0);
        assert_eq!(props.iter().count(), 2);
        props.clear(Property::X);
        assert!(!props.contains(Property::X));
        props.clear(Property::Rotation);
        assert!(props.is_empty());
    }
}
