// editor/src/sample.rs
use inspector_core::reflect::Reflect;
use strum_macros::{EnumString, IntoStaticStr, VariantNames};

#[derive(Debug, Clone, Copy, PartialEq, Default, IntoStaticStr, EnumString, VariantNames)]
pub enum Falloff {
    #[default]
    Linear,
    Quadratic,
    Constant,
}
inspector_core::reflect_enum!(Falloff);

#[derive(Debug, Clone, Copy, PartialEq, Default, IntoStaticStr, EnumString, VariantNames)]
pub enum ShadowQuality {
    Low,
    #[default]
    Medium,
    High,
}
inspector_core::reflect_enum!(ShadowQuality);

/// Linear RGB color. Shown by `ColorEditor`.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const AMBER: Color = Color { r: 1.0, g: 0.75, b: 0.0 };
}

/// Members every scene object has.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Actor {
    #[inspect(order = -10, tooltip = "Name shown in the scene tree")]
    pub name: String,
    #[inspect(group = "Transform")]
    pub position: [f32; 3],
    #[inspect(group = "Transform")]
    pub scale: [f32; 3],
    pub is_active: bool,
    #[inspect(hide)]
    pub id: u32,
}

impl Actor {
    pub fn new(name: &str, id: u32) -> Self {
        Self {
            name: name.to_string(),
            position: [0.0; 3],
            scale: [1.0; 3],
            is_active: true,
            id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct ShadowSettings {
    pub enabled: bool,
    pub quality: ShadowQuality,
    #[inspect(display_name = "Depth Bias")]
    pub bias: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self { enabled: true, quality: ShadowQuality::Medium, bias: 0.005 }
    }
}

#[derive(Debug, Clone, PartialEq, Reflect)]
#[inspect(property(
    name = "intensity",
    get = intensity,
    set = set_intensity,
    group = "Light",
    editor_alias = "Slider",
    tooltip = "Luminous intensity in candela"
))]
pub struct PointLight {
    #[inspect(base)]
    pub actor: Actor,
    #[inspect(group = "Light")]
    pub color: Color,
    #[inspect(group = "Light", space = 8.0, header = "Attenuation")]
    pub radius: f32,
    #[inspect(group = "Light")]
    pub falloff: Falloff,
    pub shadows: ShadowSettings,
    #[inspect(editor_alias = "CurveEditor")]
    pub flicker: Vec<f32>,
    #[inspect(read_only)]
    pub bake_count: u32,
    candela: f32,
}

impl PointLight {
    pub fn new(name: &str, id: u32) -> Self {
        Self {
            actor: Actor::new(name, id),
            color: Color::WHITE,
            radius: 10.0,
            falloff: Falloff::Quadratic,
            shadows: ShadowSettings::default(),
            flicker: vec![1.0, 0.8, 1.0],
            bake_count: 0,
            candela: 800.0,
        }
    }

    pub fn intensity(&self) -> f32 {
        self.candela
    }

    /// Negative intensities are clamped to zero.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.candela = intensity.max(0.0);
    }
}

#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct SpotLight {
    #[inspect(base)]
    pub actor: Actor,
    #[inspect(group = "Light")]
    pub color: Color,
    #[inspect(group = "Light")]
    pub range: f32,
    #[inspect(group = "Light", display_name = "Cone Angle")]
    pub angle: f32,
}

impl SpotLight {
    pub fn new(name: &str, id: u32) -> Self {
        Self {
            actor: Actor::new(name, id),
            color: Color::AMBER,
            range: 25.0,
            angle: 45.0,
        }
    }
}
