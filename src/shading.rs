use crate::domain::{Light, Material};
use crate::math::{reflect, Vec3};

pub const AMBIENT_LIGHT: Vec3 = Vec3::splat(0.5);

/// Diffuse and specular contribution of one point light.
///
/// `p` must differ from both `eye` and `light_pos`.
pub fn phong_contrib_for_light(
    material: &Material,
    p: Vec3,
    normal: Vec3,
    eye: Vec3,
    light_pos: Vec3,
    intensity: Vec3,
) -> Vec3 {
    let l = (light_pos - p).normalize();
    let v = (eye - p).normalize();
    let r = reflect(-l, normal).normalize();

    let dot_ln = l.dot(normal);
    let dot_rv = r.dot(v);

    if dot_ln < 0.0 {
        return Vec3::ZERO;
    }
    if dot_rv < 0.0 {
        return intensity * (material.diffuse * dot_ln);
    }
    let specular = material.specular * dot_rv.powf(material.shininess);
    intensity * ((material.diffuse * dot_ln) + specular)
}

pub fn phong_illumination(
    material: &Material,
    lights: &[Light],
    time: f32,
    p: Vec3,
    normal: Vec3,
    eye: Vec3,
) -> Vec3 {
    lights
        .iter()
        .fold(AMBIENT_LIGHT * material.ambient, |color, light| {
            color
                + phong_contrib_for_light(
                    material,
                    p,
                    normal,
                    eye,
                    light.position(time),
                    light.intensity,
                )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NUT_MATERIAL, SCENE_LIGHTS};

    const WHITE: Vec3 = Vec3::splat(0.6);

    #[test]
    fn light_behind_the_surface_contributes_nothing() {
        let contrib = phong_contrib_for_light(
            &NUT_MATERIAL,
            Vec3::ZERO,
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(3.0, -2.0, 0.0),
            Vec3::new(0.0, 5.0, 0.0),
            WHITE,
        );
        assert_eq!(contrib, Vec3::ZERO);
    }

    #[test]
    fn specular_drops_when_reflection_faces_away() {
        let light = Vec3::new(1.0, 1.0, 0.0);
        let contrib = phong_contrib_for_light(
            &NUT_MATERIAL,
            Vec3::ZERO,
            Vec3::Y,
            Vec3::new(1.0, -1.0, 0.0),
            light,
            WHITE,
        );
        let dot_ln = light.normalize().dot(Vec3::Y);
        let expected = WHITE * (NUT_MATERIAL.diffuse * dot_ln);
        assert!((contrib - expected).length() < 1.0e-5);
    }

    #[test]
    fn mirror_direction_gets_full_highlight() {
        let contrib = phong_contrib_for_light(
            &NUT_MATERIAL,
            Vec3::ZERO,
            Vec3::Y,
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            WHITE,
        );
        let dot_ln = std::f32::consts::FRAC_1_SQRT_2;
        let expected = WHITE * ((NUT_MATERIAL.diffuse * dot_ln) + NUT_MATERIAL.specular);
        assert!((contrib - expected).length() < 1.0e-4);
    }

    #[test]
    fn unlit_point_keeps_the_ambient_term() {
        // Both lights sit above y = -10 at any time, so a downward face sees neither.
        let p = Vec3::new(0.0, -10.0, 0.0);
        let color = phong_illumination(
            &NUT_MATERIAL,
            &SCENE_LIGHTS,
            1.3,
            p,
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(8.0, 5.0, 7.0),
        );
        assert!((color - Vec3::splat(0.1)).length() < 1.0e-6);
    }
}
