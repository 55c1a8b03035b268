//! GLSL ES 3.00 sources for the two shader pairs.
//!
//! The fill pair paints solid red; the composite pair samples the
//! offscreen texture. Two composite fragment variants exist because the
//! alpha policy is chosen at pipeline setup: one passes the sampled
//! alpha through, the other overrides it with the `uAlpha` uniform.

/// Vertex shader shared by both fill variants: positions arrive already
/// in clip space.
pub const FILL_VERTEX_SHADER: &str = r#"#version 300 es
in vec2 aVertexPosition;
void main() {
    gl_Position = vec4(aVertexPosition, 0.0, 1.0);
}
"#;

/// Fragment shader for the fill pass: opaque red everywhere.
pub const FILL_FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
out vec4 fragColor;
void main() {
    fragColor = vec4(1.0, 0.0, 0.0, 1.0);
}
"#;

/// Vertex shader for the composite pass: forwards UVs alongside the
/// clip-space position.
pub const COMPOSITE_VERTEX_SHADER: &str = r#"#version 300 es
in vec2 aVertexPosition;
in vec2 aTextureCoord;
out vec2 vTextureCoord;
void main() {
    gl_Position = vec4(aVertexPosition, 0.0, 1.0);
    vTextureCoord = aTextureCoord;
}
"#;

/// Composite fragment shader that samples the offscreen texture and
/// passes its alpha through unchanged.
pub const COMPOSITE_FRAGMENT_SHADER_OPAQUE: &str = r#"#version 300 es
precision mediump float;
in vec2 vTextureCoord;
uniform sampler2D uSampler;
out vec4 fragColor;
void main() {
    fragColor = texture(uSampler, vTextureCoord);
}
"#;

/// Composite fragment shader that overrides the sampled alpha with the
/// `uAlpha` uniform, for blended compositing.
pub const COMPOSITE_FRAGMENT_SHADER_FIXED_ALPHA: &str = r#"#version 300 es
precision mediump float;
in vec2 vTextureCoord;
uniform sampler2D uSampler;
uniform float uAlpha;
out vec4 fragColor;
void main() {
    fragColor = vec4(texture(uSampler, vTextureCoord).rgb, uAlpha);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [&str; 5] = [
        FILL_VERTEX_SHADER,
        FILL_FRAGMENT_SHADER,
        COMPOSITE_VERTEX_SHADER,
        COMPOSITE_FRAGMENT_SHADER_OPAQUE,
        COMPOSITE_FRAGMENT_SHADER_FIXED_ALPHA,
    ];

    #[test]
    fn every_shader_declares_glsl_es_300() {
        for source in ALL {
            assert!(
                source.starts_with("#version 300 es"),
                "missing version directive in:\n{source}"
            );
        }
    }

    #[test]
    fn every_shader_has_a_main_function() {
        for source in ALL {
            assert!(source.contains("void main()"), "missing main in:\n{source}");
        }
    }

    #[test]
    fn vertex_shaders_declare_the_position_attribute() {
        assert!(FILL_VERTEX_SHADER.contains("in vec2 aVertexPosition"));
        assert!(COMPOSITE_VERTEX_SHADER.contains("in vec2 aVertexPosition"));
    }

    #[test]
    fn composite_vertex_shader_forwards_texture_coords() {
        assert!(COMPOSITE_VERTEX_SHADER.contains("in vec2 aTextureCoord"));
        assert!(COMPOSITE_VERTEX_SHADER.contains("out vec2 vTextureCoord"));
    }

    #[test]
    fn fill_fragment_shader_writes_opaque_red() {
        assert!(FILL_FRAGMENT_SHADER.contains("vec4(1.0, 0.0, 0.0, 1.0)"));
    }

    #[test]
    fn composite_fragment_shaders_sample_unit_zero_sampler() {
        assert!(COMPOSITE_FRAGMENT_SHADER_OPAQUE.contains("uniform sampler2D uSampler"));
        assert!(COMPOSITE_FRAGMENT_SHADER_FIXED_ALPHA.contains("uniform sampler2D uSampler"));
    }

    #[test]
    fn only_the_fixed_alpha_variant_declares_ualpha() {
        assert!(COMPOSITE_FRAGMENT_SHADER_FIXED_ALPHA.contains("uniform float uAlpha"));
        assert!(!COMPOSITE_FRAGMENT_SHADER_OPAQUE.contains("uAlpha"));
    }
}
