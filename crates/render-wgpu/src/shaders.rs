/// WGSL for the fullscreen background plane. One premultiplied MVP; the
/// texture is sampled bilinearly with no mipmaps.
pub const BACKGROUND_SHADER: &str = r#"
struct BackgroundUniforms {
    mvp: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: BackgroundUniforms;
@group(0) @binding(1)
var bg_texture: texture_2d<f32>;
@group(0) @binding(2)
var bg_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.mvp * vec4<f32>(vertex.position, 1.0);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(bg_texture, bg_sampler, in.uv);
}
"#;

/// WGSL for the backface capture: inverted culling is configured on the
/// pipeline, the fragment stage just writes the world-space normal.
pub const BACKFACE_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    resolution: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    var out: VertexOutput;
    out.clip_position = globals.view_proj * model * vec4<f32>(vertex.position, 1.0);
    out.world_normal = normalize((model * vec4<f32>(vertex.normal, 0.0)).xyz);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(normalize(in.world_normal), 1.0);
}
"#;

/// WGSL for the refraction pass. Screen-space: the fragment position indexes
/// both captures, the backface normal bends the front-face normal, and the
/// refracted ray offsets the env sample.
pub const REFRACTION_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    resolution: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;
@group(1) @binding(0)
var env_map: texture_2d<f32>;
@group(1) @binding(1)
var backface_map: texture_2d<f32>;
@group(1) @binding(2)
var map_sampler: sampler;

const IOR: f32 = 2.4;
const BACKFACE_BLEND: f32 = 0.33;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) eye_vector: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = globals.view_proj * world_pos;
    out.world_normal = normalize((model * vec4<f32>(vertex.normal, 0.0)).xyz);
    out.eye_vector = normalize(world_pos.xyz - globals.camera_pos.xyz);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let uv = in.clip_position.xy / globals.resolution.xy;
    let backface_normal = textureSample(backface_map, map_sampler, uv).xyz;

    // Blend the entry normal with the captured exit normal, then bend the
    // view ray once for the whole slab.
    let normal = normalize(
        normalize(in.world_normal) * (1.0 - BACKFACE_BLEND) - backface_normal * BACKFACE_BLEND,
    );
    let refracted = refract(normalize(in.eye_vector), normal, 1.0 / IOR);
    let env = textureSample(env_map, map_sampler, uv + refracted.xy);

    return vec4<f32>(env.rgb, 1.0);
}
"#;
