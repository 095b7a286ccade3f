/// WebGL2 drawing surface for the cube scene
use cubeview_core::geometry::FLOATS_PER_VERTEX;
use cubeview_core::{DrawSurface, Mesh, Scene, Viewport};
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::error::WebError;

const VERT_SRC: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform mat3 u_normal_matrix;

out vec3 v_normal;

void main() {
    v_normal = normalize(u_normal_matrix * a_normal);
    gl_Position = u_projection * u_view * u_model * vec4(a_position, 1.0);
}
"#;

// Hemisphere lighting, same formula as HemisphereLight::irradiance
const FRAG_SRC: &str = r#"#version 300 es
precision mediump float;

in vec3 v_normal;

uniform vec3 u_color;
uniform vec3 u_sky;
uniform vec3 u_ground;
uniform float u_intensity;

out vec4 o_color;

void main() {
    vec3 n = normalize(v_normal);
    float weight = 0.5 * n.y + 0.5;
    vec3 irradiance = mix(u_ground, u_sky, weight) * u_intensity;
    o_color = vec4(u_color * irradiance, 1.0);
}
"#;

const POSITION_LOCATION: u32 = 0;
const NORMAL_LOCATION: u32 = 1;

struct Uniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    normal_matrix: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    sky: Option<WebGlUniformLocation>,
    ground: Option<WebGlUniformLocation>,
    intensity: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        Self {
            model: gl.get_uniform_location(program, "u_model"),
            view: gl.get_uniform_location(program, "u_view"),
            projection: gl.get_uniform_location(program, "u_projection"),
            normal_matrix: gl.get_uniform_location(program, "u_normal_matrix"),
            color: gl.get_uniform_location(program, "u_color"),
            sky: gl.get_uniform_location(program, "u_sky"),
            ground: gl.get_uniform_location(program, "u_ground"),
            intensity: gl.get_uniform_location(program, "u_intensity"),
        }
    }
}

/// Renders the scene into a `<canvas>` through WebGL2
pub struct WebGlSurface {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    // Kept alive for the VAO
    _vbo: WebGlBuffer,
    vertex_count: i32,
    uniforms: Uniforms,
    size: Viewport,
}

impl WebGlSurface {
    /// Compile the shaders and upload `mesh` once; it never changes afterwards
    pub fn new(canvas: HtmlCanvasElement, mesh: &Mesh) -> Result<Self, WebError> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or(WebError::WebGl2Unsupported)?
            .dyn_into()
            .map_err(|_| WebError::WebGl2Unsupported)?;

        let program = link_program(&gl, VERT_SRC, FRAG_SRC)?;
        let uniforms = Uniforms::locate(&gl, &program);

        let vao = gl
            .create_vertex_array()
            .ok_or(WebError::Create("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let vbo = gl.create_buffer().ok_or(WebError::Create("vertex buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vbo));
        let data = js_sys::Float32Array::from(mesh.interleaved().as_slice());
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);

        let stride = (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as i32;
        gl.enable_vertex_attrib_array(POSITION_LOCATION);
        gl.vertex_attrib_pointer_with_i32(POSITION_LOCATION, 3, GL::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(NORMAL_LOCATION);
        gl.vertex_attrib_pointer_with_i32(NORMAL_LOCATION, 3, GL::FLOAT, false, stride, stride / 2);
        gl.bind_vertex_array(None);

        gl.enable(GL::DEPTH_TEST);
        gl.enable(GL::CULL_FACE);

        let size = Viewport::new(canvas.width(), canvas.height());
        Ok(Self {
            canvas,
            gl,
            program,
            vao,
            _vbo: vbo,
            vertex_count: mesh.vertex_count() as i32,
            uniforms,
            size,
        })
    }

    pub fn size(&self) -> Viewport {
        self.size
    }
}

impl DrawSurface for WebGlSurface {
    type Error = WebError;

    fn set_size(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);

        // Keep the CSS size in step with the drawing buffer
        let style = self.canvas.style();
        let width = format!("{}px", viewport.width);
        let height = format!("{}px", viewport.height);
        if let Err(err) = style
            .set_property("width", &width)
            .and_then(|_| style.set_property("height", &height))
        {
            log::warn!("could not size canvas: {err:?}");
        }

        self.gl
            .viewport(0, 0, viewport.width as i32, viewport.height as i32);
        self.size = viewport;
    }

    fn draw(&mut self, scene: &Scene) -> Result<(), WebError> {
        let gl = &self.gl;
        if gl.is_context_lost() {
            return Err(WebError::ContextLost);
        }

        let background = scene.background;
        gl.clear_color(background.r, background.g, background.b, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));

        let uniforms = &self.uniforms;
        let model = scene.cube.transform.model_matrix();
        let normal_matrix = scene.cube.transform.normal_matrix();
        let view = scene.camera.view_matrix();
        gl.uniform_matrix4fv_with_f32_array(uniforms.model.as_ref(), false, model.as_slice());
        gl.uniform_matrix4fv_with_f32_array(uniforms.view.as_ref(), false, view.as_slice());
        gl.uniform_matrix4fv_with_f32_array(
            uniforms.projection.as_ref(),
            false,
            scene.camera.projection_matrix().as_slice(),
        );
        gl.uniform_matrix3fv_with_f32_array(
            uniforms.normal_matrix.as_ref(),
            false,
            normal_matrix.as_slice(),
        );

        let color = scene.cube.color;
        let light = &scene.light;
        gl.uniform3f(uniforms.color.as_ref(), color.r, color.g, color.b);
        gl.uniform3f(uniforms.sky.as_ref(), light.sky.r, light.sky.g, light.sky.b);
        gl.uniform3f(uniforms.ground.as_ref(), light.ground.r, light.ground.g, light.ground.b);
        gl.uniform1f(uniforms.intensity.as_ref(), light.intensity);

        gl.draw_arrays(GL::TRIANGLES, 0, self.vertex_count);
        gl.bind_vertex_array(None);

        Ok(())
    }
}

fn compile_shader(gl: &GL, src: &str, shader_type: u32) -> Result<WebGlShader, WebError> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or(WebError::Create("shader"))?;
    gl.shader_source(&shader, src);
    gl.compile_shader(&shader);
    if !gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        return Err(WebError::ShaderCompile(log));
    }
    Ok(shader)
}

fn link_program(gl: &GL, vert_src: &str, frag_src: &str) -> Result<WebGlProgram, WebError> {
    let vert = compile_shader(gl, vert_src, GL::VERTEX_SHADER)?;
    let frag = compile_shader(gl, frag_src, GL::FRAGMENT_SHADER)?;
    let program = gl.create_program().ok_or(WebError::Create("program"))?;
    gl.attach_shader(&program, &vert);
    gl.attach_shader(&program, &frag);
    gl.link_program(&program);

    // Shaders are no longer needed once linked
    gl.delete_shader(Some(&vert));
    gl.delete_shader(Some(&frag));

    if !gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        return Err(WebError::ProgramLink(
            gl.get_program_info_log(&program).unwrap_or_default(),
        ));
    }
    Ok(program)
}
