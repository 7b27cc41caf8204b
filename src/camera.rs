//! A fly-through camera driven by Euler angles.
//!
//! - [`Camera`] keeps position, orientation (yaw/pitch) and field of view
//! - [`Projection`] turns the field of view into a perspective matrix
//! - [`CameraUniform`] is the `view_proj` matrix as the shaders see it
//! - [`CameraController`] maps keyboard, mouse and scroll input onto a camera

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};
use winit::{
    event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

pub const YAW: f32 = -90.0;
pub const PITCH: f32 = 0.0;
pub const SPEED: f32 = 2.5;
pub const SENSITIVITY: f32 = 0.1;
pub const ZOOM: f32 = 45.0;
/// Pitch is kept inside +/- this many degrees so the view never flips.
pub const PITCH_LIMIT: f32 = 89.0;

/// cgmath builds OpenGL clip space (z in [-1, 1]); wgpu expects z in [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Directions the camera can move in, independent of any input device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Point3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    world_up: Vector3<f32>,
    // angles in degrees
    yaw: f32,
    pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
    fov: f32,
    max_fov: f32,
}

impl Camera {
    pub fn new<P: Into<Point3<f32>>>(
        position: P,
        world_up: Vector3<f32>,
        yaw: f32,
        pitch: f32,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            front: Vector3::new(0.0, 0.0, -1.0),
            up: world_up,
            right: Vector3::unit_x(),
            world_up,
            yaw,
            pitch,
            speed: SPEED,
            sensitivity: SENSITIVITY,
            fov: ZOOM,
            max_fov: ZOOM,
        };
        camera.update_vectors();
        camera
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Upper bound for [`Camera::zoom`]. The current fov is clamped to it.
    pub fn set_max_fov(mut self, max_fov: f32) -> Self {
        self.max_fov = max_fov.max(1.0);
        self.fov = self.fov.min(self.max_fov);
        self
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    /// Move along the camera's own axes for `dt` seconds.
    pub fn move_in(&mut self, direction: Movement, dt: f32) {
        let velocity = self.speed * dt;
        match direction {
            Movement::Forward => self.position += self.front * velocity,
            Movement::Backward => self.position -= self.front * velocity,
            Movement::Left => self.position -= self.right * velocity,
            Movement::Right => self.position += self.right * velocity,
        }
    }

    /// Turn by a mouse offset (in pixels), scaled by `sensitivity`.
    pub fn rotate(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.sensitivity;
        self.pitch += y_offset * self.sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.update_vectors();
    }

    /// Narrow (positive offset) or widen the field of view, within `1..=max_fov`.
    pub fn zoom(&mut self, y_offset: f32) {
        self.fov = (self.fov - y_offset).clamp(1.0, self.max_fov);
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        // Normalize, the cross product shrinks the closer front gets to world_up.
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new((0.0, 0.0, 0.0), Vector3::unit_y(), YAW, PITCH)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Projection {
    aspect: f32,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Perspective matrix for a vertical field of view of `fovy` degrees.
    pub fn calc_matrix(&self, fovy: f32) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX
            * perspective(Rad::from(cgmath::Deg(fovy)), self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_proj = (projection.calc_matrix(camera.fov()) * camera.view_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects input between frames and applies it to a [`Camera`] in `update`.
#[derive(Debug, Default)]
pub struct CameraController {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    mouse_dx: f32,
    mouse_dy: f32,
    scroll: f32,
    /// Only turn the camera while the right mouse button is held.
    looking: bool,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the key was consumed.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;
        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => {
                self.forward = pressed;
                true
            }
            KeyCode::KeyS | KeyCode::ArrowDown => {
                self.backward = pressed;
                true
            }
            KeyCode::KeyA | KeyCode::ArrowLeft => {
                self.left = pressed;
                true
            }
            KeyCode::KeyD | KeyCode::ArrowRight => {
                self.right = pressed;
                true
            }
            _ => false,
        }
    }

    /// Mouse movement in pixels; y grows downwards like window coordinates.
    pub fn process_mouse(&mut self, dx: f64, dy: f64) {
        if self.looking {
            self.mouse_dx += dx as f32;
            // reversed since window y-coordinates go from top to bottom
            self.mouse_dy -= dy as f32;
        }
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => *y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
        };
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                self.process_keyboard(*key, *state);
            }
            WindowEvent::MouseWheel { delta, .. } => self.process_scroll(delta),
            WindowEvent::MouseInput {
                state,
                button: winit::event::MouseButton::Right,
                ..
            } => self.looking = state.is_pressed(),
            _ => {}
        }
    }

    pub fn update(&mut self, camera: &mut Camera, dt: f32) {
        for (held, direction) in [
            (self.forward, Movement::Forward),
            (self.backward, Movement::Backward),
            (self.left, Movement::Left),
            (self.right, Movement::Right),
        ] {
            if held {
                camera.move_in(direction, dt);
            }
        }

        if self.mouse_dx != 0.0 || self.mouse_dy != 0.0 {
            camera.rotate(self.mouse_dx, self.mouse_dy, true);
            self.mouse_dx = 0.0;
            self.mouse_dy = 0.0;
        }

        if self.scroll != 0.0 {
            camera.zoom(self.scroll);
            self.scroll = 0.0;
        }
    }
}
