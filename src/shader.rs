//! Shader programs.
//!
//! [`Shader`] is a vertex + fragment program and [`ComputeShader`] a compute
//! program. Both follow the same steps: read the WGSL source (from a string or
//! from the assets directory), compile each stage, link the stages into a
//! pipeline and report anything that went wrong on the way.
//!
//! A source file that cannot be read is logged and compiled as an empty
//! module. That module has no entry points, so linking fails and the caller
//! gets a [`ShaderError::Link`] describing the missing stage.

use std::fmt;

use crate::{
    pipelines::{
        basic::{RenderState, mk_pipeline_layout, mk_render_pipeline},
        compute::mk_compute_pipeline,
    },
    resources,
};

const LOG_SEPARATOR: &str = " -- --------------------------------------------------- -- ";

/// A programmable pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
    Compute,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => f.write_str("VERTEX"),
            Stage::Fragment => f.write_str("FRAGMENT"),
            Stage::Compute => f.write_str("COMPUTE"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("shader compilation error of type {stage} in {label}:\n{message}")]
    Compilation {
        label: String,
        stage: Stage,
        message: String,
    },
    #[error("program linking error in {label}:\n{message}")]
    Link { label: String, message: String },
}

/// Read a shader source from the assets directory.
///
/// Failures are logged and yield an empty source.
pub async fn read_source(path: &str) -> String {
    match resources::load_string(path).await {
        Ok(source) => source,
        Err(e) => {
            log::error!("Shader file {path} was not successfully read: {e:#}");
            String::new()
        }
    }
}

/// Compile one WGSL stage, returning the module or the compiler's diagnostics.
pub async fn compile_stage(
    device: &wgpu::Device,
    label: &str,
    stage: Stage,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{label} ({stage})")),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let scope_error = device.pop_error_scope().await;

    let info = module.get_compilation_info().await;
    let mut errors = Vec::new();
    for message in info.messages {
        match message.message_type {
            wgpu::CompilationMessageType::Error => errors.push(message.message),
            wgpu::CompilationMessageType::Warning => {
                log::warn!("{label} ({stage}): {}", message.message)
            }
            _ => {
                log::debug!("{label} ({stage}): {}", message.message)
            }
        }
    }
    if errors.is_empty() {
        if let Some(e) = scope_error {
            errors.push(e.to_string());
        }
    }

    if errors.is_empty() {
        Ok(module)
    } else {
        let message = errors.join("\n");
        log::error!(
            "Shader compilation error of type {stage} in {label}\n{message}\n{LOG_SEPARATOR}"
        );
        Err(ShaderError::Compilation {
            label: label.to_string(),
            stage,
            message,
        })
    }
}

/// Run `create` inside a validation scope and turn a captured error into a link error.
async fn link<T>(
    device: &wgpu::Device,
    label: &str,
    create: impl FnOnce() -> T,
) -> Result<T, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let program = create();
    match device.pop_error_scope().await {
        None => Ok(program),
        Some(e) => {
            let message = e.to_string();
            log::error!("Program linking error in {label}\n{message}\n{LOG_SEPARATOR}");
            Err(ShaderError::Link {
                label: label.to_string(),
                message,
            })
        }
    }
}

/// A linked vertex + fragment program.
///
/// The vertex stage must export `vs_main` and the fragment stage `fs_main`.
#[derive(Debug)]
pub struct Shader {
    pub label: String,
    pub pipeline: wgpu::RenderPipeline,
}

impl Shader {
    /// Compile a program whose stages both live in `source`.
    pub async fn from_source(
        device: &wgpu::Device,
        label: &str,
        source: &str,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        vertex_layouts: &[wgpu::VertexBufferLayout<'_>],
        state: &RenderState,
    ) -> Result<Self, ShaderError> {
        Self::from_sources(
            device,
            label,
            source,
            source,
            bind_group_layouts,
            vertex_layouts,
            state,
        )
        .await
    }

    /// Compile a program from a separate vertex and fragment source.
    pub async fn from_sources(
        device: &wgpu::Device,
        label: &str,
        vertex_source: &str,
        fragment_source: &str,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        vertex_layouts: &[wgpu::VertexBufferLayout<'_>],
        state: &RenderState,
    ) -> Result<Self, ShaderError> {
        let vertex = compile_stage(device, label, Stage::Vertex, vertex_source).await?;
        let fragment = compile_stage(device, label, Stage::Fragment, fragment_source).await?;

        let layout = mk_pipeline_layout(device, label, bind_group_layouts);
        let pipeline = link(device, label, || {
            mk_render_pipeline(
                device,
                label,
                &layout,
                &vertex,
                &fragment,
                vertex_layouts,
                state,
            )
        })
        .await?;

        Ok(Self {
            label: label.to_string(),
            pipeline,
        })
    }

    /// Read both stages from the assets directory and compile them.
    pub async fn load(
        device: &wgpu::Device,
        vertex_path: &str,
        fragment_path: &str,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        vertex_layouts: &[wgpu::VertexBufferLayout<'_>],
        state: &RenderState,
    ) -> Result<Self, ShaderError> {
        let vertex_source = read_source(vertex_path).await;
        let fragment_source = read_source(fragment_path).await;
        Self::from_sources(
            device,
            vertex_path,
            &vertex_source,
            &fragment_source,
            bind_group_layouts,
            vertex_layouts,
            state,
        )
        .await
    }

    /// Make this program the active one for the following draws.
    pub fn use_program(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
    }
}

/// A linked compute program exporting `cs_main`.
#[derive(Debug)]
pub struct ComputeShader {
    pub label: String,
    pub pipeline: wgpu::ComputePipeline,
}

impl ComputeShader {
    pub async fn from_source(
        device: &wgpu::Device,
        label: &str,
        source: &str,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
    ) -> Result<Self, ShaderError> {
        let module = compile_stage(device, label, Stage::Compute, source).await?;
        let layout = mk_pipeline_layout(device, label, bind_group_layouts);
        let pipeline = link(device, label, || {
            mk_compute_pipeline(device, label, &layout, &module)
        })
        .await?;
        Ok(Self {
            label: label.to_string(),
            pipeline,
        })
    }

    pub async fn load(
        device: &wgpu::Device,
        compute_path: &str,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
    ) -> Result<Self, ShaderError> {
        let source = read_source(compute_path).await;
        Self::from_source(device, compute_path, &source, bind_group_layouts).await
    }

    pub fn use_program(&self, compute_pass: &mut wgpu::ComputePass<'_>) {
        compute_pass.set_pipeline(&self.pipeline);
    }

    /// Record one compute pass that runs this program over `workgroups`.
    ///
    /// Bind groups are bound in order starting at group 0. Later passes in the
    /// same submission see everything this dispatch wrote.
    pub fn dispatch(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        bind_groups: &[&wgpu::BindGroup],
        workgroups: [u32; 3],
    ) {
        let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some(&self.label),
            timestamp_writes: None,
        });
        self.use_program(&mut compute_pass);
        for (index, group) in bind_groups.iter().enumerate() {
            compute_pass.set_bind_group(index as u32, *group, &[]);
        }
        let [x, y, z] = workgroups;
        compute_pass.dispatch_workgroups(x, y, z);
    }
}
