//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// 0xRRGGBB to RGBA
    pub const fn rgb(hex: u32) -> [f32; 4] {
        rgba(hex, 1.0)
    }

    pub const fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
        [
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
            alpha,
        ]
    }

    /// Same color, new alpha
    pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha]
    }

    /// Parse a CSS-style `#rrggbb` (or `rrggbb`) string
    pub fn parse_hex(s: &str) -> Option<[f32; 4]> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(rgb)
    }

    pub const ROAD: [f32; 4] = rgb(0x1c1c1c);
    pub const GRASS: [f32; 4] = rgb(0x064e3b);
    pub const LANE_MARKING: [f32; 4] = rgb(0x444444);
    pub const EDGE_LINE: [f32; 4] = rgb(0xfbbf24);
    pub const CAR_SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.4];
    pub const WINDOW: [f32; 4] = rgb(0x111111);
    pub const SPOILER: [f32; 4] = rgb(0x000000);
    pub const RACING_STRIPE: [f32; 4] = [1.0, 1.0, 1.0, 0.2];
    pub const ROOF_OUTLINE: [f32; 4] = [0.0, 0.0, 0.0, 0.1];
    pub const BOOST_FLAME: [f32; 4] = rgb(0xf97316);
    pub const PLAYER_HEADLIGHT: [f32; 4] = rgb(0xfef08a);
    pub const HEADLIGHT: [f32; 4] = rgb(0xffffff);
    pub const TAIL_LIGHT: [f32; 4] = rgb(0xef4444);
    pub const BOOST_STREAK: [f32; 4] = rgb(0xfb923c);
    pub const SPEED_STREAK: [f32; 4] = rgb(0xffffff);
    /// Player paint when the host supplies none (Velocity Red)
    pub const DEFAULT_PLAYER: [f32; 4] = rgb(0xdc2626);
    pub const BACKGROUND: [f32; 4] = rgb(0x000000);
}
