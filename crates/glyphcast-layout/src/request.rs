//! Layout parameters

use crate::{LayoutError, Result};

/// Width available to the text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ContainerWidth {
    /// Wrap at this many CSS pixels
    Bounded(f32),
    /// Never wrap; only `\n` starts a new line
    #[default]
    Unbounded,
}

/// Parameters fixed for one layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRequest {
    /// Font size in CSS pixels
    pub font_size: f32,
    /// Container width in CSS pixels
    pub width: ContainerWidth,
    /// Device pixels per CSS pixel
    pub pixel_ratio: f32,
}

impl LayoutRequest {
    /// Request wrapping at `width`
    pub fn new(font_size: f32, width: f32) -> Self {
        Self {
            font_size,
            width: ContainerWidth::Bounded(width),
            pixel_ratio: 1.0,
        }
    }

    /// Request without wrapping
    pub fn unbounded(font_size: f32) -> Self {
        Self {
            font_size,
            width: ContainerWidth::Unbounded,
            pixel_ratio: 1.0,
        }
    }

    /// Set the device pixel ratio
    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Reject sizes that are zero, negative or not finite
    pub fn validate(&self) -> Result<()> {
        check_positive("font_size", self.font_size)?;
        check_positive("pixel_ratio", self.pixel_ratio)?;
        if let ContainerWidth::Bounded(width) = self.width {
            check_positive("container_width", width)?;
        }
        Ok(())
    }

    /// Font size in device pixels
    pub fn device_font_size(&self) -> f32 {
        self.font_size * self.pixel_ratio
    }

    /// Container width in device pixels, infinite when unbounded
    pub fn device_width(&self) -> f32 {
        match self.width {
            ContainerWidth::Bounded(width) => width * self.pixel_ratio,
            ContainerWidth::Unbounded => f32::INFINITY,
        }
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidParameter { name, value })
    }
}
