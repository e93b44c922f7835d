//! Off-screen RGBA backbuffer sized to the window's physical client area
//!
//! A resize either completes fully (memory, dimensions, stride and header
//! all describe the new buffer) or leaves everything untouched. The old
//! allocation is dropped only after the new one is installed.

use std::fmt;

use thiserror::Error;

use super::pixels::PhysicalSize;

/// Bytes per pixel (one byte each for R, G, B, A)
pub const BYTES_PER_PIXEL: u32 = 4;

/// Backbuffer resize failure. The previous buffer is still in place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackbufferError {
    #[error("failed to allocate {bytes} bytes for the backbuffer")]
    AllocationFailed { bytes: usize },

    #[error("backbuffer of {width}x{height} pixels does not fit in memory")]
    TooLarge { width: u32, height: u32 },

    #[error("backbuffer extent {width}x{height} has no area")]
    EmptyExtent { width: u32, height: u32 },
}

/// Framebuffer accessor failure
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferError {
    #[error("no backbuffer is currently allocated")]
    NoBackbuffer,
}

impl FramebufferError {
    /// Non-zero status code for callers that use 0 = success
    pub fn code(&self) -> i32 {
        match self {
            FramebufferError::NoBackbuffer => 1,
        }
    }
}

/// Source of zero-initialised pixel memory
pub trait PixelAllocator {
    fn allocate(&mut self, len: usize) -> Result<Box<[u8]>, BackbufferError>;
}

/// Allocates from the process heap, reporting failure instead of aborting
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapAllocator;

impl PixelAllocator for HeapAllocator {
    fn allocate(&mut self, len: usize) -> Result<Box<[u8]>, BackbufferError> {
        let mut memory = Vec::new();
        memory
            .try_reserve_exact(len)
            .map_err(|_| BackbufferError::AllocationFailed { bytes: len })?;
        memory.resize(len, 0);
        Ok(memory.into_boxed_slice())
    }
}

/// Image description handed to the blitter alongside the pixels.
///
/// `height` is negative: rows are stored top-down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
}

impl ImageHeader {
    fn top_down(size: PhysicalSize) -> Self {
        Self {
            width: size.width as i32,
            height: -(size.height as i32),
            planes: 1,
            bit_count: (BYTES_PER_PIXEL * 8) as u16,
        }
    }

    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }
}

/// Mutable view of the active backbuffer for rendering code
#[derive(Debug)]
pub struct Framebuffer<'a> {
    pub pixels: &'a mut [u8],
    pub width: u32,
    pub height: u32,
    pub stride: u32,
}

impl Framebuffer<'_> {
    /// Address of the first byte of the top-left pixel
    pub fn base(&mut self) -> *mut u8 {
        self.pixels.as_mut_ptr()
    }

    /// Bytes of one row
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride as usize;
        let end = start + self.width as usize * BYTES_PER_PIXEL as usize;
        self.pixels.get_mut(start..end)
    }
}

/// Off-screen pixel buffer owned by the window state
pub struct Backbuffer {
    memory: Option<Box<[u8]>>,
    width: u32,
    height: u32,
    stride: u32,
    header: ImageHeader,
    allocator: Box<dyn PixelAllocator>,
}

impl Backbuffer {
    /// Empty backbuffer drawing memory from the heap
    pub fn new() -> Self {
        Self::with_allocator(Box::new(HeapAllocator))
    }

    /// Empty backbuffer drawing memory from `allocator`
    pub fn with_allocator(allocator: Box<dyn PixelAllocator>) -> Self {
        Self {
            memory: None,
            width: 0,
            height: 0,
            stride: 0,
            header: ImageHeader::default(),
            allocator,
        }
    }

    /// Make the buffer match `size` physical pixels.
    ///
    /// Same size with a live buffer is a no-op. On error nothing changes.
    pub fn resize(&mut self, size: PhysicalSize) -> Result<(), BackbufferError> {
        if self.memory.is_some() && size == self.size() {
            return Ok(());
        }
        if size.is_empty() {
            return Err(BackbufferError::EmptyExtent {
                width: size.width,
                height: size.height,
            });
        }

        let too_large = BackbufferError::TooLarge {
            width: size.width,
            height: size.height,
        };
        // The image header carries signed extents
        if size.width > i32::MAX as u32 || size.height > i32::MAX as u32 {
            return Err(too_large);
        }
        let stride = size
            .width
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(|| too_large.clone())?;
        let bytes = (stride as usize)
            .checked_mul(size.height as usize)
            .filter(|&b| b <= isize::MAX as usize)
            .ok_or(too_large)?;

        let memory = self.allocator.allocate(bytes)?;

        let previous = self.memory.replace(memory);
        self.width = size.width;
        self.height = size.height;
        self.stride = stride;
        self.header = ImageHeader::top_down(size);
        drop(previous);
        Ok(())
    }

    /// Free the buffer. Returns true if memory was released.
    pub fn release(&mut self) -> bool {
        let released = self.memory.take().is_some();
        self.width = 0;
        self.height = 0;
        self.stride = 0;
        self.header = ImageHeader::default();
        released
    }

    pub fn is_allocated(&self) -> bool {
        self.memory.is_some()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn size(&self) -> PhysicalSize {
        PhysicalSize::new(self.width, self.height)
    }

    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    /// Pixel bytes, if allocated
    pub fn pixels(&self) -> Option<&[u8]> {
        self.memory.as_deref()
    }

    /// Address of the buffer, or null when none is allocated
    pub fn as_ptr(&self) -> *const u8 {
        self.memory
            .as_deref()
            .map_or(std::ptr::null(), |m| m.as_ptr())
    }

    /// Describe the active buffer to rendering code
    pub fn framebuffer(&mut self) -> Result<Framebuffer<'_>, FramebufferError> {
        let pixels = self
            .memory
            .as_deref_mut()
            .ok_or(FramebufferError::NoBackbuffer)?;
        Ok(Framebuffer {
            pixels,
            width: self.width,
            height: self.height,
            stride: self.stride,
        })
    }
}

impl Default for Backbuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Backbuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backbuffer")
            .field("allocated", &self.is_allocated())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("header", &self.header)
            .finish()
    }
}
